use chrono::{DateTime, SubsecRound, Utc};

// ISO-8601 in UTC with millisecond precision, e.g. 2024-05-01T10:20:30.123Z
pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

// Clock supplies timestamps for insertedAt/updatedAt
pub(crate) trait Clock: Sync + Send {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        // stored values carry the same precision as their text form
        Utc::now().trunc_subsecs(3)
    }
}

pub mod serializer {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(Utc.from_utc_datetime(&time))
    }

    pub(crate) fn time_to_json(t: &DateTime<Utc>) -> String {
        t.format(DATE_FMT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike, Utc};
    use serde::{Deserialize, Serialize};
    use crate::utils::date::{Clock, SystemClock, serializer};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "serializer")]
        at: chrono::DateTime<Utc>,
    }

    #[tokio::test]
    async fn test_should_format_iso_millis() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap()
            .with_nanosecond(123_000_000).unwrap();
        let json = serde_json::to_string(&Stamped { at }).expect("should serialize");
        assert_eq!(r#"{"at":"2024-05-01T10:20:30.123Z"}"#, json);
        let parsed: Stamped = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(at, parsed.at);
    }

    #[tokio::test]
    async fn test_should_truncate_system_clock() {
        let now = SystemClock.now();
        assert_eq!(0, now.nanosecond() % 1_000_000);
    }
}
