use tracing::Level;

// json log lines, falls back to INFO for an unknown level
pub fn setup_tracing(log_level: &str) {
    let level = log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // ansi color codes show up as noise in CloudWatch logs.
        .with_ansi(false)
        .json()
        .init();
}
