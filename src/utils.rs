pub mod date;
pub mod ids;
pub mod logging;
