pub mod config;
pub mod dump;
pub mod idle;
pub mod logging;
pub mod probe;
pub mod report;
