//! Defaults and environment variable names for the command line.

pub const DEFAULT_STORE_NAME: &str = "SuperMart";
pub const DEFAULT_CAPITAL: &str = "100000.00";
pub const DEFAULT_LOG_FORMAT: &str = "json";

pub const ENV_STORE_NAME: &str = "STOCKROOM_NAME";
pub const ENV_CAPITAL: &str = "STOCKROOM_CAPITAL";
pub const ENV_LOG_FORMAT: &str = "STOCKROOM_LOG_FORMAT";
