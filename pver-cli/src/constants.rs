pub const PVER_CLI: &str = "pver";
pub const DEFAULT_LOG_FILTER: &str = "warn";
