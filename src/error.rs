use thiserror::Error;

/// Input that the allocator refuses to run against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("slots per day must be greater than zero")]
    ZeroSlotsPerDay,
    #[error("{0} slots per day exceeds the limit of {max}", max = crate::config::MAX_SLOTS_PER_DAY)]
    TooManySlots(u32),
    #[error("at least one weekday must be configured")]
    NoWeekdays,
    #[error("weekday '{0}' is listed more than once")]
    DuplicateWeekday(String),
    #[error("duplicate teacher name: {0}")]
    DuplicateTeacher(String),
    #[error("duplicate room name: {0}")]
    DuplicateRoom(String),
    #[error("duplicate subject name: {0}")]
    DuplicateSubject(String),
    #[error("duplicate session id: {0}")]
    DuplicateSession(String),
    #[error("subject '{0}' must last at least one slot")]
    ZeroDuration(String),
    #[error("session '{session}' references unknown subject '{subject}'")]
    UnknownSubject { session: String, subject: String },
    #[error("invalid bind address: {0}")]
    InvalidBindAddr(String),
}

/// Failure while writing an exported timetable.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write tab-separated export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("sheet '{0}' does not fit in a spreadsheet")]
    TooLarge(String),
    #[error("unsupported export format: {0} (expected .xlsx, .json or .tsv)")]
    UnsupportedFormat(String),
}

/// Failure of the `demo` command.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
