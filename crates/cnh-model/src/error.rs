use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid update type '{value}' (expected I or S)")]
    InvalidUpdateType { value: String },
    #[error("invalid course hours code '{value}' (expected 060, 018 or 040)")]
    InvalidCourseHours { value: String },
}
