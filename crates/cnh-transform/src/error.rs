use cnh_ingest::IngestError;
use thiserror::Error;

/// Stage-level failures. Each one empties that stage's output.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("course report: {source}")]
    CourseReport {
        #[source]
        source: IngestError,
    },
    #[error("registration form: {source}")]
    Registration {
        #[source]
        source: IngestError,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
