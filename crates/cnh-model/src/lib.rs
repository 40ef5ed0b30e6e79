//! Shared data model for the course-completion ETL.
//!
//! - **records**: rows passed between the course, registration and join stages
//! - **final_record**: the formatted transaction-181 output row
//! - **layout**: declared width and pad rule of every output column
//! - **params**: run parameters supplied before assembly
//! - **report**: stage messages and integrity findings

pub mod error;
pub mod final_record;
pub mod layout;
pub mod params;
pub mod records;
pub mod report;

pub use error::ModelError;
pub use final_record::FinalRecord;
pub use layout::{FIELD_COUNT, FIELD_LAYOUT, FieldSpec, PadRule, field_spec, space_pad, zero_pad};
pub use params::{CourseHours, DEFAULT_START_SEQUENCE, RunParameters, UpdateType};
pub use records::{
    CourseRecord, JoinedRecord, RegistrationRecord, ShortDurationRecord, ShortDurationTable,
};
pub use report::{
    IntegrityReport, LeadingZeroFinding, Severity, Stage, StageMessage, WidthOverflow,
};
