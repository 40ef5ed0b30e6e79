//! Stage transforms of the course-completion ETL.
//!
//! - **identifier**: digit-only CPF normalization
//! - **dates**: `DD/MM/YYYY` parsing, `YYYYMMDD` codes, validity arithmetic
//! - **course**: course report split by completion duration
//! - **registration**: registration form with alias-resolved license columns
//! - **join**: inner join and projection to the intermediate table

pub mod course;
pub mod dates;
pub mod error;
pub mod identifier;
pub mod join;
pub mod registration;

pub use course::{COURSE_REPORT_DELIMITER, CourseReport, transform_course_report};
pub use error::{Result, TransformError};
pub use identifier::normalize_identifier;
pub use join::join_and_select;
pub use registration::{CATEGORY_WIDTH, REGISTRATION_DELIMITER, transform_registration};
