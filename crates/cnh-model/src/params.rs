//! Run parameters collected once before record assembly.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ModelError;

/// Default first value for `nu-seq-trans`.
pub const DEFAULT_START_SEQUENCE: u64 = 888_888;

/// `tipo-atualizacao`: whether the record is an insert or replaces an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateType {
    #[default]
    Insert,
    Substitute,
}

impl UpdateType {
    /// Single-character code written to the output.
    pub fn code(self) -> &'static str {
        match self {
            Self::Insert => "I",
            Self::Substitute => "S",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UpdateType {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "I" | "i" => Ok(Self::Insert),
            "S" | "s" => Ok(Self::Substitute),
            other => Err(ModelError::InvalidUpdateType {
                value: other.to_string(),
            }),
        }
    }
}

/// `carga-horaria`: course workload code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CourseHours {
    #[default]
    Hours60,
    Hours18,
    Hours40,
}

impl CourseHours {
    pub const ALL: [CourseHours; 3] = [Self::Hours60, Self::Hours18, Self::Hours40];

    pub fn code(self) -> &'static str {
        match self {
            Self::Hours60 => "060",
            Self::Hours18 => "018",
            Self::Hours40 => "040",
        }
    }
}

impl fmt::Display for CourseHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CourseHours {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|hours| hours.code() == trimmed)
            .ok_or_else(|| ModelError::InvalidCourseHours {
                value: trimmed.to_string(),
            })
    }
}

/// Scalar inputs for one assembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub starting_sequence_number: u64,
    pub update_type: UpdateType,
    pub course_hours: CourseHours,
    /// Local calendar date the run is attributed to (drives `dia-juliano`).
    pub run_date: NaiveDate,
}

impl RunParameters {
    /// Parameters with every default except the run date.
    pub fn new(run_date: NaiveDate) -> Self {
        Self {
            starting_sequence_number: DEFAULT_START_SEQUENCE,
            update_type: UpdateType::default(),
            course_hours: CourseHours::default(),
            run_date,
        }
    }

    #[must_use]
    pub fn with_starting_sequence(mut self, value: u64) -> Self {
        self.starting_sequence_number = value;
        self
    }

    #[must_use]
    pub fn with_update_type(mut self, update_type: UpdateType) -> Self {
        self.update_type = update_type;
        self
    }

    #[must_use]
    pub fn with_course_hours(mut self, hours: CourseHours) -> Self {
        self.course_hours = hours;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_type_parses_codes() {
        assert_eq!("I".parse::<UpdateType>(), Ok(UpdateType::Insert));
        assert_eq!("s".parse::<UpdateType>(), Ok(UpdateType::Substitute));
        assert!("X".parse::<UpdateType>().is_err());
    }

    #[test]
    fn course_hours_round_trip_codes() {
        for hours in CourseHours::ALL {
            assert_eq!(hours.code().parse::<CourseHours>(), Ok(hours));
        }
        assert_eq!(
            "60".parse::<CourseHours>(),
            Err(ModelError::InvalidCourseHours {
                value: "60".to_string()
            })
        );
    }

    #[test]
    fn defaults_match_form_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let params = RunParameters::new(date);
        assert_eq!(params.starting_sequence_number, 888_888);
        assert_eq!(params.update_type.code(), "I");
        assert_eq!(params.course_hours.code(), "060");
    }
}
