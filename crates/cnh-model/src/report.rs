use std::fmt;

use serde::Serialize;

/// Pipeline stage a message originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    CourseReport,
    Registration,
    Join,
    Assembly,
    Integrity,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Self::CourseReport => "course report",
            Self::Registration => "registration",
            Self::Join => "join",
            Self::Assembly => "assembly",
            Self::Integrity => "integrity",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Notice,
    Warning,
    Error,
}

/// Human-readable outcome of a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageMessage {
    pub stage: Stage,
    pub severity: Severity,
    pub text: String,
}

impl StageMessage {
    pub fn notice(stage: Stage, text: impl Into<String>) -> Self {
        Self {
            stage,
            severity: Severity::Notice,
            text: text.into(),
        }
    }

    pub fn warning(stage: Stage, text: impl Into<String>) -> Self {
        Self {
            stage,
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(stage: Stage, text: impl Into<String>) -> Self {
        Self {
            stage,
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

/// A final record whose `codusu` starts with `'0'`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadingZeroFinding {
    /// Zero-based row index in the final table.
    pub row: usize,
    pub user_code: String,
}

/// A formatted value wider than its declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidthOverflow {
    pub row: usize,
    pub field: &'static str,
    pub width: usize,
    pub actual: usize,
}

/// Observations about the assembled table. Never alters data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub leading_zero: Vec<LeadingZeroFinding>,
    pub width_overflows: Vec<WidthOverflow>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.leading_zero.is_empty() && self.width_overflows.is_empty()
    }
}
