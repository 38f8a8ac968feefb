//! Validation report types.

use serde::Serialize;
use std::fmt;

/// All issues found while validating boxes or a detection file.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Appends one issue.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Moves every issue of `other` into this report.
    pub fn extend(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// The earliest error-severity issue, if any.
    pub fn first_error(&self) -> Option<&ValidationIssue> {
        self.issues.iter().find(|i| i.severity == Severity::Error)
    }

    /// Error and warning totals for JSON output.
    pub fn summary(&self) -> ReportSummary<'_> {
        ReportSummary {
            error_count: self.error_count(),
            warning_count: self.warning_count(),
            issues: &self.issues,
        }
    }
}

/// Serializable view of a report with precomputed counts.
#[derive(Serialize)]
pub struct ReportSummary<'a> {
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: &'a [ValidationIssue],
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// Stable code for filtering and programmatic handling.
    pub code: IssueCode,

    pub message: String,

    pub context: IssueContext,
}

impl ValidationIssue {
    /// Creates an issue with an explicit severity.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates an error-severity issue.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    /// Creates a warning-severity issue.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Suspicious but resolvable.
    Warning,
    /// Rejected by strict resolution.
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Box geometry
    /// NaN or infinite coordinate.
    BBoxNotFinite,
    /// min > max on some axis.
    InvalidBBoxOrdering,
    /// Zero area; IoU against it may be undefined.
    DegenerateBBox,

    // Scores
    ScoreNotFinite,

    // Images
    EmptyFileName,
    DuplicateFileName,
    InvalidImageDimensions,
}

/// Where an issue was found.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    /// A box addressed only by its index in the BoxSet.
    Box { index: usize },
    /// A whole image record.
    Image { file_name: String },
    /// One detection of an image record.
    Detection { file_name: String, index: usize },
}

impl IssueContext {
    /// Box index, if the issue concerns a single box.
    pub fn box_index(&self) -> Option<usize> {
        match self {
            IssueContext::Box { index } | IssueContext::Detection { index, .. } => Some(*index),
            IssueContext::Image { .. } => None,
        }
    }
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Box { index } => write!(f, "box {}", index),
            IssueContext::Image { file_name } => write!(f, "image '{}'", file_name),
            IssueContext::Detection { file_name, index } => {
                write!(f, "image '{}' detection {}", file_name, index)
            }
        }
    }
}
