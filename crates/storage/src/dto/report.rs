use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Inclusive submission-date window. Either bound may be left open.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "validate_date_range"))]
pub struct DateRange {
    /// First submission date included (YYYY-MM-DD)
    pub start: Option<NaiveDate>,
    /// Last submission date included (YYYY-MM-DD)
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, submitted_at: &DateTime<Utc>) -> bool {
        let date = submitted_at.date_naive();

        if let Some(start) = self.start
            && date < start
        {
            return false;
        }

        if let Some(end) = self.end
            && date > end
        {
            return false;
        }

        true
    }
}

fn validate_date_range(range: &DateRange) -> Result<(), ValidationError> {
    match (range.start, range.end) {
        (Some(start), Some(end)) if start > end => {
            let mut error = ValidationError::new("date_range");
            error.message = Some("start must not be after end".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

/// Admitted count for one program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProgramEnrollmentRow {
    pub program_id: i64,
    pub program_name: String,
    pub faculty_name: String,
    pub enrolled: u32,
}

/// Admitted and rejected counts for one faculty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FacultyResultRow {
    pub faculty_name: String,
    pub admitted: u32,
    pub rejected: u32,
}
