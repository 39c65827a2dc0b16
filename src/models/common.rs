use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::validation::ValidationErrors;

// Query parameters for the day view
#[derive(Debug, Deserialize)]
pub struct DayViewParams {
    pub date: Option<NaiveDate>,
}

// Query parameters for the appointment time slot grid
#[derive(Debug, Deserialize)]
pub struct TimeSlotParams {
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub stylist: String,
    #[serde(default)]
    pub service: String,
}

pub fn default_page_size() -> usize {
    10
}

// Response body for form submissions
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse<R> {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<R>,
    #[serde(default, skip_serializing_if = "ValidationErrors::is_empty")]
    pub validation_errors: ValidationErrors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Where the UI goes after a successful save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_path: Option<String>,
}

// Response body for failures talking to the salon API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
