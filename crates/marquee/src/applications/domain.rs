use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::EventId;
use crate::forms::AnswerSheet;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Review workflow status tracked on every applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantStatus {
    Pending,
    Approved,
    Rejected,
    TicketIssued,
}

impl ApplicantStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantStatus::Pending => "pending",
            ApplicantStatus::Approved => "approved",
            ApplicantStatus::Rejected => "rejected",
            ApplicantStatus::TicketIssued => "ticket_issued",
        }
    }
}

/// A stored application: contact fields plus the answer map collected
/// against the event's schema at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub event_id: EventId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub answers: AnswerSheet,
    pub status: ApplicantStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload a visitor submits from the application modal. The initial status
/// is fixed by the service, never chosen by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSubmission {
    pub event_id: EventId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub answers: AnswerSheet,
}
