use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{Applicant, ApplicantId, ApplicantStatus, ApplicationSubmission};
use super::repository::ApplicantRepository;
use crate::catalog::{EventId, EventRepository, RepositoryError};
use crate::forms::answers::issues_summary;
use crate::forms::AnswerIssue;

/// Error raised when a submission is rejected. Every variant renders to a
/// human-readable reason for the caller; the caller's own state (name,
/// phone, answer sheet) is never touched, so a retry needs no re-entry.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("event not found")]
    EventNotFound,
    #[error("applications are closed for this event")]
    EventClosed,
    #[error("full_name must not be blank")]
    BlankFullName,
    #[error("phone must not be blank")]
    BlankPhone,
    #[error("submission incomplete: {}", issues_summary(.0))]
    Invalid(Vec<AnswerIssue>),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

static APPLICANT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_applicant_id() -> ApplicantId {
    let id = APPLICANT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicantId(format!("applicant-{id:06}"))
}

/// Service composing the event store (schema source) and the applicant
/// repository.
pub struct ApplicationService<E, R> {
    events: Arc<E>,
    repository: Arc<R>,
}

impl<E, R> ApplicationService<E, R>
where
    E: EventRepository + 'static,
    R: ApplicantRepository + 'static,
{
    pub fn new(events: Arc<E>, repository: Arc<R>) -> Self {
        Self { events, repository }
    }

    /// Submit a new application with the fixed initial status `pending`.
    pub fn submit(&self, submission: ApplicationSubmission) -> Result<Applicant, SubmissionError> {
        self.submit_at(submission, Utc::now())
    }

    /// Clock-injected variant so intake rules stay testable.
    pub fn submit_at(
        &self,
        submission: ApplicationSubmission,
        now: DateTime<Utc>,
    ) -> Result<Applicant, SubmissionError> {
        let event = self
            .events
            .fetch(&submission.event_id)?
            .ok_or(SubmissionError::EventNotFound)?;

        // The apply button disappears client-side, but the API is directly
        // reachable, so the event state is re-checked here.
        if !event.accepts_applications(now) {
            return Err(SubmissionError::EventClosed);
        }

        let full_name = submission.full_name.trim();
        if full_name.is_empty() {
            return Err(SubmissionError::BlankFullName);
        }
        let phone = submission.phone.trim();
        if phone.is_empty() {
            return Err(SubmissionError::BlankPhone);
        }

        submission
            .answers
            .validate(&event.form_questions)
            .map_err(SubmissionError::Invalid)?;

        let applicant = Applicant {
            id: next_applicant_id(),
            event_id: submission.event_id,
            full_name: full_name.to_string(),
            email: submission
                .email
                .as_deref()
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_string),
            phone: Some(phone.to_string()),
            answers: submission.answers,
            status: ApplicantStatus::Pending,
            created_at: now,
        };

        let stored = self.repository.insert(applicant)?;
        Ok(stored)
    }

    /// Applicants for one event, newest first, for the admin table.
    pub fn for_event(&self, event_id: &EventId) -> Result<Vec<Applicant>, RepositoryError> {
        let mut applicants = self.repository.by_event(event_id)?;
        applicants.sort_by_key(|applicant| Reverse(applicant.created_at));
        Ok(applicants)
    }

    pub fn get(&self, id: &ApplicantId) -> Result<Applicant, RepositoryError> {
        self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)
    }

    pub fn set_status(
        &self,
        id: &ApplicantId,
        status: ApplicantStatus,
    ) -> Result<Applicant, RepositoryError> {
        let mut applicant = self.get(id)?;
        applicant.status = status;
        self.repository.update(applicant.clone())?;
        Ok(applicant)
    }

    pub fn remove(&self, id: &ApplicantId) -> Result<(), RepositoryError> {
        self.repository.delete(id)
    }

    /// Cascade used when an event is deleted; returns how many applicants
    /// went with it.
    pub fn remove_for_event(&self, event_id: &EventId) -> Result<usize, RepositoryError> {
        let applicants = self.repository.by_event(event_id)?;
        let count = applicants.len();
        for applicant in &applicants {
            self.repository.delete(&applicant.id)?;
        }
        Ok(count)
    }
}
