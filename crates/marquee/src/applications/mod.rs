//! Application intake against an event's form schema, plus the admin-side
//! review workflow (status changes, listing, deletion).

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Applicant, ApplicantId, ApplicantStatus, ApplicationSubmission};
pub use repository::ApplicantRepository;
pub use router::application_router;
pub use service::{ApplicationService, SubmissionError};
