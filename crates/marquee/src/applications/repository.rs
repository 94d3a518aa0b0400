use super::domain::{Applicant, ApplicantId};
use crate::catalog::{EventId, RepositoryError};

/// Storage abstraction for applicants so the service module can be exercised
/// in isolation.
pub trait ApplicantRepository: Send + Sync {
    fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError>;
    fn update(&self, applicant: Applicant) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError>;
    fn delete(&self, id: &ApplicantId) -> Result<(), RepositoryError>;
    fn by_event(&self, event_id: &EventId) -> Result<Vec<Applicant>, RepositoryError>;
}
