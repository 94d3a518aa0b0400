use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::applications::domain::{Applicant, ApplicantId, ApplicationSubmission};
use crate::applications::repository::ApplicantRepository;
use crate::applications::service::ApplicationService;
use crate::catalog::{Event, EventId, EventRepository, RepositoryError};
use crate::forms::{AnswerSheet, AnswerValue, FormQuestion, QuestionKind};

pub(super) fn clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

pub(super) fn schema() -> Vec<FormQuestion> {
    vec![
        FormQuestion {
            id: "q-name".to_string(),
            label: "Stage name".to_string(),
            kind: QuestionKind::Text,
            required: true,
            options: Vec::new(),
        },
        FormQuestion {
            id: "q-slot".to_string(),
            label: "Preferred slot".to_string(),
            kind: QuestionKind::Select,
            required: false,
            options: vec!["Opening".to_string(), "Closing".to_string()],
        },
    ]
}

pub(super) fn open_event() -> Event {
    Event {
        id: EventId("event-open".to_string()),
        title: "Warehouse Night".to_string(),
        description: Some("All night long".to_string()),
        poster_url: None,
        is_active: true,
        event_date: clock() + Duration::days(14),
        form_questions: schema(),
        created_at: clock() - Duration::days(30),
    }
}

pub(super) fn past_event() -> Event {
    let mut event = open_event();
    event.id = EventId("event-past".to_string());
    event.event_date = clock() - Duration::days(1);
    event
}

pub(super) fn inactive_event() -> Event {
    let mut event = open_event();
    event.id = EventId("event-inactive".to_string());
    event.is_active = false;
    event
}

pub(super) fn filled_sheet() -> AnswerSheet {
    let mut sheet = AnswerSheet::new();
    sheet.set("q-name", AnswerValue::Text("Nova".to_string()));
    sheet
}

pub(super) fn submission(event: &Event, answers: AnswerSheet) -> ApplicationSubmission {
    ApplicationSubmission {
        event_id: event.id.clone(),
        full_name: "  Deniz Kaya  ".to_string(),
        email: None,
        phone: " 5550001122 ".to_string(),
        answers,
    }
}

#[derive(Default)]
pub(super) struct MemoryEvents {
    events: Mutex<HashMap<EventId, Event>>,
}

impl MemoryEvents {
    pub(super) fn with(events: impl IntoIterator<Item = Event>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut guard = store.events.lock().expect("event mutex poisoned");
            for event in events {
                guard.insert(event.id.clone(), event);
            }
        }
        Arc::new(store)
    }
}

impl EventRepository for MemoryEvents {
    fn insert(&self, event: Event) -> Result<Event, RepositoryError> {
        let mut guard = self.events.lock().expect("event mutex poisoned");
        if guard.contains_key(&event.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    fn update(&self, event: Event) -> Result<(), RepositoryError> {
        let mut guard = self.events.lock().expect("event mutex poisoned");
        if guard.contains_key(&event.id) {
            guard.insert(event.id.clone(), event);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &EventId) -> Result<Option<Event>, RepositoryError> {
        let guard = self.events.lock().expect("event mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &EventId) -> Result<(), RepositoryError> {
        let mut guard = self.events.lock().expect("event mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<Event>, RepositoryError> {
        let guard = self.events.lock().expect("event mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryApplicants {
    records: Mutex<HashMap<ApplicantId, Applicant>>,
}

impl MemoryApplicants {
    pub(super) fn count(&self) -> usize {
        self.records.lock().expect("applicant mutex poisoned").len()
    }
}

impl ApplicantRepository for MemoryApplicants {
    fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        let mut guard = self.records.lock().expect("applicant mutex poisoned");
        if guard.contains_key(&applicant.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(applicant.id.clone(), applicant.clone());
        Ok(applicant)
    }

    fn update(&self, applicant: Applicant) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("applicant mutex poisoned");
        if guard.contains_key(&applicant.id) {
            guard.insert(applicant.id.clone(), applicant);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        let guard = self.records.lock().expect("applicant mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &ApplicantId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("applicant mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn by_event(&self, event_id: &EventId) -> Result<Vec<Applicant>, RepositoryError> {
        let guard = self.records.lock().expect("applicant mutex poisoned");
        Ok(guard
            .values()
            .filter(|applicant| &applicant.event_id == event_id)
            .cloned()
            .collect())
    }
}

/// Repository that refuses every insert, for failure-path tests.
pub(super) struct UnavailableApplicants;

impl ApplicantRepository for UnavailableApplicants {
    fn insert(&self, _applicant: Applicant) -> Result<Applicant, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn update(&self, _applicant: Applicant) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn delete(&self, _id: &ApplicantId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn by_event(&self, _event_id: &EventId) -> Result<Vec<Applicant>, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    ApplicationService<MemoryEvents, MemoryApplicants>,
    Arc<MemoryEvents>,
    Arc<MemoryApplicants>,
) {
    let events = MemoryEvents::with([open_event(), past_event(), inactive_event()]);
    let applicants = Arc::new(MemoryApplicants::default());
    let service = ApplicationService::new(events.clone(), applicants.clone());
    (service, events, applicants)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
