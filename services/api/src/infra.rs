use marquee::applications::{Applicant, ApplicantId, ApplicantRepository};
use marquee::catalog::{
    AboutSection, ContactMessage, Event, EventId, EventRepository, MessageId, MessageRepository,
    RepositoryError, SectionId, SectionRepository, VideoId, VideoRepository, YoutubeVideo,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryEventRepository {
    records: Mutex<HashMap<EventId, Event>>,
}

impl EventRepository for InMemoryEventRepository {
    fn insert(&self, event: Event) -> Result<Event, RepositoryError> {
        let mut guard = self.records.lock().expect("event mutex poisoned");
        if guard.contains_key(&event.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    fn update(&self, event: Event) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("event mutex poisoned");
        if guard.contains_key(&event.id) {
            guard.insert(event.id.clone(), event);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &EventId) -> Result<Option<Event>, RepositoryError> {
        let guard = self.records.lock().expect("event mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &EventId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("event mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<Event>, RepositoryError> {
        let guard = self.records.lock().expect("event mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryVideoRepository {
    records: Mutex<HashMap<VideoId, YoutubeVideo>>,
}

impl VideoRepository for InMemoryVideoRepository {
    fn insert(&self, video: YoutubeVideo) -> Result<YoutubeVideo, RepositoryError> {
        let mut guard = self.records.lock().expect("video mutex poisoned");
        if guard.contains_key(&video.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(video.id.clone(), video.clone());
        Ok(video)
    }

    fn update(&self, video: YoutubeVideo) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("video mutex poisoned");
        if guard.contains_key(&video.id) {
            guard.insert(video.id.clone(), video);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &VideoId) -> Result<Option<YoutubeVideo>, RepositoryError> {
        let guard = self.records.lock().expect("video mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &VideoId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("video mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<YoutubeVideo>, RepositoryError> {
        let guard = self.records.lock().expect("video mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemorySectionRepository {
    records: Mutex<HashMap<SectionId, AboutSection>>,
}

impl SectionRepository for InMemorySectionRepository {
    fn insert(&self, section: AboutSection) -> Result<AboutSection, RepositoryError> {
        let mut guard = self.records.lock().expect("section mutex poisoned");
        if guard.contains_key(&section.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(section.id.clone(), section.clone());
        Ok(section)
    }

    fn update(&self, section: AboutSection) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("section mutex poisoned");
        if guard.contains_key(&section.id) {
            guard.insert(section.id.clone(), section);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SectionId) -> Result<Option<AboutSection>, RepositoryError> {
        let guard = self.records.lock().expect("section mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &SectionId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("section mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<AboutSection>, RepositoryError> {
        let guard = self.records.lock().expect("section mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryMessageRepository {
    records: Mutex<HashMap<MessageId, ContactMessage>>,
}

impl MessageRepository for InMemoryMessageRepository {
    fn insert(&self, message: ContactMessage) -> Result<ContactMessage, RepositoryError> {
        let mut guard = self.records.lock().expect("message mutex poisoned");
        if guard.contains_key(&message.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(message.id.clone(), message.clone());
        Ok(message)
    }

    fn delete(&self, id: &MessageId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("message mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let guard = self.records.lock().expect("message mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryApplicantRepository {
    records: Mutex<HashMap<ApplicantId, Applicant>>,
}

impl ApplicantRepository for InMemoryApplicantRepository {
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
