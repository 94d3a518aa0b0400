use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{
    AboutSection, ContactMessage, Event, EventDraft, EventId, EventPatch, EventScope,
    MessageDraft, MessageId, SectionDraft, SectionId, SectionPatch, VideoDraft, VideoId,
    VideoPatch, YoutubeVideo,
};
use super::repository::{
    EventRepository, MessageRepository, RepositoryError, SectionRepository, VideoRepository,
};
use crate::forms::{FormQuestion, SchemaEditor};

/// Default number of videos shown on the landing page.
pub const DEFAULT_VIDEO_LIMIT: usize = 3;

/// Error raised by catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

static EVENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static VIDEO_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static SECTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static MESSAGE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_event_id() -> EventId {
    EventId(format!("event-{:06}", EVENT_SEQUENCE.fetch_add(1, Ordering::Relaxed)))
}

fn next_video_id() -> VideoId {
    VideoId(format!("video-{:06}", VIDEO_SEQUENCE.fetch_add(1, Ordering::Relaxed)))
}

fn next_section_id() -> SectionId {
    SectionId(format!(
        "section-{:06}",
        SECTION_SEQUENCE.fetch_add(1, Ordering::Relaxed)
    ))
}

fn next_message_id() -> MessageId {
    MessageId(format!(
        "message-{:06}",
        MESSAGE_SEQUENCE.fetch_add(1, Ordering::Relaxed)
    ))
}

/// Service composing the four catalog repositories. Event saves run the
/// schema editor's save-time cleanup so only renderable schemas persist.
pub struct CatalogService<E, V, S, M> {
    events: Arc<E>,
    videos: Arc<V>,
    sections: Arc<S>,
    messages: Arc<M>,
}

impl<E, V, S, M> CatalogService<E, V, S, M>
where
    E: EventRepository + 'static,
    V: VideoRepository + 'static,
    S: SectionRepository + 'static,
    M: MessageRepository + 'static,
{
    pub fn new(events: Arc<E>, videos: Arc<V>, sections: Arc<S>, messages: Arc<M>) -> Self {
        Self {
            events,
            videos,
            sections,
            messages,
        }
    }

    pub fn create_event(&self, draft: EventDraft) -> Result<Event, CatalogError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CatalogError::BlankField { field: "title" });
        }

        let event = Event {
            id: next_event_id(),
            title: title.to_string(),
            description: draft.description,
            poster_url: draft.poster_url,
            is_active: draft.is_active,
            event_date: draft.event_date,
            form_questions: clean_schema(draft.form_questions),
            created_at: Utc::now(),
        };

        Ok(self.events.insert(event)?)
    }

    pub fn update_event(&self, id: &EventId, patch: EventPatch) -> Result<Event, CatalogError> {
        let mut event = self.fetch_event(id)?;

        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(CatalogError::BlankField { field: "title" });
            }
            event.title = title;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }
        if let Some(poster_url) = patch.poster_url {
            event.poster_url = poster_url;
        }
        if let Some(is_active) = patch.is_active {
            event.is_active = is_active;
        }
        if let Some(event_date) = patch.event_date {
            event.event_date = event_date;
        }
        if let Some(form_questions) = patch.form_questions {
            event.form_questions = clean_schema(form_questions);
        }

        self.events.update(event.clone())?;
        Ok(event)
    }

    pub fn delete_event(&self, id: &EventId) -> Result<(), CatalogError> {
        Ok(self.events.delete(id)?)
    }

    pub fn event(&self, id: &EventId) -> Result<Event, CatalogError> {
        self.fetch_event(id)
    }

    /// Listing per the public site queries: upcoming is active-and-future
    /// ascending by date, past is date-passed-or-inactive descending, all is
    /// every event descending.
    pub fn events(&self, scope: EventScope, now: DateTime<Utc>) -> Result<Vec<Event>, CatalogError> {
        let mut events = self.events.all()?;
        match scope {
            EventScope::Upcoming => {
                events.retain(|event| event.accepts_applications(now));
                events.sort_by_key(|event| event.event_date);
            }
            EventScope::Past => {
                events.retain(|event| event.event_date < now || !event.is_active);
                events.sort_by_key(|event| Reverse(event.event_date));
            }
            EventScope::All => {
                events.sort_by_key(|event| Reverse(event.event_date));
            }
        }
        Ok(events)
    }

    pub fn add_video(&self, draft: VideoDraft) -> Result<YoutubeVideo, CatalogError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CatalogError::BlankField { field: "title" });
        }
        let video_url = draft.video_url.trim();
        if video_url.is_empty() {
            return Err(CatalogError::BlankField { field: "video_url" });
        }

        let video = YoutubeVideo {
            id: next_video_id(),
            title: title.to_string(),
            video_url: video_url.to_string(),
            is_active: draft.is_active,
            created_at: Utc::now(),
        };
        Ok(self.videos.insert(video)?)
    }

    pub fn update_video(&self, id: &VideoId, patch: VideoPatch) -> Result<YoutubeVideo, CatalogError> {
        let mut video = self
            .videos
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)
            .map_err(CatalogError::from)?;

        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(CatalogError::BlankField { field: "title" });
            }
            video.title = title;
        }
        if let Some(video_url) = patch.video_url {
            let video_url = video_url.trim().to_string();
            if video_url.is_empty() {
                return Err(CatalogError::BlankField { field: "video_url" });
            }
            video.video_url = video_url;
        }
        if let Some(is_active) = patch.is_active {
            video.is_active = is_active;
        }

        self.videos.update(video.clone())?;
        Ok(video)
    }

    pub fn delete_video(&self, id: &VideoId) -> Result<(), CatalogError> {
        Ok(self.videos.delete(id)?)
    }

    /// Every video, newest first, for the admin table.
    pub fn videos(&self) -> Result<Vec<YoutubeVideo>, CatalogError> {
        let mut videos = self.videos.all()?;
        videos.sort_by_key(|video| Reverse(video.created_at));
        Ok(videos)
    }

    /// Active videos, newest first, capped for the landing page.
    pub fn active_videos(&self, limit: usize) -> Result<Vec<YoutubeVideo>, CatalogError> {
        let mut videos = self.videos()?;
        videos.retain(|video| video.is_active);
        videos.truncate(limit);
        Ok(videos)
    }

    pub fn create_section(&self, draft: SectionDraft) -> Result<AboutSection, CatalogError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CatalogError::BlankField { field: "title" });
        }

        let section = AboutSection {
            id: next_section_id(),
            title: title.to_string(),
            content: draft.content,
            sort_order: draft.sort_order,
            created_at: Utc::now(),
        };
        Ok(self.sections.insert(section)?)
    }

    pub fn update_section(
        &self,
        id: &SectionId,
        patch: SectionPatch,
    ) -> Result<AboutSection, CatalogError> {
        let mut section = self
            .sections
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)
            .map_err(CatalogError::from)?;

        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(CatalogError::BlankField { field: "title" });
            }
            section.title = title;
        }
        if let Some(content) = patch.content {
            section.content = content;
        }
        if let Some(sort_order) = patch.sort_order {
            section.sort_order = sort_order;
        }

        self.sections.update(section.clone())?;
        Ok(section)
    }

    pub fn delete_section(&self, id: &SectionId) -> Result<(), CatalogError> {
        Ok(self.sections.delete(id)?)
    }

    pub fn sections(&self) -> Result<Vec<AboutSection>, CatalogError> {
        let mut sections = self.sections.all()?;
        sections.sort_by_key(|section| section.sort_order);
        Ok(sections)
    }

    /// Public contact form intake; all three fields are trimmed and required.
    pub fn submit_message(&self, draft: MessageDraft) -> Result<ContactMessage, CatalogError> {
        let full_name = draft.full_name.trim();
        if full_name.is_empty() {
            return Err(CatalogError::BlankField { field: "full_name" });
        }
        let phone = draft.phone.trim();
        if phone.is_empty() {
            return Err(CatalogError::BlankField { field: "phone" });
        }
        let message = draft.message.trim();
        if message.is_empty() {
            return Err(CatalogError::BlankField { field: "message" });
        }

        let message = ContactMessage {
            id: next_message_id(),
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
        };
        Ok(self.messages.insert(message)?)
    }

    pub fn messages(&self) -> Result<Vec<ContactMessage>, CatalogError> {
        let mut messages = self.messages.all()?;
        messages.sort_by_key(|message| Reverse(message.created_at));
        Ok(messages)
    }

    pub fn delete_message(&self, id: &MessageId) -> Result<(), CatalogError> {
        Ok(self.messages.delete(id)?)
    }

    fn fetch_event(&self, id: &EventId) -> Result<Event, CatalogError> {
        let event = self.events.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(event)
    }
}

/// Save-time schema cleanup: whatever the admin client sent goes through the
/// editor's finish pass before it is persisted with the event.
fn clean_schema(questions: Vec<FormQuestion>) -> Vec<FormQuestion> {
    SchemaEditor::open(questions).finish()
}
