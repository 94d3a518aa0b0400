use super::domain::{
    AboutSection, ContactMessage, Event, EventId, MessageId, SectionId, VideoId, YoutubeVideo,
};

/// Error enumeration shared by every repository behind the service layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for events so services and tests stay engine-free.
pub trait EventRepository: Send + Sync {
    fn insert(&self, event: Event) -> Result<Event, RepositoryError>;
    fn update(&self, event: Event) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EventId) -> Result<Option<Event>, RepositoryError>;
    fn delete(&self, id: &EventId) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<Event>, RepositoryError>;
}

pub trait VideoRepository: Send + Sync {
    fn insert(&self, video: YoutubeVideo) -> Result<YoutubeVideo, RepositoryError>;
    fn update(&self, video: YoutubeVideo) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &VideoId) -> Result<Option<YoutubeVideo>, RepositoryError>;
    fn delete(&self, id: &VideoId) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<YoutubeVideo>, RepositoryError>;
}

pub trait SectionRepository: Send + Sync {
    fn insert(&self, section: AboutSection) -> Result<AboutSection, RepositoryError>;
    fn update(&self, section: AboutSection) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SectionId) -> Result<Option<AboutSection>, RepositoryError>;
    fn delete(&self, id: &SectionId) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<AboutSection>, RepositoryError>;
}

pub trait MessageRepository: Send + Sync {
    fn insert(&self, message: ContactMessage) -> Result<ContactMessage, RepositoryError>;
    fn delete(&self, id: &MessageId) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<ContactMessage>, RepositoryError>;
}
