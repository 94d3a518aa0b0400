//! Public catalog of the promotional site: events with their form schemas,
//! embedded videos, editorial about sections, and contact messages.

pub mod domain;
pub mod embed;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    AboutSection, ContactMessage, Event, EventDraft, EventId, EventPatch, EventScope,
    MessageDraft, MessageId, SectionDraft, SectionId, SectionPatch, VideoDraft, VideoId,
    VideoPatch, YoutubeVideo,
};
pub use embed::{youtube_embed_id, youtube_embed_url};
pub use repository::{
    EventRepository, MessageRepository, RepositoryError, SectionRepository, VideoRepository,
};
pub use router::catalog_router;
pub use service::{CatalogError, CatalogService};
