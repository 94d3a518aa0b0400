use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::FormQuestion;

/// Identifier wrapper for catalog events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

/// A single occasion: date, descriptive copy, optional poster, active flag,
/// and the application form schema attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub is_active: bool,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub form_questions: Vec<FormQuestion>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// An event accepts applications while it is active and not yet past.
    pub fn accepts_applications(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.event_date >= now
    }
}

/// Fields supplied when creating an event; id and created_at are assigned by
/// the service.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub form_questions: Vec<FormQuestion>,
}

/// Field-wise partial update; absent fields are left untouched. The nullable
/// columns carry a second `Option` layer so an explicit `null` in the patch
/// clears the stored value instead of being read as omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub poster_url: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub form_questions: Option<Vec<FormQuestion>>,
}

/// Listing scopes matching the public site queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventScope {
    Upcoming,
    Past,
    #[default]
    All,
}

/// Identifier wrapper for embedded videos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoutubeVideo {
    pub id: VideoId,
    pub title: String,
    pub video_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoDraft {
    pub title: String,
    pub video_url: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Identifier wrapper for editorial about sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(pub String);

/// One block of the about page, ordered by `sort_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutSection {
    pub id: SectionId,
    pub title: String,
    pub content: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

/// Identifier wrapper for contact messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: MessageId,
    pub full_name: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDraft {
    pub full_name: String,
    pub phone: String,
    pub message: String,
}

const fn default_active() -> bool {
    true
}

/// Wraps a present field in `Some`, so `#[serde(default)]` marks absence and a
/// JSON `null` still deserializes to `Some(None)`.
fn nullable_field<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_patch_tells_null_apart_from_absent() {
        let patch: EventPatch =
            serde_json::from_value(serde_json::json!({ "description": null })).unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.poster_url, None);

        let patch: EventPatch =
            serde_json::from_value(serde_json::json!({ "poster_url": "https://example.com/a.jpg" }))
                .unwrap();
        assert_eq!(patch.description, None);
        assert_eq!(patch.poster_url, Some(Some("https://example.com/a.jpg".to_string())));
    }
}
