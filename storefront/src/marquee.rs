//! Scrolling announcement bar entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::ValidationResult;

pub const MAX_ANNOUNCEMENT_CHARS: usize = 200;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementDraft {
    pub text: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl AnnouncementDraft {
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let text = self.text.trim();
        if text.is_empty() {
            errors.push("Announcement text is required".to_owned());
        } else if text.chars().count() > MAX_ANNOUNCEMENT_CHARS {
            errors.push(format!("Announcement text must be at most {MAX_ANNOUNCEMENT_CHARS} characters"));
        }
        ValidationResult::from_errors(errors)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub text: String,
    pub link: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

impl Announcement {
    #[must_use]
    pub fn from_draft(id: Uuid, draft: AnnouncementDraft) -> Self {
        Self {
            id,
            text: draft.text.trim().to_owned(),
            link: draft.link.map(|l| l.trim().to_owned()).filter(|l| !l.is_empty()),
            is_active: draft.is_active,
            display_order: draft.display_order,
        }
    }
}

/// Active announcements in display order, as the storefront scrolls them.
#[must_use]
pub fn active_in_order(announcements: &[Announcement]) -> Vec<Announcement> {
    let mut active: Vec<Announcement> = announcements.iter().filter(|a| a.is_active).cloned().collect();
    active.sort_by_key(|a| a.display_order);
    active
}
