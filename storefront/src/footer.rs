//! Footer settings document and ordered footer links.
//!
//! Links are grouped by [`FooterSection`] and ordered within a section by
//! `order`. A reorder is submitted as the full list of `(id, order, section)`
//! triples; [`apply_reorder`] is the local (optimistic) version of what the
//! server persists.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::ValidationResult;

// =============================================================================
// SETTINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
}

/// Singleton footer document. `Default` is the row bootstrapped on first read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterSettings {
    pub company_name: String,
    pub description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    #[serde(default)]
    pub social: SocialLinks,
    pub copyright_text: String,
    #[serde(default)]
    pub newsletter_enabled: bool,
}

impl Default for FooterSettings {
    fn default() -> Self {
        Self {
            company_name: "Our Store".to_owned(),
            description: "Quality products, delivered.".to_owned(),
            contact_email: "support@example.com".to_owned(),
            contact_phone: String::new(),
            address: String::new(),
            social: SocialLinks::default(),
            copyright_text: "All rights reserved.".to_owned(),
            newsletter_enabled: true,
        }
    }
}

impl FooterSettings {
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        if self.company_name.trim().is_empty() {
            errors.push("Company name is required".to_owned());
        }
        let email = self.contact_email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            errors.push(format!("`{email}` is not a valid email address"));
        }
        for (label, url) in [
            ("Facebook", &self.social.facebook),
            ("Instagram", &self.social.instagram),
            ("Twitter", &self.social.twitter),
            ("YouTube", &self.social.youtube),
        ] {
            if let Some(url) = url.as_deref().map(str::trim)
                && !url.is_empty()
                && !is_absolute_http(url)
            {
                errors.push(format!("{label} link must start with http:// or https://"));
            }
        }
        ValidationResult::from_errors(errors)
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

fn is_absolute_http(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

// =============================================================================
// LINKS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterSection {
    Shop,
    Company,
    Support,
    Legal,
}

impl FooterSection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shop => "shop",
            Self::Company => "company",
            Self::Support => "support",
            Self::Legal => "legal",
        }
    }
}

impl FromStr for FooterSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shop" => Ok(Self::Shop),
            "company" => Ok(Self::Company),
            "support" => Ok(Self::Support),
            "legal" => Ok(Self::Legal),
            other => Err(format!("unknown footer section: {other}")),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Editable fields of a footer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLinkDraft {
    pub title: String,
    pub url: String,
    pub section: FooterSection,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl FooterLinkDraft {
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("Link title is required".to_owned());
        }
        let url = self.url.trim();
        if url.is_empty() {
            errors.push("Link URL is required".to_owned());
        } else if !(is_absolute_http(url) || url.starts_with("mailto:") || url.starts_with('/')) {
            errors.push("Link URL must be absolute (http/https), mailto:, or start with /".to_owned());
        }
        if self.order.is_some_and(|order| order < 0) {
            errors.push("Link order cannot be negative".to_owned());
        }
        ValidationResult::from_errors(errors)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub section: FooterSection,
    pub order: i32,
    pub is_active: bool,
}

impl FooterLink {
    #[must_use]
    pub fn from_draft(id: Uuid, draft: FooterLinkDraft, order: i32) -> Self {
        Self {
            id,
            title: draft.title.trim().to_owned(),
            url: draft.url.trim().to_owned(),
            section: draft.section,
            order: draft.order.unwrap_or(order),
            is_active: draft.is_active,
        }
    }
}

/// Sort links into display order: by section, then `order`, then title.
pub fn sort_links(links: &mut [FooterLink]) {
    links.sort_by(|a, b| {
        a.section
            .cmp(&b.section)
            .then(a.order.cmp(&b.order))
            .then_with(|| a.title.cmp(&b.title))
    });
}

// =============================================================================
// REORDER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderItem {
    pub id: Uuid,
    pub order: i32,
    pub section: FooterSection,
}

#[must_use]
pub fn validate_reorder(items: &[ReorderItem]) -> ValidationResult {
    let mut errors = Vec::new();
    if items.is_empty() {
        errors.push("Reorder list cannot be empty".to_owned());
    }
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            errors.push(format!("Link {} appears more than once", item.id));
        }
        if item.order < 0 {
            errors.push(format!("Link {} has a negative order", item.id));
        }
    }
    ValidationResult::from_errors(errors)
}

/// Apply a reorder to a local copy of the links and return them sorted.
/// Links not named in `items` keep their position; unknown ids are ignored.
pub fn apply_reorder(links: &mut [FooterLink], items: &[ReorderItem]) {
    let updates: HashMap<Uuid, &ReorderItem> = items.iter().map(|item| (item.id, item)).collect();
    for link in links.iter_mut() {
        if let Some(item) = updates.get(&link.id) {
            link.order = item.order;
            link.section = item.section;
        }
    }
    sort_links(links);
}

#[cfg(test)]
#[path = "footer_test.rs"]
mod tests;
