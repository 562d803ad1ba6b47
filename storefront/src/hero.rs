//! Homepage hero banner document.

use serde::{Deserialize, Serialize};

use crate::validate::ValidationResult;

/// Singleton hero banner. `Default` is the row bootstrapped on first read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub image_url: String,
    pub button_text: String,
    #[serde(default = "default_button_link")]
    pub button_link: String,
    #[serde(default)]
    pub is_active: bool,
}

fn default_button_link() -> String {
    "/shop".to_owned()
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            title: "New Season Collection".to_owned(),
            subtitle: "Discover the latest arrivals".to_owned(),
            image_url: "/images/hero-default.jpg".to_owned(),
            button_text: "Shop Now".to_owned(),
            button_link: default_button_link(),
            is_active: true,
        }
    }
}

impl Hero {
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("Hero title is required".to_owned());
        }
        if self.image_url.trim().is_empty() {
            errors.push("Hero image is required".to_owned());
        }
        if self.button_text.trim().is_empty() {
            errors.push("Button text is required".to_owned());
        }
        ValidationResult::from_errors(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hero_is_valid_and_active() {
        let hero = Hero::default();
        assert!(hero.is_active);
        assert!(hero.validate().is_valid);
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let hero = Hero { title: " ".into(), image_url: String::new(), button_text: String::new(), ..Hero::default() };
        assert_eq!(hero.validate().errors.len(), 3);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let hero: Hero =
            serde_json::from_str(r#"{"title":"Sale","image_url":"/a.jpg","button_text":"Go"}"#).unwrap();
        assert_eq!(hero.subtitle, "");
        assert_eq!(hero.button_link, "/shop");
        assert!(!hero.is_active);
    }
}
