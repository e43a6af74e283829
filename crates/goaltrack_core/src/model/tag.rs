//! Tag record.
//!
//! # Invariants
//! - `name` is stored trimmed and lowercase; uniqueness is case-insensitive
//!   and enforced by the tag service, not the record.
//! - `color` is a `#rrggbb` hex string.

use super::new_record_id;
use super::validation::{require_id, require_text, ModelValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub type TagId = String;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default = "new_record_id")]
    pub id: TagId,
    pub name: String,
    /// Empty until the tag service assigns a palette color.
    #[serde(default)]
    pub color: String,
}

impl Tag {
    /// Creates a tag with a generated id and normalized name.
    pub fn new(name: &str, color: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            name: normalize_tag_name(name),
            color: color.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_id("tag", &self.id)?;
        require_text("tag", "name", &self.name)?;
        if !HEX_COLOR_RE.is_match(&self.color) {
            return Err(ModelValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }
}

/// Trims and lowercases a tag name.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tag_lowercases_name() {
        let tag = Tag::new("  Work ", "#3b82f6");
        assert_eq!(tag.name, "work");
        assert!(tag.validate().is_ok());
    }

    #[test]
    fn validate_rejects_named_colors() {
        let tag = Tag::new("home", "red");
        assert_eq!(
            tag.validate(),
            Err(ModelValidationError::InvalidColor("red".to_string()))
        );
    }
}
