//! Tag use-case service.
//!
//! # Invariants
//! - Stored names are trimmed and lowercase.
//! - Names are unique case-insensitively.
//! - A tag submitted without a color gets one from `TAG_PALETTE`.

use crate::config::TAG_PALETTE;
use crate::model::{normalize_tag_name, Tag};
use crate::repo::{RecordRepository, RepoError, RepoResult};
use crate::store::{CollectionStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for tag use-cases.
#[derive(Debug)]
pub enum TagServiceError {
    /// Another tag already uses this (normalized) name.
    DuplicateName(String),
    Repo(RepoError),
}

impl Display for TagServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "tag already exists: {name}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TagServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::DuplicateName(_) => None,
        }
    }
}

impl From<RepoError> for TagServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<StoreError> for TagServiceError {
    fn from(value: StoreError) -> Self {
        Self::Repo(RepoError::Store(value))
    }
}

pub struct TagService<S> {
    tags: RecordRepository<S, Tag>,
}

impl<S: CollectionStore<Tag>> TagService<S> {
    pub fn new(tags: RecordRepository<S, Tag>) -> Self {
        Self { tags }
    }

    pub fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        self.tags.list()
    }

    pub fn create_tag(&self, mut tag: Tag) -> Result<Tag, TagServiceError> {
        tag.name = normalize_tag_name(&tag.name);
        let tag = self.tags.create_with(tag, |existing, tag| {
            ensure_unique(existing, tag)?;
            if tag.color.trim().is_empty() {
                tag.color = palette_color(existing.len()).to_string();
            }
            Ok::<(), TagServiceError>(())
        })?;
        info!(
            "event=tag_create module=service status=ok tag_id={} name={}",
            tag.id, tag.name
        );
        Ok(tag)
    }

    /// Replaces a tag. A blank color keeps the stored one.
    pub fn update_tag(&self, id: &str, mut tag: Tag) -> Result<Tag, TagServiceError> {
        tag.name = normalize_tag_name(&tag.name);
        let tag = self.tags.replace_with(id, tag, |current, existing, tag| {
            ensure_unique(existing, tag)?;
            if tag.color.trim().is_empty() {
                tag.color = current.color.clone();
            }
            Ok::<(), TagServiceError>(())
        })?;
        info!("event=tag_update module=service status=ok tag_id={}", tag.id);
        Ok(tag)
    }

    /// Removes a tag; unknown ids succeed. Todos keep dangling tag ids.
    pub fn delete_tag(&self, id: &str) -> RepoResult<()> {
        let removed = self.tags.delete(id)?;
        info!("event=tag_delete module=service status=ok tag_id={id} removed={removed}");
        Ok(())
    }
}

fn ensure_unique(existing: &[Tag], tag: &Tag) -> Result<(), TagServiceError> {
    let taken = existing
        .iter()
        .any(|other| other.id != tag.id && other.name.to_lowercase() == tag.name);
    if taken {
        return Err(TagServiceError::DuplicateName(tag.name.clone()));
    }
    Ok(())
}

fn palette_color(index: usize) -> &'static str {
    TAG_PALETTE[index % TAG_PALETTE.len()]
}
