//! Todo and sub-task records.

use super::new_record_id;
use super::tag::TagId;
use super::validation::{require_id, require_text, ModelValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type TodoId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    #[serde(default = "new_record_id")]
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl SubTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Dated todo item. `order` positions it within its day; unset sorts as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(default = "new_record_id")]
    pub id: TodoId,
    pub date: NaiveDate,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<TagId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_tasks: Vec<SubTask>,
}

impl Todo {
    pub fn new(date: NaiveDate, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new_record_id(),
            date,
            text: text.into(),
            completed: false,
            created_at,
            order: None,
            tag_ids: Vec::new(),
            sub_tasks: Vec::new(),
        }
    }

    pub fn sort_key(&self) -> u32 {
        self.order.unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_id("todo", &self.id)?;
        require_text("todo", "text", &self.text)?;
        for sub_task in &self.sub_tasks {
            require_id("sub-task", &sub_task.id)?;
        }
        Ok(())
    }
}
