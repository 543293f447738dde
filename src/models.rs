//! Frontend Models
//!
//! Plain data shown by the widget. Items are never edited in place: an
//! update builds a new record by merging an [`ItemPatch`] over the old one.

use serde::{Deserialize, Serialize};

/// One entry of the clickable list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
    #[serde(default)]
    pub click_counter: u64,
}

impl Item {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: url.into(),
            click_counter: 0,
        }
    }

    /// Shallow merge: every field present in `patch` overrides ours
    pub fn merged(&self, patch: &ItemPatch) -> Self {
        Self {
            name: patch.name.clone().or_else(|| self.name.clone()),
            url: patch.url.clone().unwrap_or_else(|| self.url.clone()),
            click_counter: patch.click_counter.unwrap_or(self.click_counter),
        }
    }

    /// Counter text shown under the image
    pub fn counter_label(&self) -> String {
        format!("{} click(s)", self.click_counter)
    }
}

/// Partial update for an [`Item`]; absent fields keep their old value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub click_counter: Option<u64>,
}

impl ItemPatch {
    pub fn click_counter(value: u64) -> Self {
        Self {
            click_counter: Some(value),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.click_counter.is_none()
    }
}

/// Field values coming out of the edit form.
///
/// `Default` supplies the empty/zero value for any omitted field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSubmission {
    pub name: String,
    pub url: String,
    pub click_counter: u64,
}

impl From<EditSubmission> for ItemPatch {
    /// A submission replaces every field
    fn from(submission: EditSubmission) -> Self {
        Self {
            name: Some(submission.name),
            url: Some(submission.url),
            click_counter: Some(submission.click_counter),
        }
    }
}
