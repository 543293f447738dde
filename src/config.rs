//! App Configuration
//!
//! Seed items, element ids and presentation knobs. Embedded from
//! `config/app_config.json` at build time and parsed with serde.

use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::Item;

const EMBEDDED_CONFIG: &str = include_str!("../config/app_config.json");

/// Ids of the static elements the shell renders and the views bind to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementIds {
    pub item_list: String,
    pub detail_container: String,
    pub admin_toggle: String,
    pub form_container: String,
    pub form: String,
    pub name_input: String,
    pub url_input: String,
    pub counter_input: String,
    pub save_button: String,
    pub cancel_button: String,
    /// Present only when a test harness hosts the page
    pub test_marker: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            item_list: "catlist".into(),
            detail_container: "cat-img-ctnr".into(),
            admin_toggle: "adm-btn".into(),
            form_container: "cat-form-ctnr".into(),
            form: "cat-form".into(),
            name_input: "cat-name-input".into(),
            url_input: "cat-img-url-input".into(),
            counter_input: "cat-click-input".into(),
            save_button: "save-btn".into(),
            cancel_button: "cancel-btn".into(),
            test_marker: "tests-script".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Prefix of the list control labels ("Cat 1", "Cat 2", ...)
    pub list_label: String,
    /// Marker class that hides the edit form
    pub hidden_class: String,
    /// Recent log lines kept in memory
    pub log_capacity: usize,
    pub elements: ElementIds,
    pub seed: Vec<Item>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            list_label: "Cat".into(),
            hidden_class: "d-none".into(),
            log_capacity: 200,
            elements: ElementIds::default(),
            seed: seed_items(),
        }
    }
}

impl AppConfig {
    /// Parse the configuration embedded in the binary
    pub fn load() -> AppResult<Self> {
        Self::from_json(EMBEDDED_CONFIG)
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The five cats of the reference deployment
pub fn seed_items() -> Vec<Item> {
    [
        ("Cat 1", "./cat_picture1.jpg"),
        ("Cat 2", "./cat_picture2.jpeg"),
        ("Cat 3", "./cat_picture3.jpeg"),
        ("Cat 4", "./cat_picture4.jpeg"),
        ("Cat 5", "./cat_picture5.jpeg"),
    ]
    .into_iter()
    .map(|(name, url)| Item::new(name, url))
    .collect()
}
