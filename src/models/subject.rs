//! Study subjects
//!
//! A user joins a study cohort by attaching a subject key.

use serde::{Deserialize, Serialize};

use super::food::Translations;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub user_id: i64,
    pub user_attached: bool,
    pub user_key: String,
    #[serde(default)]
    pub expiration_at: Option<String>,
    #[serde(default)]
    pub study_name_translations: Translations,
    #[serde(default)]
    pub study_logo_uri: Option<String>,
    #[serde(default)]
    pub cohort_name_translations: Translations,
    #[serde(default)]
    pub cohort_logo_uri: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub expired_at: Option<String>,
}

impl Subject {
    pub fn is_expired(&self) -> bool {
        self.expired_at.is_some()
    }
}

/// `data` payload of subject endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectsData {
    #[serde(default)]
    pub subjects: Vec<Subject>,
}
