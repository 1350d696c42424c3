//! Dish media

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    ImageMedia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaVariantName {
    Original,
    Thumb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaVariant {
    pub name: MediaVariantName,
    pub url: String,
}

/// Media attached to a dish on the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaType,
    pub id: i64,
    #[serde(default)]
    pub variants: Vec<MediaVariant>,
}

impl Media {
    pub fn variant_url(&self, name: MediaVariantName) -> Option<&str> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.url.as_str())
    }
}

/// Media uploaded with a dish; `file` is a data URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMedia {
    #[serde(rename = "type")]
    pub kind: MediaType,
    pub file: String,
}

impl PostMedia {
    pub fn image(file: String) -> Self {
        Self {
            kind: MediaType::ImageMedia,
            file,
        }
    }
}
