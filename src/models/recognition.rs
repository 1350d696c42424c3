//! Image recognition results

use serde::{Deserialize, Serialize};

/// Status reported once the image has been processed
pub const STATUS_IMAGE_PROCESSED: &str = "MYFOODREPO.IMAGE_PROCESSED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionPrediction {
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishRecognition {
    pub ml_api_version: String,
    pub image_recognition_id: String,
    pub image_url: String,
    #[serde(default)]
    pub predictions: Vec<RecognitionPrediction>,
    pub status: String,
}

impl DishRecognition {
    pub fn is_processed(&self) -> bool {
        self.status == STATUS_IMAGE_PROCESSED
    }

    /// Prediction with the highest confidence
    pub fn best_prediction(&self) -> Option<&RecognitionPrediction> {
        self.predictions
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }
}

/// `data` payload of the recognition endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionData {
    pub recognition: DishRecognition,
}

/// Default input size expected by the recognizer
pub const DEFAULT_RECOGNITION_INPUT_SIZE: (u32, u32) = (256, 256);

/// Build a data URI for a base64 image, defaulting to PNG
pub fn image_data_uri(base64: &str, mime_type: Option<&str>) -> String {
    format!("data:{};base64,{}", mime_type.unwrap_or("image/png"), base64)
}
