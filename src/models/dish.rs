//! Dish models
//!
//! A dish is a logged meal with its foods, media and comments. Dishes exist
//! in three shapes: as returned by the server, as posted, and as patched.
//! `DishRecord` ties the three together under the `_record` tag.

use serde::{Deserialize, Serialize};

use super::food::Food;
use super::media::{Media, PostMedia};
use crate::nutrition::{
    display_quantity, eaten_base_unit, resolve_eaten_quantity, DishFoodQuantities, EatenQuantity,
};

/// Processing status of a dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishStatus {
    PendingClassification,
    PendingUserResponse,
    Ok,
    #[serde(other)]
    Unknown,
}

impl DishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DishStatus::PendingClassification => "pending_classification",
            DishStatus::PendingUserResponse => "pending_user_response",
            DishStatus::Ok => "ok",
            DishStatus::Unknown => "unknown",
        }
    }
}

/// A food within a dish, with presented and eaten quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishFood {
    pub id: i64,
    pub food: Food,
    #[serde(default)]
    pub present_quantity: Option<f64>,
    #[serde(default)]
    pub present_unit: Option<String>,
    #[serde(default)]
    pub eaten_quantity: Option<f64>,
    #[serde(default)]
    pub eaten_unit: Option<String>,
}

impl DishFood {
    pub fn quantities(&self) -> DishFoodQuantities<'_> {
        DishFoodQuantities {
            present_quantity: self.present_quantity,
            present_unit: self.present_unit.as_deref(),
            eaten_quantity: self.eaten_quantity,
            eaten_unit: self.eaten_unit.as_deref(),
        }
    }

    /// Eaten amount in the food's base unit
    pub fn eaten(&self) -> EatenQuantity {
        resolve_eaten_quantity(&self.quantities())
    }

    /// Base unit of `eaten()`, e.g. "l" for an entry eaten in ml
    pub fn eaten_base_unit(&self) -> Option<&str> {
        eaten_base_unit(&self.quantities())
    }

    /// Eaten amount formatted for display, e.g. "3.3 dl"
    pub fn eaten_display(&self) -> Option<String> {
        let eaten = self.eaten();
        if !eaten.normalized {
            return None;
        }
        let unit = self.eaten_base_unit()?;
        display_quantity(eaten.normalized_quantity, unit, None).ok()
    }
}

/// Author of a dish comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: i64,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishComment {
    pub id: i64,
    pub user: CommentAuthor,
    pub message: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDishComment {
    pub message: String,
}

/// A dish as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    #[serde(default)]
    pub uuid: Option<String>,
    pub eaten_at: String,
    pub eaten_at_utc_offset: i32,
    pub user_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub status: DishStatus,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub dish_foods: Vec<DishFood>,
    #[serde(default)]
    pub comments: Vec<DishComment>,
    pub created_at: String,
    pub updated_at: String,
    /// Set locally once the dish has been removed on the server
    #[serde(rename = "_destroyed", default, skip_serializing_if = "std::ops::Not::not")]
    pub destroyed: bool,
}

// ============================================================================
// Outgoing dishes
// ============================================================================

/// Reference to a packaged food by barcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "snake_case")]
pub enum FoodReference {
    Barcode { country: String, barcode: String },
}

impl FoodReference {
    pub fn barcode(country: &str, barcode: &str) -> Self {
        FoodReference::Barcode {
            country: country.to_string(),
            barcode: barcode.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDishFood {
    pub food: FoodReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eaten_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eaten_unit: Option<String>,
}

/// A dish to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDish {
    /// Local or source dish id; stripped from request bodies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub eaten_at: String,
    pub eaten_at_utc_offset: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<PostMedia>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dish_foods: Vec<PostDishFood>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<PostDishComment>,
}

impl PostDish {
    pub fn new(eaten_at: &str, eaten_at_utc_offset: i32) -> Self {
        Self {
            id: None,
            uuid: None,
            eaten_at: eaten_at.to_string(),
            eaten_at_utc_offset,
            name: None,
            note: None,
            media: Vec::new(),
            dish_foods: Vec::new(),
            comments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchDishFood {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eaten_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eaten_unit: Option<String>,
}

/// Changes to an existing dish; `id` selects the dish
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchDish {
    #[serde(default)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eaten_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eaten_at_utc_offset: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<PostMedia>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_foods: Option<Vec<PatchDishFood>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<PostDishComment>>,
}

// ============================================================================
// Records
// ============================================================================

/// A dish in any of its three shapes, discriminated by `_record`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_record", rename_all = "lowercase")]
pub enum DishRecord {
    Get(Dish),
    Post(PostDish),
    Patch(PatchDish),
}

impl DishRecord {
    /// Server id of the dish, if it has one
    pub fn id(&self) -> Option<i64> {
        match self {
            DishRecord::Get(dish) => Some(dish.id),
            DishRecord::Post(dish) => dish.id,
            DishRecord::Patch(dish) => Some(dish.id),
        }
    }

    pub fn as_dish(&self) -> Option<&Dish> {
        match self {
            DishRecord::Get(dish) => Some(dish),
            _ => None,
        }
    }
}

impl From<Dish> for DishRecord {
    fn from(dish: Dish) -> Self {
        DishRecord::Get(dish)
    }
}

impl From<PostDish> for DishRecord {
    fn from(dish: PostDish) -> Self {
        DishRecord::Post(dish)
    }
}

impl From<PatchDish> for DishRecord {
    fn from(dish: PatchDish) -> Self {
        DishRecord::Patch(dish)
    }
}

/// `data` payload of the dish list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishesData {
    pub dishes: Vec<Dish>,
}

/// `data` payload of single dish endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishData {
    pub dish: Dish,
}
