//! Food models
//!
//! Packaged foods as known to the food repository, with their images and
//! per-hundred nutrient values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::nutrient::Nutrient;

/// Language code → text
pub type Translations = BTreeMap<String, String>;

/// Pick a translation, falling back to English then to any language
pub fn translate<'a>(translations: &'a Translations, language: &str) -> Option<&'a str> {
    translations
        .get(language)
        .or_else(|| translations.get("en"))
        .or_else(|| translations.values().next())
        .map(String::as_str)
}

/// Unit a food's nutrients are expressed per hundred of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "ml")]
    Milliliter,
}

impl FoodUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodUnit::Gram => "g",
            FoodUnit::Milliliter => "ml",
        }
    }
}

/// Which side of the package an image shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodImageCategory {
    #[serde(rename = "Nutrients table")]
    NutrientsTable,
    Back,
    #[serde(rename = "Ingredients list")]
    IngredientsList,
    Front,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodImage {
    #[serde(default)]
    pub categories: Vec<FoodImageCategory>,
    pub thumb: String,
    pub medium: String,
    pub large: String,
    pub xlarge: String,
}

/// Amount of one nutrient per hundred units of food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodNutrient {
    pub id: i64,
    pub per_hundred: f64,
    pub nutrient: Nutrient,
}

impl FoodNutrient {
    /// Amount of this nutrient in `quantity` units of the food
    pub fn amount_for(&self, quantity: f64) -> f64 {
        self.per_hundred * quantity / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub country: String,
    pub barcode: String,
    #[serde(default)]
    pub name_translations: Translations,
    #[serde(default)]
    pub display_name_translations: Translations,
    pub unit: FoodUnit,
    #[serde(default)]
    pub images: Vec<FoodImage>,
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

impl Food {
    pub fn display_name(&self, language: &str) -> Option<&str> {
        translate(&self.display_name_translations, language)
            .or_else(|| translate(&self.name_translations, language))
    }

    pub fn nutrient(&self, cname: &str) -> Option<&FoodNutrient> {
        self.food_nutrients.iter().find(|n| n.nutrient.cname == cname)
    }
}

/// `data` payload of the food endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodData {
    pub food: Food,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_food() -> Food {
        serde_json::from_value(json!({
            "id": 5,
            "type": "FoodRepoFood",
            "country": "CH",
            "barcode": "7610000000000",
            "name_translations": {"de": "Joghurt", "fr": "Yaourt"},
            "display_name_translations": {},
            "unit": "ml",
            "images": [{
                "categories": ["Front", "Nutrients table"],
                "thumb": "t", "medium": "m", "large": "l", "xlarge": "xl"
            }],
            "food_nutrients": [{
                "id": 1,
                "per_hundred": 3.5,
                "nutrient": {
                    "id": 2, "cname": "protein", "name_translations": {"en": "Protein"},
                    "unit": "g", "created_at": "", "updated_at": ""
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_food() {
        let food = sample_food();
        assert_eq!(food.unit, FoodUnit::Milliliter);
        assert_eq!(food.images[0].categories[1], FoodImageCategory::NutrientsTable);
    }

    #[test]
    fn test_display_name_fallback() {
        let food = sample_food();
        assert_eq!(food.display_name("fr"), Some("Yaourt"));
        // No English entry: first language in key order
        assert_eq!(food.display_name("it"), Some("Joghurt"));
    }

    #[test]
    fn test_nutrient_amount() {
        let food = sample_food();
        let protein = food.nutrient("protein").unwrap();
        assert!((protein.amount_for(250.0) - 8.75).abs() < 1e-9);
        assert!(food.nutrient("fat").is_none());
    }
}
