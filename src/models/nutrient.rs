//! Nutrient metadata and categories

use serde::{Deserialize, Serialize};

use super::food::Translations;

/// A nutrient known to the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrient {
    pub id: i64,
    /// Canonical name, e.g. "energy_kcal"
    pub cname: String,
    #[serde(default)]
    pub name_translations: Translations,
    pub unit: String,
    pub created_at: String,
    pub updated_at: String,
}

/// `data` payload of the nutrients endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientsData {
    pub nutrients: Vec<Nutrient>,
}

/// Nutrient categories and their members, in display order
pub const CATEGORY_NUTRIENTS: [(&str, &[&str]); 8] = [
    ("energy", &["energy_kcal", "energy_kj"]),
    ("carbohydrates", &["carbohydrates", "fiber", "starch", "sugar"]),
    (
        "fat",
        &[
            "cholesterol",
            "fat",
            "fatty_acids_monounsaturated",
            "fatty_acids_polyunsaturated",
            "fatty_acids_saturated",
        ],
    ),
    ("protein", &["protein"]),
    (
        "minerals",
        &[
            "calcium",
            "chloride",
            "iodide",
            "iron",
            "magnesium",
            "phosphorus",
            "potassium",
            "sodium",
            "zinc",
        ],
    ),
    ("water", &["water"]),
    ("alcohol", &["alcohol"]),
    (
        "vitamins",
        &[
            "all_trans_retinol_equivalents_activity",
            "beta_carotene",
            "beta_carotene_activity",
            "folate",
            "niacin",
            "pantothenic_acid",
            "vitamin_a_activity",
            "vitamin_b1",
            "vitamin_b2",
            "vitamin_b6",
            "vitamin_b12",
            "vitamin_c",
            "vitamin_d",
            "vitamin_e_activity",
        ],
    ),
];

/// Members of a nutrient category
pub fn category_nutrients(category: &str) -> Option<&'static [&'static str]> {
    CATEGORY_NUTRIENTS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, nutrients)| *nutrients)
}

/// Category a nutrient belongs to
pub fn nutrient_category(cname: &str) -> Option<&'static str> {
    CATEGORY_NUTRIENTS
        .iter()
        .find(|(_, nutrients)| nutrients.iter().any(|n| *n == cname))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nutrient_category() {
        assert_eq!(nutrient_category("energy_kj"), Some("energy"));
        assert_eq!(nutrient_category("zinc"), Some("minerals"));
        assert_eq!(nutrient_category("vitamin_b12"), Some("vitamins"));
        assert_eq!(nutrient_category("caffeine"), None);
    }

    #[test]
    fn test_category_nutrients() {
        assert_eq!(category_nutrients("protein"), Some(&["protein"][..]));
        assert!(category_nutrients("fat").unwrap().contains(&"fatty_acids_saturated"));
        assert_eq!(category_nutrients("snacks"), None);
    }

    #[test]
    fn test_every_nutrient_has_one_category() {
        for (category, nutrients) in CATEGORY_NUTRIENTS {
            for nutrient in nutrients {
                assert_eq!(nutrient_category(nutrient), Some(category));
            }
        }
    }
}
