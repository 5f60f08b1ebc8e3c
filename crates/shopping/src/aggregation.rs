use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::categorization::ClassificationInput;
use crate::normalize::{compute_key, normalize_name, normalize_unit};

/// One ingredient mention from one recipe used in the requested date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIngredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl RawIngredient {
    pub fn new(name: impl Into<String>, quantity: Option<f64>, unit: Option<&str>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.map(str::to_owned),
        }
    }

    /// Quantity counted for this mention; a missing amount means one of the item
    pub fn effective_quantity(&self) -> f64 {
        self.quantity.unwrap_or(1.0)
    }
}

/// One consolidated line of the shopping list, before classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Raw names that folded into this line, first-seen order, no duplicates
    pub original_names: Vec<String>,
}

impl AggregatedIngredient {
    /// The `{name, quantity, unit}` form handed to a classifier
    pub fn to_classification_input(&self) -> ClassificationInput {
        ClassificationInput {
            name: self.name.to_owned(),
            quantity: self.quantity,
            unit: self.unit.to_owned(),
        }
    }
}

/// Ingredient Aggregation Service
///
/// Stateless domain service that folds raw ingredient mentions into one line
/// per `name|unit` key, summing quantities:
/// - "egg white 1" + "egg yolk 1" + "egg 1" = "egg 3 piece"
/// - "chicken breast 1" + "chicken thigh 1" = 2 separate line items
/// - "olive oil 15 gram" + "olive oil 2 tablespoon" = 2 separate line items
///
/// Units are compared as text only. Harmonizing grams and tablespoons is left to
/// whatever classifies the list afterwards.
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Aggregate ingredient mentions
    ///
    /// Lines come out in the order their key was first seen. Every mention lands
    /// in exactly one line and the input is left untouched.
    pub fn aggregate(ingredients: &[RawIngredient]) -> Vec<AggregatedIngredient> {
        let mut positions = HashMap::new();
        let mut lines: Vec<AggregatedIngredient> = Vec::new();

        for ingredient in ingredients {
            let key = compute_key(&ingredient.name, ingredient.unit.as_deref());
            let quantity = ingredient.effective_quantity();

            match positions.get(&key) {
                Some(&position) => {
                    let line: &mut AggregatedIngredient = &mut lines[position];
                    line.quantity += quantity;

                    if !line.original_names.contains(&ingredient.name) {
                        line.original_names.push(ingredient.name.to_owned());
                    }
                }
                None => {
                    positions.insert(key, lines.len());
                    lines.push(AggregatedIngredient {
                        name: normalize_name(&ingredient.name),
                        quantity,
                        unit: normalize_unit(ingredient.unit.as_deref()),
                        original_names: vec![ingredient.name.to_owned()],
                    });
                }
            }
        }

        tracing::debug!(
            mentions = ingredients.len(),
            lines = lines.len(),
            "aggregated ingredients"
        );

        lines
    }
}
