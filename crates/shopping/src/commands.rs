use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::aggregation::IngredientAggregationService;
use crate::categorization::{ClassificationInput, ClassifiedItem, ShoppingClassifier, verify_classification};
use crate::source::{DateRange, MealPlanSource, collect_raw_ingredients, parse_iso_date};
use crate::store::ShoppingListStore;

/// Request to rebuild a user's shopping list from the meals planned in a date range
#[derive(Debug, Clone, Validate)]
pub struct GenerateShoppingListInput {
    #[validate(length(min = 1, message = "user id is required"))]
    pub user_id: String,
    /// ISO 8601 date (YYYY-MM-DD), inclusive
    #[validate(custom(function = "validate_iso_date"))]
    pub start_date: String,
    /// ISO 8601 date (YYYY-MM-DD), inclusive
    #[validate(custom(function = "validate_iso_date"))]
    pub end_date: String,
}

fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    parse_iso_date(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("iso_date").with_message("expected YYYY-MM-DD".into()))
}

/// Result of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedShoppingList {
    pub count: usize,
    pub items: Vec<ClassifiedItem>,
}

impl GeneratedShoppingList {
    fn empty() -> Self {
        Self {
            count: 0,
            items: vec![],
        }
    }
}

/// Error types for shopping list generation
#[derive(Debug, thiserror::Error)]
pub enum ShoppingListError {
    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Failed to fetch meal plans: {0}")]
    Source(anyhow::Error),

    #[error("Failed to classify shopping list: {0}")]
    Classification(anyhow::Error),

    #[error("Classifier broke the shopping list contract: {0}")]
    ClassificationContract(String),

    #[error("Failed to save shopping list: {0}")]
    Store(anyhow::Error),
}

/// Generate a shopping list from the meal plans of a date range
///
/// This command:
/// 1. Fetches the planned recipes and flattens their ingredients
/// 2. Aggregates them (normalized names, summed quantities)
/// 3. Sends the aggregated lines to the classifier for categories
/// 4. Checks the classifier kept every quantity and unit
/// 5. Replaces the user's stored shopping list
///
/// Nothing is classified or stored when the range holds no ingredients; the
/// previous list is left as it was. A failing collaborator aborts the run
/// before the store is touched.
#[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
pub async fn generate_shopping_list<S, C, P>(
    input: GenerateShoppingListInput,
    source: &S,
    classifier: &C,
    store: &P,
) -> Result<GeneratedShoppingList, ShoppingListError>
where
    S: MealPlanSource + ?Sized,
    C: ShoppingClassifier + ?Sized,
    P: ShoppingListStore + ?Sized,
{
    input.validate()?;
    let range = DateRange::parse(&input.start_date, &input.end_date)?;

    let meal_plans = source
        .fetch_meal_plans(&input.user_id, &range)
        .await
        .map_err(ShoppingListError::Source)?;

    if meal_plans.is_empty() {
        tracing::info!(%range, "no meal plans in range");
        return Ok(GeneratedShoppingList::empty());
    }

    let raw_ingredients = collect_raw_ingredients(&meal_plans);
    if raw_ingredients.is_empty() {
        tracing::info!(%range, meal_plans = meal_plans.len(), "no ingredients in range");
        return Ok(GeneratedShoppingList::empty());
    }

    let aggregated = IngredientAggregationService::aggregate(&raw_ingredients);
    let classification_inputs: Vec<ClassificationInput> = aggregated
        .iter()
        .map(|line| line.to_classification_input())
        .collect();

    let items = classifier
        .classify(&classification_inputs)
        .await
        .map_err(ShoppingListError::Classification)?;

    verify_classification(&classification_inputs, &items)?;

    let count = store
        .replace_items(&input.user_id, &items)
        .await
        .map_err(ShoppingListError::Store)?;

    tracing::info!(
        %range,
        meal_plans = meal_plans.len(),
        ingredients = raw_ingredients.len(),
        items = count,
        "shopping list generated"
    );

    Ok(GeneratedShoppingList { count, items })
}
