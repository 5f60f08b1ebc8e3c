use std::path::Path;

use anyhow::{Context, Result};
use mealwise_shopping::{
    AggregatedIngredient, GenerateShoppingListInput, GeneratedShoppingList, IngredientAggregationService,
    KeywordClassifier, RawIngredient, ShoppingListItem, ShoppingListStore, SqliteMealPlanSource,
    SqliteShoppingListStore, generate_shopping_list, group_by_category,
};

use crate::Config;

/// Aggregate a JSON array of raw ingredients read from `path`
pub fn aggregate_file(path: &Path) -> Result<Vec<AggregatedIngredient>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let ingredients: Vec<RawIngredient> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of ingredients", path.display()))?;

    Ok(IngredientAggregationService::aggregate(&ingredients))
}

#[tracing::instrument(skip(config))]
pub async fn generate(
    config: &Config,
    user_id: String,
    start_date: String,
    end_date: String,
) -> Result<GeneratedShoppingList> {
    let pool = crate::create_pool(&config.database.url, config.database.max_connections).await?;
    let source = SqliteMealPlanSource(pool.clone());
    let store = SqliteShoppingListStore(pool.clone());

    let input = GenerateShoppingListInput {
        user_id,
        start_date,
        end_date,
    };

    let generated = generate_shopping_list(input, &source, &KeywordClassifier, &store).await?;
    pool.close().await;

    Ok(generated)
}

#[tracing::instrument(skip(config))]
pub async fn list(config: &Config, user_id: &str) -> Result<Vec<ShoppingListItem>> {
    let pool = crate::create_pool(&config.database.url, 1).await?;
    let items = SqliteShoppingListStore(pool.clone()).list_items(user_id).await?;
    pool.close().await;

    Ok(items)
}

/// Plain text shopping list, one section per category
pub fn render_list(items: &[ShoppingListItem]) -> String {
    let mut output = String::new();

    for (category, items) in group_by_category(items) {
        output.push_str(&format!("{category}\n"));

        for item in items {
            let mark = if item.is_checked { "x" } else { " " };
            output.push_str(&format!(
                "  [{mark}] {} {} {}\n",
                item.quantity, item.unit, item.name
            ));
        }
    }

    output
}
