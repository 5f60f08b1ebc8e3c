pub mod aggregation;
pub mod categorization;
pub mod commands;
pub mod normalize;
pub mod source;
pub mod store;

pub use aggregation::{AggregatedIngredient, IngredientAggregationService, RawIngredient};
pub use categorization::{
    Category, ClassificationInput, ClassifiedItem, KeywordClassifier, ShoppingClassifier,
    verify_classification,
};
pub use commands::{
    GenerateShoppingListInput, GeneratedShoppingList, ShoppingListError, generate_shopping_list,
};
pub use normalize::{IngredientKey, compute_key, normalize_name, normalize_unit};
pub use source::{
    DateRange, MealPlanEntry, MealPlanSource, PlannedRecipe, RecipeIngredientRow,
    collect_raw_ingredients,
};
pub use store::{ShoppingListItem, ShoppingListStore, group_by_category};

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        pub use source::SqliteMealPlanSource;
        pub use store::SqliteShoppingListStore;
    }
}
