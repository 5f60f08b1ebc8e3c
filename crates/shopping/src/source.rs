use std::fmt;

use async_trait::async_trait;
use time::Date;
use time::macros::format_description;

use crate::aggregation::RawIngredient;
use crate::commands::ShoppingListError;

/// Parse an ISO 8601 calendar date (YYYY-MM-DD)
pub fn parse_iso_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
}

/// Inclusive range of planned days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, ShoppingListError> {
        if start > end {
            return Err(ShoppingListError::InvalidDateRange(format!(
                "start {start} is after end {end}"
            )));
        }

        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ShoppingListError> {
        let start = parse_iso_date(start)
            .map_err(|e| ShoppingListError::InvalidDateRange(format!("start date '{start}': {e}")))?;
        let end = parse_iso_date(end)
            .map_err(|e| ShoppingListError::InvalidDateRange(format!("end date '{end}': {e}")))?;

        Self::new(start, end)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// One planned meal
#[derive(Debug, Clone, PartialEq)]
pub struct MealPlanEntry {
    pub id: String,
    pub date: Date,
    pub recipe: Option<PlannedRecipe>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRecipe {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<RecipeIngredientRow>,
}

/// Recipe ingredient as stored; the linked ingredient may be gone
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredientRow {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}

/// Where planned meals come from
#[async_trait]
pub trait MealPlanSource: Send + Sync {
    /// Meal plans of one user whose date falls inside `range`
    async fn fetch_meal_plans(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> anyhow::Result<Vec<MealPlanEntry>>;
}

/// Flatten planned meals into raw ingredient mentions, in plan order
///
/// A recipe used by two meals contributes its ingredients twice. Rows without
/// a usable ingredient name are dropped here so the aggregation never sees an
/// empty name.
pub fn collect_raw_ingredients(meal_plans: &[MealPlanEntry]) -> Vec<RawIngredient> {
    meal_plans
        .iter()
        .filter_map(|meal| meal.recipe.as_ref())
        .flat_map(|recipe| recipe.ingredients.iter())
        .filter_map(|row| {
            let name = row.name.as_deref().filter(|name| !name.trim().is_empty())?;

            Some(RawIngredient {
                name: name.to_owned(),
                quantity: row.quantity,
                unit: row.unit.to_owned(),
            })
        })
        .collect()
}

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        use mealwise_db::table::{Ingredient, MealPlan, Recipe, RecipeIngredient};
        use sea_query::{Expr, ExprTrait, JoinType, Order, Query, SqliteQueryBuilder};
        use sea_query_sqlx::SqlxBinder;
        use sqlx::SqlitePool;

        /// Meal plans read from the SQLite tables of `mealwise-db`
        #[derive(Clone)]
        pub struct SqliteMealPlanSource(pub SqlitePool);

        type MealPlanRow = (
            String,
            String,
            Option<String>,
            Option<String>,
            Option<String>,
            Option<f64>,
            Option<String>,
        );

        #[async_trait]
        impl MealPlanSource for SqliteMealPlanSource {
            async fn fetch_meal_plans(
                &self,
                user_id: &str,
                range: &DateRange,
            ) -> anyhow::Result<Vec<MealPlanEntry>> {
                let statement = Query::select()
                    .columns([(MealPlan::Table, MealPlan::Id), (MealPlan::Table, MealPlan::Date)])
                    .columns([(Recipe::Table, Recipe::Id), (Recipe::Table, Recipe::Title)])
                    .column((Ingredient::Table, Ingredient::Name))
                    .columns([
                        (RecipeIngredient::Table, RecipeIngredient::Quantity),
                        (RecipeIngredient::Table, RecipeIngredient::Unit),
                    ])
                    .from(MealPlan::Table)
                    .join(
                        JoinType::LeftJoin,
                        Recipe::Table,
                        Expr::col((MealPlan::Table, MealPlan::RecipeId)).equals((Recipe::Table, Recipe::Id)),
                    )
                    .join(
                        JoinType::LeftJoin,
                        RecipeIngredient::Table,
                        Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                            .equals((Recipe::Table, Recipe::Id)),
                    )
                    .join(
                        JoinType::LeftJoin,
                        Ingredient::Table,
                        Expr::col((RecipeIngredient::Table, RecipeIngredient::IngredientId))
                            .equals((Ingredient::Table, Ingredient::Id)),
                    )
                    .and_where(Expr::col((MealPlan::Table, MealPlan::UserId)).eq(user_id))
                    .and_where(Expr::col((MealPlan::Table, MealPlan::Date)).gte(range.start.to_string()))
                    .and_where(Expr::col((MealPlan::Table, MealPlan::Date)).lte(range.end.to_string()))
                    .order_by((MealPlan::Table, MealPlan::Date), Order::Asc)
                    .order_by((MealPlan::Table, MealPlan::Id), Order::Asc)
                    .order_by((RecipeIngredient::Table, RecipeIngredient::Position), Order::Asc)
                    .to_owned();

                let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
                let rows = sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
                    .fetch_all(&self.0)
                    .await?;

                let mut meal_plans: Vec<MealPlanEntry> = Vec::new();

                for (id, date, recipe_id, title, name, quantity, unit) in rows {
                    if meal_plans.last().is_none_or(|meal| meal.id != id) {
                        let recipe = recipe_id.map(|recipe_id| PlannedRecipe {
                            id: recipe_id,
                            title: title.unwrap_or_default(),
                            ingredients: vec![],
                        });

                        meal_plans.push(MealPlanEntry {
                            id,
                            date: parse_iso_date(&date)?,
                            recipe,
                        });
                    }

                    let Some(recipe) = meal_plans.last_mut().and_then(|meal| meal.recipe.as_mut()) else {
                        continue;
                    };

                    if name.is_some() || quantity.is_some() || unit.is_some() {
                        recipe.ingredients.push(RecipeIngredientRow { name, quantity, unit });
                    }
                }

                tracing::debug!(user_id, %range, meal_plans = meal_plans.len(), "fetched meal plans");

                Ok(meal_plans)
            }
        }
    }
}
