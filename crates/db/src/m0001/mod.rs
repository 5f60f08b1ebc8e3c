mod ingredient;
mod meal_plan;
mod recipe;
mod recipe_ingredient;
mod shopping_list_item;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealwise",
    "m0001",
    vec_box![],
    vec_box![
        recipe::CreateTable,
        ingredient::CreateTable,
        ingredient::CreateIdx1,
        recipe_ingredient::CreateTable,
        recipe_ingredient::CreateIdx1,
        meal_plan::CreateTable,
        meal_plan::CreateIdx1,
        shopping_list_item::CreateTable,
        shopping_list_item::CreateIdx1
    ]
);
