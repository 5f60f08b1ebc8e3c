use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum MealPlan {
    Table,
    Id,
    UserId,
    Date,
    RecipeId,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    UserId,
    Title,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    Id,
    RecipeId,
    IngredientId,
    Position,
    Quantity,
    Unit,
}

#[derive(Iden, Clone)]
pub enum ShoppingListItem {
    Table,
    Id,
    UserId,
    Position,
    Name,
    Quantity,
    Unit,
    Category,
    IsChecked,
}
