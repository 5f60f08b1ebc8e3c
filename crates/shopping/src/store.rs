use async_trait::async_trait;
use serde::Serialize;

use crate::categorization::{Category, ClassifiedItem};

/// Shopping list row as persisted for a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
    pub is_checked: bool,
}

/// Where generated shopping lists are kept
#[async_trait]
pub trait ShoppingListStore: Send + Sync {
    /// Replace every item of the user with `items`, all unchecked
    ///
    /// Returns the number of rows written.
    async fn replace_items(&self, user_id: &str, items: &[ClassifiedItem]) -> anyhow::Result<usize>;

    async fn list_items(&self, user_id: &str) -> anyhow::Result<Vec<ShoppingListItem>>;
}

/// Group items by category, in grocery store walking order
pub fn group_by_category(items: &[ShoppingListItem]) -> Vec<(Category, Vec<&ShoppingListItem>)> {
    let mut groups: Vec<(Category, Vec<&ShoppingListItem>)> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|(category, _)| *category == item.category) {
            Some((_, group)) => group.push(item),
            None => groups.push((item.category, vec![item])),
        }
    }

    groups.sort_by_key(|(category, _)| store_order(*category));
    groups
}

fn store_order(category: Category) -> u8 {
    match category {
        Category::Produce => 0,
        Category::Dairy => 1,
        Category::Meats => 2,
        Category::Bakery => 3,
        Category::Pantry => 4,
        Category::Frozen => 5,
        Category::Household => 6,
        Category::Other => 7,
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        use mealwise_db::table::ShoppingListItem as ShoppingListItemTable;
        use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
        use sea_query_sqlx::SqlxBinder;
        use sqlx::SqlitePool;

        /// Shopping lists kept in the `shopping_list_item` table
        #[derive(Clone)]
        pub struct SqliteShoppingListStore(pub SqlitePool);

        type ShoppingListRow = (String, String, String, f64, String, String, bool);

        /// Rows per INSERT, 8 bound values each (SQLite caps a statement at 32766)
        const INSERT_CHUNK_SIZE: usize = 500;

        #[async_trait]
        impl ShoppingListStore for SqliteShoppingListStore {
            async fn replace_items(
                &self,
                user_id: &str,
                items: &[ClassifiedItem],
            ) -> anyhow::Result<usize> {
                let mut tx = self.0.begin().await?;

                let statement = Query::delete()
                    .from_table(ShoppingListItemTable::Table)
                    .and_where(Expr::col(ShoppingListItemTable::UserId).eq(user_id))
                    .to_owned();

                let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
                let deleted = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

                for (chunk_index, chunk) in items.chunks(INSERT_CHUNK_SIZE).enumerate() {
                    let mut statement = Query::insert()
                        .into_table(ShoppingListItemTable::Table)
                        .columns([
                            ShoppingListItemTable::Id,
                            ShoppingListItemTable::UserId,
                            ShoppingListItemTable::Position,
                            ShoppingListItemTable::Name,
                            ShoppingListItemTable::Quantity,
                            ShoppingListItemTable::Unit,
                            ShoppingListItemTable::Category,
                            ShoppingListItemTable::IsChecked,
                        ])
                        .to_owned();

                    for (offset, item) in chunk.iter().enumerate() {
                        let position = chunk_index * INSERT_CHUNK_SIZE + offset;

                        statement.values([
                            ulid::Ulid::new().to_string().into(),
                            user_id.into(),
                            (position as i64).into(),
                            item.name.to_owned().into(),
                            item.quantity.into(),
                            item.unit.to_owned().into(),
                            item.category.to_string().into(),
                            false.into(),
                        ])?;
                    }

                    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
                    sqlx::query_with(&sql, values).execute(&mut *tx).await?;
                }

                tx.commit().await?;

                tracing::info!(
                    user_id,
                    replaced = deleted.rows_affected(),
                    inserted = items.len(),
                    "shopping list items replaced"
                );

                Ok(items.len())
            }

            async fn list_items(&self, user_id: &str) -> anyhow::Result<Vec<ShoppingListItem>> {
                let statement = Query::select()
                    .columns([
                        ShoppingListItemTable::Id,
                        ShoppingListItemTable::UserId,
                        ShoppingListItemTable::Name,
                        ShoppingListItemTable::Quantity,
                        ShoppingListItemTable::Unit,
                        ShoppingListItemTable::Category,
                        ShoppingListItemTable::IsChecked,
                    ])
                    .from(ShoppingListItemTable::Table)
                    .and_where(Expr::col(ShoppingListItemTable::UserId).eq(user_id))
                    .order_by(ShoppingListItemTable::Position, Order::Asc)
                    .to_owned();

                let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
                let rows = sqlx::query_as_with::<_, ShoppingListRow, _>(&sql, values)
                    .fetch_all(&self.0)
                    .await?;

                Ok(rows
                    .into_iter()
                    .map(|(id, user_id, name, quantity, unit, category, is_checked)| ShoppingListItem {
                        id,
                        user_id,
                        name,
                        quantity,
                        unit,
                        category: Category::from_label(&category),
                        is_checked,
                    })
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: Category) -> ShoppingListItem {
        ShoppingListItem {
            id: name.to_string(),
            user_id: "john".to_string(),
            name: name.to_string(),
            quantity: 1.0,
            unit: "piece".to_string(),
            category,
            is_checked: false,
        }
    }

    #[test]
    fn test_group_by_category_store_order() {
        let items = vec![
            item("Salt", Category::Pantry),
            item("Egg", Category::Dairy),
            item("Sponges", Category::Household),
            item("Tomato", Category::Produce),
            item("Milk", Category::Dairy),
        ];

        let groups = group_by_category(&items);
        let categories: Vec<_> = groups.iter().map(|(category, _)| *category).collect();

        assert_eq!(
            categories,
            vec![Category::Produce, Category::Dairy, Category::Pantry, Category::Household]
        );

        let dairy: Vec<_> = groups[1].1.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(dairy, vec!["Egg", "Milk"]);
    }

    #[test]
    fn test_group_by_category_empty() {
        assert!(group_by_category(&[]).is_empty());
    }
}
