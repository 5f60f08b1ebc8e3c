use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::commands::ShoppingListError;

/// Category for grocery store organization
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    /// Fruits, vegetables, herbs
    Produce,
    /// Milk, cheese, eggs, yogurt
    Dairy,
    /// Meat, poultry, fish
    #[strum(to_string = "Meats", serialize = "Meat")]
    Meats,
    /// Bread, pastries
    Bakery,
    /// Spices, oils, canned goods, grains, pasta
    Pantry,
    Frozen,
    /// Cleaning and other non-food items
    Household,
    #[default]
    Other,
}

impl Category {
    /// Parse a label coming back from a classifier, falling back to `Other`
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(label, "unknown shopping category, using Other");
            Category::Other
        })
    }
}

/// What a classifier receives for one consolidated line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationInput {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// A consolidated line after classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
}

/// Assigns a category to every consolidated line and may polish its name.
///
/// Implementations are allowed to be non-deterministic (a language model
/// behind an API, for instance); `verify_classification` guards what they
/// return.
#[async_trait]
pub trait ShoppingClassifier: Send + Sync {
    async fn classify(&self, items: &[ClassificationInput]) -> anyhow::Result<Vec<ClassifiedItem>>;
}

/// Check that a classifier kept the aggregated amounts intact
///
/// The output must have the same number of lines and the same multiset of
/// `(quantity, unit)` pairs as the input. Names and order may change.
pub fn verify_classification(
    inputs: &[ClassificationInput],
    outputs: &[ClassifiedItem],
) -> Result<(), ShoppingListError> {
    if inputs.len() != outputs.len() {
        return Err(ShoppingListError::ClassificationContract(format!(
            "expected {} items, classifier returned {}",
            inputs.len(),
            outputs.len()
        )));
    }

    let mut expected: Vec<(&str, f64)> = inputs
        .iter()
        .map(|item| (item.unit.as_str(), item.quantity))
        .collect();
    let mut actual: Vec<(&str, f64)> = outputs
        .iter()
        .map(|item| (item.unit.as_str(), item.quantity))
        .collect();

    let by_unit_then_quantity =
        |a: &(&str, f64), b: &(&str, f64)| a.0.cmp(b.0).then(a.1.total_cmp(&b.1));
    expected.sort_by(by_unit_then_quantity);
    actual.sort_by(by_unit_then_quantity);

    if let Some((want, got)) = expected.iter().zip(actual.iter()).find(|(a, b)| a != b) {
        return Err(ShoppingListError::ClassificationContract(format!(
            "classifier changed amounts: expected {} {}, found {} {}",
            want.1, want.0, got.1, got.0
        )));
    }

    Ok(())
}

/// Keyword Classifier
///
/// Deterministic offline classifier backed by predefined mappings. Used when no
/// external classification service is configured.
///
/// Lookup tries the whole name first, then its last word ("red onion" is
/// produce because "onion" is). Unknown names land in `Other`.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn categorize(name: &str) -> Category {
        let normalized = name.trim().to_lowercase();

        if let Some(category) = Self::lookup(&normalized) {
            return category;
        }

        normalized
            .rsplit(' ')
            .next()
            .and_then(Self::lookup)
            .unwrap_or(Category::Other)
    }

    /// Capitalize the first letter, keep the rest as aggregated
    pub fn display_name(name: &str) -> String {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn lookup(name: &str) -> Option<Category> {
        if Self::is_produce(name) {
            return Some(Category::Produce);
        }

        if Self::is_dairy(name) {
            return Some(Category::Dairy);
        }

        if Self::is_meat(name) {
            return Some(Category::Meats);
        }

        if Self::is_bakery(name) {
            return Some(Category::Bakery);
        }

        if Self::is_pantry(name) {
            return Some(Category::Pantry);
        }

        if Self::is_frozen(name) {
            return Some(Category::Frozen);
        }

        if Self::is_household(name) {
            return Some(Category::Household);
        }

        None
    }

    fn is_produce(name: &str) -> bool {
        matches!(
            name,
            // Vegetables
            "tomato" | "tomatoes"
                | "onion" | "onions"
                | "garlic"
                | "lettuce"
                | "carrot" | "carrots"
                | "celery"
                | "pepper" | "peppers"
                | "cucumber" | "cucumbers"
                | "zucchini"
                | "broccoli"
                | "cauliflower"
                | "spinach"
                | "kale"
                | "cabbage"
                | "potato" | "potatoes"
                | "mushroom" | "mushrooms"
                | "avocado" | "avocados"
                | "eggplant"
                | "squash"
                | "ginger"
                | "shallot" | "shallots"
                | "leek" | "leeks"
                // Herbs
                | "cilantro"
                | "parsley"
                | "basil"
                | "mint"
                | "thyme"
                | "rosemary"
                | "dill"
                // Fruits
                | "apple" | "apples"
                | "banana" | "bananas"
                | "orange" | "oranges"
                | "lemon" | "lemons"
                | "lime" | "limes"
                | "strawberries"
                | "blueberries"
                | "raspberries"
                | "grapes"
                | "mango"
                | "pineapple"
        )
    }

    fn is_dairy(name: &str) -> bool {
        matches!(
            name,
            "milk"
                | "cream"
                | "heavy cream"
                | "sour cream"
                | "butter"
                | "cheese"
                | "cheddar"
                | "mozzarella"
                | "parmesan"
                | "feta"
                | "ricotta"
                | "yogurt"
                | "egg"
                | "eggs"
        )
    }

    fn is_meat(name: &str) -> bool {
        matches!(
            name,
            // Poultry
            "chicken"
                | "chicken breast"
                | "chicken thigh"
                | "chicken leg"
                | "chicken wing"
                | "turkey"
                | "duck"
                // Beef & pork
                | "beef"
                | "ground beef"
                | "steak"
                | "pork"
                | "bacon"
                | "ham"
                | "sausage"
                | "lamb"
                // Seafood
                | "fish"
                | "salmon"
                | "tuna"
                | "cod"
                | "shrimp"
                | "prawns"
                | "mussels"
        )
    }

    fn is_bakery(name: &str) -> bool {
        matches!(
            name,
            "bread" | "baguette" | "bun" | "buns" | "tortilla" | "tortillas" | "croissant" | "pita"
        )
    }

    fn is_pantry(name: &str) -> bool {
        matches!(
            name,
            // Grains & pasta
            "flour"
                | "rice"
                | "pasta"
                | "spaghetti"
                | "noodles"
                | "oats"
                | "quinoa"
                | "couscous"
                // Oils, vinegars, sauces
                | "oil"
                | "olive oil"
                | "vinegar"
                | "soy sauce"
                | "mustard"
                | "honey"
                | "sugar"
                // Spices
                | "salt"
                | "black pepper"
                | "paprika"
                | "cumin"
                | "cinnamon"
                | "oregano"
                // Canned & dry goods
                | "beans"
                | "chickpeas"
                | "lentils"
                | "tomato paste"
                | "stock"
                | "broth"
                | "baking powder"
                | "yeast"
        )
    }

    fn is_frozen(name: &str) -> bool {
        matches!(
            name,
            "frozen peas" | "frozen spinach" | "frozen berries" | "ice cream" | "puff pastry"
        )
    }

    fn is_household(name: &str) -> bool {
        matches!(
            name,
            "paper towels"
                | "aluminum foil"
                | "baking paper"
                | "parchment paper"
                | "dish soap"
                | "sponges"
                | "trash bags"
                | "toothpicks"
        )
    }
}

#[async_trait]
impl ShoppingClassifier for KeywordClassifier {
    async fn classify(&self, items: &[ClassificationInput]) -> anyhow::Result<Vec<ClassifiedItem>> {
        Ok(items
            .iter()
            .map(|item| ClassifiedItem {
                name: Self::display_name(&item.name),
                quantity: item.quantity,
                unit: item.unit.to_owned(),
                category: Self::categorize(&item.name),
            })
            .collect())
    }
}
