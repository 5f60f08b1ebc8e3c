use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Unit used when a recipe ingredient has no unit at all ("2 eggs").
pub const DEFAULT_UNIT: &str = "piece";

/// Derived ingredient forms mapped to the item that is actually bought.
///
/// Chicken cuts map to themselves: they look alike on a list but are not
/// interchangeable at the counter, so they must never fold into each other.
static PARTIAL_INGREDIENTS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("egg white", "egg");
    map.insert("egg whites", "egg");
    map.insert("egg yolk", "egg");
    map.insert("egg yolks", "egg");
    map.insert("chicken breast", "chicken breast");
    map.insert("chicken thigh", "chicken thigh");
    map.insert("chicken leg", "chicken leg");
    map.insert("chicken wing", "chicken wing");
    map
});

/// Grouping identity of an ingredient reference: `name|unit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IngredientKey(String);

impl IngredientKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical ingredient name
///
/// Lowercases and trims, swaps a partial form for its whole ingredient when the
/// trimmed text matches the table exactly, then collapses inner whitespace.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let trimmed = lowered.trim();

    let mapped = PARTIAL_INGREDIENTS
        .get(trimmed)
        .copied()
        .unwrap_or(trimmed);

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical unit: lowercased and trimmed, `piece` when missing or blank
pub fn normalize_unit(unit: Option<&str>) -> String {
    match unit.map(str::trim) {
        Some(unit) if !unit.is_empty() => unit.to_lowercase(),
        _ => DEFAULT_UNIT.to_owned(),
    }
}

pub fn compute_key(name: &str, unit: Option<&str>) -> IngredientKey {
    IngredientKey(format!("{}|{}", normalize_name(name), normalize_unit(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_case_and_spacing() {
        assert_eq!(normalize_name("  Olive   Oil "), "olive oil");
        assert_eq!(normalize_name("TOMATO"), "tomato");
        assert_eq!(normalize_name("red\tbell  pepper"), "red bell pepper");
    }

    #[test]
    fn test_normalize_name_partial_forms() {
        assert_eq!(normalize_name("Egg White"), "egg");
        assert_eq!(normalize_name(" egg yolks "), "egg");
        assert_eq!(normalize_name("egg whites"), "egg");
    }

    #[test]
    fn test_normalize_name_keeps_cuts_apart() {
        assert_eq!(normalize_name("Chicken Breast"), "chicken breast");
        assert_eq!(normalize_name("chicken thigh"), "chicken thigh");
        assert_ne!(normalize_name("chicken breast"), normalize_name("chicken thigh"));
        assert_ne!(normalize_name("chicken leg"), normalize_name("chicken wing"));
    }

    #[test]
    fn test_partial_lookup_happens_before_whitespace_collapse() {
        // "egg  white" does not match the table exactly, so it stays its own item
        assert_eq!(normalize_name("egg  white"), "egg white");
    }

    #[test]
    fn test_normalize_unit() {
        assert_eq!(normalize_unit(Some(" Tablespoon ")), "tablespoon");
        assert_eq!(normalize_unit(Some("G")), "g");
        assert_eq!(normalize_unit(None), "piece");
        assert_eq!(normalize_unit(Some("")), "piece");
        assert_eq!(normalize_unit(Some("   ")), "piece");
    }

    #[test]
    fn test_compute_key_is_case_and_whitespace_insensitive() {
        assert_eq!(
            compute_key("Olive Oil", Some("Tablespoon")),
            compute_key(" olive oil ", Some("tablespoon"))
        );
        assert_eq!(compute_key("Olive Oil", Some("Tablespoon")).as_str(), "olive oil|tablespoon");
    }

    #[test]
    fn test_compute_key_default_unit() {
        assert_eq!(compute_key("Salt", None).to_string(), "salt|piece");
        assert_eq!(compute_key("salt", Some(" ")), compute_key("SALT", None));
    }

    #[test]
    fn test_compute_key_unit_sensitive() {
        assert_ne!(
            compute_key("olive oil", Some("gram")),
            compute_key("olive oil", Some("tablespoon"))
        );
    }
}
