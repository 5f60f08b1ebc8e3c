use std::collections::HashSet;

use mealwise_shopping::{
    AggregatedIngredient, IngredientAggregationService, RawIngredient, compute_key,
};

fn raw(name: &str, quantity: Option<f64>, unit: Option<&str>) -> RawIngredient {
    RawIngredient::new(name, quantity, unit)
}

/// A week of recipes with overlapping ingredients
fn weekly_ingredients() -> Vec<RawIngredient> {
    vec![
        // Monday: omelette
        raw("Egg", Some(3.0), None),
        raw("Milk", Some(50.0), Some("ml")),
        raw("Butter", Some(1.0), Some("tbsp")),
        // Tuesday: carbonara
        raw("Spaghetti", Some(200.0), Some("gram")),
        raw("egg yolk", Some(2.0), None),
        raw("Parmesan", Some(40.0), Some("gram")),
        raw("Black  Pepper", None, None),
        // Wednesday: roast chicken
        raw("Chicken Breast", Some(2.0), Some("piece")),
        raw("chicken thigh", Some(4.0), Some("piece")),
        raw("Olive Oil", Some(2.0), Some("Tablespoon")),
        // Thursday: meringue
        raw("Egg Whites", Some(4.0), None),
        raw("Sugar", Some(120.0), Some("gram")),
        // Friday: salad
        raw(" olive oil ", Some(15.0), Some("gram")),
        raw("olive oil", Some(1.0), Some("tablespoon ")),
        raw("black pepper", Some(1.0), Some("")),
    ]
}

fn total_quantity(lines: &[AggregatedIngredient]) -> f64 {
    lines.iter().map(|line| line.quantity).sum()
}

fn find<'a>(lines: &'a [AggregatedIngredient], name: &str, unit: &str) -> &'a AggregatedIngredient {
    lines
        .iter()
        .find(|line| line.name == name && line.unit == unit)
        .unwrap_or_else(|| panic!("missing line {name} ({unit})"))
}

fn sorted_lines(mut lines: Vec<AggregatedIngredient>) -> Vec<(String, String, f64)> {
    let mut result: Vec<_> = lines
        .drain(..)
        .map(|line| (line.name, line.unit, line.quantity))
        .collect();
    result.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    result
}

#[test]
fn test_full_week_aggregation() {
    let aggregated = IngredientAggregationService::aggregate(&weekly_ingredients());

    // egg + egg yolk + egg whites fold into one purchasable line
    let eggs = find(&aggregated, "egg", "piece");
    assert_eq!(eggs.quantity, 9.0);
    assert_eq!(eggs.original_names, vec!["Egg", "egg yolk", "Egg Whites"]);

    // cuts of chicken stay apart
    assert_eq!(find(&aggregated, "chicken breast", "piece").quantity, 2.0);
    assert_eq!(find(&aggregated, "chicken thigh", "piece").quantity, 4.0);

    // same ingredient, different units: no conversion
    let oil_spoons = find(&aggregated, "olive oil", "tablespoon");
    assert_eq!(oil_spoons.quantity, 3.0);
    assert_eq!(oil_spoons.original_names, vec!["Olive Oil", "olive oil"]);
    assert_eq!(find(&aggregated, "olive oil", "gram").quantity, 15.0);

    // a missing and a blank unit both mean "piece"; inner whitespace collapses
    let pepper = find(&aggregated, "black pepper", "piece");
    assert_eq!(pepper.quantity, 2.0);
    assert_eq!(pepper.original_names, vec!["Black  Pepper", "black pepper"]);

    assert_eq!(aggregated.len(), 11);
}

#[test]
fn test_quantity_conservation() {
    let ingredients = weekly_ingredients();
    let expected: f64 = ingredients.iter().map(RawIngredient::effective_quantity).sum();

    let aggregated = IngredientAggregationService::aggregate(&ingredients);

    assert_eq!(total_quantity(&aggregated), expected);
}

#[test]
fn test_partition_by_key() {
    let ingredients = weekly_ingredients();
    let aggregated = IngredientAggregationService::aggregate(&ingredients);

    let output_keys: Vec<_> = aggregated
        .iter()
        .map(|line| compute_key(&line.name, Some(line.unit.as_str())))
        .collect();
    let distinct: HashSet<_> = output_keys.iter().cloned().collect();
    assert_eq!(distinct.len(), output_keys.len(), "output keys must be distinct");

    let input_keys: HashSet<_> = ingredients
        .iter()
        .map(|i| compute_key(&i.name, i.unit.as_deref()))
        .collect();
    assert_eq!(input_keys, distinct);
}

#[test]
fn test_commutativity() {
    let ingredients = weekly_ingredients();
    let forward = IngredientAggregationService::aggregate(&ingredients);

    let mut reversed = ingredients.clone();
    reversed.reverse();
    let backward = IngredientAggregationService::aggregate(&reversed);

    let mut rotated = ingredients.clone();
    rotated.rotate_left(5);
    let shifted = IngredientAggregationService::aggregate(&rotated);

    assert_eq!(sorted_lines(forward.clone()), sorted_lines(backward.clone()));
    assert_eq!(sorted_lines(forward.clone()), sorted_lines(shifted));

    // original names follow the order of the given permutation
    assert_eq!(
        find(&backward, "egg", "piece").original_names,
        vec!["Egg Whites", "egg yolk", "Egg"]
    );
}

#[test]
fn test_input_not_mutated() {
    let ingredients = weekly_ingredients();
    let snapshot = ingredients.clone();

    let _ = IngredientAggregationService::aggregate(&ingredients);

    assert_eq!(ingredients, snapshot);
}

#[test]
fn test_stable_output_order() {
    let ingredients = weekly_ingredients();

    let first = IngredientAggregationService::aggregate(&ingredients);
    let second = IngredientAggregationService::aggregate(&ingredients);

    assert_eq!(first, second);
    assert_eq!(first[0].name, "egg");
    assert_eq!(first[1].name, "milk");
}

#[test]
fn test_partial_to_whole_merge() {
    let aggregated = IngredientAggregationService::aggregate(&[
        raw("egg white", Some(1.0), None),
        raw("egg yolk", Some(1.0), None),
        raw("egg", Some(1.0), None),
    ]);

    assert_eq!(
        aggregated,
        vec![AggregatedIngredient {
            name: "egg".to_string(),
            quantity: 3.0,
            unit: "piece".to_string(),
            original_names: vec![
                "egg white".to_string(),
                "egg yolk".to_string(),
                "egg".to_string()
            ],
        }]
    );
}

#[test]
fn test_distinct_cuts_not_merged() {
    let aggregated = IngredientAggregationService::aggregate(&[
        raw("chicken breast", Some(1.0), Some("piece")),
        raw("chicken thigh", Some(1.0), Some("piece")),
    ]);

    assert_eq!(aggregated.len(), 2);
    assert!(aggregated.iter().all(|line| line.quantity == 1.0));
}

#[test]
fn test_unit_sensitive_grouping() {
    let aggregated = IngredientAggregationService::aggregate(&[
        raw("olive oil", Some(15.0), Some("gram")),
        raw("olive oil", Some(2.0), Some("tablespoon")),
    ]);

    assert_eq!(
        sorted_lines(aggregated),
        vec![
            ("olive oil".to_string(), "gram".to_string(), 15.0),
            ("olive oil".to_string(), "tablespoon".to_string(), 2.0),
        ]
    );
}

#[test]
fn test_empty_input() {
    assert!(IngredientAggregationService::aggregate(&[]).is_empty());
}

#[test]
fn test_default_quantity_and_unit() {
    let aggregated = IngredientAggregationService::aggregate(&[raw("Salt", None, None)]);

    assert_eq!(
        aggregated,
        vec![AggregatedIngredient {
            name: "salt".to_string(),
            quantity: 1.0,
            unit: "piece".to_string(),
            original_names: vec!["Salt".to_string()],
        }]
    );
}

#[test]
fn test_json_shape() -> anyhow::Result<()> {
    let ingredients: Vec<RawIngredient> = serde_json::from_str(
        r#"[
            {"name": "Egg White", "quantity": 2},
            {"name": "egg", "quantity": null, "unit": null},
            {"name": "Flour", "quantity": 250, "unit": "Gram"}
        ]"#,
    )?;

    let aggregated = IngredientAggregationService::aggregate(&ingredients);
    let json = serde_json::to_value(&aggregated)?;

    assert_eq!(
        json,
        serde_json::json!([
            {"name": "egg", "quantity": 3.0, "unit": "piece", "originalNames": ["Egg White", "egg"]},
            {"name": "flour", "quantity": 250.0, "unit": "gram", "originalNames": ["Flour"]}
        ])
    );

    Ok(())
}
