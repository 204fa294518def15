use fabric_deploy::dispatch::DEFAULT_ITEM_TYPES;
use fabric_deploy::scope::{resolve, Scope};

#[test]
fn all_expression_resolves_to_default_types_regardless_of_case_and_spacing() {
    for expression in ["all", "ALL", " all ", "All"] {
        let resolved = resolve(expression, DEFAULT_ITEM_TYPES);
        assert_eq!(
            resolved,
            DEFAULT_ITEM_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>(),
            "expression {expression:?} should expand to the default type set"
        );
        assert_eq!(Scope::parse(expression), Scope::All);
    }
}

#[test]
fn comma_list_is_trimmed_and_order_preserving() {
    let resolved = resolve("Notebook, Report", DEFAULT_ITEM_TYPES);
    assert_eq!(resolved, vec!["Notebook".to_string(), "Report".to_string()]);

    let resolved = resolve("  Report ,Notebook", DEFAULT_ITEM_TYPES);
    assert_eq!(resolved, vec!["Report".to_string(), "Notebook".to_string()]);
}

#[test]
fn duplicates_collapse_to_first_occurrence() {
    let resolved = resolve("Notebook,Notebook", DEFAULT_ITEM_TYPES);
    assert_eq!(resolved, vec!["Notebook".to_string()]);

    let resolved = resolve("Report,Notebook,Report", DEFAULT_ITEM_TYPES);
    assert_eq!(resolved, vec!["Report".to_string(), "Notebook".to_string()]);
}

#[test]
fn empty_tokens_yield_empty_scope_not_all() {
    for expression in ["", "   ", ",", " , ,, "] {
        let scope = Scope::parse(expression);
        assert_eq!(scope, Scope::Types(vec![]), "expression {expression:?}");
        assert!(scope.is_empty());
        assert!(resolve(expression, DEFAULT_ITEM_TYPES).is_empty());
    }
}

#[test]
fn type_names_stay_case_sensitive() {
    let scope = Scope::parse("notebook");
    assert!(scope.contains("notebook"));
    assert!(!scope.contains("Notebook"));
}

#[test]
fn all_scope_passes_every_declared_type_but_resolves_to_defaults() {
    let scope = Scope::parse("all");
    // Declaration matching lets everything through (the executor then fails
    // unknown types without a network call)...
    assert!(scope.contains("Notebook"));
    assert!(scope.contains("SomethingNotInTheTable"));
    assert!(!scope.is_empty());
    // ...but the concrete managed set is the supported enumeration, which is
    // what orphan eligibility works from.
    assert_eq!(
        scope.item_types(DEFAULT_ITEM_TYPES),
        DEFAULT_ITEM_TYPES
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
    );
}
