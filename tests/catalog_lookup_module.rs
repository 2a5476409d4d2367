use orgmap::catalog::{filter, load_catalog, parse_catalog, Catalog, CatalogError, CatalogFormat};
use std::fs;

const SOURCE_JSON: &str = r#"{
  "OrgList": ["Acme", "Globex"],
  "ProjectList": [
    {"key": "PROJ1", "name": "Payments"},
    {"key": "PROJ2"}
  ],
  "TeamList": [
    {"Team Name": "Platform", "Members": [{"Name": "Alice", "Loc": "NYC"}, {"Name": "Bob"}]},
    {"Team Name": "Empty"}
  ]
}"#;

#[test]
fn catalog_builtin_matches_reference_dataset() {
    let catalog = Catalog::builtin();
    assert!(catalog.list_organizations().contains(&"Acme".to_string()));
    assert!(catalog.list_projects().contains(&"PROJ1".to_string()));
    assert_eq!(catalog.roster_of("Platform"), vec!["Alice (NYC)", "Bob"]);
    assert!(catalog.validate().is_ok());
}

#[test]
fn catalog_parses_source_shaped_json_and_yaml() {
    let catalog = parse_catalog(SOURCE_JSON, CatalogFormat::Json, "inline").expect("json");
    assert_eq!(catalog.list_organizations(), vec!["Acme", "Globex"]);
    assert_eq!(catalog.project_label("PROJ1"), "PROJ1 (Payments)");
    assert_eq!(catalog.project_label("PROJ2"), "PROJ2");
    assert_eq!(catalog.project_label("UNKNOWN"), "UNKNOWN");
    assert_eq!(catalog.roster_of("Platform"), vec!["Alice (NYC)", "Bob"]);
    assert!(catalog.roster_of("Empty").is_empty());
    assert!(catalog.roster_of("Nope").is_empty());

    let yaml = "OrgList: [Initech]\nTeamList:\n  - Team Name: Ops\n    Members:\n      - Name: Zed\n        Loc: Remote\n";
    let catalog = parse_catalog(yaml, CatalogFormat::Yaml, "inline").expect("yaml");
    assert_eq!(catalog.list_teams(), vec!["Ops"]);
    assert!(catalog.list_projects().is_empty());
    assert_eq!(catalog.roster_of("Ops"), vec!["Zed (Remote)"]);
}

#[test]
fn catalog_load_rejects_duplicates_and_unknown_extensions() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dup = temp.path().join("dup.json");
    fs::write(&dup, r#"{"OrgList": ["Acme", "Acme"]}"#).expect("write");
    let err = load_catalog(&dup).expect_err("duplicate");
    assert!(matches!(err, CatalogError::Invalid(_)), "{err}");

    let txt = temp.path().join("catalog.txt");
    fs::write(&txt, "").expect("write");
    let err = load_catalog(&txt).expect_err("extension");
    assert!(matches!(err, CatalogError::UnsupportedFormat { .. }), "{err}");

    let broken = temp.path().join("broken.yaml");
    fs::write(&broken, "OrgList: [unterminated").expect("write");
    let err = load_catalog(&broken).expect_err("parse");
    assert!(matches!(err, CatalogError::Parse { .. }), "{err}");
}

#[test]
fn catalog_filter_is_case_insensitive_substring() {
    let items = vec![
        "Acme".to_string(),
        "Globex".to_string(),
        "Initech".to_string(),
    ];
    assert_eq!(filter(&items, "ACM"), vec!["Acme"]);
    assert_eq!(filter(&items, "e"), items);
    assert_eq!(filter(&items, ""), items);
    assert!(filter(&items, "zzz").is_empty());
}

#[test]
fn catalog_with_organization_returns_new_snapshot() {
    let catalog = Catalog::builtin();
    let next = catalog.with_organization("  Umbrella  ").expect("add");
    assert!(next.has_organization("Umbrella"));
    assert!(!catalog.has_organization("Umbrella"));
    assert_eq!(
        next.list_organizations().len(),
        catalog.list_organizations().len() + 1
    );

    let again = next.with_organization("Umbrella").expect("duplicate ignored");
    assert_eq!(again.list_organizations(), next.list_organizations());
    assert!(matches!(
        catalog.with_organization("   "),
        Err(CatalogError::BlankOrganization)
    ));
}
