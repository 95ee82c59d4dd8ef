use super::*;
use crate::core::types::Host;

fn dep(slug: &str, name: &str, required: bool) -> Dependency {
    Dependency {
        slug: slug.to_string(),
        name: name.to_string(),
        uri: format!("https://github.com/acme/{}", name),
        host: Host::Github,
        branch: "main".to_string(),
        token: None,
        required,
        source: String::new(),
        download_link: None,
    }
}

#[test]
fn test_register_stamps_source() {
    let mut registry = Registry::new();
    registry.register(vec![dep("a/a.php", "A", false)], "caller-one");

    let stored = registry.get("a/a.php").expect("registered");
    assert_eq!(stored.source, "caller-one");
}

#[test]
fn test_first_optional_declaration_wins() {
    let mut registry = Registry::new();
    registry.register(vec![dep("a/a.php", "First", false)], "one");
    registry.register(vec![dep("a/a.php", "Second", false)], "two");

    let stored = registry.get("a/a.php").expect("registered");
    assert_eq!(stored.name, "First");
    assert_eq!(stored.source, "one");
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_required_overrides_optional() {
    let mut registry = Registry::new();
    registry.register(vec![dep("a/a.php", "Optional", false)], "one");
    registry.register(vec![dep("a/a.php", "Required", true)], "two");

    let stored = registry.get("a/a.php").expect("registered");
    assert!(stored.required);
    assert_eq!(stored.source, "two");
}

#[test]
fn test_required_survives_optional_noise() {
    let mut registry = Registry::new();
    registry.register(vec![dep("a/a.php", "Required", true)], "owner");
    for i in 0..5 {
        registry.register(vec![dep("a/a.php", "Noise", false)], &format!("noise-{}", i));
    }

    let stored = registry.get("a/a.php").expect("registered");
    assert!(stored.required);
    assert_eq!(stored.name, "Required");
    assert_eq!(stored.source, "owner");
}

#[test]
fn test_later_required_replaces_earlier_required() {
    let mut registry = Registry::new();
    registry.register(vec![dep("a/a.php", "One", true)], "one");
    registry.register(vec![dep("a/a.php", "Two", true)], "two");

    assert_eq!(registry.get("a/a.php").expect("registered").source, "two");
}

#[test]
fn test_order_is_first_registration_order() {
    let mut registry = Registry::new();
    registry.register(
        vec![dep("b/b.php", "B", false), dep("a/a.php", "A", false)],
        "one",
    );
    registry.register(vec![dep("b/b.php", "B2", true)], "two");

    let slugs: Vec<&str> = registry.all().iter().map(|d| d.slug.as_str()).collect();
    assert_eq!(slugs, vec!["b/b.php", "a/a.php"]);
}

#[test]
fn test_get_unknown_slug() {
    let registry = Registry::new();
    assert!(registry.get("missing/missing.php").is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_set_download_link() {
    let mut registry = Registry::new();
    registry.register(vec![dep("a/a.php", "A", false)], "one");
    registry.set_download_link("a/a.php", Some("https://example.com/a.zip".into()));

    assert_eq!(
        registry.get("a/a.php").and_then(|d| d.download_link.as_deref()),
        Some("https://example.com/a.zip")
    );
}
