mod support;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::io::Write;
use tsl_lint::{ConfigError, LintConfig, Linter, RuleRegistry, RuleSetting, Severity};

#[test]
fn test_resolve_severity_forms() {
    let config = LintConfig::from_json(
        r#"{
            "rules": {
                "no-duplicate-case": "error",
                "prefer-ts-expect-error": ["warn"],
                "switch-exhaustiveness-check": ["error", { "requireDefaultForNonUnion": true }],
                "no-extra-non-null-assertion": 0,
                "no-unnecessary-condition": 1
            }
        }"#,
    )
    .unwrap();

    let settings = config.resolve().unwrap();
    let summary: Vec<(&str, Severity)> = settings
        .iter()
        .map(|s| (s.name.as_str(), s.severity))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("no-duplicate-case", Severity::Error),
            ("prefer-ts-expect-error", Severity::Warn),
            ("switch-exhaustiveness-check", Severity::Error),
            ("no-extra-non-null-assertion", Severity::Off),
            ("no-unnecessary-condition", Severity::Warn),
        ]
    );
    assert_eq!(
        settings[2],
        RuleSetting {
            name: "switch-exhaustiveness-check".to_string(),
            severity: Severity::Error,
            options: json!({ "requireDefaultForNonUnion": true }),
        }
    );
    assert_eq!(settings[0].options, Value::Null);
}

#[test]
fn test_invalid_severity() {
    let config = LintConfig::default().with_rule("no-duplicate-case", json!("loud"));
    assert!(matches!(
        config.resolve(),
        Err(ConfigError::InvalidSeverity { rule, .. }) if rule == "no-duplicate-case"
    ));

    let too_long = LintConfig::default().with_rule("no-duplicate-case", json!(["warn", {}, 3]));
    assert!(matches!(
        too_long.resolve(),
        Err(ConfigError::InvalidSeverity { .. })
    ));

    let out_of_range = LintConfig::default().with_rule("no-duplicate-case", json!(3));
    assert!(out_of_range.resolve().is_err());
}

#[test]
fn test_unknown_rule() {
    let config = LintConfig::default().with_rule("no-such-rule", json!("error"));
    let result = Linter::from_config(&config, &RuleRegistry::with_builtin_rules());
    assert!(matches!(result, Err(ConfigError::UnknownRule(name)) if name == "no-such-rule"));
}

#[test]
fn test_unknown_rule_is_fine_when_off() {
    let config = LintConfig::default().with_rule("no-such-rule", json!("off"));
    let linter = Linter::from_config(&config, &RuleRegistry::with_builtin_rules()).unwrap();
    assert_eq!(linter.rule_names().count(), 0);
}

#[test]
fn test_invalid_rule_options() {
    let registry = RuleRegistry::with_builtin_rules();
    assert!(matches!(
        registry.create("no-duplicate-case", &json!({ "foo": 1 })),
        Err(ConfigError::InvalidOptions { rule, .. }) if rule == "no-duplicate-case"
    ));
    assert!(matches!(
        registry.create(
            "switch-exhaustiveness-check",
            &json!({ "requireDefaultForNonUnion": "yes" })
        ),
        Err(ConfigError::InvalidOptions { .. })
    ));
    assert!(matches!(
        registry.create(
            "prefer-nullish-coalescing",
            &json!({ "ignorePrimitives": { "symbol": true } })
        ),
        Err(ConfigError::InvalidOptions { .. })
    ));

    let message = support::linter_error("no-duplicate-case", json!({ "foo": 1 }));
    assert!(message.starts_with("invalid options for rule `no-duplicate-case`"));
}

#[test]
fn test_every_builtin_rule_accepts_empty_options() {
    let registry = RuleRegistry::with_builtin_rules();
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names.len(), 9);
    for name in names {
        assert!(registry.create(name, &Value::Null).is_ok(), "{name}");
        assert!(registry.create(name, &json!({})).is_ok(), "{name}");
        let rule = registry.create(name, &Value::Null).unwrap();
        assert_eq!(rule.meta().name, name);
    }
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        LintConfig::from_json("{ \"rules\": "),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "rules": {{ "no-duplicate-case": "warn" }} }}"#).unwrap();
    let config = LintConfig::from_path(file.path()).unwrap();
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules["no-duplicate-case"], json!("warn"));
}

#[test]
fn test_from_path_reports_context() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let error = LintConfig::from_path(file.path()).unwrap_err();
    assert!(format!("{error:#}").contains("failed to parse lint config"));

    let missing = LintConfig::from_path(std::path::Path::new("/nonexistent/lint.json"))
        .unwrap_err();
    assert!(missing.to_string().contains("failed to read lint config"));
}
