//! Integration tests for loading settings from TOML files.

use std::fs;
use std::path::PathBuf;

use colexpr::config::{Settings, SettingsError};
use colexpr::prelude::*;

/// Write `content` to a fresh file under the system temp dir.
fn write_config(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("colexpr-settings-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_from_file_builds_configured_dialect() {
    let path = write_config(
        "oracle.toml",
        r#"
[dialect]
base = "oracle"

[dialect.phrases]
func_upper = "nls_upper(?)"

[render]
alias = true
full_names = false
"#,
    );

    let settings = Settings::from_file(&path).unwrap();
    let table = settings.dialect().unwrap();
    let ctx = settings.render.context();

    let e = table_col("c", "NAME", DataType::Varchar).upper().alias("UNAME");
    assert_eq!(e.to_sql_with(&table, ctx), "nls_upper(NAME) AS \"UNAME\"");

    let e = col("A", DataType::Integer).coalesce(0).unwrap();
    assert_eq!(e.to_sql_with(&table, ctx), "nvl(A, 0)");
}

#[test]
fn test_empty_file_uses_defaults() {
    let path = write_config("empty.toml", "");
    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.base_dialect().unwrap(), Dialect::Generic);
    assert_eq!(settings.render.context(), Context::DEFAULT);
    assert_eq!(settings.log.level, "warn");
}

#[test]
fn test_dialect_aliases_in_config() {
    let path = write_config("mssql.toml", "[dialect]\nbase = \"mssql\"\n");
    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.base_dialect().unwrap(), Dialect::SqlServer);
}

#[test]
fn test_malformed_toml() {
    let path = write_config("broken.toml", "[dialect\nbase = ");
    assert!(matches!(
        Settings::from_file(&path),
        Err(SettingsError::ParseError(_))
    ));
}

#[test]
fn test_bad_override_reported_on_build() {
    let path = write_config(
        "bad.toml",
        "[dialect]\nbase = \"mysql\"\n\n[dialect.phrases]\nfunc_lower = \"lower()\"\n",
    );
    let settings = Settings::from_file(&path).unwrap();
    assert!(matches!(
        settings.dialect(),
        Err(SettingsError::InvalidPhrase(ExprError::InvalidPhrase {
            phrase: Phrase::FuncLower,
            ..
        }))
    ));
}

#[test]
fn test_settings_round_trip_through_toml() {
    let mut settings = Settings::default();
    settings.dialect.base = "postgres".to_string();
    settings
        .dialect
        .phrases
        .insert("func_reverse".to_string(), "reverse(?)".to_string());
    let text = toml::to_string(&settings).unwrap();
    let path = write_config("round_trip.toml", &text);
    let loaded = Settings::from_file(&path).unwrap();
    assert_eq!(loaded.dialect.base, "postgres");
    assert_eq!(
        loaded.dialect().unwrap().sql_phrase(Phrase::FuncReverse),
        "reverse(?)"
    );
}
