use std::{fs, io::ErrorKind, path::Path};

use serde_json::{Map, Value};

use crate::error::{DumpError, LoadError};

pub const BETA_KIND: &str = "betaKind";
pub const BETA_KEY: &str = "betaKey";

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum Edit {
    Changed(String),
    // Empty file, or valid JSON that isn't an object.
    Unchanged,
}

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ConfigDocument(Map<String, Value>);

impl ConfigDocument {
    pub fn load(path: &Path) -> Result<Option<Self>, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LoadError::Missing(path.to_path_buf()),
            _ => LoadError::IO {
                path: path.to_path_buf(),
                source,
            },
        })?;

        Self::parse(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Option<Self>, sonic_rs::Error> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = sonic_rs::from_str(content)?;
        Ok(match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        })
    }

    pub fn to_string_pretty(&self) -> Result<String, DumpError> {
        sonic_rs::to_string_pretty(&self.0).map_err(Into::into)
    }

    // Absent keys stay absent.
    pub fn replace_string(&mut self, key: &str, value: &str) -> bool {
        match self.0.get_mut(key) {
            Some(slot) => {
                *slot = Value::String(value.to_owned());
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, beta_kind: Option<&str>, beta_key: Option<&str>) {
        if let Some(beta_kind) = beta_kind {
            let found = self.replace_string(BETA_KIND, beta_kind);
            tracing::debug!(field = BETA_KIND, found, "applied field");
        }

        let Some(beta_key) = beta_key else {
            return;
        };
        let found = self.replace_string(BETA_KEY, beta_key);
        tracing::debug!(field = BETA_KEY, found, "applied field");
    }
}

#[cfg(test)]
impl ConfigDocument {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

pub fn update(
    path: &Path,
    beta_kind: Option<&str>,
    beta_key: Option<&str>,
) -> Result<Edit, crate::error::Error> {
    let Some(mut document) = ConfigDocument::load(path)? else {
        return Ok(Edit::Unchanged);
    };

    document.apply(beta_kind, beta_key);
    Ok(Edit::Changed(document.to_string_pretty()?))
}

#[cfg(test)]
mod test {
    use std::fs;

    use insta::assert_snapshot;
    use rand::{Rng, distr::Alphanumeric};
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    const RAW_CONFIG: &str = r#"{
  "betaKind": "release",
  "betaKey": "",
  "doPluginTest": false,
  "pluginConfigs": {
    "betaKind": "nested"
  },
  "other": 1
}"#;

    fn document(value: Value) -> ConfigDocument {
        ConfigDocument::parse(&value.to_string()).unwrap().unwrap()
    }

    fn random_string(len: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    #[test]
    fn round_trip_test() {
        let res = ConfigDocument::parse(RAW_CONFIG)
            .unwrap()
            .unwrap()
            .to_string_pretty()
            .unwrap();
        assert_eq!(res, RAW_CONFIG);
    }

    #[test]
    fn apply_both_fields() {
        let mut doc = document(json!({"betaKind": "release", "betaKey": "", "other": 1}));
        doc.apply(Some("canary"), Some("abc123"));
        assert_eq!(
            doc,
            document(json!({"betaKind": "canary", "betaKey": "abc123", "other": 1}))
        );
    }

    #[test]
    fn apply_keeps_key_order_and_nested_fields() {
        let mut doc = ConfigDocument::parse(RAW_CONFIG).unwrap().unwrap();
        doc.apply(Some("stg"), Some("key"));
        assert_snapshot!(doc.to_string_pretty().unwrap(), @r#"
        {
          "betaKind": "stg",
          "betaKey": "key",
          "doPluginTest": false,
          "pluginConfigs": {
            "betaKind": "nested"
          },
          "other": 1
        }
        "#);
    }

    #[test]
    fn absent_fields_are_not_inserted() {
        let mut doc = document(json!({"other": [1, 2, 3]}));
        doc.apply(Some("canary"), Some("abc123"));
        assert_eq!(doc, document(json!({"other": [1, 2, 3]})));
    }

    #[test]
    fn non_string_fields_become_strings() {
        let mut doc = document(json!({"betaKind": null, "betaKey": 7}));
        doc.apply(Some("canary"), Some("abc123"));
        assert_eq!(doc.get(BETA_KIND), Some(&json!("canary")));
        assert_eq!(doc.get(BETA_KEY), Some(&json!("abc123")));
    }

    #[test]
    fn missing_beta_key_skips_field() {
        let mut doc = document(json!({"betaKind": "release", "betaKey": "old"}));
        doc.apply(Some("canary"), None);
        assert_eq!(doc.get(BETA_KEY), Some(&json!("old")));

        let mut doc = document(json!({"betaKind": "release", "betaKey": "old"}));
        doc.apply(None, None);
        assert_eq!(
            doc,
            document(json!({"betaKind": "release", "betaKey": "old"}))
        );
    }

    #[test]
    fn only_target_field_changes() {
        for _ in 0..32 {
            let value = json!({
                "betaKind": random_string(8),
                "betaKey": random_string(12),
                random_string(6): random_string(10),
                "nested": { random_string(4): [random_string(3), 1, true] },
            });
            let new_kind = random_string(5);

            let mut doc = document(value.clone());
            doc.apply(Some(&new_kind), None);

            let mut expected = value;
            expected[BETA_KIND] = json!(new_kind);
            assert_eq!(doc, document(expected));
        }
    }

    #[test]
    fn apply_is_idempotent() {
        for _ in 0..32 {
            let kind = random_string(6);
            let key = random_string(16);
            let source = json!({"betaKind": "release", "betaKey": "", "other": random_string(4)});

            let mut once = document(source.clone());
            once.apply(Some(&kind), Some(&key));

            let mut twice = document(source);
            twice.apply(Some(&kind), Some(&key));
            twice.apply(Some(&kind), Some(&key));

            assert_eq!(
                once.to_string_pretty().unwrap(),
                twice.to_string_pretty().unwrap()
            );
        }
    }

    #[test]
    fn update_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dalamudConfig.json");
        fs::write(&path, r#"{"betaKind":"release","betaKey":"","other":1}"#).unwrap();

        let Edit::Changed(content) = update(&path, Some("canary"), Some("abc123")).unwrap() else {
            panic!("expected a changed document");
        };
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value,
            json!({"betaKind": "canary", "betaKey": "abc123", "other": 1})
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"betaKind":"release","betaKey":"","other":1}"#
        );
    }

    #[test]
    fn update_non_object_is_unchanged() {
        let dir = tempdir().unwrap();
        for content in ["null", "[1, 2]", "\"text\"", "3", "", "  \n", "\u{feff}"] {
            let path = dir.path().join("dalamudConfig.json");
            fs::write(&path, content).unwrap();
            assert_eq!(
                update(&path, Some("canary"), Some("")).unwrap(),
                Edit::Unchanged
            );
        }
    }

    #[test]
    fn update_strips_byte_order_mark() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dalamudConfig.json");
        fs::write(&path, "\u{feff}{\"betaKind\":\"release\",\"betaKey\":\"\"}").unwrap();

        let Edit::Changed(content) = update(&path, Some("canary"), Some("abc123")).unwrap() else {
            panic!("expected a changed document");
        };
        assert!(content.starts_with('{'));
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, json!({"betaKind": "canary", "betaKey": "abc123"}));
    }

    #[test]
    fn load_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dalamudConfig.json");
        assert!(matches!(
            ConfigDocument::load(&path),
            Err(LoadError::Missing(missing)) if missing == path
        ));

        fs::write(&path, "{\"betaKind\": ").unwrap();
        assert!(matches!(
            ConfigDocument::load(&path),
            Err(LoadError::Parse { .. })
        ));
    }
}
