use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// Percentiles offered by the host editor panel.
pub const PERCENTILE_CHOICES: [f64; 4] = [0.25, 0.5, 0.75, 0.95];

pub const DEFAULT_PERCENTILE: f64 = 0.5;

/// What to do with an entries cell that is present but cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedEntries {
    /// Log a warning and render the group without entries.
    #[default]
    Skip,
    /// Fail the whole transform with `TransformError::MalformedEntries`.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub marks: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<String>,
    #[serde(
        default = "default_percentile",
        deserialize_with = "percentile_or_default"
    )]
    pub percentile: f64,
    #[serde(default, alias = "malformedEntries")]
    pub malformed_entries: MalformedEntries,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            marks: Vec::new(),
            entries: Vec::new(),
            percentile: DEFAULT_PERCENTILE,
            malformed_entries: MalformedEntries::default(),
        }
    }
}

impl TimelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Checks the percentile against the editor dropdown. `transform` never calls this;
    /// it is for the collaborator that owns the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if PERCENTILE_CHOICES.contains(&self.percentile) {
            Ok(())
        } else {
            Err(ConfigError::UnsupportedPercentile(self.percentile))
        }
    }

    pub fn editor_panel() -> Vec<EditorField> {
        vec![
            EditorField::Element { name: "source" },
            EditorField::Column {
                name: "marks",
                source: "source",
                allow_multiple: true,
            },
            EditorField::Column {
                name: "entries",
                source: "source",
                allow_multiple: true,
            },
            EditorField::Dropdown {
                name: "percentile",
                source: "source",
                values: PERCENTILE_CHOICES.to_vec(),
            },
        ]
    }
}

/// One field of the host configuration panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EditorField {
    Element {
        name: &'static str,
    },
    Column {
        name: &'static str,
        source: &'static str,
        #[serde(rename = "allowMultiple")]
        allow_multiple: bool,
    },
    Dropdown {
        name: &'static str,
        source: &'static str,
        values: Vec<f64>,
    },
}

fn default_percentile() -> f64 {
    DEFAULT_PERCENTILE
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn percentile_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_PERCENTILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = TimelineConfig::from_json_str("{}").expect("empty config parses");
        assert_eq!(config, TimelineConfig::default());
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let config =
            TimelineConfig::from_json_str(r#"{"marks": null, "entries": null, "percentile": null}"#)
                .expect("null config parses");
        assert!(config.marks.is_empty());
        assert!(config.entries.is_empty());
        assert_eq!(config.percentile, DEFAULT_PERCENTILE);
    }

    #[test]
    fn toml_config_accepts_snake_case_policy() {
        let config = TimelineConfig::from_toml_str(
            r#"
            marks = ["c1", "c2"]
            entries = ["c3"]
            percentile = 0.95
            malformed_entries = "error"
            "#,
        )
        .expect("toml parses");
        assert_eq!(config.marks, vec!["c1", "c2"]);
        assert_eq!(config.entries, vec!["c3"]);
        assert_eq!(config.percentile, 0.95);
        assert_eq!(config.malformed_entries, MalformedEntries::Error);
    }

    #[test]
    fn json_config_accepts_camel_case_policy() {
        let config = TimelineConfig::from_json_str(r#"{"malformedEntries": "error"}"#)
            .expect("json parses");
        assert_eq!(config.malformed_entries, MalformedEntries::Error);
    }

    #[test]
    fn validate_rejects_percentiles_outside_dropdown() {
        let mut config = TimelineConfig::default();
        for choice in PERCENTILE_CHOICES {
            config.percentile = choice;
            assert!(config.validate().is_ok());
        }

        config.percentile = 0.9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedPercentile(p)) if p == 0.9
        ));
    }

    #[test]
    fn editor_panel_serializes_host_field_shape() {
        let fields = serde_json::to_value(TimelineConfig::editor_panel()).expect("serializes");
        assert_eq!(fields[0]["type"], "element");
        assert_eq!(fields[1]["name"], "marks");
        assert_eq!(fields[1]["allowMultiple"], true);
        assert_eq!(fields[3]["type"], "dropdown");
        assert_eq!(fields[3]["values"][3], 0.95);
    }
}
