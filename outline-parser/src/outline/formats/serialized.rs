//! Structured output through serde: JSON and YAML

use super::registry::{FormatError, Formatter};
use crate::outline::ast::Outline;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full outline as pretty-printed JSON"
    }

    fn serialize(&self, outline: &Outline) -> Result<String, FormatError> {
        serde_json::to_string_pretty(outline)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "Full outline as YAML"
    }

    fn serialize(&self, outline: &Outline) -> Result<String, FormatError> {
        serde_yaml::to_string(outline).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
