//! `key: value` dump of the metadata captured by the staged builders
//!
//! Multi-line values are printed on the lines following their key, indented by two spaces.

use super::registry::{FormatError, Formatter};
use crate::outline::ast::Outline;

pub struct MetadataFormatter;

impl Formatter for MetadataFormatter {
    fn name(&self) -> &str {
        "metadata"
    }

    fn description(&self) -> &str {
        "Captured front and back matter as key/value pairs"
    }

    fn serialize(&self, outline: &Outline) -> Result<String, FormatError> {
        let mut output = format!("genre: {}\n", outline.genre);
        if let Some(confidence) = outline.confidence {
            output.push_str(&format!("confidence: {confidence:.3}\n"));
        }

        for (key, value) in outline.metadata.iter() {
            let value = value.trim();
            if value.contains('\n') {
                output.push_str(&format!("{key}:\n"));
                for line in value.lines().filter(|l| !l.trim().is_empty()) {
                    output.push_str(&format!("  {}\n", line.trim()));
                }
            } else {
                output.push_str(&format!("{key}: {value}\n"));
            }
        }

        Ok(output)
    }
}
