//! Conversion options, read from a JSON file and/or the command line
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::TranslationOptions;
use crate::utils::errors::ReadWriteError;

/// Date format of the GenBank `LOCUS` line, e.g. `16-OCT-2026`
pub const GENBANK_DATE_FORMAT: &str = "%d-%b-%Y";

/// Topology of a sequence molecule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    #[default]
    Linear,
    Circular,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Topology::Linear => "linear",
            Topology::Circular => "circular",
        })
    }
}

/// Everything that controls how a GenBank file is written
///
/// All keys are optional in the JSON representation.
///
/// # Examples
/// ```rust
/// use gbconvert::config::{ConversionOptions, Topology};
/// use gbconvert::models::GeneticCodeTable;
///
/// let options: ConversionOptions = serde_json::from_str(r#"{
///     "organism": "Drosophila melanogaster",
///     "topology": "circular",
///     "translation": {"geneticCodeTable": "INVERTEBRATE_MITOCHONDRIAL"}
/// }"#).unwrap();
///
/// assert_eq!(options.topology, Topology::Circular);
/// assert_eq!(options.division, "UNK");
/// assert_eq!(options.translation.genetic_code_table, GeneticCodeTable::InvertebrateMitochondrial);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionOptions {
    pub organism: String,
    pub molecule_type: String,
    pub topology: Topology,
    /// GenBank division, e.g. `INV` or `VRT`
    pub division: String,
    /// Overrides the `DEFINITION` line of all records
    pub definition: Option<String>,
    /// Date of the `LOCUS` line (`DD-MON-YYYY`), defaults to today
    pub date: Option<String>,
    pub translation: TranslationOptions,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            organism: "unknown".to_string(),
            molecule_type: "DNA".to_string(),
            topology: Topology::default(),
            division: "UNK".to_string(),
            definition: None,
            date: None,
            translation: TranslationOptions::default(),
        }
    }
}

impl ConversionOptions {
    /// Reads and validates options from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let options: Self = serde_json::from_str(&content)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the values that end up in the `LOCUS` line
    pub fn validate(&self) -> Result<(), ReadWriteError> {
        if self.division.len() != 3 || !self.division.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ReadWriteError::format(format!(
                "invalid GenBank division '{}': expected 3 uppercase letters",
                self.division
            )));
        }
        if self.molecule_type.trim().is_empty() {
            return Err(ReadWriteError::format("molecule type must not be empty"));
        }
        if let Some(date) = &self.date {
            NaiveDate::parse_from_str(date, GENBANK_DATE_FORMAT).map_err(|err| {
                ReadWriteError::format(format!("invalid date '{}': {}", date, err))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::models::GeneticCodeTable;

    fn write_config(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_all_fields() {
        let f = write_config(
            r#"{
                "organism": "Homo sapiens",
                "moleculeType": "DNA",
                "topology": "circular",
                "division": "PRI",
                "definition": "Homo sapiens mitochondrion, complete genome",
                "date": "01-JAN-2024",
                "translation": {
                    "geneticCodeTable": 2,
                    "includeStopCodon": true,
                    "translateCds": false,
                    "allowInternalStopCodons": true
                }
            }"#,
        );
        let options = ConversionOptions::from_file(f.path()).unwrap();
        assert_eq!(options.organism, "Homo sapiens");
        assert_eq!(options.division, "PRI");
        assert_eq!(
            options.translation.genetic_code_table,
            GeneticCodeTable::VertebrateMitochondrial
        );
        assert!(!options.translation.translate_cds);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let f = write_config("{}");
        let options = ConversionOptions::from_file(f.path()).unwrap();
        assert_eq!(options, ConversionOptions::default());
    }

    #[test]
    fn test_invalid_json() {
        let f = write_config("{\"organism\": ");
        assert!(matches!(
            ConversionOptions::from_file(f.path()),
            Err(ReadWriteError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_division() {
        let f = write_config(r#"{"division": "mammal"}"#);
        assert!(matches!(
            ConversionOptions::from_file(f.path()),
            Err(ReadWriteError::Format(_))
        ));
    }

    #[test]
    fn test_invalid_date() {
        let f = write_config(r#"{"date": "2024-01-01"}"#);
        assert!(ConversionOptions::from_file(f.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ConversionOptions::from_file("/nonexistent/gbconvert.json"),
            Err(ReadWriteError::Io(_))
        ));
    }
}
