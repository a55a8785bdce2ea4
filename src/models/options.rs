use serde::{Deserialize, Serialize};

use crate::models::GeneticCodeTable;

/// Options that control translation of coding features
///
/// # Examples
/// ```rust
/// use gbconvert::models::{GeneticCodeTable, TranslationOptions};
///
/// let options = TranslationOptions::default();
/// assert_eq!(options.genetic_code_table, GeneticCodeTable::InvertebrateMitochondrial);
/// assert!(options.translate_cds);
///
/// let options: TranslationOptions =
///     serde_json::from_str(r#"{"geneticCodeTable": 2, "includeStopCodon": true}"#).unwrap();
/// assert_eq!(options.genetic_code_table, GeneticCodeTable::VertebrateMitochondrial);
/// assert!(options.include_stop_codon);
/// assert!(options.translate_cds);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationOptions {
    pub genetic_code_table: GeneticCodeTable,
    /// Append `*` to translations that end with a stop codon
    pub include_stop_codon: bool,
    /// Add `/translation` qualifiers to coding features
    pub translate_cds: bool,
    /// Translate internal stop codons as `-` instead of ending the translation
    pub allow_internal_stop_codons: bool,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        TranslationOptions {
            genetic_code_table: GeneticCodeTable::default(),
            include_stop_codon: false,
            translate_cds: true,
            allow_internal_stop_codons: false,
        }
    }
}

impl TranslationOptions {
    pub fn new(genetic_code_table: GeneticCodeTable) -> Self {
        TranslationOptions {
            genetic_code_table,
            ..Default::default()
        }
    }
}
