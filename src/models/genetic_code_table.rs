use std::fmt;

use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The NCBI translation tables known to *gbconvert*
///
/// Tables are looked up by number or by name. Lookups never fail: unknown
/// tables resolve to [`GeneticCodeTable::InvertebrateMitochondrial`], the
/// default table of the mitochondrial annotation pipelines this crate serves.
///
/// # Examples
/// ```rust
/// use gbconvert::models::GeneticCodeTable;
///
/// assert_eq!(GeneticCodeTable::from_table_number(2), GeneticCodeTable::VertebrateMitochondrial);
/// assert_eq!(GeneticCodeTable::from_name_or_number("standard"), GeneticCodeTable::Standard);
/// assert_eq!(GeneticCodeTable::from_name_or_number("11"), GeneticCodeTable::Bacterial);
///
/// // unknown tables fall back to the invertebrate mitochondrial code
/// assert_eq!(GeneticCodeTable::from_table_number(999).table_number(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneticCodeTable {
    Standard,
    VertebrateMitochondrial,
    YeastMitochondrial,
    MoldMitochondrial,
    InvertebrateMitochondrial,
    CiliateNuclear,
    EchinodermMitochondrial,
    EuplotidNuclear,
    Bacterial,
    AlternativeYeastNuclear,
    AscidianMitochondrial,
}

impl Default for GeneticCodeTable {
    fn default() -> Self {
        GeneticCodeTable::InvertebrateMitochondrial
    }
}

impl GeneticCodeTable {
    /// All tables in order of their NCBI number
    pub const ALL: [GeneticCodeTable; 11] = [
        GeneticCodeTable::Standard,
        GeneticCodeTable::VertebrateMitochondrial,
        GeneticCodeTable::YeastMitochondrial,
        GeneticCodeTable::MoldMitochondrial,
        GeneticCodeTable::InvertebrateMitochondrial,
        GeneticCodeTable::CiliateNuclear,
        GeneticCodeTable::EchinodermMitochondrial,
        GeneticCodeTable::EuplotidNuclear,
        GeneticCodeTable::Bacterial,
        GeneticCodeTable::AlternativeYeastNuclear,
        GeneticCodeTable::AscidianMitochondrial,
    ];

    /// The NCBI `transl_table` number
    pub fn table_number(&self) -> u8 {
        match self {
            GeneticCodeTable::Standard => 1,
            GeneticCodeTable::VertebrateMitochondrial => 2,
            GeneticCodeTable::YeastMitochondrial => 3,
            GeneticCodeTable::MoldMitochondrial => 4,
            GeneticCodeTable::InvertebrateMitochondrial => 5,
            GeneticCodeTable::CiliateNuclear => 6,
            GeneticCodeTable::EchinodermMitochondrial => 9,
            GeneticCodeTable::EuplotidNuclear => 10,
            GeneticCodeTable::Bacterial => 11,
            GeneticCodeTable::AlternativeYeastNuclear => 12,
            GeneticCodeTable::AscidianMitochondrial => 13,
        }
    }

    /// Human readable description, following the NCBI table names
    pub fn description(&self) -> &'static str {
        match self {
            GeneticCodeTable::Standard => "Standard",
            GeneticCodeTable::VertebrateMitochondrial => "Vertebrate Mitochondrial",
            GeneticCodeTable::YeastMitochondrial => "Yeast Mitochondrial",
            GeneticCodeTable::MoldMitochondrial => {
                "Mold, Protozoan, and Coelenterate Mitochondrial"
            }
            GeneticCodeTable::InvertebrateMitochondrial => "Invertebrate Mitochondrial",
            GeneticCodeTable::CiliateNuclear => "Ciliate, Dasycladacean and Hexamita Nuclear",
            GeneticCodeTable::EchinodermMitochondrial => "Echinoderm and Flatworm Mitochondrial",
            GeneticCodeTable::EuplotidNuclear => "Euplotid Nuclear",
            GeneticCodeTable::Bacterial => "Bacterial, Archaeal and Plant Plastid",
            GeneticCodeTable::AlternativeYeastNuclear => "Alternative Yeast Nuclear",
            GeneticCodeTable::AscidianMitochondrial => "Ascidian Mitochondrial",
        }
    }

    /// Identifier of the table, e.g. `VERTEBRATE_MITOCHONDRIAL`
    pub fn name(&self) -> &'static str {
        match self {
            GeneticCodeTable::Standard => "STANDARD",
            GeneticCodeTable::VertebrateMitochondrial => "VERTEBRATE_MITOCHONDRIAL",
            GeneticCodeTable::YeastMitochondrial => "YEAST_MITOCHONDRIAL",
            GeneticCodeTable::MoldMitochondrial => "MOLD_MITOCHONDRIAL",
            GeneticCodeTable::InvertebrateMitochondrial => "INVERTEBRATE_MITOCHONDRIAL",
            GeneticCodeTable::CiliateNuclear => "CILIATE_NUCLEAR",
            GeneticCodeTable::EchinodermMitochondrial => "ECHINODERM_MITOCHONDRIAL",
            GeneticCodeTable::EuplotidNuclear => "EUPLOTID_NUCLEAR",
            GeneticCodeTable::Bacterial => "BACTERIAL",
            GeneticCodeTable::AlternativeYeastNuclear => "ALTERNATIVE_YEAST_NUCLEAR",
            GeneticCodeTable::AscidianMitochondrial => "ASCIDIAN_MITOCHONDRIAL",
        }
    }

    /// Returns the table with the given NCBI number
    ///
    /// Unknown numbers return [`GeneticCodeTable::InvertebrateMitochondrial`]
    pub fn from_table_number(number: u32) -> Self {
        match GeneticCodeTable::ALL
            .iter()
            .find(|table| u32::from(table.table_number()) == number)
        {
            Some(table) => *table,
            None => {
                warn!(
                    "Unknown genetic code table {}, using {}",
                    number,
                    GeneticCodeTable::default()
                );
                GeneticCodeTable::default()
            }
        }
    }

    /// Returns the table matching a number, name or description
    ///
    /// Names and descriptions are compared case-insensitively.
    /// Unknown or empty input returns [`GeneticCodeTable::InvertebrateMitochondrial`]
    ///
    /// # Examples
    /// ```rust
    /// use gbconvert::models::GeneticCodeTable;
    ///
    /// assert_eq!(
    ///     GeneticCodeTable::from_name_or_number("vertebrate_mitochondrial"),
    ///     GeneticCodeTable::VertebrateMitochondrial
    /// );
    /// assert_eq!(
    ///     GeneticCodeTable::from_name_or_number("Vertebrate Mitochondrial"),
    ///     GeneticCodeTable::VertebrateMitochondrial
    /// );
    /// assert_eq!(
    ///     GeneticCodeTable::from_name_or_number(""),
    ///     GeneticCodeTable::InvertebrateMitochondrial
    /// );
    /// ```
    pub fn from_name_or_number(value: &str) -> Self {
        let value = value.trim();
        if let Ok(number) = value.parse::<u32>() {
            return GeneticCodeTable::from_table_number(number);
        }
        match GeneticCodeTable::ALL.iter().find(|table| {
            table.name().eq_ignore_ascii_case(value)
                || table.description().eq_ignore_ascii_case(value)
        }) {
            Some(table) => *table,
            None => {
                warn!(
                    "Unknown genetic code table '{}', using {}",
                    value,
                    GeneticCodeTable::default()
                );
                GeneticCodeTable::default()
            }
        }
    }
}

impl fmt::Display for GeneticCodeTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<&str> for GeneticCodeTable {
    fn from(value: &str) -> Self {
        GeneticCodeTable::from_name_or_number(value)
    }
}

impl Serialize for GeneticCodeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.table_number())
    }
}

/// Tables are configured either by number (`5`) or by name (`"standard"`)
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTable {
    Number(u32),
    Name(String),
}

impl<'de> Deserialize<'de> for GeneticCodeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawTable::deserialize(deserializer)? {
            RawTable::Number(number) => GeneticCodeTable::from_table_number(number),
            RawTable::Name(name) => GeneticCodeTable::from_name_or_number(&name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_numbers_round_trip() {
        for table in GeneticCodeTable::ALL {
            assert_eq!(
                GeneticCodeTable::from_table_number(u32::from(table.table_number())),
                table
            );
        }
    }

    #[test]
    fn test_unknown_number() {
        assert_eq!(
            GeneticCodeTable::from_table_number(999),
            GeneticCodeTable::InvertebrateMitochondrial
        );
        assert_eq!(
            GeneticCodeTable::from_table_number(0),
            GeneticCodeTable::InvertebrateMitochondrial
        );
        assert_eq!(
            GeneticCodeTable::from_table_number(7),
            GeneticCodeTable::InvertebrateMitochondrial
        );
    }

    #[test]
    fn test_by_name() {
        assert_eq!(
            GeneticCodeTable::from_name_or_number("STANDARD"),
            GeneticCodeTable::Standard
        );
        assert_eq!(
            GeneticCodeTable::from_name_or_number("bacterial, archaeal and plant plastid"),
            GeneticCodeTable::Bacterial
        );
        assert_eq!(
            GeneticCodeTable::from_name_or_number("  2 "),
            GeneticCodeTable::VertebrateMitochondrial
        );
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            GeneticCodeTable::from_name_or_number("martian"),
            GeneticCodeTable::InvertebrateMitochondrial
        );
        assert_eq!(
            GeneticCodeTable::from_name_or_number("-1"),
            GeneticCodeTable::InvertebrateMitochondrial
        );
    }

    #[test]
    fn test_deserialize() {
        let table: GeneticCodeTable = serde_json::from_str("2").unwrap();
        assert_eq!(table, GeneticCodeTable::VertebrateMitochondrial);
        let table: GeneticCodeTable = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(table, GeneticCodeTable::Standard);
        let table: GeneticCodeTable = serde_json::from_str("\"nonsense\"").unwrap();
        assert_eq!(table, GeneticCodeTable::InvertebrateMitochondrial);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            GeneticCodeTable::InvertebrateMitochondrial.to_string(),
            "Invertebrate Mitochondrial"
        );
    }
}
