use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::GeneticCodeTable;

/// Bases in NCBI order. The codon tables are listed as
/// ```text
/// -- Base1  UUUUUUUUUUUUUUUUCCCCCCCCCCCCCCCCAAAAAAAAAAAAAAAAGGGGGGGGGGGGGGGG
/// -- Base2  UUUUCCCCAAAAGGGGUUUUCCCCAAAAGGGGUUUUCCCCAAAAGGGGUUUUCCCCAAAAGGGG
/// -- Base3  UCAGUCAGUCAGUCAGUCAGUCAGUCAGUCAGUCAGUCAGUCAGUCAGUCAGUCAGUCAGUCAG
/// ```
/// https://www.ncbi.nlm.nih.gov/Taxonomy/Utils/wprintgc.cgi
const NCBI_BASES: [char; 4] = ['U', 'C', 'A', 'G'];

const STANDARD_AA: &str = "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";
const VERTEBRATE_MITO_AA: &str = "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG";
const INVERTEBRATE_MITO_AA: &str =
    "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG";

const STANDARD_STARTS: [&str; 3] = ["AUG", "GUG", "UUG"];
const VERTEBRATE_MITO_STARTS: [&str; 4] = ["AUG", "AUA", "AUU", "GUG"];
const INVERTEBRATE_MITO_STARTS: [&str; 6] = ["AUG", "AUA", "AUU", "AUC", "GUG", "UUG"];

/// Amino acid returned for codons that are not part of the table
pub const UNKNOWN_AMINO_ACID: char = '?';

/// Amino acid symbol of stop codons
pub const STOP: char = '*';

/// The genetic code is a lookup table from RNA codons to amino acids,
/// together with the start and stop codons of the table
///
/// Only the standard, vertebrate mitochondrial and invertebrate mitochondrial
/// codes carry their own data. All other [`GeneticCodeTable`]s use the
/// invertebrate mitochondrial code.
///
/// # Examples
/// ```
/// use gbconvert::models::{GeneticCode, GeneticCodeTable};
///
/// let code = GeneticCode::for_table(GeneticCodeTable::VertebrateMitochondrial);
/// assert_eq!(code.translate("UGA"), 'W');
/// assert_eq!(code.translate("aga"), '*');
/// assert!(code.is_stop_codon("AGG"));
/// assert_eq!(code.translate_start_codon("AUA"), 'M');
/// assert_eq!(code.translate("NNN"), '?');
/// ```
#[derive(Debug, Clone)]
pub struct GeneticCode {
    table: GeneticCodeTable,
    codons: HashMap<String, char>,
    start_codons: HashSet<String>,
    stop_codons: HashSet<String>,
}

impl Default for GeneticCode {
    /// The invertebrate mitochondrial code
    fn default() -> GeneticCode {
        GeneticCode::invertebrate_mitochondrial()
    }
}

impl PartialEq for GeneticCode {
    fn eq(&self, other: &Self) -> bool {
        self.codons == other.codons
            && self.start_codons == other.start_codons
            && self.stop_codons == other.stop_codons
    }
}
impl Eq for GeneticCode {}

impl fmt::Display for GeneticCode {
    /// Prints the amino acids in NCBI codon order
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let aa: String = ncbi_codons()
            .iter()
            .map(|codon| self.translate(codon))
            .collect();
        write!(f, "{}", aa)
    }
}

impl GeneticCode {
    /// Creates the genetic code for the given table
    pub fn for_table(table: GeneticCodeTable) -> GeneticCode {
        match table {
            GeneticCodeTable::Standard => GeneticCode::standard(),
            GeneticCodeTable::VertebrateMitochondrial => GeneticCode::vertebrate_mitochondrial(),
            GeneticCodeTable::InvertebrateMitochondrial => {
                GeneticCode::invertebrate_mitochondrial()
            }
            _ => GeneticCode::invertebrate_mitochondrial(),
        }
    }

    /// The [standard genetic code](https://en.wikipedia.org/wiki/DNA_codon_table)
    pub fn standard() -> GeneticCode {
        GeneticCode::from_ncbi(GeneticCodeTable::Standard, STANDARD_AA, &STANDARD_STARTS)
    }

    /// The [vertebrate mitochondrial code](https://en.wikipedia.org/wiki/Vertebrate_mitochondrial_code)
    pub fn vertebrate_mitochondrial() -> GeneticCode {
        GeneticCode::from_ncbi(
            GeneticCodeTable::VertebrateMitochondrial,
            VERTEBRATE_MITO_AA,
            &VERTEBRATE_MITO_STARTS,
        )
    }

    /// The [invertebrate mitochondrial code](https://en.wikipedia.org/wiki/Invertebrate_mitochondrial_code)
    pub fn invertebrate_mitochondrial() -> GeneticCode {
        GeneticCode::from_ncbi(
            GeneticCodeTable::InvertebrateMitochondrial,
            INVERTEBRATE_MITO_AA,
            &INVERTEBRATE_MITO_STARTS,
        )
    }

    /// Builds the lookup maps from an NCBI `ncbieaa` string
    ///
    /// Stop codons are all codons that translate to `*`
    fn from_ncbi(table: GeneticCodeTable, ncbieaa: &str, starts: &[&str]) -> GeneticCode {
        let codons: HashMap<String, char> = ncbi_codons().into_iter().zip(ncbieaa.chars()).collect();
        let stop_codons = codons
            .iter()
            .filter(|(_, aa)| **aa == STOP)
            .map(|(codon, _)| codon.clone())
            .collect();
        GeneticCode {
            table,
            codons,
            start_codons: starts.iter().map(|codon| codon.to_string()).collect(),
            stop_codons,
        }
    }

    /// The table whose data this code holds
    pub fn table(&self) -> GeneticCodeTable {
        self.table
    }

    /// Translates a single RNA codon into its amino acid
    ///
    /// The lookup is case-insensitive. Codons that are not part of the table
    /// (DNA codons, ambiguous bases, wrong length) translate to `?`
    pub fn translate(&self, codon: &str) -> char {
        match self.codons.get(&codon.to_ascii_uppercase()) {
            Some(aa) => *aa,
            None => UNKNOWN_AMINO_ACID,
        }
    }

    /// Translates the first codon of a coding sequence
    ///
    /// Start codons always code for Methionine, even if the same codon
    /// codes for a different amino acid inside the sequence.
    ///
    /// # Examples
    /// ```
    /// use gbconvert::models::GeneticCode;
    ///
    /// let code = GeneticCode::standard();
    /// assert_eq!(code.translate("GUG"), 'V');
    /// assert_eq!(code.translate_start_codon("GUG"), 'M');
    /// assert_eq!(code.translate_start_codon("CGA"), 'R');
    /// ```
    pub fn translate_start_codon(&self, codon: &str) -> char {
        if self.is_start_codon(codon) {
            'M'
        } else {
            self.translate(codon)
        }
    }

    /// Returns true if the codon is a start codon of this code
    pub fn is_start_codon(&self, codon: &str) -> bool {
        self.start_codons.contains(&codon.to_ascii_uppercase())
    }

    /// Returns true if the codon is a stop codon of this code
    pub fn is_stop_codon(&self, codon: &str) -> bool {
        self.stop_codons.contains(&codon.to_ascii_uppercase())
    }

    /// All start codons, sorted
    pub fn start_codons(&self) -> Vec<&str> {
        let mut codons: Vec<&str> = self.start_codons.iter().map(|c| c.as_str()).collect();
        codons.sort_unstable();
        codons
    }

    /// All stop codons, sorted
    pub fn stop_codons(&self) -> Vec<&str> {
        let mut codons: Vec<&str> = self.stop_codons.iter().map(|c| c.as_str()).collect();
        codons.sort_unstable();
        codons
    }
}

/// All 64 RNA codons in NCBI order
pub fn ncbi_codons() -> Vec<String> {
    let mut codons = Vec::with_capacity(64);
    for first in NCBI_BASES {
        for second in NCBI_BASES {
            for third in NCBI_BASES {
                codons.push([first, second, third].iter().collect());
            }
        }
    }
    codons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_codes() -> Vec<GeneticCode> {
        vec![
            GeneticCode::standard(),
            GeneticCode::vertebrate_mitochondrial(),
            GeneticCode::invertebrate_mitochondrial(),
        ]
    }

    #[test]
    fn test_all_codons_defined() {
        for code in all_codes() {
            for codon in ncbi_codons() {
                assert_ne!(code.translate(&codon), '?', "{} in {}", codon, code.table());
            }
        }
    }

    #[test]
    fn test_display_matches_ncbi_string() {
        assert_eq!(GeneticCode::standard().to_string(), STANDARD_AA);
        assert_eq!(
            GeneticCode::vertebrate_mitochondrial().to_string(),
            VERTEBRATE_MITO_AA
        );
        assert_eq!(
            GeneticCode::invertebrate_mitochondrial().to_string(),
            INVERTEBRATE_MITO_AA
        );
    }

    #[test]
    fn test_table_differences() {
        let standard = GeneticCode::standard();
        let vertebrate = GeneticCode::vertebrate_mitochondrial();
        let invertebrate = GeneticCode::invertebrate_mitochondrial();

        let expected = [
            ("AUA", 'I', 'M', 'M'),
            ("UGA", '*', 'W', 'W'),
            ("AGA", 'R', '*', 'S'),
            ("AGG", 'R', '*', 'S'),
        ];
        for (codon, std_aa, vert_aa, invert_aa) in expected {
            assert_eq!(standard.translate(codon), std_aa);
            assert_eq!(vertebrate.translate(codon), vert_aa);
            assert_eq!(invertebrate.translate(codon), invert_aa);
        }
    }

    #[test]
    fn test_start_codons() {
        assert_eq!(GeneticCode::standard().start_codons(), vec!["AUG", "GUG", "UUG"]);
        assert_eq!(
            GeneticCode::vertebrate_mitochondrial().start_codons(),
            vec!["AUA", "AUG", "AUU", "GUG"]
        );
        assert_eq!(
            GeneticCode::invertebrate_mitochondrial().start_codons(),
            vec!["AUA", "AUC", "AUG", "AUU", "GUG", "UUG"]
        );
    }

    #[test]
    fn test_stop_codons() {
        assert_eq!(GeneticCode::standard().stop_codons(), vec!["UAA", "UAG", "UGA"]);
        assert_eq!(
            GeneticCode::vertebrate_mitochondrial().stop_codons(),
            vec!["AGA", "AGG", "UAA", "UAG"]
        );
        assert_eq!(
            GeneticCode::invertebrate_mitochondrial().stop_codons(),
            vec!["UAA", "UAG"]
        );
    }

    #[test]
    fn test_start_codons_translate_to_methionine() {
        for code in all_codes() {
            for codon in code.start_codons() {
                assert_eq!(code.translate_start_codon(codon), 'M');
            }
        }
    }

    #[test]
    fn test_case_insensitive() {
        let code = GeneticCode::standard();
        assert_eq!(code.translate("aug"), 'M');
        assert!(code.is_stop_codon("uaa"));
        assert!(code.is_start_codon("gug"));
    }

    #[test]
    fn test_unknown_codons() {
        let code = GeneticCode::standard();
        assert_eq!(code.translate("ATG"), '?');
        assert_eq!(code.translate("AU"), '?');
        assert_eq!(code.translate("AUGA"), '?');
        assert!(!code.is_stop_codon("TAA"));
    }

    #[test]
    fn test_fallback_tables() {
        let code = GeneticCode::for_table(GeneticCodeTable::Bacterial);
        assert_eq!(code, GeneticCode::invertebrate_mitochondrial());
        assert_eq!(code.table(), GeneticCodeTable::InvertebrateMitochondrial);
        assert_eq!(
            GeneticCode::for_table(GeneticCodeTable::Standard),
            GeneticCode::standard()
        );
    }
}
