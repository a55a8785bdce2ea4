//! Nucleotide sequences: validation, RNA conversion and codon handling
use std::convert::TryFrom;
use std::fmt;

use serde::Serialize;

use crate::models::Annotation;
use crate::utils::errors::SequenceError;

/// Nucleotide is a single DNA or RNA base (A C G T U)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
    U,
}

impl Nucleotide {
    /// Returns the complementary DNA nucleotide
    ///
    /// `U` pairs with `A`, just like `T`
    pub fn complement(&self) -> Self {
        match self {
            Self::A => Self::T,
            Self::C => Self::G,
            Self::G => Self::C,
            Self::T | Self::U => Self::A,
        }
    }

    /// Converts a DNA nucleotide into its RNA counterpart
    pub fn to_rna(self) -> Self {
        match self {
            Self::T => Self::U,
            other => other,
        }
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = char;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'a' | 'A' => Ok(Self::A),
            'c' | 'C' => Ok(Self::C),
            'g' | 'G' => Ok(Self::G),
            't' | 'T' => Ok(Self::T),
            'u' | 'U' => Ok(Self::U),
            _ => Err(c),
        }
    }
}

impl From<Nucleotide> for char {
    fn from(n: Nucleotide) -> Self {
        match n {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
            Nucleotide::U => 'U',
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// Removes all whitespace and uppercases the sequence
///
/// Fails with [`SequenceError::InvalidSequence`] if any character other than
/// `A`, `C`, `G`, `T` or `U` remains. Invalid characters are never dropped silently.
///
/// # Examples
/// ```rust
/// use gbconvert::models::sequence::validate_sequence;
///
/// assert_eq!(validate_sequence("atg cga\nTAA").unwrap(), "ATGCGATAA");
/// assert!(validate_sequence("ATGNNN").is_err());
/// ```
pub fn validate_sequence(raw: &str) -> Result<String, SequenceError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    for (position, character) in cleaned.chars().enumerate() {
        Nucleotide::try_from(character)
            .map_err(|character| SequenceError::InvalidSequence { character, position })?;
    }
    Ok(cleaned)
}

/// Replaces every `T` with `U`
///
/// # Examples
/// ```rust
/// use gbconvert::models::sequence::to_rna;
///
/// assert_eq!(to_rna("ATGCTT"), "AUGCUU");
/// assert_eq!(to_rna(&to_rna("ATG")), "AUG");
/// ```
pub fn to_rna(dna: &str) -> String {
    dna.replace('T', "U")
}

/// Splits a sequence into non-overlapping codons, starting at the first base
///
/// The last codon is shorter than 3 bases if the sequence length is not a
/// multiple of 3. Callers must skip it before looking it up.
///
/// # Examples
/// ```rust
/// use gbconvert::models::sequence::split_into_codons;
///
/// assert_eq!(split_into_codons("AUGCGAU"), vec!["AUG", "CGA", "U"]);
/// ```
pub fn split_into_codons(seq: &str) -> Vec<&str> {
    let mut codons = Vec::with_capacity(seq.len() / 3 + 1);
    let mut rest = seq;
    while !rest.is_empty() {
        let split = rest
            .char_indices()
            .nth(3)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let (codon, tail) = rest.split_at(split);
        codons.push(codon);
        rest = tail;
    }
    codons
}

/// Returns the reverse complement of a DNA sequence
///
/// Characters that are not nucleotides (e.g. `N`) are kept as `N`
///
/// # Examples
/// ```rust
/// use gbconvert::models::sequence::reverse_complement;
///
/// assert_eq!(reverse_complement("ATGCN"), "NGCAT");
/// ```
pub fn reverse_complement(dna: &str) -> String {
    dna.chars()
        .rev()
        .map(|c| match Nucleotide::try_from(c) {
            Ok(n) => char::from(n.complement()),
            Err(_) => 'N',
        })
        .collect()
}

/// A named nucleotide sequence, as read from a FASTA file
///
/// The sequence is uppercased and free of whitespace, but not validated:
/// reference sequences may contain ambiguous bases like `N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceRecord {
    id: String,
    description: String,
    sequence: String,
}

impl SequenceRecord {
    pub fn new<S: Into<String>>(id: S, description: S, sequence: &str) -> Self {
        SequenceRecord {
            id: id.into(),
            description: description.into(),
            sequence: sequence
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the bases between the 0-based, half-open coordinates
    ///
    /// Returns `None` if the coordinates are outside of the sequence
    pub fn subsequence(&self, start: u32, end: u32) -> Option<&str> {
        self.sequence.get(start as usize..end as usize)
    }

    /// Returns the bases of a feature, read in the direction of its strand
    ///
    /// Features on the minus strand are reverse complemented. Returns `None`
    /// if the feature does not fit into the sequence.
    ///
    /// # Examples
    /// ```rust
    /// use gbconvert::models::{AnnotationBuilder, SequenceRecord, Strand};
    ///
    /// let record = SequenceRecord::new("chrM", "", "AACCATGGG");
    /// let feature = AnnotationBuilder::new()
    ///     .feature_type("CDS")
    ///     .sequence_id("chrM")
    ///     .feature_id("cds")
    ///     .start(3)
    ///     .end(9)
    ///     .strand(Strand::Minus)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(record.feature_sequence(&feature), Some("CCCATG".to_string()));
    /// ```
    pub fn feature_sequence(&self, annotation: &Annotation) -> Option<String> {
        let bases = self.subsequence(annotation.start(), annotation.end())?;
        if annotation.strand().is_reverse() {
            Some(reverse_complement(bases))
        } else {
            Some(bases.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_strips_whitespace() {
        assert_eq!(validate_sequence(" a c\tg\r\nu ").unwrap(), "ACGU");
        assert_eq!(validate_sequence("").unwrap(), "");
    }

    #[test]
    fn test_validate_reports_position() {
        assert_eq!(
            validate_sequence("AC GN").unwrap_err(),
            SequenceError::InvalidSequence {
                character: 'N',
                position: 3
            }
        );
        assert!(validate_sequence("ATG-").is_err());
    }

    #[test]
    fn test_to_rna_only_replaces_t() {
        assert_eq!(to_rna("ACGTU"), "ACGUU");
        assert_eq!(to_rna(""), "");
    }

    #[test]
    fn test_to_rna_idempotent() {
        let rna = to_rna("TTTACGT");
        assert_eq!(to_rna(&rna), rna);
        assert!(!rna.contains('T'));
    }

    #[test]
    fn test_split_into_codons() {
        assert_eq!(split_into_codons("AUGCGA"), vec!["AUG", "CGA"]);
        assert_eq!(split_into_codons("AUGCG"), vec!["AUG", "CG"]);
        assert_eq!(split_into_codons("A"), vec!["A"]);
        assert!(split_into_codons("").is_empty());
    }

    #[test]
    fn test_nucleotide_complement() {
        assert_eq!(Nucleotide::A.complement(), Nucleotide::T);
        assert_eq!(Nucleotide::U.complement(), Nucleotide::A);
        assert_eq!(Nucleotide::T.to_rna(), Nucleotide::U);
        assert_eq!(Nucleotide::try_from('x'), Err('x'));
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("AACCGGTT"), "AACCGGTT");
        assert_eq!(reverse_complement("ATGAAA"), "TTTCAT");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_sequence_record() {
        let record = SequenceRecord::new("chrM", "mitochondrion", "acgt\nACGT");
        assert_eq!(record.sequence(), "ACGTACGT");
        assert_eq!(record.len(), 8);
        assert_eq!(record.subsequence(2, 5), Some("GTA"));
        assert_eq!(record.subsequence(6, 9), None);
    }
}
