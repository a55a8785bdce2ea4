//! Writing GenBank flat files
//!
//! A [`GenbankRecord`] is one sequence together with its annotations.
//! [`Writer`] turns records into GenBank text.
mod writer;

use crate::models::{Annotation, SequenceRecord};

pub use crate::genbank::writer::{location, Writer};

/// Qualifiers that are used internally and are not part of the GenBank output
pub const INTERNAL_QUALIFIERS: [&str; 2] = ["ID", "Parent"];

/// Qualifiers whose values are written without quotes
pub const UNQUOTED_QUALIFIERS: [&str; 3] = ["codon_start", "transl_table", "number"];

/// One sequence and its features
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenbankRecord {
    sequence: SequenceRecord,
    annotations: Vec<Annotation>,
}

impl GenbankRecord {
    pub fn new(sequence: SequenceRecord, annotations: Vec<Annotation>) -> Self {
        GenbankRecord {
            sequence,
            annotations,
        }
    }

    pub fn sequence(&self) -> &SequenceRecord {
        &self.sequence
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The `LOCUS` name of the record
    pub fn name(&self) -> &str {
        self.sequence.id()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
