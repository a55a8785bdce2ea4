//! The data model of *gbconvert*
//!
//! Genetic codes and translation tables, nucleotide sequences and the
//! [`Annotation`] records that are written as GenBank features.
mod annotation;
mod annotation_data;
mod genetic_code;
mod genetic_code_table;
mod options;
pub mod sequence;

pub use crate::models::annotation::{Annotation, AnnotationBuilder, Qualifiers, Strand};
pub use crate::models::annotation_data::AnnotationData;
pub use crate::models::genetic_code::{ncbi_codons, GeneticCode, STOP, UNKNOWN_AMINO_ACID};
pub use crate::models::genetic_code_table::GeneticCodeTable;
pub use crate::models::options::TranslationOptions;
pub use crate::models::sequence::{Nucleotide, SequenceRecord};
