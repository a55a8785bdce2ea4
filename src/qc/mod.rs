//! Quality Control checks for annotations
//!
//! This module sanity-checks annotations against their reference sequence
//! before they are written to GenBank.
//!
//! | QC check | Explanation | Features |
//! | --- | --- | --- |
//! | Known Sequence | The annotation refers to a sequence of the FASTA file | all |
//! | Correct Coordinates | The annotation lies within the sequence | all |
//! | Correct CDS Length | The CDS length, minus its phase, is divisible by 3 | CDS |
//! | Correct Start Codon | The CDS starts with a start codon of the genetic code | CDS |
//! | Correct Stop Codon | The CDS ends with a stop codon of the genetic code | CDS |
//! | No internal Stop Codon | The CDS does not contain another in-frame stop codon | CDS |
//!
//! Mitochondrial genes often end in an incomplete stop codon (`T` or `TA`)
//! that is completed by polyadenylation. Those features are reported with
//! a `NOK` stop codon and CDS length, which is expected.
//!
//! # QcCheck
//!
//! ```rust
//! use gbconvert::tests::annotations::{cox1, mito_record};
//! use gbconvert::qc::{QcCheck, QcResult};
//! use gbconvert::models::GeneticCode;
//!
//! let record = mito_record();
//! let code = GeneticCode::invertebrate_mitochondrial();
//!
//! let qc = QcCheck::new(&cox1(), Some(&record), &code);
//! assert_eq!(qc.correct_start_codon(), QcResult::OK);
//! assert_eq!(qc.correct_stop_codon(), QcResult::OK);
//! ```
//!
//! # Writer
//!
//! The [`Writer`] runs the checks on complete GenBank records and writes
//! a tab-separated report.
mod writer;

use crate::models::sequence::{split_into_codons, to_rna};
use crate::models::{Annotation, GeneticCode, SequenceRecord};

pub use crate::qc::writer::Writer;

/// Holds the result of a QC check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QcResult {
    /// Test could not be performed (e.g. CDS-length for tRNAs),
    /// so no conclusion could be drawn
    NA,
    OK,
    NOK,
}

impl std::fmt::Display for QcResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.pad(match self {
            QcResult::OK => "OK",
            QcResult::NOK => "NOK",
            QcResult::NA => "N/A",
        })
    }
}

impl From<bool> for QcResult {
    fn from(b: bool) -> Self {
        if b {
            QcResult::OK
        } else {
            QcResult::NOK
        }
    }
}

/// Runs the full QC suite on one annotation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QcCheck {
    known_sequence: QcResult,
    correct_coordinates: QcResult,
    cds_len: QcResult,
    correct_start: QcResult,
    correct_stop: QcResult,
    no_internal_stop: QcResult,
}

impl Default for QcCheck {
    fn default() -> Self {
        QcCheck {
            known_sequence: QcResult::NA,
            correct_coordinates: QcResult::NA,
            cds_len: QcResult::NA,
            correct_start: QcResult::NA,
            correct_stop: QcResult::NA,
            no_internal_stop: QcResult::NA,
        }
    }
}

impl std::fmt::Display for QcCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.known_sequence,
            self.correct_coordinates,
            self.cds_len,
            self.correct_start,
            self.correct_stop,
            self.no_internal_stop,
        )
    }
}

impl QcCheck {
    /// Checks `annotation` against the sequence it refers to
    ///
    /// `sequence` is `None` if the sequence of the annotation is unknown,
    /// all further checks are skipped then.
    pub fn new(annotation: &Annotation, sequence: Option<&SequenceRecord>, code: &GeneticCode) -> Self {
        let mut res = QcCheck::default();

        let record = match sequence {
            Some(record) if record.id() == annotation.sequence_id() => record,
            _ => {
                res.known_sequence = QcResult::NOK;
                return res;
            }
        };
        res.known_sequence = QcResult::OK;

        let bases = match record.feature_sequence(annotation) {
            Some(bases) => bases,
            None => {
                res.correct_coordinates = QcResult::NOK;
                return res;
            }
        };
        res.correct_coordinates = QcResult::OK;

        if annotation.is_coding() {
            let phase = annotation.phase().unwrap_or(0) as usize;
            let cds = to_rna(bases.get(phase..).unwrap_or_default());
            res.check_cds(&cds, code);
        }
        res
    }

    fn check_cds(&mut self, cds: &str, code: &GeneticCode) {
        self.cds_len = correct_cds_length(cds).into();
        self.correct_start = starts_with_start_codon(cds, code).into();
        self.correct_stop = ends_with_stop_codon(cds, code).into();
        self.no_internal_stop = (!internal_stop_codon(cds, code)).into();
    }

    /// Does the annotation refer to a known sequence
    pub fn known_sequence(&self) -> QcResult {
        self.known_sequence
    }

    /// Does the annotation lie within the sequence
    pub fn correct_coordinates(&self) -> QcResult {
        self.correct_coordinates
    }

    /// Is the length of the CDS a multiple of 3
    pub fn correct_cds_length(&self) -> QcResult {
        self.cds_len
    }

    pub fn correct_start_codon(&self) -> QcResult {
        self.correct_start
    }

    pub fn correct_stop_codon(&self) -> QcResult {
        self.correct_stop
    }

    /// Is the CDS free of in-frame stop codons, except for the last codon
    pub fn no_internal_stop_codon(&self) -> QcResult {
        self.no_internal_stop
    }

    /// Returns true if no check failed
    pub fn passed(&self) -> bool {
        ![
            self.known_sequence,
            self.correct_coordinates,
            self.cds_len,
            self.correct_start,
            self.correct_stop,
            self.no_internal_stop,
        ]
        .contains(&QcResult::NOK)
    }
}

fn correct_cds_length(cds: &str) -> bool {
    !cds.is_empty() && cds.len() % 3 == 0
}

fn starts_with_start_codon(cds: &str, code: &GeneticCode) -> bool {
    match cds.get(0..3) {
        Some(codon) => code.is_start_codon(codon),
        None => false,
    }
}

fn ends_with_stop_codon(cds: &str, code: &GeneticCode) -> bool {
    if cds.len() < 3 {
        return false;
    }
    match cds.get(cds.len() - 3..) {
        Some(codon) => code.is_stop_codon(codon),
        None => false,
    }
}

/// checks if any in-frame codon, except for the last complete one,
/// is a stop codon
fn internal_stop_codon(cds: &str, code: &GeneticCode) -> bool {
    let codons: Vec<&str> = split_into_codons(cds)
        .into_iter()
        .filter(|codon| codon.len() == 3)
        .collect();
    match codons.split_last() {
        Some((_, internal)) => internal.iter().any(|codon| code.is_stop_codon(codon)),
        None => false,
    }
}
