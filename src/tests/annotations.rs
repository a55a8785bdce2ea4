use crate::genbank::GenbankRecord;
use crate::models::{Annotation, AnnotationBuilder, SequenceRecord, Strand};

/// A tiny mitochondrial sequence with a tRNA (1..10) and a CDS (11..28)
///
/// The CDS translates to `MSQWL` with the invertebrate mitochondrial code
/// and ends in a `TAA` stop codon.
pub fn mito_record() -> SequenceRecord {
    SequenceRecord::new(
        "chrM",
        "Test mitochondrion",
        "GCTTTAAAGCATGTCACAATGGTTATAAGGCCAAT",
    )
}

pub fn trnf() -> Annotation {
    AnnotationBuilder::new()
        .feature_type("tRNA")
        .sequence_id("chrM")
        .feature_id("feature_1")
        .start(0)
        .end(10)
        .strand(Strand::Plus)
        .qualifier("gene", "trnF")
        .qualifier("product", "tRNA-Phe")
        .build()
        .unwrap()
}

pub fn cox1() -> Annotation {
    AnnotationBuilder::new()
        .feature_type("CDS")
        .sequence_id("chrM")
        .feature_id("feature_2")
        .start(10)
        .end(28)
        .strand(Strand::Plus)
        .phase(Some(0))
        .qualifier("gene", "cox1")
        .qualifier("product", "cytochrome c oxidase subunit 1")
        .build()
        .unwrap()
}

pub fn mito_genbank_record() -> GenbankRecord {
    GenbankRecord::new(mito_record(), vec![trnf(), cox1()])
}
