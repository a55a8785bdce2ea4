use std::fs;

use tempfile::TempDir;

use gbconvert::config::{ConversionOptions, Topology};
use gbconvert::converter::{AnnotationFormat, Converter};
use gbconvert::models::GeneticCodeTable;
use gbconvert::qc;

fn options() -> ConversionOptions {
    let mut options = ConversionOptions::default();
    options.organism = "Drosophila melanogaster".to_string();
    options.topology = Topology::Circular;
    options.division = "INV".to_string();
    options.date = Some("16-OCT-2026".to_string());
    options
}

fn convert(annotations: &str) -> String {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.gb");
    Converter::new(options())
        .convert_files("tests/data/small.fasta", annotations, None, &output)
        .unwrap();
    fs::read_to_string(output).unwrap()
}

#[test]
fn test_fasta_headers() {
    let genbank = convert("tests/data/features.fasta");
    let records: Vec<&str> = genbank.split_inclusive("//\n").collect();
    assert_eq!(records.len(), 2);

    let mito = records[0];
    assert!(mito.starts_with("LOCUS       chrM"));
    assert!(mito.contains("35 bp    DNA     circular INV 16-OCT-2026\n"));
    assert!(mito.contains("DEFINITION  Test mitochondrion.\n"));
    assert!(mito.contains("  ORGANISM  Drosophila melanogaster\n"));
    assert!(mito.contains("     tRNA            1..10\n"));
    assert!(mito.contains("/product=\"tRNA-Phe\""));
    assert!(mito.contains("/note=\"anticodon:gaa\""));
    assert!(mito.contains("     CDS             11..28\n"));
    assert!(mito.contains("/transl_table=5\n"));
    assert!(mito.contains("/translation=\"MSQWL\""));
    assert!(mito.contains("     rep_origin      29..35\n"));
    assert!(mito.contains("        1 gctttaaagc atgtcacaat ggttataagg ccaat\n"));

    // gene features precede their tRNA and CDS
    assert_eq!(mito.matches("     gene            ").count(), 2);
    assert!(!mito.contains("/ID="));

    assert!(records[1].starts_with("LOCUS       chr2"));
    assert!(!records[1].contains("     gene"));
}

#[test]
fn test_gff() {
    let genbank = convert("tests/data/small.gff");
    assert!(genbank.contains("/product=\"cytochrome c oxidase subunit 1\""));
    assert!(genbank.contains("/codon_start=1\n"));
    assert!(genbank.contains("/translation=\"MSQWL\""));
    // chrX is not part of the FASTA file
    assert!(!genbank.contains("chrX"));
}

#[test]
fn test_gtf() {
    let genbank = convert("tests/data/small.gtf");
    assert!(genbank.contains("/gene=\"cox1\""));
    assert!(genbank.contains("/transcript_id=\"cox1-t\""));
    assert!(genbank.contains("/number=1\n"));
    assert!(genbank.contains("/translation=\"MSQWL\""));
}

#[test]
fn test_bed() {
    let genbank = convert("tests/data/small.bed");
    assert!(genbank.contains("     tRNA            1..10\n"));
    assert!(genbank.contains("/product=\"tRNA-Phe\""));
    assert!(genbank.contains("     CDS             11..28\n"));
    assert!(genbank.contains("/translation=\"MSQWL\""));
}

#[test]
fn test_standard_code() {
    let mut options = options();
    options.translation.genetic_code_table = GeneticCodeTable::Standard;
    let converter = Converter::new(options);
    let sequences = converter.read_sequences("tests/data/small.fasta").unwrap();
    let annotations = converter
        .read_annotations("tests/data/small.gtf", AnnotationFormat::Gtf)
        .unwrap();
    let records = converter.records(sequences, annotations, AnnotationFormat::Gtf);
    let cds = &records[0].annotations()[0];
    // no codon of this CDS differs between the standard and the mitochondrial code
    assert_eq!(cds.qualifiers().first("translation"), Some("MSQWL"));
    assert_eq!(cds.qualifiers().first("transl_table"), Some("1"));
}

#[test]
fn test_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let annotations = dir.path().join("genes.txt");
    fs::write(&annotations, "").unwrap();
    let res = Converter::new(options()).convert_files(
        "tests/data/small.fasta",
        &annotations,
        None,
        dir.path().join("out.gb"),
    );
    assert!(res.is_err());
}

#[test]
fn test_qc_report() {
    let converter = Converter::new(options());
    let sequences = converter.read_sequences("tests/data/small.fasta").unwrap();
    let annotations = converter
        .read_annotations("tests/data/features.fasta", AnnotationFormat::Fasta)
        .unwrap();
    let records = converter.records(sequences, annotations, AnnotationFormat::Fasta);

    let mut writer = qc::Writer::new(Vec::new());
    writer.write_records(&records).unwrap();
    let report = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    let cds_row = report
        .lines()
        .find(|row| row.contains("\tCDS\t"))
        .unwrap();
    assert!(cds_row.ends_with("OK\tOK\tOK\tOK\tOK\tOK"));
}
