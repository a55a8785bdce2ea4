//! Reading GFF3 files
//!
//! Rows are parsed into [`Annotation`]s directly, their types are mapped to
//! GenBank feature keys with [`genbank_feature_key`].
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use crate::models::{Annotation, AnnotationBuilder, AnnotationData, Qualifiers, Strand};
use crate::utils::errors::ReadWriteError;
use crate::utils::open_reader;

/// Feature keys that are valid GenBank keys and are kept as they are
const GENBANK_KEYS: [&str; 20] = [
    "gene",
    "CDS",
    "mRNA",
    "tRNA",
    "rRNA",
    "ncRNA",
    "misc_RNA",
    "exon",
    "intron",
    "5'UTR",
    "3'UTR",
    "D-loop",
    "rep_origin",
    "misc_feature",
    "repeat_region",
    "source",
    "regulatory",
    "mobile_element",
    "operon",
    "precursor_RNA",
];

/// Maps a GFF/GTF feature type to its GenBank feature key
///
/// Returns `None` for types that have no GenBank counterpart and must be
/// dropped (`start_codon`, `stop_codon`). Unknown types are `misc_feature`s.
///
/// # Examples
/// ```rust
/// use gbconvert::gff::genbank_feature_key;
///
/// assert_eq!(genbank_feature_key("CDS"), Some("CDS"));
/// assert_eq!(genbank_feature_key("five_prime_UTR"), Some("5'UTR"));
/// assert_eq!(genbank_feature_key("transcript"), Some("mRNA"));
/// assert_eq!(genbank_feature_key("polyA_signal_sequence"), Some("misc_feature"));
/// assert_eq!(genbank_feature_key("stop_codon"), None);
/// ```
pub fn genbank_feature_key(feature_type: &str) -> Option<&'static str> {
    match feature_type {
        "start_codon" | "stop_codon" => None,
        "five_prime_UTR" | "5UTR" | "five_prime_utr" => Some("5'UTR"),
        "three_prime_UTR" | "3UTR" | "three_prime_utr" => Some("3'UTR"),
        "transcript" => Some("mRNA"),
        "pseudogene" => Some("gene"),
        "origin_of_replication" => Some("rep_origin"),
        other => Some(
            GENBANK_KEYS
                .iter()
                .find(|key| **key == other)
                .copied()
                .unwrap_or("misc_feature"),
        ),
    }
}

/// Decodes the escaped characters of GFF3 attribute values
fn url_decode(value: &str) -> String {
    value
        .replace("%2C", ",")
        .replace("%3B", ";")
        .replace("%3D", "=")
        .replace("%26", "&")
        .replace("%09", "\t")
        .replace("%20", " ")
        .replace("%25", "%")
}

/// Parses features from a GFF3 file
///
/// Comment lines are skipped and a `##FASTA` directive ends the
/// annotation section. Malformed rows are skipped.
///
/// # Examples
/// ```rust
/// use gbconvert::gff::Reader;
///
/// let input = b"##gff-version 3
/// chrM\tRefSeq\tgene\t3307\t4262\t.\t+\t.\tID=gene-ND1;Name=ND1
/// chrM\tRefSeq\tCDS\t3307\t4262\t.\t+\t0\tID=cds-ND1;Parent=gene-ND1;product=NADH dehydrogenase subunit 1
/// ";
/// let mut reader = Reader::new(&input[..]);
/// let data = reader.annotations().unwrap();
/// let cds = &data.by_sequence("chrM").unwrap()[1];
///
/// assert_eq!(cds.feature_type(), "CDS");
/// assert_eq!(cds.feature_id(), "cds-ND1");
/// assert_eq!((cds.start(), cds.end()), (3306, 4262));
/// assert_eq!(cds.phase(), Some(0));
/// assert_eq!(cds.qualifiers().first("product"), Some("NADH dehydrogenase subunit 1"));
/// ```
pub struct Reader<R> {
    inner: R,
    next_id: usize,
}

impl Reader<Box<dyn BufRead>> {
    /// Opens a GFF3 file, `.gz` files are decompressed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        Ok(Reader::with_reader(open_reader(path)?))
    }
}

impl<R: Read> Reader<BufReader<R>> {
    /// Creates a new Reader from any `std::io::Read` object
    pub fn new(reader: R) -> Self {
        Reader::with_reader(BufReader::new(reader))
    }
}

impl<R: BufRead> Reader<R> {
    fn with_reader(inner: R) -> Self {
        Reader { inner, next_id: 1 }
    }

    /// Reads all features, grouped by sequence and sorted by start
    pub fn annotations(&mut self) -> Result<AnnotationData, ReadWriteError> {
        let mut data = AnnotationData::new();
        let mut line = String::new();
        let mut skipped = 0;
        loop {
            line.clear();
            if self.inner.read_line(&mut line)? == 0 {
                break;
            }
            let row = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if row.starts_with("##FASTA") {
                break;
            }
            if row.trim().is_empty() || row.starts_with('#') {
                continue;
            }
            match self.parse_row(row) {
                Some(annotation) => data.push(annotation),
                None => {
                    debug!("Skipping GFF row {}", row);
                    skipped += 1;
                }
            }
        }
        data.sort();
        info!(
            "Read {} features from GFF, skipped {} rows",
            data.len(),
            skipped
        );
        Ok(data)
    }

    fn parse_row(&mut self, row: &str) -> Option<Annotation> {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() != 9 {
            return None;
        }
        let feature_type = genbank_feature_key(cols[2])?;
        let (start, end) = parse_coordinates(cols[3], cols[4])?;
        let strand = Strand::from_str(cols[6]).ok()?;
        let phase = parse_phase(cols[7])?;

        let attributes = parse_attributes(cols[8]);
        let qualifiers = gff_qualifiers(&attributes);
        let feature_id = match qualifiers.first("ID") {
            Some(id) => id.to_string(),
            None => {
                let id = format!("feature_{}", self.next_id);
                self.next_id += 1;
                id
            }
        };

        AnnotationBuilder::new()
            .feature_type(feature_type)
            .sequence_id(cols[0])
            .feature_id(feature_id)
            .start(start)
            .end(end)
            .strand(strand)
            .phase(phase)
            .qualifiers(qualifiers)
            .build()
            .ok()
    }
}

/// Converts 1-based, inclusive coordinates into 0-based, half-open ones
pub(crate) fn parse_coordinates(start: &str, end: &str) -> Option<(u32, u32)> {
    let start: u32 = start.trim().parse().ok()?;
    let end: u32 = end.trim().parse().ok()?;
    if start < 1 || start > end {
        return None;
    }
    Some((start - 1, end))
}

/// `.` means no phase, everything else must be 0, 1 or 2
pub(crate) fn parse_phase(phase: &str) -> Option<Option<u8>> {
    match phase.trim() {
        "." => Some(None),
        "0" => Some(Some(0)),
        "1" => Some(Some(1)),
        "2" => Some(Some(2)),
        _ => None,
    }
}

fn parse_attributes(column: &str) -> Vec<(String, Vec<String>)> {
    column
        .split(';')
        .filter_map(|attr| {
            let (key, value) = attr.trim().split_once('=')?;
            let values = value.split(',').map(url_decode).collect();
            Some((key.trim().to_string(), values))
        })
        .collect()
}

fn gff_qualifiers(attributes: &[(String, Vec<String>)]) -> Qualifiers {
    let has_gene = attributes.iter().any(|(key, _)| key == "gene");
    let mut qualifiers = Qualifiers::new();
    for (key, values) in attributes {
        let key = match key.as_str() {
            "Name" if has_gene => continue,
            "Name" => "gene",
            "Note" => "note",
            "Dbxref" => "db_xref",
            other => other,
        };
        for value in values {
            qualifiers.add(key, value.as_str());
        }
    }
    qualifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> AnnotationData {
        Reader::new(input.as_bytes()).annotations().unwrap()
    }

    #[test]
    fn test_fasta_directive_ends_parsing() {
        let data = read(
            "chrM\t.\tgene\t1\t10\t.\t+\t.\tID=a\n##FASTA\n>chrM\nACGT\n",
        );
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let data = read(concat!(
            "chrM\t.\tgene\t1\t10\t.\t+\t.\tID=a\n",
            "chrM\t.\tgene\tone\t10\t.\t+\t.\tID=b\n",
            "chrM\t.\tgene\t20\t10\t.\t+\t.\tID=c\n",
            "chrM\t.\tgene\t1\t10\t.\tx\t.\tID=d\n",
            "chrM\t.\tCDS\t1\t10\t.\t+\t3\tID=e\n",
            "chrM\tgene\t1\t10\n",
            "\n",
            "# comment\n",
        ));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_attribute_mapping() {
        let data = read(
            "chrM\t.\tgene\t1\t10\t.\t-\t.\tID=g1;Name=COX1;Note=a%2C b;Dbxref=GeneID:1,HGNC:2\n",
        );
        let gene = &data.by_sequence("chrM").unwrap()[0];
        let q = gene.qualifiers();
        assert_eq!(q.first("gene"), Some("COX1"));
        assert_eq!(q.first("note"), Some("a, b"));
        assert_eq!(
            q.get("db_xref").unwrap(),
            &["GeneID:1".to_string(), "HGNC:2".to_string()]
        );
        assert_eq!(gene.strand(), Strand::Minus);
    }

    #[test]
    fn test_name_does_not_override_gene() {
        let data = read("chrM\t.\tCDS\t1\t9\t.\t+\t0\tID=c;gene=cox1;Name=cds-cox1\n");
        let cds = &data.by_sequence("chrM").unwrap()[0];
        assert_eq!(cds.qualifiers().get("gene").unwrap().len(), 1);
        assert_eq!(cds.gene(), Some("cox1"));
    }

    #[test]
    fn test_generated_ids_and_sorting() {
        let data = read(concat!(
            "chrM\t.\texon\t50\t60\t.\t+\t.\tgene=a\n",
            "chrM\t.\tstop_codon\t58\t60\t.\t+\t.\tgene=a\n",
            "chrM\t.\tfive_prime_UTR\t1\t10\t.\t+\t.\tgene=b\n",
        ));
        let features = data.by_sequence("chrM").unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].feature_type(), "5'UTR");
        assert_eq!(features[0].feature_id(), "feature_2");
        assert_eq!(features[1].feature_id(), "feature_1");
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("100%25 of items%2C a%3Bb%3Dc"), "100% of items, a;b=c");
        assert_eq!(url_decode("%252C"), "%2C");
    }
}
