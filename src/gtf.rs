//! Reading GTF (GFF2) files
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use crate::gff::{genbank_feature_key, parse_coordinates, parse_phase};
use crate::models::{Annotation, AnnotationBuilder, AnnotationData, Qualifiers, Strand};
use crate::utils::errors::ReadWriteError;
use crate::utils::open_reader;

/// Parses features from a GTF file
///
/// Attributes are mapped to GenBank qualifiers:
///
/// | GTF | GenBank |
/// |---|---|
/// | `gene_name` (or `gene_id`) | `gene` |
/// | `transcript_id`, `protein_id`, `product` | same key |
/// | `exon_number` | `number` |
/// | everything else | `note` as `key:value` |
///
/// # Examples
/// ```rust
/// use gbconvert::gtf::Reader;
///
/// let input = b"chrM\tensembl\tCDS\t5904\t7445\t.\t+\t0\tgene_id \"ENSG00000198804\"; gene_name \"MT-CO1\"; exon_number \"1\";\n";
/// let mut reader = Reader::new(&input[..]);
/// let data = reader.annotations().unwrap();
/// let cds = &data.by_sequence("chrM").unwrap()[0];
///
/// assert_eq!(cds.gene(), Some("MT-CO1"));
/// assert_eq!(cds.qualifiers().first("number"), Some("1"));
/// assert_eq!(cds.qualifiers().first("note"), None);
/// ```
pub struct Reader<R> {
    inner: R,
    next_id: usize,
}

impl Reader<Box<dyn BufRead>> {
    /// Opens a GTF file, `.gz` files are decompressed
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
        loop {
            line.clear();
            if self.inner.read_line(&mut line)? == 0 {
                break;
            }
            let row = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if row.trim().is_empty() || row.starts_with('#') {
                continue;
            }
            match self.parse_row(row) {
                Some(annotation) => data.push(annotation),
                None => debug!("Skipping GTF row {}", row),
            }
        }
        data.sort();
        info!("Read {} features from GTF", data.len());
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
        let qualifiers = gtf_qualifiers(&parse_attributes(cols[8]));

        let feature_id = format!("feature_{}", self.next_id);
        self.next_id += 1;

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

/// Splits `key "value"; key2 "value2";` into key-value pairs
fn parse_attributes(column: &str) -> Vec<(&str, &str)> {
    column
        .split(';')
        .filter_map(|attr| {
            let (key, value) = attr.trim().split_once(char::is_whitespace)?;
            Some((key, value.trim().trim_matches('"')))
        })
        .collect()
}

fn gtf_qualifiers(attributes: &[(&str, &str)]) -> Qualifiers {
    let mut qualifiers = Qualifiers::new();
    let gene = attributes
        .iter()
        .find(|(key, _)| *key == "gene_name")
        .or_else(|| attributes.iter().find(|(key, _)| *key == "gene_id"));
    if let Some((_, name)) = gene {
        qualifiers.add("gene", *name);
    }

    for (key, value) in attributes {
        match *key {
            "gene_name" | "gene_id" => {}
            "transcript_id" | "protein_id" | "product" => qualifiers.add(*key, *value),
            "exon_number" => qualifiers.add("number", *value),
            other => qualifiers.add("note", format!("{}:{}", other, value)),
        }
    }
    qualifiers
}
