//! FASTA files whose headers describe the position of a feature
//!
//! Every record of such a file is one feature. The header has the layout
//! ```text
//! ><sequence id>;<start>-<end>;<strand>;<feature name>(<qualifier>)
//! ```
//! e.g. `>chrM;1-68;+;trnF(gaa)`. Coordinates are 1-based and inclusive.
//! The word `complement` anywhere in the header places the feature on the
//! minus strand.
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;

use crate::assembly::AnnotationAssembler;
use crate::models::{AnnotationData, Strand};
use crate::translator::Translator;
use crate::utils::errors::ReadWriteError;
use crate::utils::open_reader;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^>?\s*([^;\s]+)\s*;\s*(\d+)\s*-\s*(\d+)\s*;\s*([+-])\s*;\s*([^;(\s]+)(?:\(([^)]*)\))?")
        .expect("header pattern is valid")
});

/// The feature described by a FASTA header
///
/// # Examples
/// ```rust
/// use gbconvert::fasta::header::FastaHeaderInfo;
/// use gbconvert::models::Strand;
///
/// let info = FastaHeaderInfo::parse(">chrM;1-68;+;trnF(gaa)").unwrap();
/// assert_eq!(info.sequence_id(), "chrM");
/// assert_eq!(info.feature_name(), "trnF");
/// assert_eq!(info.qualifier(), Some("gaa"));
/// assert_eq!((info.start(), info.end()), (1, 68));
/// assert!(!info.is_complement());
///
/// let info = FastaHeaderInfo::parse(">chrM;100-400;+;cox1 complement").unwrap();
/// assert!(info.is_complement());
/// assert_eq!(info.strand(), Strand::Minus);
///
/// assert!(FastaHeaderInfo::parse(">just a plain sequence").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaHeaderInfo {
    sequence_id: String,
    feature_name: String,
    start: u32,
    end: u32,
    strand: Strand,
    qualifier: Option<String>,
    is_complement: bool,
}

impl FastaHeaderInfo {
    /// Creates a new header info with 1-based, inclusive coordinates
    pub fn new<S: Into<String>>(
        sequence_id: S,
        feature_name: S,
        start: u32,
        end: u32,
        strand: Strand,
        qualifier: Option<String>,
    ) -> Self {
        FastaHeaderInfo {
            sequence_id: sequence_id.into(),
            feature_name: feature_name.into(),
            start,
            end,
            is_complement: strand == Strand::Minus,
            strand,
            qualifier,
        }
    }

    /// Parses a header line, with or without the leading `>`
    ///
    /// Returns `None` if the line does not describe a feature or if its
    /// coordinates are invalid.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = HEADER.captures(line.trim())?;
        let start: u32 = caps[2].parse().ok()?;
        let end: u32 = caps[3].parse().ok()?;
        if start < 1 || start > end {
            return None;
        }
        let strand = if &caps[4] == "-" {
            Strand::Minus
        } else {
            Strand::Plus
        };
        let mut info = FastaHeaderInfo::new(
            &caps[1],
            &caps[5],
            start,
            end,
            strand,
            caps.get(6).map(|q| q.as_str().to_string()),
        );
        if line.to_ascii_lowercase().contains("complement") {
            info.is_complement = true;
        }
        Some(info)
    }

    pub fn sequence_id(&self) -> &str {
        &self.sequence_id
    }

    /// The name of the feature exactly as it was given
    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    /// 1-based start position
    pub fn start(&self) -> u32 {
        self.start
    }

    /// 1-based, inclusive end position
    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn is_complement(&self) -> bool {
        self.is_complement
    }

    /// The strand of the feature, taking the `complement` keyword into account
    pub fn strand(&self) -> Strand {
        if self.is_complement {
            Strand::Minus
        } else {
            self.strand
        }
    }
}

/// Parses header-encoded feature FASTA files into [`AnnotationData`]
///
/// Records with headers that do not describe a feature are skipped.
///
/// # Examples
/// ```rust
/// use gbconvert::fasta::header::Reader;
///
/// let input = b">chrM;1-9;+;cox1\nATGAAATAA\n>chrM;20-30;+;OH\nAAAAAAAAAAA\n>garbage\nACGT\n";
/// let mut reader = Reader::new(&input[..]);
/// let data = reader.annotations().unwrap();
///
/// // cox1 gets an additional gene feature, OH does not
/// let types: Vec<&str> = data.by_sequence("chrM").unwrap().iter().map(|a| a.feature_type()).collect();
/// assert_eq!(types, vec!["gene", "CDS", "rep_origin"]);
/// ```
pub struct Reader<R> {
    inner: R,
    translator: Option<Translator>,
}

impl Reader<Box<dyn BufRead>> {
    /// Opens a header-encoded FASTA file, `.gz` files are decompressed
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
        Reader {
            inner,
            translator: Some(Translator::default()),
        }
    }

    /// Sets the translator for coding features, `None` disables translation
    pub fn set_translator(&mut self, translator: Option<Translator>) {
        self.translator = translator;
    }

    /// Reads all records and assembles them into annotations
    pub fn annotations(&mut self) -> Result<AnnotationData, ReadWriteError> {
        let mut assembler = AnnotationAssembler::new(self.translator.clone());
        let mut header: Option<String> = None;
        let mut sequence = String::new();

        let mut line = String::new();
        loop {
            line.clear();
            let bytes = self.inner.read_line(&mut line)?;
            let trimmed = line.trim_end();
            if bytes == 0 || trimmed.starts_with('>') {
                if let Some(h) = header.take() {
                    add_record(&mut assembler, &h, &sequence)?;
                }
                if bytes == 0 {
                    break;
                }
                header = Some(trimmed.to_string());
                sequence.clear();
            } else {
                sequence.push_str(trimmed.trim());
            }
        }

        let data = assembler.finish();
        info!("Assembled {} features from FASTA headers", data.len());
        Ok(data)
    }
}

fn add_record(
    assembler: &mut AnnotationAssembler,
    header: &str,
    sequence: &str,
) -> Result<(), ReadWriteError> {
    match FastaHeaderInfo::parse(header) {
        Some(info) => assembler.add(&info, sequence),
        None => {
            debug!("Skipping record with header {}", header);
            Ok(())
        }
    }
}
