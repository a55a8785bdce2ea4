//! Reading BED files
//!
//! BED rows only carry a name, so they are classified and annotated the
//! same way as header-encoded FASTA records.
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use crate::assembly::AnnotationAssembler;
use crate::fasta::header::FastaHeaderInfo;
use crate::models::{AnnotationData, Strand};
use crate::utils::errors::ReadWriteError;
use crate::utils::open_reader;

/// Parses features from BED3 to BED12 files
///
/// `track` and `browser` lines and comments are skipped. Block columns
/// are ignored. Rows without a name are named after their region.
///
/// # Examples
/// ```rust
/// use gbconvert::bed::Reader;
///
/// let input = b"track name=mito\nchrM\t0\t68\ttrnF\t0\t+\nchrM\t1000\t2000\tnad1\t0\t-\n";
/// let mut reader = Reader::new(&input[..]);
/// let data = reader.annotations().unwrap();
/// let features = data.by_sequence("chrM").unwrap();
///
/// assert_eq!(features[1].feature_type(), "tRNA");
/// assert_eq!((features[1].start(), features[1].end()), (0, 68));
/// assert_eq!(features[3].feature_type(), "CDS");
/// assert!(features[3].strand().is_reverse());
/// ```
pub struct Reader<R> {
    inner: R,
}

impl Reader<Box<dyn BufRead>> {
    /// Opens a BED file, `.gz` files are decompressed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        Ok(Reader {
            inner: open_reader(path)?,
        })
    }
}

impl<R: Read> Reader<BufReader<R>> {
    /// Creates a new Reader from any `std::io::Read` object
    pub fn new(reader: R) -> Self {
        Reader {
            inner: BufReader::new(reader),
        }
    }
}

impl<R: BufRead> Reader<R> {
    /// Reads all rows and assembles them into annotations
    pub fn annotations(&mut self) -> Result<AnnotationData, ReadWriteError> {
        let mut assembler = AnnotationAssembler::new(None);
        let mut line = String::new();
        loop {
            line.clear();
            if self.inner.read_line(&mut line)? == 0 {
                break;
            }
            let row = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if row.trim().is_empty()
                || row.starts_with('#')
                || row.starts_with("track")
                || row.starts_with("browser")
            {
                continue;
            }
            match parse_row(row) {
                Some(info) => assembler.add(&info, "")?,
                None => debug!("Skipping BED row {}", row),
            }
        }
        let data = assembler.finish();
        info!("Read {} features from BED", data.len());
        Ok(data)
    }
}

fn parse_row(row: &str) -> Option<FastaHeaderInfo> {
    let cols: Vec<&str> = row.split('\t').collect();
    if cols.len() < 3 {
        return None;
    }
    let start: u32 = cols[1].trim().parse().ok()?;
    let end: u32 = cols[2].trim().parse().ok()?;
    if start >= end {
        return None;
    }
    let name = match cols.get(3).map(|name| name.trim()) {
        Some(name) if !name.is_empty() && name != "." => name.to_string(),
        _ => format!("{}:{}-{}", cols[0], start + 1, end),
    };
    let strand = match cols.get(5) {
        Some(strand) => Strand::from_str(strand.trim()).ok()?,
        None => Strand::Unknown,
    };
    Some(FastaHeaderInfo::new(
        cols[0].to_string(),
        name,
        start + 1,
        end,
        strand,
        None,
    ))
}
