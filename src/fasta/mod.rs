//! Reading (multi-)FASTA files
//!
//! [`Reader`] reads the reference sequences that are written into the
//! GenBank `ORIGIN` section. FASTA files whose headers encode features are
//! handled by [`header::Reader`].
pub mod header;

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, info};

use crate::models::SequenceRecord;
use crate::utils::errors::ReadWriteError;
use crate::utils::open_reader;

/// Parses sequences from a FASTA file
///
/// The id of a record is the first word of its header, the remainder
/// is the description.
///
/// # Examples
/// ```rust
/// use gbconvert::fasta::Reader;
///
/// let input = b">chrM Homo sapiens mitochondrion\nGATCACAGGT\nctatcaccct\n>chr2\nACGT\n";
/// let mut reader = Reader::new(&input[..]);
/// let records = reader.sequences().unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].id(), "chrM");
/// assert_eq!(records[0].description(), "Homo sapiens mitochondrion");
/// assert_eq!(records[0].sequence(), "GATCACAGGTCTATCACCCT");
/// assert_eq!(records[1].description(), "");
/// ```
pub struct Reader<R> {
    inner: R,
}

impl Reader<Box<dyn BufRead>> {
    /// Opens a FASTA file, `.gz` files are decompressed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        Ok(Reader {
            inner: open_reader(path)?,
        })
    }
}

impl<R: Read> Reader<BufReader<R>> {
    /// Creates a new Reader from any `std::io::Read` object
    ///
    /// Use this method when you want to read from stdin or from
    /// a remote source, e.g. via HTTP
    pub fn new(reader: R) -> Self {
        Reader {
            inner: BufReader::new(reader),
        }
    }
}

impl<R: BufRead> Reader<R> {
    /// Reads all sequences of the file
    ///
    /// Lines before the first header are ignored.
    pub fn sequences(&mut self) -> Result<Vec<SequenceRecord>, ReadWriteError> {
        let mut records = Vec::new();
        let mut header: Option<String> = None;
        let mut sequence = String::new();

        let mut line = String::new();
        loop {
            line.clear();
            let bytes = self.inner.read_line(&mut line)?;
            let trimmed = line.trim_end();
            if bytes == 0 || trimmed.starts_with('>') {
                if let Some(h) = header.take() {
                    records.push(record(&h, &sequence));
                }
                if bytes == 0 {
                    break;
                }
                header = Some(trimmed[1..].to_string());
                sequence.clear();
            } else if header.is_some() {
                sequence.push_str(trimmed);
            } else if !trimmed.is_empty() {
                debug!("Ignoring sequence before the first FASTA header");
            }
        }
        info!("Read {} sequences", records.len());
        Ok(records)
    }
}

fn record(header: &str, sequence: &str) -> SequenceRecord {
    let header = header.trim();
    match header.split_once(char::is_whitespace) {
        Some((id, description)) => SequenceRecord::new(id, description.trim(), sequence),
        None => SequenceRecord::new(header, "", sequence),
    }
}
