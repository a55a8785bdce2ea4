use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::genbank::GenbankRecord;
use crate::models::{Annotation, GeneticCode, SequenceRecord};
use crate::qc::QcCheck;
use crate::utils::errors::ReadWriteError;

/// Runs [`QcCheck`]s and writes them as tab-separated rows
///
/// # Examples
///
/// ```rust
/// use gbconvert::tests::annotations::mito_genbank_record;
/// use gbconvert::qc::Writer;
/// use gbconvert::models::GeneticCode;
///
/// let output = Vec::new(); // substitute this with proper IO (io::stdout())
/// let mut writer = Writer::new(output);
/// writer.set_genetic_code(GeneticCode::invertebrate_mitochondrial());
/// writer.write_records(&[mito_genbank_record()]).unwrap();
///
/// let written_output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// let rows: Vec<&str> = written_output.lines().collect();
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[2], "chrM\tfeature_2\tCDS\tcox1\tOK\tOK\tOK\tOK\tOK\tOK");
/// ```
pub struct Writer<W: std::io::Write> {
    inner: BufWriter<W>,
    code: GeneticCode,
    header_written: bool,
}

impl Writer<File> {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        Ok(Self::new(File::create(path.as_ref())?))
    }
}

impl<W: std::io::Write> Writer<W> {
    /// Creates a new generic Writer for any `std::io::Write` object
    pub fn new(writer: W) -> Self {
        Writer::from_buf_writer(BufWriter::new(writer))
    }

    /// Constructs a new, empty Writer with the specified capacity.
    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        Writer::from_buf_writer(BufWriter::with_capacity(capacity, writer))
    }

    fn from_buf_writer(writer: BufWriter<W>) -> Self {
        Writer {
            inner: writer,
            code: GeneticCode::default(),
            header_written: false,
        }
    }

    /// Sets the genetic code to check start and stop codons
    pub fn set_genetic_code(&mut self, code: GeneticCode) {
        self.code = code
    }

    pub fn flush(&mut self) -> Result<(), ReadWriteError> {
        Ok(self.inner.flush()?)
    }

    pub fn into_inner(self) -> Result<W, ReadWriteError> {
        self.inner
            .into_inner()
            .map_err(|err| ReadWriteError::Io(err.into_error()))
    }

    /// Writes the header row for the tab-separated QC results
    pub fn write_header(&mut self) -> Result<(), ReadWriteError> {
        let columns = [
            "Sequence",
            "Feature",
            "Type",
            "Gene",
            "Known Sequence",
            "Correct Coordinates",
            "CDS Length",
            "Correct Start Codon",
            "Correct Stop Codon",
            "No internal Stop Codon",
        ];
        writeln!(self.inner, "{}", columns.join("\t"))?;
        self.header_written = true;
        Ok(())
    }

    /// Checks and writes all features of the records
    ///
    /// The header row is written before the first row.
    pub fn write_records(&mut self, records: &[GenbankRecord]) -> Result<(), ReadWriteError> {
        for record in records {
            for annotation in record.annotations() {
                self.write_annotation(annotation, Some(record.sequence()))?;
            }
        }
        Ok(())
    }

    /// Checks and writes a single annotation
    pub fn write_annotation(
        &mut self,
        annotation: &Annotation,
        sequence: Option<&SequenceRecord>,
    ) -> Result<(), ReadWriteError> {
        if !self.header_written {
            self.write_header()?;
        }
        let qc = QcCheck::new(annotation, sequence, &self.code);
        writeln!(
            self.inner,
            "{}\t{}\t{}\t{}\t{}",
            annotation.sequence_id(),
            annotation.feature_id(),
            annotation.feature_type(),
            annotation.gene().unwrap_or("."),
            qc
        )?;
        Ok(())
    }
}
