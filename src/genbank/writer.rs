use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::config::{ConversionOptions, GENBANK_DATE_FORMAT};
use crate::genbank::{GenbankRecord, INTERNAL_QUALIFIERS, UNQUOTED_QUALIFIERS};
use crate::models::{Annotation, Strand};
use crate::utils::errors::ReadWriteError;
use crate::utils::{wrap_text, QUALIFIER_INDENT};

/// Maximum width of GenBank lines
const LINE_WIDTH: usize = 79;

/// Indent of header continuation lines (`DEFINITION`, `SOURCE`, ...)
const HEADER_INDENT: usize = 12;

/// Bases per `ORIGIN` line
const BASES_PER_LINE: usize = 60;

/// Bases per block within an `ORIGIN` line
const BASES_PER_BLOCK: usize = 10;

/// Writes [`GenbankRecord`]s into a `BufWriter`
///
/// # Examples
///
/// ```rust
/// use gbconvert::config::{ConversionOptions, Topology};
/// use gbconvert::genbank::{GenbankRecord, Writer};
/// use gbconvert::models::{AnnotationBuilder, SequenceRecord};
///
/// let cds = AnnotationBuilder::new()
///     .feature_type("CDS")
///     .sequence_id("chrM")
///     .feature_id("feature_1")
///     .start(0)
///     .end(9)
///     .qualifier("gene", "cox1")
///     .qualifier("codon_start", "1")
///     .qualifier("ID", "feature_1")
///     .build()
///     .unwrap();
/// let record = GenbankRecord::new(SequenceRecord::new("chrM", "", "ATGAAATAA"), vec![cds]);
///
/// let mut options = ConversionOptions::default();
/// options.organism = "Homo sapiens".to_string();
/// options.topology = Topology::Circular;
/// options.date = Some("01-JAN-2024".to_string());
///
/// let output = Vec::new(); // substitute this with proper IO (io::stdout())
/// let mut writer = Writer::new(output);
/// writer.set_options(options);
/// writer.write_record(&record).unwrap();
///
/// let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert!(text.starts_with("LOCUS       chrM"));
/// assert!(text.lines().next().unwrap().ends_with("9 bp    DNA     circular UNK 01-JAN-2024"));
/// assert!(text.contains("\n     CDS             1..9\n"));
/// assert!(text.contains("\n                     /gene=\"cox1\"\n"));
/// assert!(text.contains("\n                     /codon_start=1\n"));
/// assert!(!text.contains("/ID="));
/// assert!(text.contains("\nORIGIN\n        1 atgaaataa\n//\n"));
/// ```
pub struct Writer<W: std::io::Write> {
    inner: BufWriter<W>,
    options: ConversionOptions,
}

impl Writer<File> {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        Ok(Self::new(File::create(path.as_ref())?))
    }
}

impl<W: std::io::Write> Writer<W> {
    /// Creates a new generic Writer for any `std::io::Write` object
    ///
    /// Use this method when you want to write to stdout or
    /// a remote source, e.g. via HTTP
    pub fn new(writer: W) -> Self {
        Writer {
            inner: BufWriter::new(writer),
            options: ConversionOptions::default(),
        }
    }

    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        Writer {
            inner: BufWriter::with_capacity(capacity, writer),
            options: ConversionOptions::default(),
        }
    }

    /// Sets the organism, topology, date etc. of all following records
    pub fn set_options(&mut self, options: ConversionOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn flush(&mut self) -> Result<(), ReadWriteError> {
        Ok(self.inner.flush()?)
    }

    pub fn into_inner(self) -> Result<W, ReadWriteError> {
        self.inner
            .into_inner()
            .map_err(|err| ReadWriteError::Io(err.into_error()))
    }

    /// Writes all records, one after the other
    pub fn write_records(&mut self, records: &[GenbankRecord]) -> Result<(), ReadWriteError> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Writes one complete record, from `LOCUS` to `//`
    pub fn write_record(&mut self, record: &GenbankRecord) -> Result<(), ReadWriteError> {
        self.write_header(record)?;
        self.write_features(record)?;
        self.write_origin(record)?;
        Ok(())
    }

    fn write_header(&mut self, record: &GenbankRecord) -> Result<(), std::io::Error> {
        let date = match &self.options.date {
            Some(date) => date.to_uppercase(),
            None => Local::now()
                .format(GENBANK_DATE_FORMAT)
                .to_string()
                .to_uppercase(),
        };
        writeln!(
            self.inner,
            "LOCUS       {:<16} {:>11} bp    {:<6}  {:<8} {} {}",
            record.name(),
            record.len(),
            self.options.molecule_type,
            self.options.topology,
            self.options.division,
            date
        )?;

        let mut definition = match &self.options.definition {
            Some(definition) => definition.clone(),
            None if !record.sequence().description().is_empty() => {
                record.sequence().description().to_string()
            }
            None => format!("{} {}", self.options.organism, record.name()),
        };
        if !definition.ends_with('.') {
            definition.push('.');
        }
        self.write_header_field("DEFINITION", &definition)?;
        self.write_header_field("ACCESSION", record.name())?;
        self.write_header_field("VERSION", record.name())?;
        self.write_header_field("KEYWORDS", ".")?;
        let organism = self.options.organism.clone();
        self.write_header_field("SOURCE", &organism)?;
        self.write_header_field("  ORGANISM", &organism)?;
        writeln!(self.inner, "{}Unclassified.", " ".repeat(HEADER_INDENT))
    }

    fn write_header_field(&mut self, name: &str, value: &str) -> Result<(), std::io::Error> {
        let indent = " ".repeat(HEADER_INDENT);
        for (idx, line) in wrap_text(value, LINE_WIDTH - HEADER_INDENT)
            .iter()
            .enumerate()
        {
            if idx == 0 {
                writeln!(self.inner, "{:<width$}{}", name, line, width = HEADER_INDENT)?;
            } else {
                writeln!(self.inner, "{}{}", indent, line)?;
            }
        }
        Ok(())
    }

    fn write_features(&mut self, record: &GenbankRecord) -> Result<(), std::io::Error> {
        writeln!(self.inner, "{:<21}Location/Qualifiers", "FEATURES")?;

        self.write_feature_key("source", &format!("1..{}", record.len()))?;
        let organism = self.options.organism.clone();
        self.write_qualifier("organism", &organism)?;
        let mol_type = format!("genomic {}", self.options.molecule_type);
        self.write_qualifier("mol_type", &mol_type)?;

        for annotation in record.annotations() {
            self.write_feature_key(annotation.feature_type(), &location(annotation))?;
            for (key, value) in annotation.qualifiers().iter() {
                if INTERNAL_QUALIFIERS.contains(&key) {
                    continue;
                }
                self.write_qualifier(key, value)?;
            }
        }
        Ok(())
    }

    fn write_feature_key(&mut self, key: &str, location: &str) -> Result<(), std::io::Error> {
        writeln!(self.inner, "     {:<16}{}", key, location)
    }

    fn write_qualifier(&mut self, key: &str, value: &str) -> Result<(), std::io::Error> {
        let indent = " ".repeat(QUALIFIER_INDENT);
        let text = if UNQUOTED_QUALIFIERS.contains(&key) {
            format!("/{}={}", key, value)
        } else {
            format!("/{}=\"{}\"", key, value.replace('"', "\"\""))
        };
        // pre-wrapped values carry their own continuation indent
        if value.contains('\n') {
            return writeln!(self.inner, "{}{}", indent, text);
        }
        for line in wrap_text(&text, LINE_WIDTH - QUALIFIER_INDENT) {
            writeln!(self.inner, "{}{}", indent, line)?;
        }
        Ok(())
    }

    fn write_origin(&mut self, record: &GenbankRecord) -> Result<(), std::io::Error> {
        writeln!(self.inner, "ORIGIN")?;
        let sequence = record.sequence().sequence().to_ascii_lowercase();
        for (idx, line) in sequence.as_bytes().chunks(BASES_PER_LINE).enumerate() {
            write!(self.inner, "{:>9}", idx * BASES_PER_LINE + 1)?;
            for block in line.chunks(BASES_PER_BLOCK) {
                self.inner.write_all(b" ")?;
                self.inner.write_all(block)?;
            }
            self.inner.write_all(b"\n")?;
        }
        writeln!(self.inner, "//")
    }
}

/// Returns the GenBank location of the annotation
///
/// # Examples
/// ```rust
/// use gbconvert::genbank::location;
/// use gbconvert::models::{AnnotationBuilder, Strand};
///
/// let builder = || AnnotationBuilder::new().feature_type("gene").sequence_id("chrM").feature_id("a");
///
/// assert_eq!(location(&builder().start(0).end(68).build().unwrap()), "1..68");
/// assert_eq!(location(&builder().start(9).end(10).build().unwrap()), "10");
/// assert_eq!(
///     location(&builder().start(99).end(200).strand(Strand::Minus).build().unwrap()),
///     "complement(100..200)"
/// );
/// ```
pub fn location(annotation: &Annotation) -> String {
    let start = annotation.start() + 1;
    let end = annotation.end();
    let span = if end <= start {
        start.to_string()
    } else {
        format!("{}..{}", start, end)
    };
    match annotation.strand() {
        Strand::Minus => format!("complement({})", span),
        _ => span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnotationBuilder, SequenceRecord};

    fn write(record: &GenbankRecord) -> String {
        let mut options = ConversionOptions::default();
        options.date = Some("16-oct-2026".to_string());
        let mut writer = Writer::new(Vec::new());
        writer.set_options(options);
        writer.write_record(record).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_origin_blocks() {
        let sequence = "ACGTACGTAC".repeat(13);
        let record = GenbankRecord::new(SequenceRecord::new("s", "", &sequence), vec![]);
        let text = write(&record);
        let origin: Vec<&str> = text
            .lines()
            .skip_while(|line| *line != "ORIGIN")
            .skip(1)
            .collect();
        assert_eq!(origin.len(), 4);
        assert_eq!(
            origin[0],
            "        1 acgtacgtac acgtacgtac acgtacgtac acgtacgtac acgtacgtac acgtacgtac"
        );
        assert_eq!(origin[2], "      121 acgtacgtac");
        assert_eq!(origin[3], "//");
    }

    #[test]
    fn test_header() {
        let record = GenbankRecord::new(SequenceRecord::new("chrM", "mitochondrion", "ACGT"), vec![]);
        let text = write(&record);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with("4 bp    DNA     linear   UNK 16-OCT-2026"));
        assert_eq!(lines[1], "DEFINITION  mitochondrion.");
        assert_eq!(lines[2], "ACCESSION   chrM");
        assert_eq!(lines[4], "KEYWORDS    .");
        assert_eq!(lines[6], "  ORGANISM  unknown");
        assert_eq!(lines[8], "FEATURES             Location/Qualifiers");
        assert_eq!(lines[9], "     source          1..4");
        assert_eq!(lines[10], "                     /organism=\"unknown\"");
        assert_eq!(lines[11], "                     /mol_type=\"genomic DNA\"");
    }

    #[test]
    fn test_long_qualifier_is_wrapped() {
        let note = "word ".repeat(30);
        let feature = AnnotationBuilder::new()
            .feature_type("misc_feature")
            .sequence_id("s")
            .feature_id("f")
            .start(0)
            .end(4)
            .qualifier("note", note.trim())
            .build()
            .unwrap();
        let record = GenbankRecord::new(SequenceRecord::new("s", "", "ACGT"), vec![feature]);
        let text = write(&record);
        let note_lines: Vec<&str> = text
            .lines()
            .skip_while(|line| !line.contains("/note"))
            .take_while(|line| *line != "ORIGIN")
            .collect();
        assert!(note_lines.len() > 1);
        for line in note_lines {
            assert!(line.len() <= LINE_WIDTH);
            assert!(line.starts_with(&" ".repeat(QUALIFIER_INDENT)));
        }
    }

    #[test]
    fn test_prewrapped_translation() {
        let translation = crate::utils::wrap_translation(&"M".repeat(70));
        let feature = AnnotationBuilder::new()
            .feature_type("CDS")
            .sequence_id("s")
            .feature_id("f")
            .start(0)
            .end(4)
            .qualifier("translation", translation.as_str())
            .qualifier("protein_id", "")
            .build()
            .unwrap();
        let record = GenbankRecord::new(SequenceRecord::new("s", "", "ACGT"), vec![feature]);
        let text = write(&record);
        assert!(text.contains(&format!(
            "                     /translation=\"{}\n                     {}\"\n",
            "M".repeat(60),
            "M".repeat(10)
        )));
        assert!(text.contains("                     /protein_id=\"\"\n"));
    }

    #[test]
    fn test_records_in_sequence() {
        let records = vec![
            GenbankRecord::new(SequenceRecord::new("a", "", "AC"), vec![]),
            GenbankRecord::new(SequenceRecord::new("b", "", "GT"), vec![]),
        ];
        let mut writer = Writer::new(Vec::new());
        writer.write_records(&records).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text.matches("LOCUS").count(), 2);
        assert_eq!(text.matches("\n//\n").count(), 2);
    }
}
