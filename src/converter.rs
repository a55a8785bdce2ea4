//! Converting sequences and annotations into GenBank records
//!
//! The [`Converter`] reads a FASTA file with the reference sequences and
//! an annotation file, joins both into [`GenbankRecord`]s and writes them.
//!
//! # Examples
//! ```rust
//! use gbconvert::config::ConversionOptions;
//! use gbconvert::converter::{AnnotationFormat, Converter};
//! use gbconvert::gff;
//! use gbconvert::models::SequenceRecord;
//!
//! let sequences = vec![SequenceRecord::new("chrM", "", "CCATGAAATAACC")];
//! let gff = b"chrM\t.\tCDS\t3\t11\t.\t+\t0\tID=cds1;Name=nad1\n";
//! let annotations = gff::Reader::new(&gff[..]).annotations().unwrap();
//!
//! let converter = Converter::new(ConversionOptions::default());
//! let records = converter.records(sequences, annotations, AnnotationFormat::Gff);
//! let cds = &records[0].annotations()[0];
//!
//! assert_eq!(cds.qualifiers().first("translation"), Some("MK"));
//! assert_eq!(cds.qualifiers().first("codon_start"), Some("1"));
//! assert_eq!(cds.qualifiers().first("transl_table"), Some("5"));
//! ```
use std::fmt;
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use log::{debug, info, warn};

use crate::config::ConversionOptions;
use crate::fasta;
use crate::genbank::{self, GenbankRecord};
use crate::models::{Annotation, AnnotationData, SequenceRecord};
use crate::translator::Translator;
use crate::utils::errors::ReadWriteError;
use crate::utils::wrap_translation;
use crate::{bed, gff, gtf};

/// The supported annotation file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnnotationFormat {
    Gff,
    Gtf,
    Bed,
    /// Feature sequences with the location encoded in the FASTA header
    Fasta,
}

impl fmt::Display for AnnotationFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            AnnotationFormat::Gff => "GFF",
            AnnotationFormat::Gtf => "GTF",
            AnnotationFormat::Bed => "BED",
            AnnotationFormat::Fasta => "FASTA",
        })
    }
}

impl AnnotationFormat {
    /// Detects the format from the file extension
    ///
    /// A trailing `.gz` is ignored.
    ///
    /// # Examples
    /// ```rust
    /// use gbconvert::converter::AnnotationFormat;
    ///
    /// assert_eq!(AnnotationFormat::from_path("genes.gff3.gz").unwrap(), AnnotationFormat::Gff);
    /// assert_eq!(AnnotationFormat::from_path("features.FNA").unwrap(), AnnotationFormat::Fasta);
    /// assert!(AnnotationFormat::from_path("genes.txt").is_err());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        let name = path
            .as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
        match extension {
            "gff" | "gff3" => Ok(AnnotationFormat::Gff),
            "gtf" => Ok(AnnotationFormat::Gtf),
            "bed" => Ok(AnnotationFormat::Bed),
            "fa" | "fasta" | "fna" | "fas" => Ok(AnnotationFormat::Fasta),
            _ => Err(ReadWriteError::format(format!(
                "unknown annotation format of {}",
                path.as_ref().display()
            ))),
        }
    }
}

/// Reads sequences and annotations and writes GenBank records
pub struct Converter {
    options: ConversionOptions,
    translator: Translator,
}

impl Converter {
    pub fn new(options: ConversionOptions) -> Self {
        let translator = Translator::new(options.translation);
        Converter {
            options,
            translator,
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Reads the reference sequences from a (multi-)FASTA file
    pub fn read_sequences<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SequenceRecord>, ReadWriteError> {
        let sequences = fasta::Reader::from_file(path.as_ref())?.sequences()?;
        info!(
            "Read {} sequences from {}",
            sequences.len(),
            path.as_ref().display()
        );
        Ok(sequences)
    }

    /// Reads the annotations of a file
    ///
    /// Header-encoded FASTA features are translated while reading with the
    /// options of this converter, so nothing is translated if translation
    /// is disabled.
    pub fn read_annotations<P: AsRef<Path>>(
        &self,
        path: P,
        format: AnnotationFormat,
    ) -> Result<AnnotationData, ReadWriteError> {
        debug!("Reading {} annotations from {}", format, path.as_ref().display());
        match format {
            AnnotationFormat::Gff => gff::Reader::from_file(path)?.annotations(),
            AnnotationFormat::Gtf => gtf::Reader::from_file(path)?.annotations(),
            AnnotationFormat::Bed => bed::Reader::from_file(path)?.annotations(),
            AnnotationFormat::Fasta => {
                let mut reader = fasta::header::Reader::from_file(path)?;
                reader.set_translator(Some(self.translator.clone()));
                reader.annotations()
            }
        }
    }

    /// Joins sequences and annotations into GenBank records
    ///
    /// Records keep the order of `sequences`. Annotations of unknown
    /// sequences are skipped. `CDS` features from GFF, GTF and BED files
    /// without a `translation` are translated from the sequence.
    pub fn records(
        &self,
        sequences: Vec<SequenceRecord>,
        annotations: AnnotationData,
        format: AnnotationFormat,
    ) -> Vec<GenbankRecord> {
        let mut groups = annotations.into_groups();
        for (sequence_id, features) in &groups {
            if !sequences.iter().any(|seq| seq.id() == sequence_id) {
                warn!(
                    "Skipping {} features of unknown sequence {}",
                    features.len(),
                    sequence_id
                );
            }
        }

        sequences
            .into_iter()
            .map(|sequence| {
                let features = match groups.iter().position(|(id, _)| id == sequence.id()) {
                    Some(idx) => groups.swap_remove(idx).1,
                    None => Vec::new(),
                };
                let features = if format != AnnotationFormat::Fasta
                    && self.options.translation.translate_cds
                {
                    features
                        .into_iter()
                        .map(|feature| self.add_translation(feature, &sequence))
                        .collect()
                } else {
                    features
                };
                GenbankRecord::new(sequence, features)
            })
            .collect()
    }

    fn add_translation(&self, feature: Annotation, sequence: &SequenceRecord) -> Annotation {
        if !feature.is_coding() || feature.qualifiers().contains("translation") {
            return feature;
        }
        let bases = match sequence.feature_sequence(&feature) {
            Some(bases) => bases,
            None => {
                warn!(
                    "{} lies outside of sequence {}, it is not translated",
                    feature.feature_id(),
                    sequence.id()
                );
                return feature;
            }
        };
        let phase = feature.phase().unwrap_or(0);
        let protein = match self
            .translator
            .translate_feature(bases.get(phase as usize..).unwrap_or_default())
        {
            Ok(protein) => protein,
            Err(err) => {
                warn!("Unable to translate {}: {}", feature.feature_id(), err);
                return feature;
            }
        };

        let mut feature = feature;
        if !feature.qualifiers().contains("codon_start") {
            feature = feature.with_qualifier("codon_start", (phase + 1).to_string());
        }
        if !feature.qualifiers().contains("transl_table") {
            feature = feature.with_qualifier(
                "transl_table",
                self.translator.genetic_code().table().table_number().to_string(),
            );
        }
        feature.with_qualifier("translation", wrap_translation(&protein))
    }

    /// Writes the records as GenBank
    pub fn convert<W: Write>(&self, records: &[GenbankRecord], output: W) -> Result<(), ReadWriteError> {
        let mut writer = genbank::Writer::new(output);
        writer.set_options(self.options.clone());
        writer.write_records(records)?;
        writer.flush()?;
        info!("Wrote {} GenBank records", records.len());
        Ok(())
    }

    /// Reads both input files and writes a GenBank file
    ///
    /// The annotation format is detected from the file extension, unless
    /// it is given. Returns the written records.
    pub fn convert_files<P: AsRef<Path>, Q: AsRef<Path>, O: AsRef<Path>>(
        &self,
        sequence_path: P,
        annotation_path: Q,
        format: Option<AnnotationFormat>,
        output_path: O,
    ) -> Result<Vec<GenbankRecord>, ReadWriteError> {
        let format = match format {
            Some(format) => format,
            None => AnnotationFormat::from_path(annotation_path.as_ref())?,
        };
        let sequences = self.read_sequences(sequence_path)?;
        let annotations = self.read_annotations(annotation_path, format)?;
        let records = self.records(sequences, annotations, format);
        let output = std::fs::File::create(output_path.as_ref())?;
        self.convert(&records, output)?;
        Ok(records)
    }
}
