//! Command line interface of the `gbconvert` binary
use std::fmt;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{info, Level};

use crate::config::{ConversionOptions, Topology};
use crate::converter::{AnnotationFormat, Converter};
use crate::models::{GeneticCode, GeneticCodeTable};
use crate::qc;

#[derive(Parser, Debug)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert FASTA sequences with GFF, GTF, BED or FASTA-header annotations into GenBank",
    long_about = None
)]
pub struct Args {
    /// Path to the (multi-)FASTA file with the reference sequences
    #[arg(short = 's', long)]
    pub sequence: PathBuf,

    /// Path to the annotation file (GFF3, GTF, BED or header-encoded FASTA)
    #[arg(short = 'a', long)]
    pub annotations: PathBuf,

    /// Format of the annotation file, detected from the extension by default
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<AnnotationFormat>,

    /// Output GenBank file, writes to stdout by default
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// JSON file with conversion options
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Genetic code table, by number (e.g. `5`) or name (e.g. `VERTEBRATE_MITOCHONDRIAL`)
    #[arg(short = 'g', long)]
    pub genetic_code: Option<String>,

    /// Organism name of the SOURCE and source feature
    #[arg(long)]
    pub organism: Option<String>,

    /// Topology of all sequences
    #[arg(long, value_enum)]
    pub topology: Option<Topology>,

    /// Append `*` to translations that end with a stop codon
    #[arg(long, default_value = "false", action = ArgAction::SetTrue)]
    pub include_stop_codon: bool,

    /// Do not translate CDS features
    #[arg(long, default_value = "false", action = ArgAction::SetTrue)]
    pub no_translate: bool,

    /// Translate through internal stop codons
    #[arg(long, default_value = "false", action = ArgAction::SetTrue)]
    pub allow_internal_stops: bool,

    /// Write a tab-separated QC report of all features to this file
    #[arg(long)]
    pub qc: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "info")]
    pub level: Level,
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sequence={}, annotations={}, format={:?}, output={:?}, config={:?}, genetic_code={:?}, organism={:?}, topology={:?}, include_stop_codon={}, no_translate={}, allow_internal_stops={}, qc={:?}, level={}",
            self.sequence.display(),
            self.annotations.display(),
            self.format,
            self.output,
            self.config,
            self.genetic_code,
            self.organism,
            self.topology,
            self.include_stop_codon,
            self.no_translate,
            self.allow_internal_stops,
            self.qc,
            self.level,
        )
    }
}

impl Args {
    /// Builds the conversion options
    ///
    /// Values from the `--config` file are overridden by command line flags.
    pub fn options(&self) -> Result<ConversionOptions> {
        let mut options = match &self.config {
            Some(path) => ConversionOptions::from_file(path)
                .with_context(|| format!("unable to read config {}", path.display()))?,
            None => ConversionOptions::default(),
        };
        if let Some(code) = &self.genetic_code {
            options.translation.genetic_code_table = GeneticCodeTable::from_name_or_number(code);
        }
        if let Some(organism) = &self.organism {
            options.organism = organism.clone();
        }
        if let Some(topology) = self.topology {
            options.topology = topology;
        }
        if self.include_stop_codon {
            options.translation.include_stop_codon = true;
        }
        if self.no_translate {
            options.translation.translate_cds = false;
        }
        if self.allow_internal_stops {
            options.translation.allow_internal_stop_codons = true;
        }
        options.validate().context("invalid conversion options")?;
        Ok(options)
    }
}

/// Runs a complete conversion
pub fn run(args: &Args) -> Result<()> {
    let options = args.options()?;
    info!(
        "Using genetic code {}",
        options.translation.genetic_code_table
    );
    let converter = Converter::new(options);

    let format = match args.format {
        Some(format) => format,
        None => AnnotationFormat::from_path(&args.annotations)
            .context("use --format to set the annotation format")?,
    };

    let sequences = converter
        .read_sequences(&args.sequence)
        .with_context(|| format!("unable to read sequences from {}", args.sequence.display()))?;
    let annotations = converter
        .read_annotations(&args.annotations, format)
        .with_context(|| {
            format!(
                "unable to read annotations from {}",
                args.annotations.display()
            )
        })?;
    let records = converter.records(sequences, annotations, format);

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("unable to create {}", path.display()))?;
            converter.convert(&records, file)?;
        }
        None => {
            let stdout = io::stdout();
            converter.convert(&records, stdout.lock())?;
        }
    }

    if let Some(path) = &args.qc {
        let mut writer = qc::Writer::from_file(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        writer.set_genetic_code(GeneticCode::for_table(
            converter.options().translation.genetic_code_table,
        ));
        writer.write_header()?;
        writer.write_records(&records)?;
        writer.flush()?;
        info!("Wrote QC report to {}", path.display());
    }
    Ok(())
}
