//! Classification of named features and their GenBank qualifiers
//!
//! Every feature name is resolved to one [`FeatureHandler`]. The handler
//! decides on the GenBank feature key, the qualifiers of the feature and
//! whether an additional `gene` feature accompanies it.
//!
//! Handlers are tried in a fixed order, the first one that accepts a name wins:
//!
//! 1. [`FeatureHandler::Trna`]: names starting with `trn`
//! 2. [`FeatureHandler::Rrna`]: names starting with `rrn`
//! 3. [`FeatureHandler::ProteinCoding`]: mitochondrial protein genes, `orf`s and gene products
//! 4. [`FeatureHandler::Origin`]: `OL` and `OH`
//! 5. [`FeatureHandler::Default`]: everything else
mod naming;
mod origin;
mod protein_coding;
mod rrna;
mod trna;

use std::fmt;
use std::sync::LazyLock;

use crate::fasta::header::FastaHeaderInfo;
use crate::models::{Annotation, AnnotationBuilder, Qualifiers};
use crate::translator::Translator;
use crate::utils::errors::SequenceError;
use crate::utils::wrap_translation;

pub use crate::features::naming::standardize_gene_name;

/// The handler registry with the default handlers
pub static DEFAULT_REGISTRY: LazyLock<FeatureHandlerRegistry> =
    LazyLock::new(FeatureHandlerRegistry::new);

/// Decides how a named feature is represented in GenBank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureHandler {
    Trna,
    Rrna,
    ProteinCoding,
    Origin,
    Default,
}

impl fmt::Display for FeatureHandler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FeatureHandler::Trna => "tRNA",
                FeatureHandler::Rrna => "rRNA",
                FeatureHandler::ProteinCoding => "protein coding",
                FeatureHandler::Origin => "origin",
                FeatureHandler::Default => "default",
            }
        )
    }
}

impl FeatureHandler {
    /// Returns true if the handler is responsible for the feature name
    ///
    /// Names are compared case-insensitively.
    ///
    /// # Examples
    /// ```rust
    /// use gbconvert::features::FeatureHandler;
    ///
    /// assert!(FeatureHandler::Trna.can_handle("trnF"));
    /// assert!(FeatureHandler::ProteinCoding.can_handle("COX1-a"));
    /// assert!(FeatureHandler::Origin.can_handle("oh"));
    /// assert!(!FeatureHandler::Origin.can_handle("OHX"));
    /// assert!(FeatureHandler::Default.can_handle("anything"));
    /// ```
    pub fn can_handle(&self, name: &str) -> bool {
        match self {
            FeatureHandler::Trna => trna::can_handle(name),
            FeatureHandler::Rrna => rrna::can_handle(name),
            FeatureHandler::ProteinCoding => protein_coding::can_handle(name),
            FeatureHandler::Origin => origin::can_handle(name),
            FeatureHandler::Default => true,
        }
    }

    /// The GenBank feature key of handled features
    pub fn feature_type(&self) -> &'static str {
        match self {
            FeatureHandler::Trna => "tRNA",
            FeatureHandler::Rrna => "rRNA",
            FeatureHandler::ProteinCoding => "CDS",
            FeatureHandler::Origin => "rep_origin",
            FeatureHandler::Default => "misc_feature",
        }
    }

    /// Builds the qualifiers of a feature
    ///
    /// Every feature gets a `gene` qualifier with the name as it was given.
    /// Products are looked up by the standardized name. Protein coding
    /// features are translated if a [`Translator`] is given, coding sequence
    /// translation is enabled and `sequence` is not empty.
    ///
    /// # Errors
    /// [`SequenceError::InvalidSequence`] if a sequence that must be translated
    /// contains anything but nucleotides
    ///
    /// # Examples
    /// ```rust
    /// use gbconvert::fasta::header::FastaHeaderInfo;
    /// use gbconvert::features::FeatureHandler;
    ///
    /// let info = FastaHeaderInfo::parse(">chrM;1-70;+;trnF(GAA)").unwrap();
    /// let qualifiers = FeatureHandler::Trna.build_qualifiers(&info, "", None).unwrap();
    ///
    /// assert_eq!(qualifiers.first("gene"), Some("trnF"));
    /// assert_eq!(qualifiers.first("product"), Some("tRNA-Phe"));
    /// assert_eq!(qualifiers.first("note"), Some("anticodon:gaa"));
    /// ```
    pub fn build_qualifiers(
        &self,
        info: &FastaHeaderInfo,
        sequence: &str,
        translator: Option<&Translator>,
    ) -> Result<Qualifiers, SequenceError> {
        let raw = info.feature_name();
        let lookup = standardize_gene_name(raw).to_lowercase();

        let mut qualifiers = Qualifiers::new();
        qualifiers.add("gene", raw);

        match self {
            FeatureHandler::Trna => {
                if let Some(product) = trna::product(&lookup) {
                    qualifiers.add("product", product);
                }
                if let Some(note) = trna::anticodon_note(info.qualifier()) {
                    qualifiers.add("note", note);
                }
            }
            FeatureHandler::Rrna => {
                if let Some(product) = rrna::product(&lookup) {
                    qualifiers.add("product", product);
                }
            }
            FeatureHandler::ProteinCoding => {
                // the translation table is fixed for header-encoded features
                qualifiers.add("codon_start", "1");
                qualifiers.add("transl_table", "5");
                qualifiers.add("product", protein_coding::product(&lookup, raw));
                qualifiers.add("protein_id", "");
                if let Some(translator) = translator {
                    if translator.options().translate_cds && !sequence.is_empty() {
                        let protein = translator.translate_feature(sequence)?;
                        if !protein.is_empty() {
                            qualifiers.add("translation", wrap_translation(&protein));
                        }
                    }
                }
            }
            FeatureHandler::Origin => {
                qualifiers.add("note", origin::note(raw));
            }
            FeatureHandler::Default => {}
        }
        Ok(qualifiers)
    }

    /// Returns the features that accompany `feature`
    ///
    /// All handlers except [`FeatureHandler::Origin`] add one `gene` feature
    /// at the same location, unless `feature` is a gene itself or has no
    /// `gene` qualifier.
    ///
    /// # Examples
    /// ```rust
    /// use gbconvert::features::FeatureHandler;
    /// use gbconvert::models::{AnnotationBuilder, Strand};
    ///
    /// let cds = AnnotationBuilder::new()
    ///     .feature_type("CDS")
    ///     .sequence_id("chrM")
    ///     .feature_id("feature_1")
    ///     .start(5)
    ///     .end(50)
    ///     .strand(Strand::Minus)
    ///     .qualifier("gene", "cox1")
    ///     .qualifier("product", "cytochrome c oxidase subunit I")
    ///     .build()
    ///     .unwrap();
    ///
    /// let genes = FeatureHandler::ProteinCoding.create_additional_features(&cds);
    /// assert_eq!(genes.len(), 1);
    /// assert_eq!(genes[0].feature_type(), "gene");
    /// assert_eq!(genes[0].feature_id(), "feature_1_gene");
    /// assert_eq!((genes[0].start(), genes[0].end()), (5, 50));
    /// assert_eq!(genes[0].qualifiers().len(), 1);
    ///
    /// assert!(FeatureHandler::Origin.create_additional_features(&cds).is_empty());
    /// ```
    pub fn create_additional_features(&self, feature: &Annotation) -> Vec<Annotation> {
        if *self == FeatureHandler::Origin || feature.feature_type() == "gene" {
            return Vec::new();
        }
        let Some(gene) = feature.gene() else {
            return Vec::new();
        };
        AnnotationBuilder::new()
            .feature_type("gene")
            .sequence_id(feature.sequence_id())
            .feature_id(format!("{}_gene", feature.feature_id()))
            .start(feature.start())
            .end(feature.end())
            .strand(feature.strand())
            .qualifier("gene", gene)
            .build()
            .into_iter()
            .collect()
    }
}

/// An ordered list of [`FeatureHandler`]s
///
/// The last handler is always [`FeatureHandler::Default`], so every
/// name resolves to a handler.
///
/// # Examples
/// ```rust
/// use gbconvert::features::{FeatureHandler, FeatureHandlerRegistry, DEFAULT_REGISTRY};
///
/// assert_eq!(DEFAULT_REGISTRY.handler_for("trnF"), FeatureHandler::Trna);
/// assert_eq!(DEFAULT_REGISTRY.handler_for("rrnS"), FeatureHandler::Rrna);
/// assert_eq!(DEFAULT_REGISTRY.handler_for("nad4l"), FeatureHandler::ProteinCoding);
/// assert_eq!(DEFAULT_REGISTRY.handler_for("OL"), FeatureHandler::Origin);
/// assert_eq!(DEFAULT_REGISTRY.handler_for("D-loop"), FeatureHandler::Default);
///
/// // a registry without tRNA handling
/// let registry = FeatureHandlerRegistry::with_handlers(vec![FeatureHandler::ProteinCoding]);
/// assert_eq!(registry.handler_for("trnF"), FeatureHandler::Default);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureHandlerRegistry {
    handlers: Vec<FeatureHandler>,
}

impl Default for FeatureHandlerRegistry {
    fn default() -> Self {
        FeatureHandlerRegistry::new()
    }
}

impl FeatureHandlerRegistry {
    /// Creates the registry with all handlers in their default order
    pub fn new() -> Self {
        FeatureHandlerRegistry {
            handlers: vec![
                FeatureHandler::Trna,
                FeatureHandler::Rrna,
                FeatureHandler::ProteinCoding,
                FeatureHandler::Origin,
                FeatureHandler::Default,
            ],
        }
    }

    /// Creates a registry with custom handler order
    ///
    /// [`FeatureHandler::Default`] is appended if it is missing
    pub fn with_handlers(mut handlers: Vec<FeatureHandler>) -> Self {
        if !handlers.contains(&FeatureHandler::Default) {
            handlers.push(FeatureHandler::Default);
        }
        FeatureHandlerRegistry { handlers }
    }

    /// Returns the first handler that can handle the feature name
    pub fn handler_for(&self, name: &str) -> FeatureHandler {
        self.handlers
            .iter()
            .find(|handler| handler.can_handle(name))
            .copied()
            .unwrap_or(FeatureHandler::Default)
    }

    pub fn handlers(&self) -> &[FeatureHandler] {
        &self.handlers
    }
}
