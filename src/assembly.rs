//! Assembles [`Annotation`]s from named features
//!
//! Header-encoded FASTA and BED inputs only provide a feature name and its
//! position. The assembler classifies the name with a [`FeatureHandler`],
//! builds the qualifiers and adds the accompanying `gene` features.
use log::debug;

use crate::features::{standardize_gene_name, FeatureHandlerRegistry, DEFAULT_REGISTRY};
use crate::fasta::header::FastaHeaderInfo;
use crate::models::{Annotation, AnnotationBuilder, AnnotationData};
use crate::translator::Translator;
use crate::utils::errors::ReadWriteError;

/// Collects features and turns them into [`AnnotationData`]
///
/// # Examples
/// ```rust
/// use gbconvert::assembly::AnnotationAssembler;
/// use gbconvert::fasta::header::FastaHeaderInfo;
///
/// let mut assembler = AnnotationAssembler::new(None);
/// for header in [">chrM;100-200;+;trnL1(taa)", ">chrM;1-50;-;nad1", ">chrM;300-320;+;OL"] {
///     let info = FastaHeaderInfo::parse(header).unwrap();
///     assembler.add(&info, "").unwrap();
/// }
/// let data = assembler.finish();
/// let features = data.by_sequence("chrM").unwrap();
///
/// let types: Vec<&str> = features.iter().map(|a| a.feature_type()).collect();
/// assert_eq!(types, vec!["gene", "CDS", "gene", "tRNA", "rep_origin"]);
///
/// // coordinates are 0-based, half-open
/// assert_eq!((features[1].start(), features[1].end()), (0, 50));
/// assert_eq!(features[1].qualifiers().first("product"), Some("NADH dehydrogenase subunit 1"));
/// ```
pub struct AnnotationAssembler<'r> {
    registry: &'r FeatureHandlerRegistry,
    translator: Option<Translator>,
    annotations: Vec<Annotation>,
    next_id: usize,
}

impl AnnotationAssembler<'static> {
    /// Creates an assembler that uses the default handlers
    pub fn new(translator: Option<Translator>) -> Self {
        AnnotationAssembler::with_registry(&DEFAULT_REGISTRY, translator)
    }
}

impl<'r> AnnotationAssembler<'r> {
    pub fn with_registry(registry: &'r FeatureHandlerRegistry, translator: Option<Translator>) -> Self {
        AnnotationAssembler {
            registry,
            translator,
            annotations: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds one feature
    ///
    /// `sequence` is the nucleotide sequence of the feature, it is only
    /// used to translate coding features and may be empty.
    ///
    /// # Errors
    /// [`ReadWriteError::Sequence`] if a coding feature cannot be translated
    pub fn add(&mut self, info: &FastaHeaderInfo, sequence: &str) -> Result<(), ReadWriteError> {
        let name = standardize_gene_name(info.feature_name());
        let handler = self.registry.handler_for(&name);
        debug!(
            "{} ({}) uses the {} handler",
            info.feature_name(),
            name,
            handler
        );

        let mut qualifiers = handler.build_qualifiers(info, sequence, self.translator.as_ref())?;
        let id = format!("feature_{}", self.next_id);
        self.next_id += 1;
        qualifiers.add("ID", id.as_str());

        let annotation = AnnotationBuilder::new()
            .feature_type(handler.feature_type())
            .sequence_id(info.sequence_id())
            .feature_id(id)
            .start(info.start().saturating_sub(1))
            .end(info.end())
            .strand(info.strand())
            .qualifiers(qualifiers)
            .build()?;
        self.annotations.push(annotation);
        Ok(())
    }

    /// Number of features added so far
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Groups the features by sequence, sorts them by position and
    /// adds the accompanying `gene` features before each feature
    pub fn finish(self) -> AnnotationData {
        let mut grouped: AnnotationData = self.annotations.into_iter().collect();
        grouped.sort();

        let mut data = AnnotationData::new();
        for (_, features) in grouped.into_groups() {
            for feature in features {
                let handler = self
                    .registry
                    .handler_for(feature.gene().unwrap_or(feature.feature_type()));
                for additional in handler.create_additional_features(&feature) {
                    data.push(additional);
                }
                data.push(feature);
            }
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureHandler;
    use crate::models::{GeneticCodeTable, Strand, TranslationOptions};

    fn add(assembler: &mut AnnotationAssembler, header: &str, sequence: &str) {
        let info = FastaHeaderInfo::parse(header).unwrap();
        assembler.add(&info, sequence).unwrap();
    }

    #[test]
    fn test_unique_ids() {
        let mut assembler = AnnotationAssembler::new(None);
        add(&mut assembler, ">chrM;1-10;+;D-loop", "");
        add(&mut assembler, ">chrM;1-10;+;D-loop", "");
        let data = assembler.finish();
        let ids: Vec<&str> = data
            .by_sequence("chrM")
            .unwrap()
            .iter()
            .filter(|a| a.feature_type() == "misc_feature")
            .map(|a| a.feature_id())
            .collect();
        assert_eq!(ids, vec!["feature_1", "feature_2"]);
    }

    #[test]
    fn test_id_qualifier() {
        let mut assembler = AnnotationAssembler::new(None);
        add(&mut assembler, ">chrM;1-10;+;rrnS", "");
        let data = assembler.finish();
        let rrna = &data.by_sequence("chrM").unwrap()[1];
        assert_eq!(rrna.qualifiers().first("ID"), Some("feature_1"));
        assert_eq!(rrna.qualifiers().first("product"), Some("12S ribosomal RNA"));
        assert_eq!(rrna.gene(), Some("rrnS"));
    }

    #[test]
    fn test_groups_and_sorting() {
        let mut assembler = AnnotationAssembler::new(None);
        add(&mut assembler, ">chr2;50-60;+;OH", "");
        add(&mut assembler, ">chrM;40-60;+;OL", "");
        add(&mut assembler, ">chr2;10-20;+;OL", "");
        assert_eq!(assembler.len(), 3);
        let data = assembler.finish();
        assert_eq!(data.sequence_ids().collect::<Vec<&str>>(), vec!["chr2", "chrM"]);
        let starts: Vec<u32> = data
            .by_sequence("chr2")
            .unwrap()
            .iter()
            .map(|a| a.start())
            .collect();
        assert_eq!(starts, vec![9, 49]);
    }

    #[test]
    fn test_complement_strand() {
        let mut assembler = AnnotationAssembler::new(None);
        add(&mut assembler, ">chrM;1-10;+;cox3 complement", "");
        let data = assembler.finish();
        for feature in data.by_sequence("chrM").unwrap() {
            assert_eq!(feature.strand(), Strand::Minus);
        }
    }

    #[test]
    fn test_translation() {
        let translator = Translator::new(TranslationOptions::new(GeneticCodeTable::Standard));
        let mut assembler = AnnotationAssembler::new(Some(translator));
        add(&mut assembler, ">chrM;1-9;+;atp8", "ATGCCCTAA");
        let data = assembler.finish();
        let cds = &data.by_sequence("chrM").unwrap()[1];
        assert_eq!(cds.qualifiers().first("translation"), Some("MP"));
    }

    #[test]
    fn test_custom_registry() {
        let registry = FeatureHandlerRegistry::with_handlers(vec![FeatureHandler::Origin]);
        let mut assembler = AnnotationAssembler::with_registry(&registry, None);
        add(&mut assembler, ">chrM;1-10;+;cox1", "");
        let data = assembler.finish();
        let types: Vec<&str> = data
            .by_sequence("chrM")
            .unwrap()
            .iter()
            .map(|a| a.feature_type())
            .collect();
        assert_eq!(types, vec!["gene", "misc_feature"]);
    }
}
