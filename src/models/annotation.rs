use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::utils::errors::AnnotationError;

/// Strand of a feature on the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Strand {
    Plus,
    Minus,
    #[default]
    Unknown,
}

impl Strand {
    /// Returns the numeric representation `1`, `-1` or `0`
    pub fn as_i8(&self) -> i8 {
        match self {
            Strand::Plus => 1,
            Strand::Minus => -1,
            Strand::Unknown => 0,
        }
    }

    pub fn is_reverse(&self) -> bool {
        self == &Strand::Minus
    }
}

impl From<i8> for Strand {
    fn from(value: i8) -> Self {
        match value.signum() {
            1 => Strand::Plus,
            -1 => Strand::Minus,
            _ => Strand::Unknown,
        }
    }
}

impl FromStr for Strand {
    type Err = String;
    /// Parses the strand column of GFF, GTF and BED files
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            "." | "?" => Ok(Strand::Unknown),
            _ => Err(format!("invalid strand {}", s)),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Strand::Plus => "+",
                Strand::Minus => "-",
                Strand::Unknown => ".",
            }
        )
    }
}

/// GenBank qualifiers of a feature
///
/// `Qualifiers` is an ordered multimap: keys keep the order in which they
/// were first added and every key can hold several values.
///
/// # Examples
/// ```rust
/// use gbconvert::models::Qualifiers;
///
/// let mut q = Qualifiers::new();
/// q.add("gene", "nad1");
/// q.add("note", "first");
/// q.add("note", "second");
///
/// assert_eq!(q.first("gene"), Some("nad1"));
/// assert_eq!(q.get("note").unwrap(), &["first".to_string(), "second".to_string()]);
/// assert_eq!(q.keys().collect::<Vec<&str>>(), vec!["gene", "note"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Qualifiers {
    entries: Vec<(String, Vec<String>)>,
}

impl Qualifiers {
    pub fn new() -> Self {
        Qualifiers {
            entries: Vec::new(),
        }
    }

    /// Appends a value to the key, adding the key if it is new
    pub fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value.into()),
            None => self.entries.push((key, vec![value.into()])),
        }
    }

    /// Returns all values of the key
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns the first value of the key
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(|value| value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterates all keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates all `(key, value)` pairs, repeating the key for every value
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(k, values)| {
            values
                .iter()
                .map(move |value| (k.as_str(), value.as_str()))
        })
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A feature of a sequence, the canonical record that is written as a GenBank feature
///
/// Coordinates are 0-based: `start` is inclusive, `end` is exclusive.
/// Annotations are immutable; use [`Annotation::with_qualifier`] to derive
/// an enriched copy.
///
/// # Examples
/// ```rust
/// use gbconvert::models::{AnnotationBuilder, Strand};
///
/// let annotation = AnnotationBuilder::new()
///     .feature_type("CDS")
///     .sequence_id("chrM")
///     .feature_id("cds-1")
///     .start(10)
///     .end(40)
///     .strand(Strand::Minus)
///     .qualifier("gene", "COX1")
///     .build()
///     .unwrap();
///
/// assert_eq!(annotation.len(), 30);
/// assert_eq!(annotation.gene(), Some("COX1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    feature_type: String,
    start: u32,
    end: u32,
    strand: Strand,
    phase: Option<u8>,
    sequence_id: String,
    feature_id: String,
    qualifiers: Qualifiers,
}

impl Annotation {
    /// The GenBank feature key, e.g. `CDS` or `tRNA`
    pub fn feature_type(&self) -> &str {
        &self.feature_type
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn phase(&self) -> Option<u8> {
        self.phase
    }

    pub fn sequence_id(&self) -> &str {
        &self.sequence_id
    }

    pub fn feature_id(&self) -> &str {
        &self.feature_id
    }

    pub fn qualifiers(&self) -> &Qualifiers {
        &self.qualifiers
    }

    /// The first value of the `gene` qualifier
    pub fn gene(&self) -> Option<&str> {
        self.qualifiers.first("gene")
    }

    pub fn is_coding(&self) -> bool {
        self.feature_type == "CDS"
    }

    /// Returns a copy of the annotation with an additional qualifier value
    pub fn with_qualifier<K: Into<String>, V: Into<String>>(&self, key: K, value: V) -> Annotation {
        let mut annotation = self.clone();
        annotation.qualifiers.add(key, value);
        annotation
    }
}

/// Builds an [`Annotation`]
///
/// The feature type and sequence id are required, all other values
/// have defaults. The feature id defaults to the `ID` qualifier, if present.
#[derive(Debug, Default)]
pub struct AnnotationBuilder {
    feature_type: Option<String>,
    start: u32,
    end: u32,
    strand: Strand,
    phase: Option<u8>,
    sequence_id: Option<String>,
    feature_id: Option<String>,
    qualifiers: Qualifiers,
}

impl AnnotationBuilder {
    pub fn new() -> Self {
        AnnotationBuilder::default()
    }

    pub fn feature_type<S: Into<String>>(mut self, feature_type: S) -> Self {
        self.feature_type = Some(feature_type.into());
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: u32) -> Self {
        self.end = end;
        self
    }

    pub fn strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    pub fn phase(mut self, phase: Option<u8>) -> Self {
        self.phase = phase;
        self
    }

    pub fn sequence_id<S: Into<String>>(mut self, sequence_id: S) -> Self {
        self.sequence_id = Some(sequence_id.into());
        self
    }

    pub fn feature_id<S: Into<String>>(mut self, feature_id: S) -> Self {
        self.feature_id = Some(feature_id.into());
        self
    }

    pub fn qualifier<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.qualifiers.add(key, value);
        self
    }

    pub fn qualifiers(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers = qualifiers;
        self
    }

    pub fn build(self) -> Result<Annotation, AnnotationError> {
        let feature_type = self
            .feature_type
            .ok_or(AnnotationError::Missing("feature type"))?;
        let sequence_id = self
            .sequence_id
            .ok_or(AnnotationError::Missing("sequence id"))?;
        if self.start > self.end {
            return Err(AnnotationError::InvalidCoordinates {
                start: self.start,
                end: self.end,
            });
        }
        if let Some(phase) = self.phase {
            if phase > 2 {
                return Err(AnnotationError::InvalidPhase(phase));
            }
        }
        let feature_id = match self.feature_id {
            Some(id) => id,
            None => self
                .qualifiers
                .first("ID")
                .ok_or(AnnotationError::Missing("feature id"))?
                .to_string(),
        };
        Ok(Annotation {
            feature_type,
            start: self.start,
            end: self.end,
            strand: self.strand,
            phase: self.phase,
            sequence_id,
            feature_id,
            qualifiers: self.qualifiers,
        })
    }
}
