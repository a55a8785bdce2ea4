use std::collections::HashMap;

use serde::Serialize;

use crate::models::Annotation;

/// Annotations grouped by the sequence they belong to
///
/// Groups are kept in the order in which their sequence id was first seen.
/// Every annotation of a group has the group's sequence id.
///
/// # Examples
/// ```rust
/// use gbconvert::models::{AnnotationBuilder, AnnotationData};
///
/// let mut data = AnnotationData::new();
/// for (seq, id) in [("chrM", "a"), ("chr1", "b"), ("chrM", "c")] {
///     data.push(
///         AnnotationBuilder::new()
///             .feature_type("gene")
///             .sequence_id(seq)
///             .feature_id(id)
///             .build()
///             .unwrap(),
///     );
/// }
///
/// assert_eq!(data.len(), 3);
/// assert_eq!(data.sequence_ids().collect::<Vec<&str>>(), vec!["chrM", "chr1"]);
/// assert_eq!(data.by_sequence("chrM").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationData {
    order: Vec<String>,
    groups: HashMap<String, Vec<Annotation>>,
    count: usize,
}

impl AnnotationData {
    pub fn new() -> Self {
        AnnotationData::default()
    }

    /// Adds an annotation to the group of its sequence
    pub fn push(&mut self, annotation: Annotation) {
        let id = annotation.sequence_id();
        match self.groups.get_mut(id) {
            Some(group) => group.push(annotation),
            None => {
                self.order.push(id.to_string());
                self.groups.insert(id.to_string(), vec![annotation]);
            }
        }
        self.count += 1;
    }

    /// Total number of annotations across all sequences
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sequence ids in order of first appearance
    pub fn sequence_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|id| id.as_str())
    }

    /// All annotations of a sequence
    pub fn by_sequence(&self, sequence_id: &str) -> Option<&[Annotation]> {
        self.groups.get(sequence_id).map(|group| group.as_slice())
    }

    /// Iterates over `(sequence id, annotations)` groups
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Annotation])> {
        self.order
            .iter()
            .filter_map(|id| self.groups.get(id).map(|group| (id.as_str(), group.as_slice())))
    }

    /// Stable-sorts the annotations of every sequence by their start position
    pub fn sort(&mut self) {
        for group in self.groups.values_mut() {
            group.sort_by_key(|annotation| annotation.start());
        }
    }

    /// Consumes the data and returns the groups in order
    pub fn into_groups(mut self) -> Vec<(String, Vec<Annotation>)> {
        self.order
            .into_iter()
            .filter_map(|id| self.groups.remove(&id).map(|group| (id, group)))
            .collect()
    }
}

impl FromIterator<Annotation> for AnnotationData {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        let mut data = AnnotationData::new();
        for annotation in iter {
            data.push(annotation);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnnotationBuilder;

    fn annotation(seq: &str, id: &str, start: u32) -> Annotation {
        AnnotationBuilder::new()
            .feature_type("misc_feature")
            .sequence_id(seq)
            .feature_id(id)
            .start(start)
            .end(start + 10)
            .build()
            .unwrap()
    }

    #[test]
    fn test_group_invariant() {
        let data: AnnotationData = vec![
            annotation("chrM", "a", 0),
            annotation("chr2", "b", 0),
            annotation("chrM", "c", 5),
        ]
        .into_iter()
        .collect();

        let mut total = 0;
        for (id, group) in data.groups() {
            assert!(group.iter().all(|a| a.sequence_id() == id));
            total += group.len();
        }
        assert_eq!(total, data.len());
    }

    #[test]
    fn test_sort_is_stable() {
        let mut data: AnnotationData = vec![
            annotation("chrM", "late", 50),
            annotation("chrM", "first", 10),
            annotation("chrM", "second", 10),
        ]
        .into_iter()
        .collect();
        data.sort();
        let ids: Vec<&str> = data
            .by_sequence("chrM")
            .unwrap()
            .iter()
            .map(|a| a.feature_id())
            .collect();
        assert_eq!(ids, vec!["first", "second", "late"]);
    }

    #[test]
    fn test_into_groups_keeps_order() {
        let data: AnnotationData = vec![
            annotation("chr2", "a", 0),
            annotation("chr1", "b", 0),
        ]
        .into_iter()
        .collect();
        let groups = data.into_groups();
        assert_eq!(groups[0].0, "chr2");
        assert_eq!(groups[1].0, "chr1");
    }

    #[test]
    fn test_empty() {
        let data = AnnotationData::new();
        assert!(data.is_empty());
        assert!(data.by_sequence("chrM").is_none());
    }
}
