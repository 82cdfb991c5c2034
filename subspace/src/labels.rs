use itertools::Itertools;
use rustc_hash::FxHashMap;

/// Bijection between arbitrary integer labels and dense class indices `0..C`
///
/// Class indices follow the order in which each distinct label first appears,
/// not the numeric order of the labels: `[5, 5, 2, 2]` maps `5 → 0`, `2 → 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<i32>,
    index: FxHashMap<i32, usize>,
}

impl LabelMap {
    pub fn new(labels: &[i32]) -> Self {
        let distinct: Vec<i32> = labels.iter().copied().unique().collect();
        let index = distinct
            .iter()
            .enumerate()
            .map(|(class, &label)| (label, class))
            .collect();
        Self {
            labels: distinct,
            index,
        }
    }

    /// Number of distinct labels (C)
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    pub fn class_of(&self, label: i32) -> Option<usize> {
        self.index.get(&label).copied()
    }

    pub fn label_of(&self, class: usize) -> Option<i32> {
        self.labels.get(class).copied()
    }

    /// Distinct labels ordered by class index
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Maps every label of `labels` to its class index.
    ///
    /// Returns `None` if any label is unknown to this map.
    pub fn map_all(&self, labels: &[i32]) -> Option<Vec<usize>> {
        labels.iter().map(|&l| self.class_of(l)).collect()
    }

    pub fn into_labels(self) -> Vec<i32> {
        self.labels
    }
}
