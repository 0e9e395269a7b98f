//! Row labels for a [`Series`](crate::series::Series).

use std::borrow::Cow;
use std::sync::Arc;

/// Row labels: either positional or explicit strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Index {
    /// Positional labels `start..start + len`
    Range {
        /// First label
        start: usize,
        /// Number of labels
        len: usize,
    },
    /// Explicit labels
    Labels(Arc<[String]>),
}

impl Index {
    /// Positional index `0..len`.
    pub fn range(len: usize) -> Self {
        Index::Range { start: 0, len }
    }

    /// Explicit labels.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Index::Labels(labels.into_iter().map(Into::into).collect())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        match self {
            Index::Range { len, .. } => *len,
            Index::Labels(labels) => labels.len(),
        }
    }

    /// Returns `true` if there are no labels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label at position `i`.
    pub fn label(&self, i: usize) -> Option<Cow<'_, str>> {
        match self {
            Index::Range { start, len } => (i < *len).then(|| Cow::Owned((start + i).to_string())),
            Index::Labels(labels) => labels.get(i).map(|l| Cow::Borrowed(l.as_str())),
        }
    }

    /// All labels in order.
    pub fn labels(&self) -> Vec<String> {
        (0..self.len())
            .filter_map(|i| self.label(i).map(Cow::into_owned))
            .collect()
    }

    /// Labels `[start, end)`; `None` if the range does not fit.
    pub fn slice(&self, start: usize, end: usize) -> Option<Self> {
        if start > end || end > self.len() {
            return None;
        }
        Some(match self {
            Index::Range { start: first, .. } => Index::Range {
                start: first + start,
                len: end - start,
            },
            Index::Labels(labels) => Index::Labels(labels[start..end].into()),
        })
    }

    /// Labels at the given positions; `None` if any position is out of range.
    pub fn take(&self, positions: &[usize]) -> Option<Self> {
        positions
            .iter()
            .map(|&i| self.label(i).map(Cow::into_owned))
            .collect::<Option<Vec<_>>>()
            .map(Index::from_labels)
    }

    /// Labels of `self` followed by labels of `other`.
    pub fn append(&self, other: &Index) -> Self {
        Index::from_labels(self.labels().into_iter().chain(other.labels()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_labels() {
        let index = Index::range(3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.label(2).as_deref(), Some("2"));
        assert_eq!(index.label(3), None);
    }

    #[test]
    fn test_slice_range_keeps_positions() {
        let index = Index::range(5).slice(2, 4).unwrap();
        assert_eq!(index.labels(), vec!["2", "3"]);
        assert!(Index::range(2).slice(1, 3).is_none());
    }

    #[test]
    fn test_explicit_labels() {
        let index = Index::from_labels(["a", "b", "c"]);
        assert_eq!(index.slice(1, 3).unwrap().labels(), vec!["b", "c"]);
        assert_eq!(index.take(&[2, 0]).unwrap().labels(), vec!["c", "a"]);
        assert!(index.take(&[3]).is_none());
    }

    #[test]
    fn test_append() {
        let index = Index::range(2).append(&Index::from_labels(["x"]));
        assert_eq!(index.labels(), vec!["0", "1", "x"]);
    }
}
