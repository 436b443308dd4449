use std::{collections::BTreeMap, iter::Sum};

/// Per-root-move results, keyed by move string, in provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divide<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Divide<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Divide<T> {
    pub fn get(&self, mv: &str) -> Option<&T> {
        self.entries
            .iter()
            .find_map(|(name, value)| (name == mv).then_some(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn moves(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, T> {
        self.entries.into_iter().collect()
    }

    pub(crate) fn push(&mut self, mv: String, value: T) {
        self.entries.push((mv, value));
    }
}

impl<T: Copy + Sum> Divide<T> {
    /// Sum over every root move.
    pub fn total(&self) -> T {
        self.entries.iter().map(|(_, value)| *value).sum()
    }
}

impl<T> FromIterator<(String, T)> for Divide<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Divide<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// One disagreement between a divide and its reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DivideMismatch<T> {
    /// In the reference, not in ours.
    Missing { mv: String, expected: T },
    /// In ours, not in the reference.
    Unexpected { mv: String, found: T },
    Differs { mv: String, found: T, expected: T },
}

impl<T> DivideMismatch<T> {
    pub fn mv(&self) -> &str {
        match self {
            Self::Missing { mv, .. }
            | Self::Unexpected { mv, .. }
            | Self::Differs { mv, .. } => mv,
        }
    }
}

/// Two-way diff of a divide against reference data.
///
/// Reference order first (missing and differing moves), then moves only we
/// produced. An empty result means the divides agree.
pub fn compare_divides<T: Copy + PartialEq>(
    ours: &Divide<T>,
    reference: &Divide<T>,
) -> Vec<DivideMismatch<T>> {
    let mut mismatches = Vec::new();

    for (mv, &expected) in reference.iter() {
        match ours.get(mv) {
            None => mismatches.push(DivideMismatch::Missing {
                mv: mv.to_string(),
                expected,
            }),
            Some(&found) if found != expected => mismatches.push(DivideMismatch::Differs {
                mv: mv.to_string(),
                found,
                expected,
            }),
            Some(_) => {}
        }
    }

    for (mv, &found) in ours.iter() {
        if reference.get(mv).is_none() {
            mismatches.push(DivideMismatch::Unexpected {
                mv: mv.to_string(),
                found,
            });
        }
    }

    mismatches
}
