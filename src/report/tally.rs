//! Order-preserving frequency counting.

use std::collections::HashMap;
use std::hash::Hash;

/// Counts values while remembering the order each was first seen.
///
/// Ties are resolved toward the value encountered first, so results are
/// deterministic for a given row order.
#[derive(Debug, Clone)]
pub struct Tally<T> {
    index: HashMap<T, usize>,
    counts: Vec<(T, usize)>,
}

impl<T> Default for Tally<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            counts: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> Tally<T> {
    pub fn add(&mut self, value: T) {
        match self.index.get(&value) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(value.clone(), self.counts.len());
                self.counts.push((value, 1));
            }
        }
    }

    /// Most frequent value; the earliest-seen wins a tie. `None` when empty.
    pub fn mode(&self) -> Option<&T> {
        let mut best: Option<&(T, usize)> = None;
        for entry in &self.counts {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(value, _)| value)
    }

    /// `(value, count)` pairs by descending count, ties in first-seen order.
    pub fn value_counts(&self) -> Vec<(T, usize)> {
        let mut counts = self.counts.clone();
        // stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for Tally<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tally = Tally::default();
        for value in iter {
            tally.add(value);
        }
        tally
    }
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
