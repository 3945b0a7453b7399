//! Frequency counting over trip columns.

use std::collections::BTreeMap;

/// A distinct column value together with how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount<T> {
    pub value: T,
    pub count: usize,
}

impl<T> ValueCount<T> {
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count }
    }

    /// Convert the value while keeping the count.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValueCount<U> {
        ValueCount {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// Count occurrences of every distinct value.
///
/// Sorted by descending count; values with equal counts keep natural order.
pub fn value_counts<T, I>(values: I) -> Vec<ValueCount<T>>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<ValueCount<T>> = tally(values)
        .into_iter()
        .map(|(value, count)| ValueCount::new(value, count))
        .collect();
    // Stable sort keeps the BTreeMap's ascending order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Most frequent value, or `None` for an empty input.
///
/// Ties go to the smallest value.
pub fn mode<T, I>(values: I) -> Option<ValueCount<T>>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<ValueCount<T>> = None;
    for (value, count) in tally(values) {
        if best.as_ref().map_or(true, |b| count > b.count) {
            best = Some(ValueCount::new(value, count));
        }
    }
    best
}

fn tally<T, I>(values: I) -> BTreeMap<T, usize>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut map: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *map.entry(value).or_insert(0) += 1;
    }
    map
}

// ── Tests ─────────────────────────────────────────────────────────────────────
