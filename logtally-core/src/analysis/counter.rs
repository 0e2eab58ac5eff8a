use ahash::RandomState;
use std::collections::HashMap;
use std::sync::Arc;

/// Occurrence counter that remembers the order in which keys were first seen.
///
/// Rankings break ties by that order, which keeps reports reproducible for a
/// given input regardless of hashing.
#[derive(Debug, Clone, Default)]
pub struct FrequencyCounter {
    // Both sides share one allocation per key.
    index: HashMap<Arc<str>, usize, RandomState>,
    entries: Vec<(Arc<str>, u64)>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    fn add(&mut self, key: &str, count: u64) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += count,
            None => {
                let key: Arc<str> = Arc::from(key);
                self.index.insert(Arc::clone(&key), self.entries.len());
                self.entries.push((key, count));
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, c)| (&**k, *c))
    }

    /// The `n` highest counts, descending. Equal counts keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<_> = self.entries.iter().collect();
        // sort_by is stable, which is what carries the first-seen tie-break
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(k, c)| (k.to_string(), *c))
            .collect()
    }

    /// All entries ordered by key, ascending.
    pub fn sorted_by_key(&self) -> Vec<(String, u64)> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
            .into_iter()
            .map(|(k, c)| (k.to_string(), *c))
            .collect()
    }

    /// Fold `other` into `self`. Keys already present keep their position,
    /// new keys are appended in `other`'s order.
    pub fn merge(&mut self, other: &FrequencyCounter) {
        for (key, count) in &other.entries {
            self.add(key, *count);
        }
    }
}
