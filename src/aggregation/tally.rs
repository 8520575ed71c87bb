use std::cmp::Ordering;
use std::collections::HashMap;

/// Duration totals per label that remember first-seen order, so equal
/// totals keep a stable, insertion-based order after sorting.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn add(&mut self, label: &str, amount: f64) {
        match self.index.get(label) {
            Some(&slot) => self.entries[slot].1 += amount,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), amount));
            }
        }
    }

    pub fn get(&self, label: &str) -> f64 {
        self.index
            .get(label)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with the strictly largest total; the earliest wins ties.
    pub fn leader(&self) -> Option<(&str, f64)> {
        self.entries
            .iter()
            .fold(None::<&(String, f64)>, |best, entry| match best {
                Some(current) if entry.1 <= current.1 => Some(current),
                _ => Some(entry),
            })
            .map(|(label, total)| (label.as_str(), *total))
    }

    /// Descending by total. On equal totals uncategorized labels go after the
    /// rest; otherwise first-seen order is kept.
    pub fn ranked<F>(self, is_uncategorized: F) -> Vec<(String, f64)>
    where
        F: Fn(&str) -> bool,
    {
        let mut entries = self.entries;
        entries.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| is_uncategorized(&a.0).cmp(&is_uncategorized(&b.0)))
        });
        entries
    }

    /// Descending by total with uncategorized labels always last, whatever
    /// their magnitude.
    pub fn axis<F>(self, is_uncategorized: F) -> Vec<(String, f64)>
    where
        F: Fn(&str) -> bool,
    {
        let mut entries = self.entries;
        entries.sort_by(|a, b| match is_uncategorized(&a.0).cmp(&is_uncategorized(&b.0)) {
            Ordering::Equal => b.1.total_cmp(&a.1),
            other => other,
        });
        entries
    }
}
