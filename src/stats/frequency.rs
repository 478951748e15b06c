//! Insertion-ordered frequency table

use std::collections::HashMap;

/// Counts string values while remembering the order they first appeared in.
///
/// `mode` returns the first value, by first appearance, that reaches the
/// highest count.
#[derive(Debug, Default)]
pub struct FrequencyTable<'a> {
    slots: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, usize)>,
}

impl<'a> FrequencyTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence; empty values are ignored
    pub fn record(&mut self, value: &'a str) {
        if value.is_empty() {
            return;
        }
        match self.slots.get(value) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.slots.insert(value, self.entries.len());
                self.entries.push((value, 1));
            }
        }
    }

    #[cfg(test)]
    pub fn count(&self, value: &str) -> usize {
        self.slots
            .get(value)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most frequent value; ties go to the value seen first
    pub fn mode(&self) -> Option<&'a str> {
        let mut best: Option<(&'a str, usize)> = None;
        for &(value, count) in &self.entries {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }
}

#[cfg(test)]
impl<'a> FromIterator<&'a str> for FrequencyTable<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for value in iter {
            table.record(value);
        }
        table
    }
}
