//! Two-level tables keyed by interned ids: `source -> destination -> value`.
//!
//! The same shape carries transition counts (`tag -> tag`) and emission counts
//! (`tag -> token`) while training, and their log-probabilities afterwards.
//! Normalization consumes a [`CountTable`] and yields a [`LogProbTable`]; the
//! latter has no way back, so a table can only ever be normalized once:
//!
//! ```compile_fail
//! use hmmtag::hmm::table::CountTable;
//!
//! let mut counts = CountTable::default();
//! counts.increment(0, 1);
//! let log_probs = counts.into_log_probs();
//! let _ = log_probs.into_log_probs();
//! ```

use std::collections::HashMap;

/// Raw co-occurrence frequencies.
pub type CountTable = Table<u32>;
/// Row-normalized natural-log probabilities.
pub type LogProbTable = Table<f64>;

/// One source row. Cells keep the order in which destinations were first recorded.
#[derive(Debug, Clone)]
pub struct Row<V> {
    cells: Vec<(usize, V)>,
    index: HashMap<usize, usize>,
}

impl<V> Default for Row<V> {
    fn default() -> Self {
        Self { cells: Vec::new(), index: HashMap::new() }
    }
}

impl<V: Copy> Row<V> {
    pub fn get(&self, dst: usize) -> Option<V> {
        self.index.get(&dst).map(|&i| self.cells[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, V)> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn entry(&mut self, dst: usize, init: V) -> &mut V {
        let i = match self.index.get(&dst) {
            Some(&i) => i,
            None => {
                self.index.insert(dst, self.cells.len());
                self.cells.push((dst, init));
                self.cells.len() - 1
            }
        };
        &mut self.cells[i].1
    }

    fn map<W, F: Fn(V) -> W>(self, f: F) -> Row<W> {
        Row {
            cells: self.cells.into_iter().map(|(dst, v)| (dst, f(v))).collect(),
            index: self.index,
        }
    }
}

/// Mapping of mappings with explicit get-or-empty access.
///
/// A source may have a row with no destinations (it was seen as a source but
/// every successor was filtered); that is distinct from having no row at all,
/// but both read as "no successors".
#[derive(Debug, Clone)]
pub struct Table<V> {
    rows: Vec<Option<Row<V>>>,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<V: Copy> Table<V> {
    pub fn row(&self, src: usize) -> Option<&Row<V>> {
        self.rows.get(src).and_then(Option::as_ref)
    }

    pub fn get(&self, src: usize, dst: usize) -> Option<V> {
        self.row(src).and_then(|row| row.get(dst))
    }

    /// Destinations of `src` in recording order; empty when `src` has no row.
    pub fn successors(&self, src: usize) -> impl Iterator<Item = (usize, V)> + '_ {
        self.row(src).into_iter().flat_map(Row::iter)
    }

    pub fn rows(&self) -> impl Iterator<Item = (usize, &Row<V>)> {
        self.rows.iter().enumerate().filter_map(|(src, row)| row.as_ref().map(|r| (src, r)))
    }

    /// Number of sources that own a row.
    pub fn num_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    pub fn num_cells(&self) -> usize {
        self.rows().map(|(_, r)| r.len()).sum()
    }

    /// Looks up the row of `src`, creating an empty one on miss.
    pub fn row_mut(&mut self, src: usize) -> &mut Row<V> {
        if self.rows.len() <= src {
            self.rows.resize_with(src + 1, || None);
        }
        self.rows[src].get_or_insert_with(Row::default)
    }
}

impl Table<u32> {
    /// Counts one more `(src, dst)` occurrence; a new pair starts at 1.
    pub fn increment(&mut self, src: usize, dst: usize) {
        *self.row_mut(src).entry(dst, 0) += 1;
    }

    /// Replaces every count `c` with `ln(c / row_sum)`, row by row.
    pub fn into_log_probs(self) -> Table<f64> {
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                row.map(|row| {
                    let total: u64 = row.iter().map(|(_, c)| u64::from(c)).sum();
                    let total = total as f64;
                    row.map(|c| (f64::from(c) / total).ln())
                })
            })
            .collect();
        Table { rows }
    }
}

impl Table<f64> {
    /// Sets a log-probability directly; used for hand-built models.
    pub fn insert(&mut self, src: usize, dst: usize, log_prob: f64) {
        *self.row_mut(src).entry(dst, log_prob) = log_prob;
    }

    /// Total probability mass of a row, `sum(exp(v))`.
    pub fn mass(&self, src: usize) -> f64 {
        self.successors(src).map(|(_, v)| v.exp()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_counts() {
        let mut t = CountTable::default();
        t.increment(0, 1);
        t.increment(0, 1);
        t.increment(0, 2);
        t.increment(3, 1);
        assert_eq!(t.get(0, 1), Some(2));
        assert_eq!(t.get(0, 2), Some(1));
        assert_eq!(t.get(3, 1), Some(1));
        assert_eq!(t.get(1, 0), None);
        assert_eq!(t.get(99, 0), None);
        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.num_cells(), 3);
    }

    #[test]
    fn successors_keep_recording_order() {
        let mut t = CountTable::default();
        for dst in [5, 2, 7, 2, 5] {
            t.increment(0, dst);
        }
        let order: Vec<_> = t.successors(0).map(|(d, _)| d).collect();
        assert_eq!(order, [5, 2, 7]);
    }

    #[test]
    fn empty_row_is_not_missing_row() {
        let mut t = CountTable::default();
        t.row_mut(4);
        assert!(t.row(4).is_some_and(Row::is_empty));
        assert!(t.row(2).is_none());
        assert_eq!(t.successors(4).count(), 0);
        assert_eq!(t.successors(2).count(), 0);
        let p = t.into_log_probs();
        assert!(p.row(4).is_some_and(Row::is_empty));
    }

    #[test]
    fn normalize() {
        let mut t = CountTable::default();
        for _ in 0..2 {
            t.increment(0, 1);
        }
        for _ in 0..5 {
            t.increment(0, 2);
        }
        t.increment(1, 2);
        let p = t.into_log_probs();
        assert!((p.get(0, 1).unwrap() - (2.0f64 / 7.0).ln()).abs() < 1e-12);
        assert!((p.get(0, 2).unwrap() - (5.0f64 / 7.0).ln()).abs() < 1e-12);
        assert_eq!(p.get(1, 2), Some(0.0));
        assert!((p.mass(0) - 1.0).abs() < 1e-12);
        assert!((p.mass(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn insert_overwrites() {
        let mut t = LogProbTable::default();
        t.insert(0, 1, -1.0);
        t.insert(0, 1, -2.0);
        assert_eq!(t.get(0, 1), Some(-2.0));
        assert_eq!(t.row(0).map(Row::len), Some(1));
    }
}
