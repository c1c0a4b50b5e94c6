use std::{borrow::Borrow, fmt::Display};

use crate::{column::rle::Rleable, row::RowId, ColumnarError};

/// A maximal block of consecutive rows sharing one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<K> {
    pub key: K,
    pub count: usize,
}

impl<K: Display> Display for Run<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{TS: {}, Count: {}}}", self.key, self.count)
    }
}

/// Runs in append order plus the cumulative row count at the end of each run.
///
/// `run_ends[i] == run_ends[i - 1] + runs[i].count`, so `run_ends` is strictly
/// increasing and its last entry is the number of rows encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunIndex<K> {
    runs: Vec<Run<K>>,
    run_ends: Vec<usize>,
}

impl<K> Default for RunIndex<K> {
    fn default() -> Self {
        Self {
            runs: Vec::new(),
            run_ends: Vec::new(),
        }
    }
}

impl<K> RunIndex<K>
where
    K: Rleable,
{
    pub(crate) fn runs(&self) -> &[Run<K>] {
        &self.runs
    }

    pub(crate) fn run_ends(&self) -> &[usize] {
        &self.run_ends
    }

    pub(crate) fn rows(&self) -> usize {
        self.run_ends.last().copied().unwrap_or(0)
    }

    /// Extends the last run when `key` repeats it, otherwise opens a new run.
    pub(crate) fn append<BK: Borrow<K>>(&mut self, key: BK) {
        let key: &K = key.borrow();
        if let Some(run) = self.runs.last_mut() {
            if &run.key == key {
                run.count += 1;
                if let Some(end) = self.run_ends.last_mut() {
                    *end += 1;
                }
                return;
            }
        }
        let end = self.rows() + 1;
        self.runs.push(Run {
            key: key.clone(),
            count: 1,
        });
        self.run_ends.push(end);
        tracing::trace!(run = self.runs.len() - 1, end, "opened rle run");
    }

    /// O(k): walks the runs, consuming each run's count from `row_id`.
    pub(crate) fn key_at_linear(&self, row_id: RowId) -> Option<&K> {
        let mut remaining = usize::try_from(row_id).ok()?;
        if remaining == 0 || remaining > self.rows() {
            return None;
        }
        for run in self.runs.iter() {
            if run.count >= remaining {
                return Some(&run.key);
            }
            remaining -= run.count;
        }
        None
    }

    /// O(log k): binary search over `run_ends` for the first end `>= row_id`.
    pub(crate) fn key_at(&self, row_id: RowId) -> Option<&K> {
        let row = usize::try_from(row_id).ok()?;
        if row == 0 || row > self.rows() {
            return None;
        }
        let run = self.run_ends.partition_point(|&end| end < row);
        self.runs.get(run).map(|run| &run.key)
    }

    /// O(k): count of the first run whose key equals `key`.
    pub(crate) fn count_of_linear<Q>(&self, key: &Q) -> Result<usize, ColumnarError>
    where
        K: Borrow<Q>,
        Q: PartialEq + std::fmt::Debug + ?Sized,
    {
        self.runs
            .iter()
            .find(|run| Borrow::<Q>::borrow(&run.key) == key)
            .map(|run| run.count)
            .ok_or_else(|| ColumnarError::key_not_found(key))
    }

    /// O(log k): binary search over the runs by key.
    ///
    /// Only correct when the runs are ordered by key, see
    /// [`RunIndex::is_key_sorted`]. On unsorted runs the search may miss a key
    /// that is present or land on an arbitrary run.
    pub(crate) fn count_of_sorted<Q>(&self, key: &Q) -> Result<usize, ColumnarError>
    where
        K: Borrow<Q>,
        Q: Ord + std::fmt::Debug + ?Sized,
    {
        self.runs
            .binary_search_by(|run| Borrow::<Q>::borrow(&run.key).cmp(key))
            .map(|run| self.runs[run].count)
            .map_err(|_| ColumnarError::key_not_found(key))
    }

    pub(crate) fn is_key_sorted(&self) -> bool
    where
        K: Ord,
    {
        self.runs.windows(2).all(|w| w[0].key < w[1].key)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn index_of(keys: &[&str]) -> RunIndex<String> {
        let mut index = RunIndex::default();
        for key in keys {
            index.append(key.to_string());
        }
        index
    }

    #[test]
    fn test_run_ends() {
        let index = index_of(&["a", "a", "b", "b", "b", "c"]);
        assert_eq!(index.run_ends(), &[2, 5, 6]);
        assert_eq!(index.rows(), 6);
        assert_eq!(
            index.runs().iter().map(|r| r.count).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_key_at_both_strategies() {
        let index = index_of(&["a", "a", "b", "b", "b", "c"]);
        let expected = ["a", "a", "b", "b", "b", "c"];
        for (i, key) in expected.iter().enumerate() {
            let row_id = i as RowId + 1;
            assert_eq!(index.key_at_linear(row_id).map(String::as_str), Some(*key));
            assert_eq!(index.key_at(row_id).map(String::as_str), Some(*key));
        }
        for row_id in [-1, 0, 7] {
            assert_eq!(index.key_at_linear(row_id), None);
            assert_eq!(index.key_at(row_id), None);
        }
    }

    #[test]
    fn test_empty_index() {
        let index = RunIndex::<String>::default();
        assert_eq!(index.key_at(1), None);
        assert_eq!(index.key_at_linear(1), None);
        assert!(index.count_of_linear("a").is_err());
        assert!(index.count_of_sorted("a").is_err());
        assert!(index.is_key_sorted());
    }

    #[test]
    fn test_run_display() {
        let run = Run {
            key: "10:00:00",
            count: 2,
        };
        assert_eq!(run.to_string(), "{TS: 10:00:00, Count: 2}");
    }
}
