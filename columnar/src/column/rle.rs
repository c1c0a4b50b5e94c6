use std::borrow::Borrow;
use std::fmt::Debug;

use crate::{
    row::row_index,
    strategy::{Run, RunIndex},
    ColumnarError, KeyedRow, RowEncoder, RowId,
};

pub trait Rleable: Clone + PartialEq {}
impl<T> Rleable for T where T: Clone + PartialEq {}

/// Run-length encodes the key column of [`KeyedRow`]s, keeping ids and values
/// as plain columns.
///
/// Adjacent equal keys are merged eagerly, so no two neighbouring runs share a
/// key. A prefix sum of run lengths makes row → key lookups `O(log k)` for `k`
/// runs.
///
/// ```ignore
/// let mut column = RleColumn::new();
/// column.append_row(KeyedRow::new(1, 100, "10:00:00".to_string()));
/// column.append_row(KeyedRow::new(2, 200, "10:00:00".to_string()));
/// assert_eq!(column.count_of_key("10:00:00")?, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleColumn<K> {
    ids: Vec<RowId>,
    values: Vec<i64>,
    keys: RunIndex<K>,
}

impl<K> Default for RleColumn<K> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            values: Vec::new(),
            keys: RunIndex::default(),
        }
    }
}

impl<K: Rleable> RleColumn<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[Run<K>] {
        self.keys.runs()
    }

    /// Cumulative row count at the end of each run, parallel to [`Self::runs`].
    pub fn run_ends(&self) -> &[usize] {
        self.keys.run_ends()
    }

    /// Key of `row_id`, found by walking the runs in order. `O(k)`.
    ///
    /// Returns `None` outside `[1, len]`.
    pub fn key_from_row_id(&self, row_id: RowId) -> Option<&K> {
        row_index(row_id, self.ids.len())?;
        self.keys.key_at_linear(row_id)
    }

    /// Key of `row_id`, found by binary search over the run end offsets.
    /// `O(log k)`.
    ///
    /// Always agrees with [`Self::key_from_row_id`]. Returns `None` outside
    /// `[1, len]`.
    pub fn key_from_row_id_fast(&self, row_id: RowId) -> Option<&K> {
        self.keys.key_at(row_id)
    }

    /// Length of the first run whose key equals `key`, found by scanning the
    /// runs in order. `O(k)`.
    ///
    /// If `key` reappears after other keys, only its first run is counted.
    pub fn count_of_key<Q>(&self, key: &Q) -> Result<usize, ColumnarError>
    where
        K: Borrow<Q>,
        Q: PartialEq + Debug + ?Sized,
    {
        self.keys.count_of_linear(key)
    }

    /// Length of the run for `key`, found by binary search over the runs.
    /// `O(log k)`.
    ///
    /// # Precondition
    ///
    /// The runs must be ordered by key, which holds when the keys were
    /// appended in ascending order (a sorted timestamp column). Otherwise the
    /// result is unspecified: a present key may be reported as
    /// [`ColumnarError::KeyNotFound`]. Check [`Self::is_key_sorted`] when the
    /// input order is not guaranteed.
    pub fn count_of_key_fast<Q>(&self, key: &Q) -> Result<usize, ColumnarError>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + Debug + ?Sized,
    {
        self.keys.count_of_sorted(key)
    }

    /// Whether run keys are strictly ascending, i.e. whether
    /// [`Self::count_of_key_fast`] can be trusted.
    pub fn is_key_sorted(&self) -> bool
    where
        K: Ord,
    {
        self.keys.is_key_sorted()
    }
}

impl<K: Rleable> RowEncoder for RleColumn<K> {
    type Row = KeyedRow<K>;

    fn append_row(&mut self, row: KeyedRow<K>) {
        if row.id != self.ids.len() as RowId + 1 {
            tracing::warn!(
                id = row.id,
                expected = self.ids.len() + 1,
                "row id breaks the contiguous 1-based order"
            );
        }
        self.keys.append(row.key);
        self.ids.push(row.id);
        self.values.push(row.value);
    }

    fn reconstruct_row(&self, row_id: RowId) -> Result<KeyedRow<K>, ColumnarError> {
        let not_found = || {
            tracing::debug!(row_id, rows = self.ids.len(), "rle row lookup out of range");
            ColumnarError::RowNotFound(row_id)
        };
        let index = row_index(row_id, self.ids.len()).ok_or_else(not_found)?;
        let key = self.key_from_row_id_fast(row_id).ok_or_else(not_found)?;
        Ok(KeyedRow {
            id: self.ids[index],
            value: self.values[index],
            key: key.clone(),
        })
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_run_merge() {
        let mut column = RleColumn::new();
        for id in 1..=5 {
            column.append_row(KeyedRow::new(id, id * 10, 7u32));
        }
        assert_eq!(column.runs(), &[Run { key: 7, count: 5 }]);
        assert_eq!(column.run_ends(), &[5]);
    }

    #[test]
    fn test_reconstruct_integer_keys() {
        let mut column = RleColumn::new();
        let keys = [3u64, 3, 1, 1, 9];
        for (i, key) in keys.iter().enumerate() {
            let id = i as RowId + 1;
            column.append_row(KeyedRow::new(id, -id, *key));
        }
        assert_eq!(column.len(), 5);
        assert_eq!(
            column.reconstruct_row(3).unwrap(),
            KeyedRow::new(3, -3, 1u64)
        );
        assert!(matches!(
            column.reconstruct_row(6),
            Err(ColumnarError::RowNotFound(6))
        ));
        assert!(!column.is_key_sorted());
    }
}
