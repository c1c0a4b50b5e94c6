/// 1-based position of a row in append order.
///
/// Signed so that out-of-range ids such as `0` or `-1` can be expressed and
/// rejected with [`crate::ColumnarError::RowNotFound`].
pub type RowId = i64;

/// A row whose third column is a low-cardinality key, stored by
/// [`crate::RleColumn`]. The key is usually a sorted timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyedRow<K> {
    pub id: RowId,
    pub value: i64,
    pub key: K,
}

impl<K> KeyedRow<K> {
    pub fn new(id: RowId, value: i64, key: K) -> Self {
        Self { id, value, key }
    }
}

/// A metric sample stored by [`crate::DeltaColumn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MetricRow {
    pub id: RowId,
    pub value: i64,
    pub timestamp: i64,
}

impl MetricRow {
    pub fn new(id: RowId, value: i64, timestamp: i64) -> Self {
        Self {
            id,
            value,
            timestamp,
        }
    }
}

/// Maps a row id onto its position in the columns, if it lies in `[1, len]`.
#[inline]
pub(crate) fn row_index(row_id: RowId, len: usize) -> Option<usize> {
    if row_id <= 0 {
        return None;
    }
    let index = usize::try_from(row_id - 1).ok()?;
    (index < len).then_some(index)
}

#[cfg(test)]
mod test {
    use super::row_index;

    #[test]
    fn row_index_bounds() {
        assert_eq!(row_index(1, 3), Some(0));
        assert_eq!(row_index(3, 3), Some(2));
        assert_eq!(row_index(4, 3), None);
        assert_eq!(row_index(0, 3), None);
        assert_eq!(row_index(-1, 3), None);
        assert_eq!(row_index(1, 0), None);
        assert_eq!(row_index(i64::MIN, 3), None);
    }
}
