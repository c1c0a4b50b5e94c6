pub mod delta;
pub mod rle;

use crate::{ColumnarError, RowId};

/// The append-only row interface shared by the column encoders.
///
/// Rows are identified by their 1-based position in append order.
pub trait RowEncoder {
    type Row;

    /// O(1) amortized. Appending never fails.
    fn append_row(&mut self, row: Self::Row);

    /// Fails with [`ColumnarError::RowNotFound`] when `row_id` is outside
    /// `[1, len]`.
    fn reconstruct_row(&self, row_id: RowId) -> Result<Self::Row, ColumnarError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every row in append order, stopping at the first failure.
    fn reconstruct_table(&self) -> Result<Vec<Self::Row>, ColumnarError> {
        (1..=self.len() as RowId)
            .map(|row_id| self.reconstruct_row(row_id))
            .collect()
    }
}
