//! Self-validation for [`DeltaColumn`].
//!
//! [`AuditedDeltaColumn`] keeps a full copy of every appended row next to the
//! encoded column, which doubles memory use. It exists to check the
//! encode/decode round trip and to measure compression against the exact
//! input; production code should use [`DeltaColumn`] directly.

use crate::{
    analyze::CompressionStats, ColumnarError, DeltaColumn, DeltaConfig, MetricRow, RowEncoder,
    RowId,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditedDeltaColumn {
    column: DeltaColumn,
    original_rows: Vec<MetricRow>,
}

impl AuditedDeltaColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DeltaConfig) -> Self {
        Self {
            column: DeltaColumn::with_config(config),
            original_rows: Vec::new(),
        }
    }

    pub fn column(&self) -> &DeltaColumn {
        &self.column
    }

    pub fn original_rows(&self) -> &[MetricRow] {
        &self.original_rows
    }

    pub fn into_inner(self) -> DeltaColumn {
        self.column
    }

    /// Reconstructs the whole table and compares it row by row with the
    /// retained input. Any mismatch or reconstruction failure yields `false`;
    /// an empty column is trivially correct.
    pub fn verify_correctness(&self) -> bool {
        let table = match self.column.reconstruct_table() {
            Ok(table) => table,
            Err(err) => {
                tracing::debug!(%err, "delta column failed to reconstruct");
                return false;
            }
        };
        if table.len() != self.original_rows.len() {
            tracing::debug!(
                reconstructed = table.len(),
                original = self.original_rows.len(),
                "delta column row count mismatch"
            );
            return false;
        }
        match table
            .iter()
            .zip(self.original_rows.iter())
            .position(|(decoded, original)| decoded != original)
        {
            Some(index) => {
                tracing::debug!(
                    row_id = index + 1,
                    decoded = ?table[index],
                    original = ?self.original_rows[index],
                    "delta column round trip mismatch"
                );
                false
            }
            None => true,
        }
    }

    /// Same as [`DeltaColumn::estimate_compression_stats`], with the baseline
    /// measured on the retained input rows.
    pub fn estimate_compression_stats(&self) -> Result<CompressionStats, ColumnarError> {
        self.column.compression_stats_against(&self.original_rows)
    }
}

impl RowEncoder for AuditedDeltaColumn {
    type Row = MetricRow;

    fn append_row(&mut self, row: MetricRow) {
        self.column.append_row(row);
        self.original_rows.push(row);
    }

    fn reconstruct_row(&self, row_id: RowId) -> Result<MetricRow, ColumnarError> {
        self.column.reconstruct_row(row_id)
    }

    fn len(&self) -> usize {
        self.column.len()
    }

    fn reconstruct_table(&self) -> Result<Vec<MetricRow>, ColumnarError> {
        self.column.reconstruct_table()
    }
}
