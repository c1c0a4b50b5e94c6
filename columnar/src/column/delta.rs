use crate::{
    analyze::CompressionStats, row::row_index, strategy::DeltaStream, ColumnarError, DeltaConfig,
    MetricRow, RowEncoder, RowId,
};

/// Delta encodes the value and timestamp columns of [`MetricRow`]s.
///
/// Each column stores the difference from the previous row. Every
/// `checkpoint_interval` rows an absolute snapshot of both columns is stored,
/// so reconstructing any row sums at most `checkpoint_interval` deltas no
/// matter how large the table grows.
///
/// With `n` rows appended there are `1 + n / checkpoint_interval` checkpoints
/// (for `n > 0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaColumn {
    config: DeltaConfig,
    ids: Vec<RowId>,
    values: DeltaStream,
    timestamps: DeltaStream,
}

impl Default for DeltaColumn {
    fn default() -> Self {
        Self::with_config(DeltaConfig::default())
    }
}

impl DeltaColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DeltaConfig) -> Self {
        Self {
            config,
            ids: Vec::new(),
            values: DeltaStream::new(),
            timestamps: DeltaStream::new(),
        }
    }

    pub fn config(&self) -> &DeltaConfig {
        &self.config
    }

    pub fn checkpoint_interval(&self) -> usize {
        self.config.checkpoint_interval.get()
    }

    pub fn ids(&self) -> &[RowId] {
        &self.ids
    }

    pub fn delta_values(&self) -> &[i64] {
        self.values.deltas()
    }

    pub fn delta_timestamps(&self) -> &[i64] {
        self.timestamps.deltas()
    }

    pub fn checkpoint_values(&self) -> &[i64] {
        self.values.checkpoints()
    }

    pub fn checkpoint_timestamps(&self) -> &[i64] {
        self.timestamps.checkpoints()
    }

    #[cfg(test)]
    pub(crate) fn delta_values_mut(&mut self) -> &mut [i64] {
        self.values.deltas_mut()
    }

    /// Varint size of the id and delta columns against the same encoding of
    /// the absolute rows.
    ///
    /// The baseline is measured on the reconstructed table, so no original
    /// rows need to be retained. Use
    /// [`crate::AuditedDeltaColumn::estimate_compression_stats`] to measure
    /// against the rows exactly as they were appended.
    pub fn estimate_compression_stats(&self) -> Result<CompressionStats, ColumnarError> {
        let table = self.reconstruct_table()?;
        self.compression_stats_against(&table)
    }

    pub(crate) fn compression_stats_against(
        &self,
        original_rows: &[MetricRow],
    ) -> Result<CompressionStats, ColumnarError> {
        CompressionStats::measure(
            &self.ids,
            self.delta_values(),
            self.delta_timestamps(),
            original_rows,
        )
    }
}

impl RowEncoder for DeltaColumn {
    type Row = MetricRow;

    fn append_row(&mut self, row: MetricRow) {
        if row.id != self.ids.len() as RowId + 1 {
            tracing::warn!(
                id = row.id,
                expected = self.ids.len() + 1,
                "row id breaks the contiguous 1-based order"
            );
        }
        self.values.append(row.value);
        self.timestamps.append(row.timestamp);
        self.ids.push(row.id);

        if self.ids.len() % self.checkpoint_interval() == 0 {
            self.values.checkpoint();
            self.timestamps.checkpoint();
            tracing::trace!(
                rows = self.ids.len(),
                value = row.value,
                timestamp = row.timestamp,
                "recorded delta checkpoint"
            );
        }
    }

    fn reconstruct_row(&self, row_id: RowId) -> Result<MetricRow, ColumnarError> {
        let not_found = || {
            tracing::debug!(row_id, rows = self.ids.len(), "delta row lookup out of range");
            ColumnarError::RowNotFound(row_id)
        };
        let index = row_index(row_id, self.ids.len()).ok_or_else(not_found)?;
        let interval = self.checkpoint_interval();
        let value = self.values.decode(index, interval).ok_or_else(not_found)?;
        let timestamp = self
            .timestamps
            .decode(index, interval)
            .ok_or_else(not_found)?;
        Ok(MetricRow {
            id: self.ids[index],
            value,
            timestamp,
        })
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    /// Reconstructs the row for every stored id, in order.
    fn reconstruct_table(&self) -> Result<Vec<MetricRow>, ColumnarError> {
        self.ids
            .iter()
            .map(|&row_id| self.reconstruct_row(row_id))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_checkpoint_count() {
        let config = DeltaConfig::with_checkpoint_interval(3).unwrap();
        let mut column = DeltaColumn::with_config(config);
        assert!(column.checkpoint_values().is_empty());
        for n in 1..=10i64 {
            column.append_row(MetricRow::new(n, n * n, 100 + n));
            assert_eq!(column.checkpoint_values().len(), 1 + n as usize / 3);
            assert_eq!(column.checkpoint_timestamps().len(), 1 + n as usize / 3);
        }
    }

    #[test]
    fn test_reconstruct_uses_stored_id() {
        let mut column = DeltaColumn::new();
        column.append_row(MetricRow::new(1, 7, 70));
        column.append_row(MetricRow::new(2, 8, 71));
        assert_eq!(column.reconstruct_row(2).unwrap(), MetricRow::new(2, 8, 71));
        assert_eq!(column.ids(), &[1, 2]);
    }
}
