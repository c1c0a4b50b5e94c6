use std::fmt::Display;

use itertools::MultiUnzip;

use crate::{columnar_internal::varint_size, ColumnarError, MetricRow, RowId};

/// Varint size of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSize {
    pub column_name: &'static str,
    pub binary_size: usize,
}

/// Projected size of a delta-encoded table against varint-encoding the same
/// rows as absolute values. Nothing is serialized, only sizes are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionStats {
    pub compressed_bytes: usize,
    pub original_bytes: usize,
    /// Negative when the deltas cost more than the absolute values.
    pub saved_bytes: i64,
    pub saved_percent: f64,
    pub columns: Vec<ColumnSize>,
}

impl CompressionStats {
    pub(crate) fn measure<'a, R>(
        ids: &[RowId],
        delta_values: &[i64],
        delta_timestamps: &[i64],
        original_rows: R,
    ) -> Result<Self, ColumnarError>
    where
        R: IntoIterator<Item = &'a MetricRow>,
    {
        let (original_ids, values, timestamps): (Vec<i64>, Vec<i64>, Vec<i64>) = original_rows
            .into_iter()
            .map(|row| (row.id, row.value, row.timestamp))
            .multiunzip();

        let columns = vec![
            ColumnSize {
                column_name: "id",
                binary_size: varint_size(ids)?,
            },
            ColumnSize {
                column_name: "delta_value",
                binary_size: varint_size(delta_values)?,
            },
            ColumnSize {
                column_name: "delta_timestamp",
                binary_size: varint_size(delta_timestamps)?,
            },
            ColumnSize {
                column_name: "original_id",
                binary_size: varint_size(&original_ids)?,
            },
            ColumnSize {
                column_name: "original_value",
                binary_size: varint_size(&values)?,
            },
            ColumnSize {
                column_name: "original_timestamp",
                binary_size: varint_size(&timestamps)?,
            },
        ];
        let compressed_bytes: usize = columns[..3].iter().map(|c| c.binary_size).sum();
        let original_bytes: usize = columns[3..].iter().map(|c| c.binary_size).sum();
        let saved_bytes = original_bytes as i64 - compressed_bytes as i64;
        let saved_percent = if original_bytes == 0 {
            0.0
        } else {
            saved_bytes as f64 * 100.0 / original_bytes as f64
        };
        Ok(Self {
            compressed_bytes,
            original_bytes,
            saved_bytes,
            saved_percent,
            columns,
        })
    }
}

impl Display for CompressionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Varint encoded sizes:")?;
        for column in &self.columns {
            writeln!(f, "{}: {} bytes", column.column_name, column.binary_size)?;
        }
        writeln!(f, "Total compressed size (varint): {} bytes", self.compressed_bytes)?;
        writeln!(f, "Original size (varint): {} bytes", self.original_bytes)?;
        write!(
            f,
            "Saved: {} bytes ({:.2}%)",
            self.saved_bytes, self.saved_percent
        )
    }
}
