//! Append-only column encoders for time-series rows.
//!
//! ## Encoders
//!
//! - [`RleColumn`]: run-length encodes a sorted, low-cardinality key column
//!   (typically a timestamp string) into `(key, count)` runs with a prefix-sum
//!   index over run lengths.
//!   - `key_from_row_id` walks the runs, `O(k)` for `k` runs
//!   - `key_from_row_id_fast` binary searches the run end offsets, `O(log k)`
//!   - `count_of_key` scans the runs, `count_of_key_fast` binary searches them
//!     and requires the runs to be sorted by key
//! - [`DeltaColumn`]: stores a slowly varying value column and its timestamp
//!   column as deltas from the previous row, with an absolute checkpoint every
//!   [`DeltaConfig::checkpoint_interval`] rows so a row is rebuilt from at most
//!   that many deltas.
//!
//! Both implement [`RowEncoder`]; row ids are 1-based positions in append order.
//!
//! ## Diagnostics
//!
//! - [`AuditedDeltaColumn`] retains every input row to verify the round trip.
//! - [`CompressionStats`] projects varint sizes of the encoded columns against
//!   the absolute ones. Nothing is written, only sizes are computed.
//!
//! Encoders do no locking; callers sharing one across threads must serialize
//! appends against reads.

mod err;
pub use err::ColumnarError;
mod analyze;
pub use analyze::{ColumnSize, CompressionStats};
mod audit;
pub use audit::AuditedDeltaColumn;
mod column;
pub use column::{
    delta::DeltaColumn,
    rle::{RleColumn, Rleable},
    RowEncoder,
};
mod columnar_internal;
mod config;
pub use config::DeltaConfig;
mod row;
pub use row::{KeyedRow, MetricRow, RowId};
mod strategy;
pub use strategy::Run;
