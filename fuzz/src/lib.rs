use arbitrary::Arbitrary;
use ts_columnar::{
    AuditedDeltaColumn, DeltaConfig, KeyedRow, MetricRow, RleColumn, RowEncoder, RowId,
};

/// Keys as increments so that the generated column is sorted, which is what
/// the binary-search lookups assume.
#[derive(Debug, Clone, Arbitrary)]
pub struct RleInput {
    pub key_steps: Vec<u8>,
    pub probes: Vec<i16>,
}

impl RleInput {
    pub fn build(&self) -> RleColumn<u32> {
        let mut column = RleColumn::new();
        let mut key = 0u32;
        for (i, step) in self.key_steps.iter().enumerate() {
            key += (*step % 4) as u32;
            column.append_row(KeyedRow::new(i as RowId + 1, *step as i64, key));
        }
        column
    }
}

#[derive(Debug, Clone, Arbitrary)]
pub struct DeltaInput {
    pub interval: u8,
    pub samples: Vec<(i64, i64)>,
}

impl DeltaInput {
    pub fn build(&self) -> AuditedDeltaColumn {
        let interval = (self.interval as usize).max(1);
        let config = DeltaConfig::with_checkpoint_interval(interval).unwrap();
        let mut column = AuditedDeltaColumn::with_config(config);
        for (i, &(value, timestamp)) in self.samples.iter().enumerate() {
            column.append_row(MetricRow::new(i as RowId + 1, value, timestamp));
        }
        column
    }
}
