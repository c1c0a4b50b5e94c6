/// One delta-encoded `i64` column with periodic absolute checkpoints.
///
/// `deltas[0]` is always `0`; `deltas[i]` is `value[i] - value[i - 1]`
/// (wrapping). `checkpoints[0]` is the first value, and every later checkpoint
/// is the absolute value of the row that completed a group, which is the base
/// the next group's deltas are summed onto.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DeltaStream {
    deltas: Vec<i64>,
    checkpoints: Vec<i64>,
    last: i64,
}

impl DeltaStream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, value: i64) {
        if self.deltas.is_empty() {
            self.deltas.push(0);
            self.checkpoints.push(value);
        } else {
            self.deltas.push(value.wrapping_sub(self.last));
        }
        self.last = value;
    }

    /// Records the most recently appended value as an absolute checkpoint.
    pub(crate) fn checkpoint(&mut self) {
        self.checkpoints.push(self.last);
    }

    /// Sums at most `interval` deltas onto the checkpoint of `index`'s group.
    pub(crate) fn decode(&self, index: usize, interval: usize) -> Option<i64> {
        let group = index / interval;
        let base = *self.checkpoints.get(group)?;
        let deltas = self.deltas.get(group * interval..=index)?;
        Some(
            deltas
                .iter()
                .fold(base, |value, &delta| value.wrapping_add(delta)),
        )
    }

    pub(crate) fn deltas(&self) -> &[i64] {
        &self.deltas
    }

    pub(crate) fn checkpoints(&self) -> &[i64] {
        &self.checkpoints
    }

    #[cfg(test)]
    pub(crate) fn deltas_mut(&mut self) -> &mut [i64] {
        &mut self.deltas
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn stream_of(values: &[i64], interval: usize) -> DeltaStream {
        let mut stream = DeltaStream::new();
        for (i, &v) in values.iter().enumerate() {
            stream.append(v);
            if (i + 1) % interval == 0 {
                stream.checkpoint();
            }
        }
        stream
    }

    #[test]
    fn test_delta_stream() {
        let values = [10, 20, 30, 30, 20, 50, 10, 15, 10, 10];
        let stream = stream_of(&values, 4);
        assert_eq!(stream.deltas(), &[0, 10, 10, 0, -10, 30, -40, 5, -5, 0]);
        assert_eq!(stream.checkpoints(), &[10, 30, 15]);
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(stream.decode(i, 4), Some(v));
        }
        assert_eq!(stream.decode(values.len(), 4), None);
    }

    #[test]
    fn test_interval_one() {
        let values = [5, -3, 7];
        let stream = stream_of(&values, 1);
        assert_eq!(stream.checkpoints(), &[5, 5, -3, 7]);
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(stream.decode(i, 1), Some(v));
        }
    }

    #[test]
    fn test_wrapping_extremes() {
        let values = [i64::MIN, i64::MAX, 0, i64::MIN, -1];
        let stream = stream_of(&values, 3);
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(stream.decode(i, 3), Some(v));
        }
    }
}
