use std::ops::{Deref, DerefMut};

use postcard::{ser_flavors::Flavor, Serializer};
use serde::Serialize;

use crate::ColumnarError;

/// A postcard flavor that only counts the bytes it is handed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SizeCounter {
    len: usize,
}

impl Flavor for SizeCounter {
    type Output = usize;

    #[inline(always)]
    fn try_extend(&mut self, data: &[u8]) -> postcard::Result<()> {
        self.len += data.len();
        Ok(())
    }

    #[inline(always)]
    fn try_push(&mut self, _data: u8) -> postcard::Result<()> {
        self.len += 1;
        Ok(())
    }

    fn finalize(self) -> postcard::Result<Self::Output> {
        Ok(self.len)
    }
}

/// Measures how many bytes postcard's varint encoding would use, without
/// writing them anywhere.
pub(crate) struct VarintSizer {
    ser: Serializer<SizeCounter>,
}

impl VarintSizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measure<T: Serialize>(&mut self, value: &T) -> Result<(), ColumnarError> {
        value.serialize(self.deref_mut())?;
        Ok(())
    }

    pub fn measure_all<'a, T, I>(mut self, values: I) -> Result<usize, ColumnarError>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for value in values {
            self.measure(value)?;
        }
        Ok(self.size())
    }

    pub fn size(&self) -> usize {
        self.ser.output.len
    }
}

impl Default for VarintSizer {
    fn default() -> Self {
        Self {
            ser: Serializer {
                output: SizeCounter::default(),
            },
        }
    }
}

impl Deref for VarintSizer {
    type Target = Serializer<SizeCounter>;

    fn deref(&self) -> &Self::Target {
        &self.ser
    }
}

impl DerefMut for VarintSizer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ser
    }
}

/// Bytes a zigzag varint would take for every value in `values`.
pub(crate) fn varint_size<'a, I>(values: I) -> Result<usize, ColumnarError>
where
    I: IntoIterator<Item = &'a i64>,
{
    VarintSizer::new().measure_all(values)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zigzag_varint_sizes() {
        assert_eq!(varint_size(&[0]).unwrap(), 1);
        assert_eq!(varint_size(&[-1]).unwrap(), 1);
        assert_eq!(varint_size(&[63]).unwrap(), 1);
        assert_eq!(varint_size(&[64]).unwrap(), 2);
        assert_eq!(varint_size(&[-64]).unwrap(), 1);
        assert_eq!(varint_size(&[-65]).unwrap(), 2);
        assert_eq!(varint_size(&[i64::MAX]).unwrap(), 10);
        assert_eq!(varint_size(&[i64::MIN]).unwrap(), 10);
        assert_eq!(varint_size(&[1000, 1002, 10]).unwrap(), 2 + 2 + 1);
        assert_eq!(varint_size(&[]).unwrap(), 0);
    }
}
