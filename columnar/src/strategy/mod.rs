mod delta;
pub(crate) use delta::DeltaStream;
mod rle;
pub(crate) use rle::RunIndex;
pub use rle::Run;
