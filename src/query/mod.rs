pub mod conversion;
pub mod range;
