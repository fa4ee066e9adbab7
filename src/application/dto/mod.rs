//! Data Transfer Objects

mod decode_options;
mod decode_report;

pub use decode_options::DecodeOptions;
pub use decode_report::DecodeReport;
