//! Application layer
//!
//! Use cases that orchestrate the decoding engine and output writers.

mod decode_carrier;
pub mod dto;

pub use decode_carrier::{DecodeCarrierUseCase, decode, decode_to_report};
