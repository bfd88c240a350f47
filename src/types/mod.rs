// src/types/mod.rs
pub mod request;
pub mod response;

pub use request::{FormInput, GenerationRequest};
pub use response::{decode_response, DecodeError, Decoded, GenerationResult};
