pub mod errors;

pub use errors::WavError;
