//! Email server adapter implementations

/// Shared utilities used by adapter implementations.
pub(crate) mod common;

#[cfg(feature = "sample")]
mod sample;

#[cfg(feature = "sample")]
pub use sample::SampleEmailServer;

#[cfg(feature = "sample")]
pub(crate) use sample::descriptor as sample_descriptor;
