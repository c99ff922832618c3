//! Output encoding: PNG bytes and sinks for finished batches.

/// Zip archive sink.
pub mod archive;
/// PNG encoding of composites.
pub mod png;
/// Generic item sink trait and built-in sinks.
pub mod sink;
