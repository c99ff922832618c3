pub mod batch;
pub mod config;
pub mod metadata;
pub mod select;
