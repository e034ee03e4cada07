//! Configuration for encoding and decoding open metadata beans.
//!
//! This crate loads and saves `.ocf/config.yaml`, finds `.ocf/` directories
//! in the filesystem, and turns the configuration into codec options.

pub mod config;
pub mod ocf_dir;
