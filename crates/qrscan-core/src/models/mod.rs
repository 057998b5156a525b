//! Data models for qrscan.

pub mod config;
pub mod result;
