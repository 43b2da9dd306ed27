//! Core settings shared by every component
//!
//! - `config`: injected repository configuration
//! - `hash_algorithm`: pluggable content digest

pub mod config;
pub mod hash_algorithm;
