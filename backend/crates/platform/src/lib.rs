//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (OS-backed uniform sampling, constant-time compare)
//! - Fixed-window rate limiting policy
//! - `Authorization` header parsing

pub mod crypto;
pub mod header;
pub mod rate_limit;
