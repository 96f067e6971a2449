//! Entity Module

pub mod token_payload;
pub mod user;
