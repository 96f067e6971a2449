//! Value Object Module

pub mod otp_code;
pub mod phone_number;
pub mod user_id;
