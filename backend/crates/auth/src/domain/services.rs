//! Domain Services
//!
//! Pure helpers shared by the OTP store implementations.

use crate::domain::value_object::phone_number::PhoneNumber;

/// Namespace of stored OTP codes
pub const OTP_CODE_KEY_PREFIX: &str = "otp:code:";
/// Namespace of delivery counters
pub const OTP_RATE_KEY_PREFIX: &str = "otp:10m:";

/// Key holding the live code for `phone`
pub fn otp_code_key(phone: &PhoneNumber) -> String {
    format!("{}{}", OTP_CODE_KEY_PREFIX, phone.as_str())
}

/// Key holding the delivery counter for `phone`
pub fn otp_rate_key(phone: &PhoneNumber) -> String {
    format!("{}{}", OTP_RATE_KEY_PREFIX, phone.as_str())
}
