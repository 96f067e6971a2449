//! OTP Code Value Object
//!
//! Five ASCII digits in `10000..=99999`. Never printed by `Debug` so codes
//! cannot leak through `?`-formatted log fields.

use std::ops::RangeInclusive;

use kernel::error::app_error::{AppError, AppResult};
use platform::crypto::{EntropyError, constant_time_eq, uniform_u32};

/// Number of digits in a code
pub const OTP_LENGTH: usize = 5;

const OTP_RANGE: RangeInclusive<u32> = 10_000..=99_999;

/// One-time passcode
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Draw a fresh code from the OS CSPRNG, uniform over all 90,000 values.
    pub fn generate() -> Result<Self, EntropyError> {
        let value = uniform_u32(OTP_RANGE)?;
        Ok(Self(format!("{:05}", value)))
    }

    /// Validate a code submitted by a client
    pub fn parse(code: impl Into<String>) -> AppResult<Self> {
        let code = code.into();

        if code.is_empty() {
            return Err(AppError::bad_request("otp is required"));
        }

        if code.len() != OTP_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::bad_request(format!(
                "otp must be exactly {} digits",
                OTP_LENGTH
            )));
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a stored code without leaking timing information
    pub fn matches(&self, stored: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), stored.as_bytes())
    }
}

impl std::fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OtpCode(*****)")
    }
}
