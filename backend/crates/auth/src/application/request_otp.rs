//! Request OTP Use Case
//!
//! Issues a code for a phone number and hands it to delivery.

use crate::application::otp_store::OtpStore;
use crate::domain::repository::OtpRepository;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::AuthResult;

/// Request OTP input
pub struct RequestOtpInput {
    pub phone: String,
}

/// Request OTP use case
pub struct RequestOtpUseCase<O>
where
    O: OtpRepository + Send + Sync + 'static,
{
    otp: OtpStore<O>,
}

impl<O> RequestOtpUseCase<O>
where
    O: OtpRepository + Send + Sync + 'static,
{
    pub fn new(otp: OtpStore<O>) -> Self {
        Self { otp }
    }

    /// Generate, save, deliver.
    ///
    /// The code is saved before the delivery limit is checked, so a throttled
    /// request still replaces the previous code.
    pub async fn execute(&self, input: RequestOtpInput) -> AuthResult<()> {
        let phone = PhoneNumber::new(input.phone)?;

        let code = self.otp.generate()?;
        self.otp.save(&phone, &code).await?;
        self.otp.deliver(&phone, &code).await?;

        tracing::info!(phone = %phone, "OTP requested");
        Ok(())
    }
}
