//! Shared Kernel - Domain-crossing minimal core
//!
//! Holds the error vocabulary every crate in the workspace speaks:
//! - [`error::kind::ErrorKind`] - classification mapped onto HTTP status codes
//! - [`error::app_error::AppError`] - the unified error value and result alias
//!
//! Only things that are "hard to change" and mean the same thing in every
//! domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
