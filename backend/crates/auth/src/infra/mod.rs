//! Infrastructure Layer
//!
//! Redis and PostgreSQL implementations of the repository traits, plus
//! in-memory versions of both.

pub mod memory;
pub mod postgres;
pub mod redis;

pub use memory::{InMemoryOtpRepository, InMemoryUserRepository};
pub use postgres::PgUserRepository;
pub use self::redis::RedisOtpRepository;
