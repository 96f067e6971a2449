//! Redis OTP Repository

use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};

use crate::domain::repository::OtpRepository;
use crate::error::AuthResult;

/// INCR, setting the expiry only when the key was just created
const INCR_WITH_WINDOW: &str = r"
local current = redis.call('INCR', KEYS[1])
if current == 1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
return current
";

/// Redis-backed OTP store
#[derive(Clone)]
pub struct RedisOtpRepository {
    conn: ConnectionManager,
    incr_script: Script,
}

impl RedisOtpRepository {
    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            conn,
            incr_script: Script::new(INCR_WITH_WINDOW),
        }
    }

    /// Open a managed connection to `url`
    pub async fn connect(url: &str) -> AuthResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self::new(conn))
    }

    /// Round-trip a PING
    pub async fn ping(&self) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        Ok(())
    }
}

/// Redis expiries are whole seconds; never round down to "no expiry"
fn whole_secs(d: Duration) -> u64 {
    d.as_secs().max(1)
}

impl OtpRepository for RedisOtpRepository {
    async fn put_code(&self, key: &str, code: &str, ttl: Duration) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, code, whole_secs(ttl)).await?;
        Ok(())
    }

    async fn get_code(&self, key: &str) -> AuthResult<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }

    async fn delete_code(&self, key: &str) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn increment_window(&self, key: &str, window: Duration) -> AuthResult<u64> {
        let mut conn = self.conn.clone();
        let count: u64 = self
            .incr_script
            .key(key)
            .arg(whole_secs(window))
            .invoke_async(&mut conn)
            .await?;
        Ok(count)
    }
}
