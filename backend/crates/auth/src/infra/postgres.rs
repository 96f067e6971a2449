//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entity::user::{User, UserFilter};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{phone_number::PhoneNumber, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> AuthResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, phone, created_at
            FROM users
            WHERE phone = $1
            "#,
        )
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<User> {
        // Ids past the SERIAL range cannot exist
        let Ok(db_id) = i32::try_from(id.get()) else {
            return Err(AuthError::UserNotFound);
        };

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, phone, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(db_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn create(&self, phone: &PhoneNumber) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (phone)
            VALUES ($1)
            RETURNING id, phone, created_at
            "#,
        )
        .bind(phone.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.into_user()
    }

    async fn list(&self, filter: &UserFilter) -> AuthResult<Vec<User>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id, phone, created_at FROM users WHERE TRUE");

        if let Some(term) = filter.phone_contains.as_deref().filter(|t| !t.is_empty()) {
            qb.push(" AND phone ILIKE ")
                .push_bind(format!("%{}%", escape_like(term)));
        }
        if let Some(from) = filter.created_from {
            qb.push(" AND created_at >= ").push_bind(from);
        }
        if let Some(to) = filter.created_to {
            qb.push(" AND created_at <= ").push_bind(to);
        }

        qb.push(" ORDER BY id ASC OFFSET ")
            .push_bind(i64::from(filter.skip))
            .push(" LIMIT ")
            .push_bind(i64::from(filter.limit));

        let rows = qb
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}

/// Make `%`, `_` and `\` match literally inside an ILIKE pattern
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    phone: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let id = u32::try_from(self.id)
            .map_err(|_| AuthError::Internal(format!("Invalid user id: {}", self.id)))?;

        Ok(User {
            id: UserId::new(id),
            phone: PhoneNumber::from_db(self.phone),
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("+1555"), "+1555");
        assert_eq!(escape_like("5%_\\"), "5\\%\\_\\\\");
    }

    #[test]
    fn test_negative_row_id_rejected() {
        let row = UserRow {
            id: -1,
            phone: "+15551234567".into(),
            created_at: Utc::now(),
        };
        assert!(matches!(row.into_user(), Err(AuthError::Internal(_))));
    }
}
