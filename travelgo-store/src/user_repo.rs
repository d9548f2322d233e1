use async_trait::async_trait;
use sqlx::PgPool;
use travelgo_core::repository::{RepoResult, UserRepository};
use travelgo_core::User;
use travelgo_shared::Masked;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    email: String,
    name: String,
    password: String,
    logins: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            email: row.email,
            name: row.name,
            password: Masked(row.password),
            logins: row.logins,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_user(&self, email: &str) -> RepoResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT email, name, password, logins FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(User::from))
    }

    async fn insert_user_if_absent(&self, user: &User) -> RepoResult<bool> {
        let result = sqlx::query(
            "INSERT INTO users (email, name, password, logins) VALUES ($1, $2, $3, $4) ON CONFLICT (email) DO NOTHING",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.password.expose())
        .bind(user.logins)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn increment_logins(&self, email: &str) -> RepoResult<i64> {
        let logins: Option<i64> =
            sqlx::query_scalar("UPDATE users SET logins = logins + 1 WHERE email = $1 RETURNING logins")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        logins.ok_or_else(|| format!("No user record for {}", email).into())
    }
}
