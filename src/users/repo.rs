use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppResult;
use crate::users::repo_types::{NewUser, Page, Store, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts on the primary; a taken email comes back as `AppError::Conflict`.
    async fn create_user(&self, user: &NewUser) -> AppResult<i64>;
    async fn get_user_by_id(&self, store: Store, id: i64) -> AppResult<User>;
    /// Always reads the primary.
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;
    /// Replica read ordered by id.
    async fn list_users(&self, page: Page) -> AppResult<Vec<User>>;
    /// Replica read, case-insensitive match on name or surname.
    async fn search_users_by_name(&self, substr: &str, page: Page) -> AppResult<Vec<User>>;
}

const USER_COLUMNS: &str = "id, name, surname, birthday, city, about, email, password_hash";

#[derive(Clone)]
pub struct PgUserRepository {
    primary: PgPool,
    replica: PgPool,
}

impl PgUserRepository {
    pub fn new(primary: PgPool, replica: PgPool) -> Self {
        Self { primary, replica }
    }

    fn pool(&self, store: Store) -> &PgPool {
        match store {
            Store::Primary => &self.primary,
            Store::Replica => &self.replica,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: &NewUser) -> AppResult<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, surname, birthday, city, about, email, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.birthday)
        .bind(&user.city)
        .bind(&user.about)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.primary)
        .await?;
        Ok(id)
    }

    async fn get_user_by_id(&self, store: Store, id: i64) -> AppResult<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_one(self.pool(store))
            .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_one(&self.primary)
            .await?;
        Ok(user)
    }

    async fn list_users(&self, page: Page) -> AppResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, User>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool(Store::Replica))
            .await?;
        Ok(rows)
    }

    async fn search_users_by_name(&self, substr: &str, page: Page) -> AppResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE name ILIKE $1 OR surname ILIKE $1 \
             ORDER BY id ASC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, User>(&sql)
            .bind(like_pattern(substr))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool(Store::Replica))
            .await?;
        Ok(rows)
    }
}

/// `%substr%` with LIKE metacharacters escaped so the substring matches literally.
pub(crate) fn like_pattern(substr: &str) -> String {
    let mut out = String::with_capacity(substr.len() + 2);
    out.push('%');
    for c in substr.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
