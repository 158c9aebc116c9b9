use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub birthday: String, // free-form date string
    pub city: String,
    pub about: String,
    pub email: String,
    pub password_hash: String, // Argon2 hash, never handed to templates
}

/// Fields collected at signup.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub birthday: String,
    pub city: String,
    pub about: String,
    pub email: String,
    pub password_hash: String,
}

/// What templates are allowed to see of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub birthday: String,
    pub city: String,
    pub about: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            surname: u.surname,
            birthday: u.birthday,
            city: u.city,
            about: u.about,
            email: u.email,
        }
    }
}

/// Which pool a read should go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    Primary,
    Replica,
}

/// Validated `LIMIT` / `OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}
