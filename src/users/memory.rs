//! In-process `UserRepository` used by the test suite.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{AppError, AppResult};
use crate::users::repo::UserRepository;
use crate::users::repo_types::{NewUser, Page, Store, User};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn window(users: impl Iterator<Item = User>, page: Page) -> Vec<User> {
        users
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, user: &NewUser) -> AppResult<i64> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict);
        }
        let id = users.last().map(|u| u.id + 1).unwrap_or(1);
        users.push(User {
            id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            birthday: user.birthday.clone(),
            city: user.city.clone(),
            about: user.about.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(id)
    }

    async fn get_user_by_id(&self, _store: Store, id: i64) -> AppResult<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn list_users(&self, page: Page) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(Self::window(users.iter().cloned(), page))
    }

    async fn search_users_by_name(&self, substr: &str, page: Page) -> AppResult<Vec<User>> {
        let needle = substr.to_lowercase();
        let users = self.users.read().await;
        let hits = users.iter().filter(|u| {
            u.name.to_lowercase().contains(&needle) || u.surname.to_lowercase().contains(&needle)
        });
        Ok(Self::window(hits.cloned(), page))
    }
}

pub fn new_user(name: &str, surname: &str, email: &str) -> NewUser {
    NewUser {
        name: name.into(),
        surname: surname.into(),
        birthday: "1990-01-01".into(),
        city: "Paris".into(),
        about: String::new(),
        email: email.into(),
        password_hash: "$argon2id$fake".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(n: usize) -> MemoryUserRepository {
        let repo = MemoryUserRepository::new();
        for i in 0..n {
            repo.create_user(&new_user(&format!("user{i}"), "Doe", &format!("u{i}@x.com")))
                .await
                .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let repo = MemoryUserRepository::new();
        repo.create_user(&new_user("A", "B", "a@x.com")).await.unwrap();
        let err = repo
            .create_user(&new_user("C", "D", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict));
    }

    #[tokio::test]
    async fn pages_are_ordered_and_disjoint() {
        let repo = seeded(10).await;
        let count = 4;
        let mut seen = Vec::new();
        for page in 0..4 {
            let rows = repo
                .list_users(Page { limit: count, offset: page * count })
                .await
                .unwrap();
            assert!(rows.len() as i64 <= count);
            assert!(rows.windows(2).all(|w| w[0].id < w[1].id));
            seen.extend(rows.into_iter().map(|u| u.id));
        }
        assert_eq!(seen, (1..=10i64).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn offset_past_end_is_empty() {
        let repo = seeded(3).await;
        let rows = repo.list_users(Page { limit: 15, offset: 30 }).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn search_matches_surname_case_insensitively() {
        let repo = MemoryUserRepository::new();
        repo.create_user(&new_user("Ann", "Smith", "a@x.com")).await.unwrap();
        repo.create_user(&new_user("Bob", "Jones", "b@x.com")).await.unwrap();
        let page = Page { limit: 15, offset: 0 };
        let hits = repo.search_users_by_name("SMI", page).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].email, "a@x.com");
        assert!(repo.search_users_by_name("zzz", page).await.unwrap().is_empty());
    }
}
