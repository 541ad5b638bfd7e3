//! Login and signup workflows behind the account pages.

use std::sync::Arc;

use crate::domain::User;
use crate::error::{AccountError, RepoError};
use crate::ports::{PasswordService, UserRepository};

/// Checks credentials and creates accounts.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Return the user whose username and password match.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AccountError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?
            .ok_or(AccountError::Authentication)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        if !valid {
            tracing::info!(%username, "Rejected login");
            return Err(AccountError::Authentication);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Create an account. The repeated password is compared before anything
    /// touches the store.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        repeat_password: &str,
    ) -> Result<User, AccountError> {
        if password != repeat_password {
            return Err(AccountError::PasswordMismatch);
        }

        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::AccountCreation {
                reason: "username and password are required".to_string(),
            });
        }

        let password_hash =
            self.passwords
                .hash(password)
                .map_err(|e| AccountError::AccountCreation {
                    reason: e.to_string(),
                })?;

        let user = User::new(username.to_string(), email.trim().to_string(), password_hash);
        let created = self.users.create(user).await.map_err(|e| {
            let reason = match e {
                RepoError::Constraint(_) => format!("username {username} is taken"),
                other => other.to_string(),
            };
            tracing::warn!(%reason, "Account creation failed");
            AccountError::AccountCreation { reason }
        })?;

        tracing::info!(user_id = %created.id, "Account created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::ports::{AuthError, BaseRepository};

    /// Stores the password itself as its "hash".
    struct PlainPasswords;

    impl PasswordService for PlainPasswords {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("plain:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(hash == format!("plain:{password}"))
        }
    }

    #[derive(Default)]
    struct Users(Mutex<Vec<User>>);

    #[async_trait]
    impl BaseRepository<User, Uuid> for Users {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.0.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }
    }

    #[async_trait]
    impl UserRepository for Users {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn create(&self, user: User) -> Result<User, RepoError> {
            let mut users = self.0.lock().unwrap();
            if users.iter().any(|u| u.username == user.username) {
                return Err(RepoError::Constraint("users_username_key".to_string()));
            }
            users.push(user.clone());
            Ok(user)
        }
    }

    fn service() -> (Arc<Users>, AccountService) {
        let users = Arc::new(Users::default());
        let service = AccountService::new(users.clone(), Arc::new(PlainPasswords));
        (users, service)
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let (_, service) = service();

        let created = service
            .signup("alice", "alice@example.com", "hunter22", "hunter22")
            .await
            .unwrap();
        let logged_in = service.login("alice", "hunter22").await.unwrap();

        assert_eq!(created.id, logged_in.id);
        assert_eq!(logged_in.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_signup_password_mismatch_creates_nothing() {
        let (users, service) = service();

        let err = service
            .signup("bob", "bob@example.com", "one", "two")
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::PasswordMismatch));
        assert_eq!(err.to_string(), "Passwords do not match");
        assert!(users.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let (_, service) = service();
        service.signup("carol", "c@example.com", "pw", "pw").await.unwrap();

        let err = service
            .signup("carol", "other@example.com", "pw2", "pw2")
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::AccountCreation { .. }));
        assert_eq!(err.to_string(), "Error creating account");
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_user() {
        let (_, service) = service();
        service.signup("dave", "d@example.com", "right", "right").await.unwrap();

        let wrong = service.login("dave", "wrong").await.unwrap_err();
        let unknown = service.login("erin", "right").await.unwrap_err();

        assert!(matches!(wrong, AccountError::Authentication));
        assert!(matches!(unknown, AccountError::Authentication));
        assert_eq!(wrong.to_string(), "Invalid username or password");
    }
}
