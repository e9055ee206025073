//! In-memory [`UserService`] adapter.
//!
//! Keeps records in a lock-guarded map with sequential ids starting at 1.
//! Emails are unique, compared case-insensitively. Passwords are stored and
//! compared as given; this adapter has no hashing.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserService, UserServiceError};
use crate::domain::{Password, Role, User, UserId};

#[derive(Default)]
struct Store {
    users: HashMap<UserId, User>,
    last_id: u32,
}

impl Store {
    fn id_for_email(&self, email: &str) -> Option<UserId> {
        self.users
            .values()
            .find(|user| user.email().eq_ignore_ascii_case(email))
            .map(User::id)
    }

    fn next_id(&mut self) -> Result<UserId, UserServiceError> {
        let next = self
            .last_id
            .checked_add(1)
            .and_then(|raw| UserId::new(raw).ok())
            .ok_or_else(|| UserServiceError::unavailable("user id space exhausted"))?;
        self.last_id = next.get();
        Ok(next)
    }
}

/// Reference user store used by the binary and integration tests.
#[derive(Default)]
pub struct InMemoryUserService {
    store: RwLock<Store>,
}

impl InMemoryUserService {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    ///
    /// # Errors
    /// `Unavailable` when the store lock is poisoned.
    pub fn len(&self) -> Result<usize, UserServiceError> {
        Ok(self.read()?.users.len())
    }

    /// Whether no users are stored.
    ///
    /// # Errors
    /// `Unavailable` when the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, UserServiceError> {
        Ok(self.read()?.users.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, UserServiceError> {
        self.store
            .read()
            .map_err(|_| UserServiceError::unavailable("user store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, UserServiceError> {
        self.store
            .write()
            .map_err(|_| UserServiceError::unavailable("user store lock poisoned"))
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn get_by_id(&self, id: UserId) -> Result<User, UserServiceError> {
        self.read()?
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| UserServiceError::not_found(format!("user {id} not found")))
    }

    async fn get_by_email(&self, email: &str) -> Result<User, UserServiceError> {
        let store = self.read()?;
        store
            .id_for_email(email)
            .and_then(|id| store.users.get(&id).cloned())
            .ok_or_else(|| UserServiceError::not_found("no user with that email"))
    }

    async fn compare_password(
        &self,
        supplied: &Password,
        stored: &Password,
    ) -> Result<(), UserServiceError> {
        if supplied.expose() == stored.expose() {
            Ok(())
        } else {
            Err(UserServiceError::invalid_credentials())
        }
    }

    async fn create(&self, user: &mut User) -> Result<(), UserServiceError> {
        if user.email().trim().is_empty() {
            return Err(UserServiceError::validation("email must not be empty"));
        }
        if user.password().is_empty() {
            return Err(UserServiceError::validation("password must not be empty"));
        }

        let mut store = self.write()?;
        if store.id_for_email(user.email()).is_some() {
            return Err(UserServiceError::conflict("email already registered"));
        }
        let id = store.next_id()?;
        user.assign_server_fields(id, Role::User, true);
        store.users.insert(id, user.clone());
        debug!(user_id = %id, "user stored");
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserServiceError> {
        if user.email().trim().is_empty() {
            return Err(UserServiceError::validation("email must not be empty"));
        }

        let mut store = self.write()?;
        if !store.users.contains_key(&user.id()) {
            return Err(UserServiceError::not_found(format!(
                "user {} not found",
                user.id()
            )));
        }
        if store
            .id_for_email(user.email())
            .is_some_and(|owner| owner != user.id())
        {
            return Err(UserServiceError::conflict("email already registered"));
        }
        store.users.insert(user.id(), user.clone());
        Ok(())
    }
}
