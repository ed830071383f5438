use serde::Deserialize;
use thiserror::Error;

use crate::models::{ProfilePatch, UserProfile, default_theme};
use crate::storage::{Storage, StorageError};
use crate::utils;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User directory request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Failed to create account: {0}")]
    SignupFailed(String),
}

/// Raw record shape in the remote user directory. Optional fields are common
/// there, so everything defaults and gets filled in on the way to a profile.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    join_date: Option<String>,
}

impl UserRecord {
    fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.unwrap_or_default(),
            email: self.email,
            avatar: self.avatar,
            bio: self.bio,
            theme: self.theme.unwrap_or_else(default_theme),
            join_date: self.join_date.unwrap_or_else(utils::now_rfc3339),
        }
    }
}

/// Thin proxy over the remote user directory: a flat record list queried by
/// email/password equality. No hashing, no tokens.
pub struct AuthClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl AuthClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Fetch the record list and match email and password by equality
    pub fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let records: Vec<UserRecord> = self
            .http
            .get(&self.base_url)
            .send()?
            .error_for_status()?
            .json()?;

        records
            .into_iter()
            .find(|r| r.email == email && r.password.as_deref() == Some(password))
            .map(UserRecord::into_profile)
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Create a new record in the user directory
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let response = self
            .http
            .post(&self.base_url)
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
                "theme": "light",
                "joinDate": utils::now_rfc3339(),
            }))
            .send()?;

        if !response.status().is_success() {
            return Err(AuthError::SignupFailed(format!(
                "user directory returned {}",
                response.status()
            )));
        }

        let record: UserRecord = response.json()?;
        Ok(record.into_profile())
    }
}

/// The locally persisted sign-in state, mirrored through the user snapshot entry
pub struct Session {
    storage: Storage,
}

impl Session {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// The signed-in profile, if any
    pub fn current(&self) -> Option<UserProfile> {
        self.storage.load_user()
    }

    /// Persist the signed-in profile
    pub fn save(&self, user: &UserProfile) -> Result<(), StorageError> {
        self.storage.save_user(user)
    }

    /// Merge a partial profile update into the signed-in profile and persist it.
    /// Returns the updated profile, or None when nobody is signed in.
    pub fn update(&self, patch: ProfilePatch) -> Result<Option<UserProfile>, StorageError> {
        let Some(mut user) = self.storage.load_user() else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(avatar) = patch.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(bio) = patch.bio {
            user.bio = Some(bio);
        }
        if let Some(theme) = patch.theme {
            user.theme = theme;
        }
        self.storage.save_user(&user)?;
        Ok(Some(user))
    }

    /// Forget the signed-in profile (logout)
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.clear_user()
    }
}
