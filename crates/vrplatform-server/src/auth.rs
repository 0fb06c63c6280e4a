// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! User accounts: sign-up, login and signed access tokens.
//!
//! Passwords are stored as bcrypt hashes. Tokens are HS256 JWTs whose
//! subject is the user id and which expire after [`TOKEN_LIFETIME_SECS`].

use crate::{lock, unix_now};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// How long an access token stays valid: 30 days.
pub const TOKEN_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;

/// Reasons an account operation fails.
///
/// The display text is what clients see in [`AuthResponse::message`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Username shorter than three characters.
    #[error("Username must be at least 3 characters")]
    UsernameTooShort,
    /// Email without an `@`.
    #[error("Invalid email address")]
    InvalidEmail,
    /// Password shorter than eight characters.
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    /// Another account uses this email.
    #[error("Email already registered")]
    EmailTaken,
    /// Unknown email or wrong password; the two are not told apart.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// Hashing or verifying the password failed.
    #[error("Internal server error")]
    Hashing(#[from] bcrypt::BcryptError),
    /// Signing the token failed.
    #[error("Internal server error")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// A stored account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// `user_<uuid>` identifier.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// bcrypt hash of the password. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: i64,
    /// Avatar model.
    pub avatar_url: Option<String>,
    /// Ids of games this user published.
    pub games_created: Vec<String>,
    /// Ids of games this user played, without duplicates.
    pub games_played: Vec<String>,
    /// Friend user ids, without duplicates.
    pub friends: Vec<String>,
    /// Unlocked achievements.
    pub achievements: Vec<Achievement>,
}

/// A milestone reached by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Achievement id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What it was awarded for.
    pub description: String,
    /// Unlock time, seconds since the Unix epoch.
    pub unlocked_at: i64,
}

/// Sign-up form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Desired display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Avatar model.
    pub avatar_url: Option<String>,
    /// Published games.
    pub games_created: Vec<String>,
    /// Played games.
    pub games_played: Vec<String>,
    /// Number of friends.
    pub friend_count: usize,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
            games_created: user.games_created.clone(),
            games_played: user.games_played.clone(),
            friend_count: user.friends.len(),
        }
    }
}

/// Reply to sign-up and login requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Access token on success.
    pub token: Option<String>,
    /// Profile on success.
    pub user: Option<UserProfile>,
}

impl AuthResponse {
    fn from_result(result: Result<(String, UserProfile), AuthError>, ok_message: &str) -> Self {
        match result {
            Ok((token, profile)) => Self {
                success: true,
                message: ok_message.to_string(),
                token: Some(token),
                user: Some(profile),
            },
            Err(e) => Self {
                success: false,
                message: e.to_string(),
                token: None,
                user: None,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

#[derive(Debug, Default)]
struct Accounts {
    users: HashMap<String, User>,
    email_to_id: HashMap<String, String>,
}

/// In-memory account store.
pub struct AuthService {
    accounts: Mutex<Accounts>,
    jwt_secret: String,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Creates a store signing tokens with `jwt_secret`, hashing at bcrypt's default cost.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self::with_cost(jwt_secret, bcrypt::DEFAULT_COST)
    }

    /// Like [`AuthService::new`] with an explicit bcrypt cost.
    pub fn with_cost(jwt_secret: impl Into<String>, bcrypt_cost: u32) -> Self {
        log::info!("Initializing authentication service...");
        Self {
            accounts: Mutex::new(Accounts::default()),
            jwt_secret: jwt_secret.into(),
            bcrypt_cost,
        }
    }

    /// Creates an account and logs it in.
    pub fn signup(&self, request: &SignupRequest) -> AuthResponse {
        log::info!("Signup request for: {}", request.username);
        let result = self.try_signup(request);
        if let Err(e) = &result {
            log::warn!("Signup rejected for {}: {e}", request.username);
        }
        AuthResponse::from_result(result, "Account created successfully")
    }

    /// Typed form of [`AuthService::signup`].
    pub fn try_signup(&self, request: &SignupRequest) -> Result<(String, UserProfile), AuthError> {
        if request.username.chars().count() < MIN_USERNAME_LEN {
            return Err(AuthError::UsernameTooShort);
        }
        if !request.email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        if lock(&self.accounts).email_to_id.contains_key(&request.email) {
            return Err(AuthError::EmailTaken);
        }

        // Hash outside the lock; it is the slow part.
        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)?;

        let user = User {
            id: format!("user_{}", uuid::Uuid::new_v4()),
            username: request.username.clone(),
            email: request.email.clone(),
            password_hash,
            created_at: unix_now(),
            avatar_url: None,
            games_created: Vec::new(),
            games_played: Vec::new(),
            friends: Vec::new(),
            achievements: Vec::new(),
        };
        let profile = UserProfile::from(&user);

        {
            let mut accounts = lock(&self.accounts);
            // Re-check: another sign-up may have claimed the email while hashing.
            if accounts.email_to_id.contains_key(&user.email) {
                return Err(AuthError::EmailTaken);
            }
            accounts
                .email_to_id
                .insert(user.email.clone(), user.id.clone());
            accounts.users.insert(user.id.clone(), user);
        }

        let token = self.generate_token(&profile.id)?;
        log::info!("User created successfully: {}", profile.username);
        Ok((token, profile))
    }

    /// Checks credentials and issues a fresh token.
    pub fn login(&self, request: &LoginRequest) -> AuthResponse {
        log::info!("Login attempt for: {}", request.email);
        let result = self.try_login(request);
        if let Err(e) = &result {
            log::info!("Login failed for {}: {e}", request.email);
        }
        AuthResponse::from_result(result, "Login successful")
    }

    /// Typed form of [`AuthService::login`].
    pub fn try_login(&self, request: &LoginRequest) -> Result<(String, UserProfile), AuthError> {
        let user = {
            let accounts = lock(&self.accounts);
            accounts
                .email_to_id
                .get(&request.email)
                .and_then(|id| accounts.users.get(id))
                .cloned()
                .ok_or(AuthError::InvalidCredentials)?
        };

        // A hash that fails to parse is treated like a wrong password.
        if !bcrypt::verify(&request.password, &user.password_hash).unwrap_or(false) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.generate_token(&user.id)?;
        log::info!("Login successful: {}", user.username);
        Ok((token, UserProfile::from(&user)))
    }

    /// Returns the user id a valid, unexpired token was issued to.
    pub fn verify_token(&self, token: &str) -> Option<String> {
        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                log::warn!("Token verification failed: {e}");
                None
            }
        }
    }

    /// Public profile of `user_id`.
    pub fn get_user(&self, user_id: &str) -> Option<UserProfile> {
        lock(&self.accounts).users.get(user_id).map(UserProfile::from)
    }

    /// Sets or clears the avatar. Returns `false` for unknown users.
    pub fn update_user(&self, user_id: &str, avatar_url: Option<String>) -> bool {
        self.with_user(user_id, |user| {
            user.avatar_url = avatar_url;
            log::info!("User profile updated: {user_id}");
            true
        })
        .unwrap_or(false)
    }

    /// Adds `friend_id` to the friends of `user_id`. Returns `false` if unknown or already a friend.
    pub fn add_friend(&self, user_id: &str, friend_id: &str) -> bool {
        self.with_user(user_id, |user| {
            if user.friends.iter().any(|f| f == friend_id) {
                return false;
            }
            user.friends.push(friend_id.to_string());
            log::info!("Friend added: {user_id} -> {friend_id}");
            true
        })
        .unwrap_or(false)
    }

    /// Records that `user_id` published `game_id`.
    pub fn add_created_game(&self, user_id: &str, game_id: &str) -> bool {
        self.with_user(user_id, |user| {
            user.games_created.push(game_id.to_string());
            log::info!("Game created recorded: {game_id} by {user_id}");
            true
        })
        .unwrap_or(false)
    }

    /// Records that `user_id` played `game_id`, once per game.
    pub fn add_played_game(&self, user_id: &str, game_id: &str) -> bool {
        self.with_user(user_id, |user| {
            if user.games_played.iter().any(|g| g == game_id) {
                return false;
            }
            user.games_played.push(game_id.to_string());
            log::info!("Game played recorded: {game_id} by {user_id}");
            true
        })
        .unwrap_or(false)
    }

    /// Awards an achievement. An id already unlocked is not awarded twice.
    pub fn unlock_achievement(
        &self,
        user_id: &str,
        achievement_id: &str,
        name: &str,
        description: &str,
    ) -> bool {
        self.with_user(user_id, |user| {
            if user.achievements.iter().any(|a| a.id == achievement_id) {
                return false;
            }
            user.achievements.push(Achievement {
                id: achievement_id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                unlocked_at: unix_now(),
            });
            log::info!("Achievement unlocked: {name} for {user_id}");
            true
        })
        .unwrap_or(false)
    }

    /// Achievements of `user_id`.
    pub fn achievements(&self, user_id: &str) -> Vec<Achievement> {
        lock(&self.accounts)
            .users
            .get(user_id)
            .map(|u| u.achievements.clone())
            .unwrap_or_default()
    }

    fn with_user<R>(&self, user_id: &str, f: impl FnOnce(&mut User) -> R) -> Option<R> {
        lock(&self.accounts).users.get_mut(user_id).map(f)
    }

    fn generate_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = unix_now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + TOKEN_LIFETIME_SECS,
            iat: now,
        };
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("users", &lock(&self.accounts).users.len())
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}
