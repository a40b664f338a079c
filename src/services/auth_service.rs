use std::sync::Arc;

use serde::Serialize;

use super::ServiceError;
use crate::auth::{password, TokenCodec};
use crate::database::models::{LoginRequest, NewUser, RegisterRequest, UserProfile};
use crate::database::{DatabaseError, UserRepository};
use crate::events::{self, EventSink, UserEvent};
use crate::middleware::Identity;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Registration, login and the current-user lookup.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    codec: Arc<TokenCodec>,
    sink: Arc<dyn EventSink>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, codec: Arc<TokenCodec>, sink: Arc<dyn EventSink>) -> Self {
        Self { users, codec, sink }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<UserProfile, ServiceError> {
        let email = normalize_email(&request.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DatabaseError::Conflict("user with this email already exists".to_string()).into());
        }

        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|e| ServiceError::Internal(format!("password hashing task failed: {}", e)))?
            .map_err(|e| ServiceError::Internal(format!("password hashing failed: {}", e)))?;

        let user = self
            .users
            .create(NewUser {
                username: request.username.trim().to_string(),
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "registered new user");
        events::publish_detached(
            self.sink.clone(),
            events::USER_REGISTERED,
            &UserEvent { user_id: user.id.to_string(), email: user.email.clone() },
        );

        Ok(UserProfile::from(&user))
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ServiceError> {
        let email = normalize_email(&request.email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::info!("login failed: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let password = request.password;
        let verified = tokio::task::spawn_blocking(move || password::verify_password(&password, &stored_hash))
            .await
            .map_err(|e| ServiceError::Internal(format!("password verification task failed: {}", e)))?;

        if !verified {
            tracing::info!(user_id = %user.id, "login failed: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.codec.issue(&user.id)?;
        tracing::info!(user_id = %user.id, "user logged in");
        events::publish_detached(
            self.sink.clone(),
            events::USER_LOGGED_IN,
            &UserEvent { user_id: user.id.to_string(), email: user.email.clone() },
        );

        Ok(LoginResponse { token, user: UserProfile::from(&user) })
    }

    pub async fn me(&self, identity: &Identity) -> Result<UserProfile, ServiceError> {
        let user = self
            .users
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))?;
        Ok(UserProfile::from(&user))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
