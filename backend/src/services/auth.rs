//! Authentication service for user registration, login, and token validation

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use shared::{validate_email, validate_password, User};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::{Collection, Repository, Storage};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Storage,
    users: Repository<StoredUser>,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// User record as persisted; the hash never leaves the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl StoredUser {
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Input for registering a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub exp: i64,
    pub iat: i64,
}

/// Signed-in user plus the bearer token for later requests
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthService {
    pub fn new(db: Storage, config: &Config) -> Self {
        Self {
            users: db.repository(Collection::Users),
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Register a user and sign them in
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthSession> {
        input.validate()?;
        let email = input.email.trim().to_string();
        validate_email(&email).map_err(|msg| AppError::validation("email", msg))?;
        validate_password(&input.password).map_err(|msg| AppError::validation("password", msg))?;

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let _guard = self.db.lock().await;
        let mut users = self.users.load_all().await?;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(AppError::DuplicateEntry(
                "A user with this email".to_string(),
            ));
        }

        let user = StoredUser {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            email,
            password_hash,
        };
        users.push(user.clone());
        self.users.save_all(&users).await?;

        info!(user_id = %user.id, "user registered");
        self.session_for(&user)
    }

    /// Check credentials and issue a token
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthSession> {
        let email = input.email.trim();
        let user = self
            .users
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(&input.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        self.session_for(&user)
    }

    /// Resolve a bearer token to a user that still exists
    pub async fn current_user(&self, token: &str) -> AppResult<User> {
        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

        self.users
            .find(|u| u.id == user_id)
            .await?
            .map(|u| u.to_user())
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }

    /// Validate access token and return claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
    }

    fn session_for(&self, user: &StoredUser) -> AppResult<AuthSession> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthSession {
            user: user.to_user(),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(Storage::in_memory(), &Config::ephemeral())
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = service().validate_token("not-a-jwt").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_invalid() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"someone-else"),
        )
        .unwrap();

        assert!(matches!(
            service().validate_token(&token).unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn test_expired_token_is_reported() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
            iat: (Utc::now() - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(Config::ephemeral().jwt.secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service().validate_token(&token).unwrap_err(),
            AppError::TokenExpired
        ));
    }
}
