//! Librarian authentication: password hashing and JWT handling

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::librarian::{Actor, Credentials, Librarian, LibrarianClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Create a librarian account
    pub async fn register(&self, credentials: Credentials) -> AppResult<Actor> {
        if !self.config.allow_registration {
            return Err(AppError::Forbidden("Registration is disabled".to_string()));
        }
        credentials.validate()?;

        if self
            .repository
            .librarians
            .get_by_username(&credentials.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let hash = self.hash_password(&credentials.password)?;
        let librarian = self
            .repository
            .librarians
            .create(&credentials.username, &hash)
            .await?;

        tracing::info!(librarian = %librarian.username, "Librarian registered");
        Ok(Actor {
            librarian_id: librarian.id,
            username: librarian.username,
        })
    }

    /// Authenticate a librarian and return a bearer token
    pub async fn login(&self, credentials: &Credentials) -> AppResult<(String, Actor)> {
        let librarian = self
            .repository
            .librarians
            .get_by_username(&credentials.username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !self.check_password(&librarian.password, &credentials.password)? {
            tracing::warn!(librarian = %librarian.username, "Rejected login attempt");
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let token = self.generate_jwt(&librarian)?;
        tracing::info!(librarian = %librarian.username, "Librarian logged in");
        Ok((
            token,
            Actor {
                librarian_id: librarian.id,
                username: librarian.username,
            },
        ))
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    pub fn check_password(&self, hash: &str, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    pub fn generate_jwt(&self, librarian: &Librarian) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = LibrarianClaims {
            sub: librarian.username.clone(),
            librarian_id: librarian.id,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Resolve a bearer token to the librarian it was issued for
    pub fn validate_jwt(&self, token: &str) -> AppResult<Actor> {
        LibrarianClaims::from_token(token, &self.config.jwt_secret)
            .map(|claims| claims.actor())
            .map_err(|e| AppError::Authentication(format!("Invalid token: {}", e)))
    }
}
