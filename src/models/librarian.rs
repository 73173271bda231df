//! Librarian accounts, JWT claims and the authenticated identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Librarian model from database
#[derive(Debug, Clone, FromRow)]
pub struct Librarian {
    pub id: i32,
    pub username: String,
    /// Argon2 PHC string
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Login / registration credentials
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct Credentials {
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    pub username: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
}

/// Identity of the librarian performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Actor {
    pub librarian_id: i32,
    pub username: String,
}

/// JWT claims for authenticated librarians
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarianClaims {
    /// Username
    pub sub: String,
    pub librarian_id: i32,
    pub exp: i64,
    pub iat: i64,
}

impl LibrarianClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn actor(&self) -> Actor {
        Actor {
            librarian_id: self.librarian_id,
            username: self.sub.clone(),
        }
    }
}
