//! Client (patron) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Client model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub passport_seria: String,
    pub passport_number: String,
}

/// Client list entry without identity-document fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClientShort {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
}

impl From<Client> for ClientShort {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name,
            last_name: client.last_name,
            father_name: client.father_name,
        }
    }
}

/// Create or update client request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ClientInput {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub father_name: String,
    #[validate(length(min = 1, max = 20, message = "Passport series is required"))]
    pub passport_seria: String,
    #[validate(length(min = 1, max = 20, message = "Passport number is required"))]
    pub passport_number: String,
}
