//! Book type (category) model with its fine rules

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Book type model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookType {
    pub id: i32,
    /// Category label
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub type_name: String,
    /// Fine charged per day overdue
    pub fine: Decimal,
    /// Maximum loan duration in days
    pub day_count: i32,
}

/// Create or update book type request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookTypeInput {
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 255, message = "Type label is required"))]
    pub type_name: String,
    #[validate(custom(function = "non_negative"))]
    pub fine: Decimal,
    #[validate(range(min = 1, message = "Day count must be positive"))]
    pub day_count: i32,
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Fine must not be negative".into());
        return Err(err);
    }
    Ok(())
}
