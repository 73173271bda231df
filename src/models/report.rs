//! Aggregate report rows

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book with its total number of loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TopBook {
    pub book_id: i32,
    pub name: String,
    pub borrow_count: i64,
}

/// Client with a positive total fine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClientFine {
    pub client_id: i32,
    /// "<last name> <first name>"
    pub client_name: String,
    pub total_fine: Decimal,
}
