use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Admin dashboard counters. Every field is zero on an empty database.
#[derive(Debug, Clone, Default, Serialize, ToSchema, PartialEq)]
pub struct AdminStats {
    pub users: i64,
    pub products: i64,
    pub orders: i64,
    pub revenue: Decimal,
}
