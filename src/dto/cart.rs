use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{
    dto::require_id,
    error::{AppError, AppResult},
    models::CartItem,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CartQuery {
    /// Owner of the cart.
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: Option<String>,
}

impl CartQuery {
    pub fn user_id(&self) -> AppResult<i32> {
        let raw = self
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::validation("User ID is required"))?;
        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AppError::validation("Invalid User ID format")),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub menu_id: Option<i32>,
    /// Defaults to 1.
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub quantity: Option<i32>,
}

/// A validated add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub user_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
}

impl AddToCartRequest {
    pub fn validate(&self) -> AppResult<NewCartLine> {
        const MISSING: &str = "User ID and Menu ID are required";
        const INVALID: &str = "Invalid User ID or Menu ID format";
        let user_id = require_id(self.user_id, MISSING, INVALID)?;
        let menu_id = require_id(self.menu_id, MISSING, INVALID)?;
        let quantity = self.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }
        Ok(NewCartLine {
            user_id,
            menu_id,
            quantity,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCartQuantityRequest {
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub quantity: Option<i32>,
}

impl UpdateCartQuantityRequest {
    pub fn validate(&self) -> AppResult<i32> {
        match self.quantity {
            None => Err(AppError::validation("Quantity is required")),
            Some(q) if q < 1 => Err(AppError::validation("Quantity must be at least 1")),
            Some(q) => Ok(q),
        }
    }
}

/// A cart row joined with its menu.
#[derive(Debug, Clone, Serialize, ToSchema, FromRow, PartialEq)]
pub struct CartLine {
    pub id: i32,
    pub user_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub menu_name: String,
    pub menu_image: String,
    pub menu_description: String,
    pub menu_price: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CartList {
    #[schema(value_type = Vec<CartLine>)]
    pub items: Vec<CartLine>,
}

/// Result of add-or-increment: the stored row and whether it was newly inserted.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CartUpsert {
    #[sqlx(flatten)]
    pub item: CartItem,
    pub inserted: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearCartResult {
    pub removed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_query_requires_numeric_positive_user() {
        let missing = CartQuery::default();
        assert!(matches!(missing.user_id(), Err(AppError::Validation(m)) if m == "User ID is required"));

        let bad = CartQuery {
            user_id: Some("abc".into()),
        };
        assert!(matches!(bad.user_id(), Err(AppError::Validation(m)) if m == "Invalid User ID format"));

        let negative = CartQuery {
            user_id: Some("-3".into()),
        };
        assert!(negative.user_id().is_err());

        let ok = CartQuery {
            user_id: Some("7".into()),
        };
        assert_eq!(ok.user_id().unwrap(), 7);
    }

    #[test]
    fn add_to_cart_defaults_quantity_to_one() {
        let req = AddToCartRequest {
            user_id: Some(7),
            menu_id: Some(3),
            quantity: None,
        };
        assert_eq!(
            req.validate().unwrap(),
            NewCartLine {
                user_id: 7,
                menu_id: 3,
                quantity: 1
            }
        );
    }

    #[test]
    fn add_to_cart_rejects_missing_ids_and_zero_quantity() {
        let req = AddToCartRequest {
            user_id: Some(7),
            menu_id: None,
            quantity: Some(2),
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let req = AddToCartRequest {
            user_id: Some(7),
            menu_id: Some(3),
            quantity: Some(0),
        };
        assert!(matches!(
            req.validate(),
            Err(AppError::Validation(m)) if m == "Quantity must be at least 1"
        ));
    }

    #[test]
    fn update_quantity_rejects_zero_negative_and_missing() {
        for quantity in [None, Some(0), Some(-4)] {
            let req = UpdateCartQuantityRequest { quantity };
            assert!(req.validate().is_err());
        }
        assert_eq!(
            UpdateCartQuantityRequest { quantity: Some(5) }.validate().unwrap(),
            5
        );
    }
}
