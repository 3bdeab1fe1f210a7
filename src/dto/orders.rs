use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use utoipa::ToSchema;

use crate::{
    dto::require_id,
    error::{AppError, AppResult},
    models::{Order, OrderItem},
};

pub const DEFAULT_PAYMENT_METHOD: &str = "card";
pub const CONFIRMED_STATUS: &str = "confirmed";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub menu_id: Option<i32>,
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub quantity: Option<i32>,
    /// Unit price at the time of ordering, normally the cart line's menu price.
    pub price: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub user_id: Option<i32>,
    pub total_amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub items: Option<Vec<OrderItemRequest>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub menu_id: i32,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i32,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub items: Vec<NewOrderItem>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> AppResult<NewOrder> {
        const MISSING: &str = "Missing required order data.";
        let user_id = require_id(self.user_id, MISSING, "Invalid User ID")?;
        let total_amount = match self.total_amount {
            Some(amount) if amount > Decimal::ZERO => amount,
            Some(_) => return Err(AppError::validation("Total amount must be greater than 0")),
            None => return Err(AppError::validation(MISSING)),
        };
        let items = match self.items.as_deref() {
            Some(items) if !items.is_empty() => items,
            _ => return Err(AppError::validation(MISSING)),
        };

        let items = items
            .iter()
            .map(|item| {
                let menu_id = require_id(item.menu_id, "Order item requires a menu ID", "Invalid Menu ID")?;
                let quantity = match item.quantity {
                    Some(q) if q >= 1 => q,
                    _ => return Err(AppError::validation("Order item quantity must be at least 1")),
                };
                let price = match item.price {
                    Some(p) if p >= Decimal::ZERO => p,
                    _ => return Err(AppError::validation("Order item requires a valid price")),
                };
                Ok(NewOrderItem {
                    menu_id,
                    quantity,
                    price,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let payment_method = self
            .payment_method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_PAYMENT_METHOD)
            .to_string();

        Ok(NewOrder {
            user_id,
            total_amount,
            payment_method,
            items,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// One aggregated line inside an order listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OrderLine {
    pub menu_id: i32,
    pub menu_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct OrderSummary {
    pub id: i32,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Vec<OrderLine>)]
    pub items: Json<Vec<OrderLine>>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct AdminOrderSummary {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Vec<OrderLine>)]
    pub items: Json<Vec<OrderLine>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<OrderSummary>)]
    pub items: Vec<OrderSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AdminOrderList {
    #[schema(value_type = Vec<AdminOrderSummary>)]
    pub items: Vec<AdminOrderSummary>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckoutLineRequest {
    pub menu_name: Option<String>,
    pub menu_image: Option<String>,
    pub menu_description: Option<String>,
    pub menu_price: Option<Decimal>,
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub quantity: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CheckoutSessionRequest {
    #[serde(rename = "cartItems", alias = "cart_items", default)]
    pub cart_items: Vec<CheckoutLineRequest>,
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub user_id: Option<i32>,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutLine {
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub user_id: i32,
    pub user_email: String,
    pub lines: Vec<CheckoutLine>,
}

impl CheckoutSessionRequest {
    pub fn validate(&self) -> AppResult<CheckoutSession> {
        let user_id = require_id(self.user_id, "User ID is required", "Invalid User ID")?;
        let user_email = crate::dto::require_text(self.user_email.as_deref(), "User email is required")?;
        if self.cart_items.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        let lines = self
            .cart_items
            .iter()
            .map(|item| {
                let name = crate::dto::require_text(item.menu_name.as_deref(), "Cart item requires a menu name")?;
                let unit_price = match item.menu_price {
                    Some(p) if p > Decimal::ZERO => p,
                    _ => return Err(AppError::validation("Cart item requires a valid price")),
                };
                let quantity = match item.quantity {
                    Some(q) if q >= 1 => q,
                    _ => return Err(AppError::validation("Quantity must be at least 1")),
                };
                Ok(CheckoutLine {
                    name,
                    image: item.menu_image.clone().filter(|s| !s.is_empty()),
                    description: item.menu_description.clone().filter(|s| !s.is_empty()),
                    unit_price,
                    quantity,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(CheckoutSession {
            user_id,
            user_email,
            lines,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CheckoutSessionResponse {
    pub id: String,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(menu_id: i32, quantity: i32, cents: i64) -> OrderItemRequest {
        OrderItemRequest {
            menu_id: Some(menu_id),
            quantity: Some(quantity),
            price: Some(Decimal::new(cents, 2)),
        }
    }

    #[test]
    fn empty_items_is_a_validation_error() {
        let req = CreateOrderRequest {
            user_id: Some(1),
            total_amount: Some(Decimal::new(1000, 2)),
            payment_method: None,
            items: Some(vec![]),
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn missing_total_is_a_validation_error() {
        let req = CreateOrderRequest {
            user_id: Some(1),
            total_amount: None,
            payment_method: None,
            items: Some(vec![item(1, 1, 500)]),
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn payment_method_defaults_to_card() {
        let req = CreateOrderRequest {
            user_id: Some(4),
            total_amount: Some(Decimal::new(2500, 2)),
            payment_method: Some("  ".into()),
            items: Some(vec![item(1, 2, 1250)]),
        };
        let order = req.validate().unwrap();
        assert_eq!(order.payment_method, "card");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].price, Decimal::new(1250, 2));
    }

    #[test]
    fn item_with_zero_quantity_is_rejected() {
        let req = CreateOrderRequest {
            user_id: Some(4),
            total_amount: Some(Decimal::new(2500, 2)),
            payment_method: None,
            items: Some(vec![item(1, 0, 1250)]),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn checkout_request_accepts_camel_case_cart_items() {
        let req: CheckoutSessionRequest = serde_json::from_value(serde_json::json!({
            "cartItems": [{
                "menu_name": "Ramen",
                "menu_image": "https://img/ramen.png",
                "menu_description": "",
                "menu_price": 12.5,
                "quantity": 2
            }],
            "user_id": 9,
            "user_email": "ana@example.com"
        }))
        .unwrap();
        let session = req.validate().unwrap();
        assert_eq!(session.user_id, 9);
        assert_eq!(session.lines[0].unit_price, Decimal::new(125, 1));
        assert_eq!(session.lines[0].description, None);
    }
}
