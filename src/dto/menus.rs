use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{
    dto::require_text,
    error::{AppError, AppResult},
    models::Menu,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateMenuRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMenu {
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: Decimal,
}

fn check_price(price: Decimal) -> AppResult<Decimal> {
    if price <= Decimal::ZERO {
        return Err(AppError::validation("Price must be greater than 0"));
    }
    Ok(price)
}

impl CreateMenuRequest {
    pub fn validate(&self) -> AppResult<NewMenu> {
        const MISSING: &str = "all fields are required";
        let name = require_text(self.name.as_deref(), MISSING)?;
        let image = require_text(self.image.as_deref(), MISSING)?;
        let description = require_text(self.description.as_deref(), MISSING)?;
        let price = check_price(self.price.ok_or_else(|| AppError::validation(MISSING))?)?;
        Ok(NewMenu {
            name,
            image,
            description,
            price,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMenuRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

impl UpdateMenuRequest {
    pub fn validate(&self) -> AppResult<()> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.image, "image"),
            (&self.description, "description"),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::validation(format!("{field} must not be empty")));
            }
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PopularQuery {
    pub limit: Option<i64>,
}

impl PopularQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(6).clamp(1, 50)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct PopularMenu {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: Decimal,
    pub total_ordered: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct MenuList {
    #[schema(value_type = Vec<Menu>)]
    pub items: Vec<Menu>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_menu_requires_every_field() {
        let req = CreateMenuRequest {
            name: Some("Pho".into()),
            image: Some("https://img/pho.png".into()),
            description: None,
            price: Some(Decimal::new(950, 2)),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_menu_rejects_non_positive_price() {
        let req = CreateMenuRequest {
            name: Some("Pho".into()),
            image: Some("https://img/pho.png".into()),
            description: Some("Beef noodle soup".into()),
            price: Some(Decimal::ZERO),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_menu_rejects_blank_name() {
        let req = UpdateMenuRequest {
            name: Some(" ".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
        assert!(UpdateMenuRequest::default().validate().is_ok());
    }

    #[test]
    fn popular_limit_is_clamped() {
        assert_eq!(PopularQuery { limit: None }.limit(), 6);
        assert_eq!(PopularQuery { limit: Some(0) }.limit(), 1);
        assert_eq!(PopularQuery { limit: Some(500) }.limit(), 50);
    }
}
