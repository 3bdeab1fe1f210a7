use std::env;

use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub jwt_secret: SecretString,
    pub jwt_ttl_hours: i64,
    pub payments: PaymentConfig,
}

/// Stripe Checkout settings. `secret_key` is optional so the API can run
/// without a payment provider; checkout requests then fail with a 500.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub secret_key: Option<SecretString>,
    pub api_base: String,
    pub client_url: String,
    pub currency: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_or("APP_PORT", 5000);
        let max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 10);
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let jwt_ttl_hours = parse_or("JWT_TTL_HOURS", 24);

        let payments = PaymentConfig {
            secret_key: env::var("STRIPE_SECRET_KEY")
                .ok()
                .filter(|k| !k.is_empty())
                .map(SecretString::from),
            api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            client_url: env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
        };

        Ok(Self {
            port,
            database_url,
            host,
            max_connections,
            jwt_secret: SecretString::from(jwt_secret),
            jwt_ttl_hours,
            payments,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    parse_value(env::var(key).ok(), default)
}

fn parse_value<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{parse_or, parse_value};

    #[test]
    fn parse_value_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_value::<u16>(None, 5000), 5000);
        assert_eq!(parse_value::<u32>(Some("/usr/bin:/bin".into()), 7), 7);
        assert_eq!(parse_value::<u16>(Some("70000".into()), 5000), 5000);
        assert_eq!(parse_value::<u16>(Some(" 8080 ".into()), 5000), 8080);
    }

    #[test]
    fn parse_or_uses_default_for_unset_key() {
        assert_eq!(parse_or::<u16>("FOOD_ORDER_API_TEST_UNSET_PORT", 5000), 5000);
    }
}
