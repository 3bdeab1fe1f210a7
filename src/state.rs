use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    payments::StripeClient,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
    pub payments: Option<StripeClient>,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> anyhow::Result<Self> {
        let orm = crate::db::orm_from_pool(&pool);
        let payments = match config.payments.secret_key.as_ref() {
            Some(_) => Some(StripeClient::new(&config.payments)?),
            None => {
                tracing::warn!("STRIPE_SECRET_KEY not set, checkout sessions are disabled");
                None
            }
        };
        Ok(Self {
            pool,
            orm,
            config: Arc::new(config),
            payments,
        })
    }
}
