use std::{sync::Arc, time::Duration};

use common::env_config::Config;
use sqlx::PgPool;
use tokio::time::{self, MissedTickBehavior};

pub fn refresh_period(minutes: u64) -> Duration {
    Duration::from_secs(minutes.max(1) * 60)
}

/// Refreshes the top tokens table right away and then on every period.
/// A failed refresh is logged and retried on the next tick.
pub fn spawn_top_tokens_refresh(pool: Arc<PgPool>, config: Arc<Config>) {
    actix_web::rt::spawn(async move {
        let mut ticker = time::interval(refresh_period(config.top_tokens_refresh_minutes));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match api_wallets::update_top_tokens(&pool, &config).await {
                Ok(count) => log::info!("Top Token data updated ({} tokens)", count),
                Err(e) => log::error!("Failed to update top tokens: {}", e),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_is_in_minutes_and_never_zero() {
        assert_eq!(refresh_period(10), Duration::from_secs(600));
        assert_eq!(refresh_period(0), Duration::from_secs(60));
    }
}
