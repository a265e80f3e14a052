use std::time::Duration;

use common::{
    env_config::Config,
    error::{AppError, Res},
};
use db::{dtos::token::TopTokenCreateRequest, models::token::TopToken};
use sqlx::PgPool;

use crate::dtos::token::MarketCoin;

pub async fn get_top_tokens(pool: &PgPool) -> Res<Vec<TopToken>> {
    db::token::get_top_tokens(pool).await
}

/// Fetches the market feed and swaps the `top_tokens` table contents in
/// one transaction, so readers never observe a half-written list.
pub async fn update_top_tokens(pool: &PgPool, config: &Config) -> Res<usize> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.market_data_timeout_secs))
        .build()?;
    let response = client
        .get(&config.market_data_url)
        .header("Accept", "application/json")
        .header("User-Agent", "WebServer")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AppError::Internal(format!(
            "Market data API returned error status: {}",
            response.status()
        )));
    }

    let body = response.bytes().await?;
    let tokens = parse_market_data(&body)?;
    if tokens.is_empty() {
        // keep the previous snapshot rather than serving an empty list
        log::warn!("Market data response contained no priced tokens");
        return Ok(0);
    }

    let count = tokens.len();
    let mut tx = pool.begin().await?;
    db::token::delete_top_tokens(&mut *tx).await?;
    for token in tokens {
        db::token::insert_top_token(&mut *tx, token).await?;
    }
    tx.commit().await?;

    Ok(count)
}

/// Parses the market array, dropping entries without a price.
pub fn parse_market_data(body: &[u8]) -> Res<Vec<TopTokenCreateRequest>> {
    let coins: Vec<MarketCoin> = serde_json::from_slice(body)
        .map_err(|e| AppError::Internal(format!("Failed to parse market data: {}", e)))?;

    Ok(coins
        .into_iter()
        .filter_map(MarketCoin::into_create_request)
        .collect())
}
