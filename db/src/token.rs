use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{dtos::token::TopTokenCreateRequest, models::token::TopToken};

pub async fn get_top_tokens<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<TopToken>> {
    sqlx::query_as::<_, TopToken>(
        r#"
        SELECT id, symbol, name, image, current_price, market_cap, market_cap_rank,
               total_volume, price_change_percentage_24h, updated_at
        FROM top_tokens
        ORDER BY market_cap_rank ASC NULLS LAST, market_cap DESC NULLS LAST
        "#,
    )
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_top_tokens<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<()> {
    sqlx::query("DELETE FROM top_tokens").execute(executor).await?;
    Ok(())
}

pub async fn insert_top_token<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: TopTokenCreateRequest,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO top_tokens (id, symbol, name, image, current_price, market_cap,
                                market_cap_rank, total_volume, price_change_percentage_24h)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (id) DO UPDATE
        SET symbol = EXCLUDED.symbol,
            name = EXCLUDED.name,
            image = EXCLUDED.image,
            current_price = EXCLUDED.current_price,
            market_cap = EXCLUDED.market_cap,
            market_cap_rank = EXCLUDED.market_cap_rank,
            total_volume = EXCLUDED.total_volume,
            price_change_percentage_24h = EXCLUDED.price_change_percentage_24h,
            updated_at = NOW()
        "#,
    )
    .bind(data.id)
    .bind(data.symbol)
    .bind(data.name)
    .bind(data.image)
    .bind(data.current_price)
    .bind(data.market_cap)
    .bind(data.market_cap_rank)
    .bind(data.total_volume)
    .bind(data.price_change_percentage_24h)
    .execute(executor)
    .await?;
    Ok(())
}
