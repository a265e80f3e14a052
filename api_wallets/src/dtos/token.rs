use db::dtos::token::TopTokenCreateRequest;
use serde::Deserialize;

/// One entry of the `coins/markets` response. Fields the feed may omit
/// are optional.
#[derive(Debug, Deserialize)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<i32>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

impl MarketCoin {
    /// `None` when the feed has no price for the coin.
    pub fn into_create_request(self) -> Option<TopTokenCreateRequest> {
        let current_price = self.current_price?;
        Some(TopTokenCreateRequest {
            id: self.id,
            symbol: self.symbol.to_uppercase(),
            name: self.name,
            image: self.image,
            current_price,
            market_cap: self.market_cap,
            market_cap_rank: self.market_cap_rank,
            total_volume: self.total_volume,
            price_change_percentage_24h: self.price_change_percentage_24h,
        })
    }
}
