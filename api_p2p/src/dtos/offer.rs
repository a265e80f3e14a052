use common::error::{AppError, Res};
use db::{
    dtos::p2p::{OfferCreateRequest, OfferFilter},
    models::p2p::P2pOffer,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STATUS_OPEN: &str = "open";
pub const STATUS_CANCELLED: &str = "cancelled";

const SIDES: [&str; 2] = ["buy", "sell"];

fn parse_side(side: &str) -> Res<String> {
    let side = side.trim().to_lowercase();
    if SIDES.contains(&side.as_str()) {
        Ok(side)
    } else {
        Err(AppError::BadRequest(
            "Side must be either buy or sell".to_string(),
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OfferQuery {
    pub side: Option<String>,
    pub token: Option<String>,
}

impl OfferQuery {
    pub fn into_filter(self) -> Res<OfferFilter> {
        Ok(OfferFilter {
            side: self.side.as_deref().map(parse_side).transpose()?,
            token: self
                .token
                .map(|t| t.trim().to_uppercase())
                .filter(|t| !t.is_empty()),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOfferRequest {
    pub side: String,
    pub token: String,
    pub amount: f64,
    pub price: f64,
    pub payment_method: String,
}

impl CreateOfferRequest {
    pub fn validate(self, user_id: Uuid) -> Res<OfferCreateRequest> {
        let side = parse_side(&self.side)?;
        let token = self.token.trim().to_uppercase();
        let payment_method = self.payment_method.trim().to_string();

        if token.is_empty() {
            return Err(AppError::BadRequest("Token is required".to_string()));
        }
        if payment_method.is_empty() {
            return Err(AppError::BadRequest(
                "Payment method is required".to_string(),
            ));
        }
        if !(self.amount > 0.0) || !(self.price > 0.0) {
            return Err(AppError::BadRequest(
                "Amount and price must be positive".to_string(),
            ));
        }

        Ok(OfferCreateRequest {
            user_id,
            side,
            token,
            amount: self.amount,
            price: self.price,
            payment_method,
        })
    }
}

/// Only the creator may cancel, and only while the offer is still open.
pub fn check_cancel(offer: &P2pOffer, user_id: Uuid) -> Res<()> {
    if offer.user_id != user_id {
        return Err(AppError::Forbidden("Unauthorized".to_string()));
    }
    if offer.status != STATUS_OPEN {
        return Err(AppError::BadRequest(format!(
            "Offer is already {}",
            offer.status
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn offer(user_id: Uuid, status: &str) -> P2pOffer {
        let now = Utc::now().naive_utc();
        P2pOffer {
            id: Uuid::new_v4(),
            user_id,
            side: "sell".into(),
            token: "USDT".into(),
            amount: 100.0,
            price: 1.01,
            payment_method: "bank transfer".into(),
            status: status.into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_request_is_normalized() {
        let req: CreateOfferRequest = serde_json::from_str(
            r#"{"side":"SELL","token":" usdt ","amount":100,"price":1.01,"payment_method":"bank transfer"}"#,
        )
        .unwrap();
        let user_id = Uuid::new_v4();
        let data = req.validate(user_id).unwrap();
        assert_eq!(data.side, "sell");
        assert_eq!(data.token, "USDT");
        assert_eq!(data.user_id, user_id);
    }

    #[test]
    fn invalid_offers_are_rejected() {
        let base = || CreateOfferRequest {
            side: "buy".into(),
            token: "BTC".into(),
            amount: 1.0,
            price: 60000.0,
            payment_method: "paypal".into(),
        };

        let mut req = base();
        req.side = "hold".into();
        assert!(req.validate(Uuid::new_v4()).is_err());

        let mut req = base();
        req.amount = 0.0;
        assert!(req.validate(Uuid::new_v4()).is_err());

        let mut req = base();
        req.payment_method = "  ".into();
        assert!(req.validate(Uuid::new_v4()).is_err());
    }

    #[test]
    fn query_filter_validates_side() {
        let filter = OfferQuery {
            side: Some("Buy".into()),
            token: Some("".into()),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.side.as_deref(), Some("buy"));
        assert!(filter.token.is_none());

        let bad = OfferQuery {
            side: Some("both".into()),
            token: None,
        };
        assert!(bad.into_filter().is_err());
    }

    #[test]
    fn cancel_rules() {
        let owner = Uuid::new_v4();
        assert!(check_cancel(&offer(owner, STATUS_OPEN), owner).is_ok());
        assert!(matches!(
            check_cancel(&offer(owner, STATUS_OPEN), Uuid::new_v4()),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            check_cancel(&offer(owner, STATUS_CANCELLED), owner),
            Err(AppError::BadRequest(_))
        ));
    }
}
