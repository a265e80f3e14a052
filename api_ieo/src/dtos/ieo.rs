use chrono::NaiveDateTime;
use common::error::{AppError, Res};
use db::{dtos::ieo::OfferingCreateRequest, models::ieo::IeoOffering};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOfferingRequest {
    pub token_symbol: String,
    pub token_name: String,
    pub description: Option<String>,
    pub price: f64,
    pub total_supply: f64,
    pub min_purchase: f64,
    pub max_purchase: f64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl CreateOfferingRequest {
    pub fn validate(self) -> Res<OfferingCreateRequest> {
        let token_symbol = self.token_symbol.trim().to_uppercase();
        let token_name = self.token_name.trim().to_string();

        if token_symbol.is_empty() || token_name.is_empty() {
            return Err(AppError::BadRequest(
                "Token symbol and name are required".to_string(),
            ));
        }
        if !(self.price > 0.0) {
            return Err(AppError::BadRequest("Price must be positive".to_string()));
        }
        if !(self.total_supply > 0.0) {
            return Err(AppError::BadRequest(
                "Total supply must be positive".to_string(),
            ));
        }
        if !(self.min_purchase > 0.0) || self.min_purchase > self.max_purchase {
            return Err(AppError::BadRequest(
                "Purchase limits must satisfy 0 < min <= max".to_string(),
            ));
        }
        if self.start_time >= self.end_time {
            return Err(AppError::BadRequest(
                "Start time must be before end time".to_string(),
            ));
        }

        Ok(OfferingCreateRequest {
            token_symbol,
            token_name,
            description: self.description.filter(|d| !d.trim().is_empty()),
            price: self.price,
            total_supply: self.total_supply,
            min_purchase: self.min_purchase,
            max_purchase: self.max_purchase,
            start_time: self.start_time,
            end_time: self.end_time,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipateRequest {
    pub amount: f64,
}

/// Checks a purchase of `amount` tokens against the offering at `now` and
/// returns its cost.
pub fn check_participation(offering: &IeoOffering, amount: f64, now: NaiveDateTime) -> Res<f64> {
    if now < offering.start_time {
        return Err(AppError::BadRequest("Offering has not started".to_string()));
    }
    if now >= offering.end_time {
        return Err(AppError::BadRequest("Offering has ended".to_string()));
    }
    if !(amount >= offering.min_purchase && amount <= offering.max_purchase) {
        return Err(AppError::BadRequest(format!(
            "Amount must be between {} and {}",
            offering.min_purchase, offering.max_purchase
        )));
    }
    if amount > offering.remaining() {
        return Err(AppError::BadRequest(
            "Not enough tokens left in this offering".to_string(),
        ));
    }

    Ok(amount * offering.price)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use uuid::Uuid;

    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn offering() -> IeoOffering {
        IeoOffering {
            id: Uuid::new_v4(),
            token_symbol: "NEW".into(),
            token_name: "New Token".into(),
            description: None,
            price: 0.5,
            total_supply: 1000.0,
            sold: 900.0,
            min_purchase: 10.0,
            max_purchase: 500.0,
            start_time: at(8),
            end_time: at(20),
            created_at: at(0),
        }
    }

    fn create_request() -> CreateOfferingRequest {
        serde_json::from_value(serde_json::json!({
            "token_symbol": " new ",
            "token_name": "New Token",
            "description": "",
            "price": 0.5,
            "total_supply": 1000.0,
            "min_purchase": 10.0,
            "max_purchase": 500.0,
            "start_time": "2025-03-01T08:00:00",
            "end_time": "2025-03-01T20:00:00"
        }))
        .unwrap()
    }

    #[test]
    fn valid_offering_is_normalized() {
        let data = create_request().validate().unwrap();
        assert_eq!(data.token_symbol, "NEW");
        assert!(data.description.is_none());
    }

    #[test]
    fn invalid_offerings_are_rejected() {
        let mut req = create_request();
        req.price = 0.0;
        assert!(req.validate().is_err());

        let mut req = create_request();
        req.min_purchase = 600.0;
        assert!(req.validate().is_err());

        let mut req = create_request();
        req.end_time = req.start_time - Duration::hours(1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn participation_cost_is_amount_times_price() {
        assert_eq!(check_participation(&offering(), 40.0, at(12)).unwrap(), 20.0);
    }

    #[test]
    fn participation_outside_window_is_rejected() {
        assert!(check_participation(&offering(), 40.0, at(7)).is_err());
        assert!(check_participation(&offering(), 40.0, at(20)).is_err());
    }

    #[test]
    fn participation_respects_limits_and_supply() {
        // below min
        assert!(check_participation(&offering(), 5.0, at(12)).is_err());
        // within limits but only 100 left
        assert!(check_participation(&offering(), 150.0, at(12)).is_err());
        assert!(check_participation(&offering(), 100.0, at(12)).is_ok());
    }
}
