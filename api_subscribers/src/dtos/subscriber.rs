use common::{
    error::{AppError, Res},
    misc::{is_valid_email, normalize_email},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

impl SubscribeRequest {
    /// Lowercased, trimmed email; rejects malformed addresses.
    pub fn email(&self) -> Res<String> {
        let email = normalize_email(&self.email);
        if is_valid_email(&email) {
            Ok(email)
        } else {
            Err(AppError::BadRequest("Must be a valid email".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let req: SubscribeRequest =
            serde_json::from_str(r#"{"email":"  Alice@Example.COM "}"#).unwrap();
        assert_eq!(req.email().unwrap(), "alice@example.com");
    }

    #[test]
    fn malformed_email_is_rejected() {
        let req = SubscribeRequest {
            email: "not-an-email".to_string(),
        };
        assert!(matches!(req.email(), Err(AppError::BadRequest(_))));
    }
}
