use common::{
    error::{AppError, Res},
    misc::{is_valid_email, normalize_email},
    role::Role,
};
use db::models::user::User;
use serde::{Deserialize, Serialize};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub age: Option<i32>,
}

impl SignupRequest {
    /// Checks the fields and returns the request with its email normalized.
    pub fn validate(mut self) -> Res<Self> {
        self.email = normalize_email(&self.email);
        if self.username.trim().len() < MIN_USERNAME_LEN {
            return Err(AppError::BadRequest(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::BadRequest("Must be a valid email".to_string()));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::BadRequest(format!(
                "Password must contain at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.password != self.confirm_password {
            return Err(AppError::BadRequest(
                "confirm_password field must have the same value as the password field"
                    .to_string(),
            ));
        }
        validate_age(self.age)?;
        Ok(self)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub age: Option<i32>,
}

impl UpdateUserRequest {
    pub fn validate(mut self) -> Res<Self> {
        self.email = self.email.as_deref().map(normalize_email);
        if self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.role.is_none()
            && self.age.is_none()
        {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }
        if let Some(username) = &self.username {
            if username.trim().len() < MIN_USERNAME_LEN {
                return Err(AppError::BadRequest(format!(
                    "Username must be at least {} characters",
                    MIN_USERNAME_LEN
                )));
            }
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err(AppError::BadRequest("Must be a valid email".to_string()));
            }
        }
        validate_age(self.age)?;
        Ok(self)
    }
}

fn validate_age(age: Option<i32>) -> Res<()> {
    match age {
        Some(age) if !(0..=150).contains(&age) => {
            Err(AppError::BadRequest("Age must be a number between 0 and 150".to_string()))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailVerifyRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailConfirmRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_info: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupRequest {
        SignupRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            age: Some(30),
        }
    }

    #[test]
    fn valid_signup_passes() {
        assert!(signup().validate().is_ok());
    }

    #[test]
    fn signup_rejections() {
        let mut req = signup();
        req.username = "al".to_string();
        assert!(req.validate().is_err());

        let mut req = signup();
        req.email = "alice".to_string();
        assert!(req.validate().is_err());

        let mut req = signup();
        req.password = "short".to_string();
        req.confirm_password = "short".to_string();
        assert!(req.validate().is_err());

        let mut req = signup();
        req.confirm_password = "secret2".to_string();
        assert!(req.validate().is_err());

        let mut req = signup();
        req.age = Some(-1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn signup_accepts_missing_names() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"username":"bob","email":"bob@example.com","password":"123456","confirm_password":"123456"}"#,
        )
        .unwrap();
        let req = req.validate().unwrap();
        assert_eq!(req.age, None);
    }

    #[test]
    fn emails_are_normalized() {
        let mut req = signup();
        req.email = " Alice@Example.com ".to_string();
        assert_eq!(req.validate().unwrap().email, "alice@example.com");

        let req = UpdateUserRequest {
            email: Some("BOB@Example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(req.validate().unwrap().email.as_deref(), Some("bob@example.com"));
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(UpdateUserRequest::default().validate().is_err());
        let req = UpdateUserRequest {
            first_name: Some("Al".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_parses_role() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"role":"super_user"}"#).unwrap();
        assert_eq!(req.role, Some(Role::SuperUser));
    }
}
