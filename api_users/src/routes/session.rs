use actix_session::Session;
use actix_web::{Responder, get};
use common::{
    error::{AppError, Res},
    http::Success,
};
use db::models::user::User;

use crate::dtos::user::AuthResponse;

/// Retrieves current session data for the logged in user from session cookies.
///
/// # Output
/// - Success: `{ userInfo, token }`
/// - Error: 401 if no session exists
#[get("/session")]
pub async fn get_session(session: Session) -> Res<impl Responder> {
    let user = session
        .get::<String>("user")
        .map_err(|_| AppError::BadRequest("Session user error".to_string()))?
        .ok_or_else(|| AppError::Unauthorized("No user data found".to_string()))?;
    let token = session
        .get::<String>("token")
        .map_err(|_| AppError::BadRequest("Session token error".to_string()))?
        .ok_or_else(|| AppError::Unauthorized("No session token found".to_string()))?;

    let user_info = serde_json::from_str::<User>(&user)
        .map_err(|_| AppError::Internal("Failed to parse user json".to_string()))?;

    Success::ok("Session found", AuthResponse { user_info, token })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test as atest};
    use serde_json::Value;

    use super::*;
    use crate::session_middleware;

    #[actix_web::test]
    async fn no_session_is_401() {
        let secret = [7u8; 64];
        let app = atest::init_service(
            App::new()
                .wrap(session_middleware(false, &secret))
                .service(get_session),
        )
        .await;
        let res =
            atest::call_service(&app, atest::TestRequest::get().uri("/session").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = atest::read_body_json(res).await;
        assert_eq!(body["message"], "No user data found");
    }
}
