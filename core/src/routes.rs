use actix_web::{HttpResponse, Responder, error, get, web};
use common::{error::AppError, http::Envelope};

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Server is running!")
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(Envelope::failure("Endpoint Not Found"))
}

/// Malformed JSON bodies answer with the regular 400 envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::ContentType => {
                "Content type must be application/json".to_string()
            }
            other => format!("Invalid JSON body: {}", other),
        };
        error::InternalError::from_response(err, AppError::BadRequest(message).to_http_response())
            .into()
    })
}

/// Path segments that do not parse, like a malformed id, answer with a 400 envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid path parameter: {}", err);
        error::InternalError::from_response(err, AppError::BadRequest(message).to_http_response())
            .into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid query string: {}", err);
        error::InternalError::from_response(err, AppError::BadRequest(message).to_http_response())
            .into()
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use actix_web::{App, body, http::StatusCode, post, test as atest};
    use serde_json::Value;

    use super::*;

    #[get("/item/{id}")]
    async fn item(id: web::Path<u32>) -> impl Responder {
        HttpResponse::Ok().body(id.to_string())
    }

    #[get("/items")]
    async fn items(query: web::Query<HashMap<String, u32>>) -> impl Responder {
        HttpResponse::Ok().body(query.len().to_string())
    }

    #[post("/echo")]
    async fn echo(body: web::Json<Value>) -> impl Responder {
        HttpResponse::Ok().json(body.into_inner())
    }

    #[actix_web::test]
    async fn index_reports_running() {
        let app = atest::init_service(App::new().service(index)).await;
        let res = atest::call_service(&app, atest::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = body::to_bytes(res.into_body()).await.unwrap();
        assert_eq!(bytes, "Server is running!");
    }

    #[actix_web::test]
    async fn unknown_path_gets_not_found_envelope() {
        let app = atest::init_service(
            App::new()
                .service(index)
                .default_service(web::to(not_found)),
        )
        .await;
        let req = atest::TestRequest::get().uri("/api/nope").to_request();
        let res = atest::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json: Value = atest::read_body_json(res).await;
        assert_eq!(json["response"], false);
        assert_eq!(json["message"], "Endpoint Not Found");
    }

    #[actix_web::test]
    async fn malformed_json_is_bad_request_envelope() {
        let app = atest::init_service(App::new().app_data(json_config()).service(echo)).await;
        let req = atest::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = atest::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json: Value = atest::read_body_json(res).await;
        assert_eq!(json["response"], false);
    }

    #[actix_web::test]
    async fn malformed_path_segment_is_bad_request_envelope() {
        let app = atest::init_service(App::new().app_data(path_config()).service(item)).await;
        let res =
            atest::call_service(&app, atest::TestRequest::get().uri("/item/not-a-number").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json: Value = atest::read_body_json(res).await;
        assert_eq!(json["response"], false);
        assert!(json["message"].as_str().unwrap().starts_with("Invalid path parameter"));

        let res = atest::call_service(&app, atest::TestRequest::get().uri("/item/7").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn malformed_query_is_bad_request_envelope() {
        let app = atest::init_service(App::new().app_data(query_config()).service(items)).await;
        let res =
            atest::call_service(&app, atest::TestRequest::get().uri("/items?page=abc").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json: Value = atest::read_body_json(res).await;
        assert!(json["message"].as_str().unwrap().starts_with("Invalid query string"));
    }
}
