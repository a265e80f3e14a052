use actix_web::body::{BoxBody, MessageBody};
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use colored::Colorize;
use db::models::user::User;
use futures::future::{LocalBoxFuture, Ready, ready};
use log::info;
use serde_json::{Map, Value, json};
use std::rc::Rc;
use std::time::Instant;

pub struct LoggerMiddleware {
    console_logging_enabled: bool,
}

impl LoggerMiddleware {
    pub fn new(console_logging_enabled: bool) -> Self {
        Self {
            console_logging_enabled,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Rc::new(service),
            console_logging_enabled: self.console_logging_enabled,
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Rc<S>,
    console_logging_enabled: bool,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();
        let params_json = parse_query_params(req.query_string());
        let console_logging_enabled = self.console_logging_enabled;
        let srv = Rc::clone(&self.service);
        let started = Instant::now();

        Box::pin(async move {
            let res = srv.call(req).await?;

            if console_logging_enabled {
                let status_code = res.status().as_u16();
                // set by the auth middleware on guarded routes
                let user_id = res
                    .request()
                    .extensions()
                    .get::<User>()
                    .map(|user| user.id.to_string());

                let colored_status = match status_code {
                    200..=299 => status_code.to_string().green(),
                    300..=399 => status_code.to_string().yellow(),
                    400..=499 => status_code.to_string().bright_red(),
                    _ => status_code.to_string().red(),
                };

                let colored_method = match method.as_str() {
                    "GET" => method.blue(),
                    "POST" => method.yellow(),
                    "PUT" | "PATCH" => method.purple(),
                    "DELETE" => method.red(),
                    _ => method.normal(),
                };

                info!(
                    "[{}] {} {} {} user_id={} params={}",
                    colored_status,
                    colored_method,
                    path.bright_white(),
                    format!("({}ms)", started.elapsed().as_millis()).bright_black(),
                    user_id.unwrap_or_else(|| "None".to_string()).bright_blue(),
                    params_json.to_string().bright_cyan(),
                );
            }

            Ok(res.map_into_boxed_body())
        })
    }
}

/// Turns `a=1&flag` into `{"a": "1", "flag": true}`.
pub fn parse_query_params(query_string: &str) -> Value {
    let mut params_map = Map::new();
    for pair in query_string.split('&').filter(|pair| !pair.is_empty()) {
        if let Some((key, value)) = pair.split_once('=') {
            params_map.insert(key.to_string(), json!(value));
        } else {
            params_map.insert(pair.to_string(), json!(true));
        }
    }
    Value::Object(params_map)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test as atest, web};

    use super::*;

    #[test]
    fn query_params_become_json_object() {
        let params = parse_query_params("side=buy&token=ETH&flag");
        assert_eq!(params["side"], "buy");
        assert_eq!(params["token"], "ETH");
        assert_eq!(params["flag"], true);
    }

    #[test]
    fn empty_query_is_empty_object() {
        assert_eq!(parse_query_params(""), json!({}));
    }

    #[actix_web::test]
    async fn passes_response_through() {
        let app = atest::init_service(
            App::new()
                .wrap(LoggerMiddleware::new(true))
                .route("/", web::get().to(|| async { HttpResponse::Ok().body("ok") })),
        )
        .await;
        let res = atest::call_service(&app, atest::TestRequest::get().uri("/?a=1").to_request()).await;
        assert!(res.status().is_success());
        assert_eq!(atest::read_body(res).await, "ok");
    }
}
