use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use super::error::Res;

/// Body shape shared by every JSON response of the API.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub response: bool,
    pub message: String,
    pub data: Option<T>,
}

impl Envelope<()> {
    pub fn failure(message: &str) -> Self {
        Envelope {
            response: false,
            message: message.to_string(),
            data: None,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: &str, data: T) -> Self {
        Envelope {
            response: true,
            message: message.to_string(),
            data: Some(data),
        }
    }
}

pub struct Success;
impl Success {
    pub fn created<T: Serialize>(message: &str, body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Created().json(Envelope::success(message, body)))
    }
    pub fn ok<T: Serialize>(message: &str, body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(Envelope::success(message, body)))
    }
}
