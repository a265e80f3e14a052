use std::{future::Future, pin::Pin, rc::Rc, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use common::{
    env_config::Config,
    error::{AppError, Res},
    jwt,
    role::Role,
};
use db::models::user::User;
use futures::future::{Ready, ok};
use sqlx::PgPool;
use uuid::Uuid;

pub const NO_CREDENTIALS: &str = "Access denied. No credentials sent!";
pub const AUTHENTICATION_FAILED: &str = "Authentication failed!";
pub const UNAUTHORIZED: &str = "Unauthorized";

pub struct AuthMiddleware {
    roles: Rc<Vec<Role>>,
}

impl AuthMiddleware {
    pub fn new(roles: &[Role]) -> Self {
        AuthMiddleware {
            roles: Rc::new(roles.to_vec()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Arc::new(service),
            roles: self.roles.clone(),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Arc<S>,
    roles: Rc<Vec<Role>>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Arc::clone(&self.service);
        let roles = self.roles.clone();

        Box::pin(async move {
            match authenticate(&req, &roles).await {
                Ok(user) => {
                    // handlers read the caller as web::ReqData<User>
                    req.extensions_mut().insert(user);
                    srv.call(req).await.map(|res| res.map_into_boxed_body())
                }
                Err(err) => {
                    log::warn!("Authentication error on {}: {}", req.path(), err);
                    Ok(req.error_response(err))
                }
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest, roles: &[Role]) -> Res<User> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(jwt::bearer_token)
        .ok_or_else(|| AppError::Unauthorized(NO_CREDENTIALS.to_string()))?;

    let config = req
        .app_data::<web::Data<Arc<Config>>>()
        .ok_or_else(|| AppError::Internal("Config is not registered".to_string()))?;

    // verify token
    let claims = jwt::validate_jwt(token, &config.jwt_config.secret).map_err(|e| {
        log::debug!("Token rejected: {}", e);
        AppError::Unauthorized(AUTHENTICATION_FAILED.to_string())
    })?;

    let pool = req
        .app_data::<web::Data<Arc<PgPool>>>()
        .ok_or_else(|| AppError::Internal("Database pool is not registered".to_string()))?;
    let pool: &PgPool = pool.get_ref();

    let user = db::user::find_user_by_id(pool, claims.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(AUTHENTICATION_FAILED.to_string()))?;

    authorize(&user, req.match_info().get("id"), roles)?;
    Ok(user)
}

/// Owner of the `{id}` path segment always passes. Otherwise a non-empty
/// `roles` list must contain the user's role.
pub fn authorize(user: &User, path_id: Option<&str>, roles: &[Role]) -> Res<()> {
    let owner_authorized = path_id
        .and_then(|id| id.parse::<Uuid>().ok())
        .is_some_and(|id| id == user.id);

    if owner_authorized || roles.is_empty() {
        return Ok(());
    }

    match user.role.parse::<Role>() {
        Ok(role) if roles.contains(&role) => Ok(()),
        _ => Err(AppError::Forbidden(UNAUTHORIZED.to_string())),
    }
}
