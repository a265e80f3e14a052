use common::role::Role;
use db::models::user::User;
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}

/// Route guard. An empty `roles` slice admits any authenticated user;
/// otherwise the caller must own the `{id}` in the path or hold one of `roles`.
pub fn middleware(roles: &[Role]) -> AuthMiddleware {
    AuthMiddleware::new(roles)
}

pub fn has_role(user: &User, role: Role) -> bool {
    user.role.parse::<Role>().is_ok_and(|r| r == role)
}
