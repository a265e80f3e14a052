use common::role::Role;

pub struct UserCreateRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub age: Option<i32>,
    pub verified: bool,
}

/// Fields left as `None` keep their stored value.
#[derive(Default)]
pub struct UserUpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub age: Option<i32>,
}
