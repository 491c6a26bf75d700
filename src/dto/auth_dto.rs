use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::user_dto::UserResponse;
use crate::models::user::UserRole;

// Request para registrar un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    // Ausente => customer
    pub role: Option<UserRole>,
}

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

// Datos devueltos tras un login correcto
#[derive(Debug, Serialize)]
pub struct SignInData {
    pub token: String,
    pub user: UserResponse,
}
