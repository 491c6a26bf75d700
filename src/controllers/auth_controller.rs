use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{SignInData, SignInRequest, SignUpRequest};
use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::UserResponse;
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt;
use crate::utils::validation;

pub struct AuthController {
    repository: UserRepository,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            config,
        }
    }

    pub async fn sign_up(
        &self,
        request: SignUpRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        validation::validate_phone(&request.phone)
            .map_err(|_| AppError::BadRequest("Invalid phone number".to_string()))?;

        // Verificar que el email no exista
        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "El email ya está registrado".to_string(),
            ));
        }

        // Hash de la contraseña
        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let role = request.role.unwrap_or(UserRole::Customer);

        let user = self
            .repository
            .create(request.name, request.email, password_hash, request.phone, role)
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn sign_in(
        &self,
        request: SignInRequest,
    ) -> Result<ApiResponse<SignInData>, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = jwt::generate_token(
            user.id,
            user.role,
            &self.config.jwt_secret,
            self.config.jwt_expiration,
        )?;

        Ok(ApiResponse::success_with_message(
            SignInData {
                token,
                user: user.into(),
            },
            "Inicio de sesión exitoso".to_string(),
        ))
    }
}
