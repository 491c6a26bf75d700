use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserRole;
use crate::repositories::user_repository::{UserChanges, UserRepository};
use crate::services::authorization_service::{authorize, Operation};
use crate::utils::errors::AppError;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
        authorize(caller.role, Operation::ListUsers, None, caller.user_id)?;

        let users = self.repository.find_all().await?;
        let response = users.into_iter().map(UserResponse::from).collect();

        Ok(ApiResponse::success_with_message(
            response,
            "Usuarios obtenidos exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;
        authorize(caller.role, Operation::UpdateUser, Some(user_id), caller.user_id)?;

        // El rol solo lo puede cambiar un admin
        if request.role.is_some() && caller.role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "Only an admin can change a user's role".to_string(),
            ));
        }

        let password_hash = match request.password {
            Some(password) => Some(
                hash(&password, DEFAULT_COST)
                    .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?,
            ),
            None => None,
        };

        let user = self
            .repository
            .update(
                user_id,
                UserChanges {
                    name: request.name,
                    email: request.email,
                    password_hash,
                    phone: request.phone,
                    role: request.role,
                },
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(
        &self,
        caller: &AuthenticatedUser,
        user_id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        authorize(caller.role, Operation::DeleteUser, Some(user_id), caller.user_id)?;

        self.repository.delete(user_id).await?;

        Ok(ApiResponse::message_only(
            "Usuario eliminado exitosamente".to_string(),
        ))
    }
}
