use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::vehicle_repository::{VehicleChanges, VehicleRepository};
use crate::services::authorization_service::{authorize, Operation};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;
        authorize(caller.role, Operation::CreateVehicle, None, caller.user_id)?;

        validation::validate_not_empty(&request.vehicle_name)
            .map_err(|_| AppError::BadRequest("vehicle_name is required".to_string()))?;

        validation::validate_positive(request.daily_rent_price).map_err(|_| {
            AppError::BadRequest("daily_rent_price must be greater than zero".to_string())
        })?;

        validation::validate_registration_number(&request.registration_number)
            .map_err(|_| AppError::BadRequest("Invalid registration number".to_string()))?;

        // Verificar que la matrícula no exista
        if self
            .repository
            .registration_number_exists(&request.registration_number)
            .await?
        {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .create(
                request.vehicle_name,
                request.vehicle_type,
                request.registration_number,
                request.daily_rent_price,
                request
                    .availability_status
                    .unwrap_or(VehicleStatus::Available),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<Vehicle>>, AppError> {
        authorize(caller.role, Operation::ListVehicles, None, caller.user_id)?;

        let vehicles = self.repository.find_all().await?;

        Ok(ApiResponse::success_with_message(
            vehicles,
            "Vehículos obtenidos exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        caller: &AuthenticatedUser,
        vehicle_id: Uuid,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        authorize(caller.role, Operation::GetVehicle, None, caller.user_id)?;

        let vehicle = self
            .repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        Ok(ApiResponse::success(vehicle))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        vehicle_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;
        authorize(caller.role, Operation::UpdateVehicle, None, caller.user_id)?;

        if let Some(price) = request.daily_rent_price {
            validation::validate_positive(price).map_err(|_| {
                AppError::BadRequest("daily_rent_price must be greater than zero".to_string())
            })?;
        }

        let vehicle = self
            .repository
            .update(
                vehicle_id,
                VehicleChanges {
                    vehicle_name: request.vehicle_name,
                    vehicle_type: request.vehicle_type,
                    daily_rent_price: request.daily_rent_price,
                    availability_status: request.availability_status,
                },
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(
        &self,
        caller: &AuthenticatedUser,
        vehicle_id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        authorize(caller.role, Operation::DeleteVehicle, None, caller.user_id)?;

        self.repository.delete(vehicle_id).await?;

        Ok(ApiResponse::message_only(
            "Vehículo eliminado exitosamente".to_string(),
        ))
    }
}
