use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::booking_dto::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::{Booking, BookingStatus, BookingWithDetails};
use crate::models::user::UserRole;
use crate::repositories::booking_repository::BookingRepository;
use crate::services::authorization_service::{authorize, Operation};
use crate::utils::errors::AppError;

pub struct BookingController {
    repository: BookingRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BookingRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<Booking>, AppError> {
        // Un customer solo puede reservar para sí mismo; un admin para
        // cualquier usuario (él mismo si no se indica)
        let customer_id = match caller.role {
            UserRole::Admin => request.customer_id.unwrap_or(caller.user_id),
            UserRole::Customer => {
                if let Some(requested_customer) = request.customer_id {
                    if requested_customer != caller.user_id {
                        return Err(AppError::Forbidden(
                            "Customers can only create bookings for themselves".to_string(),
                        ));
                    }
                }
                caller.user_id
            }
        };

        authorize(
            caller.role,
            Operation::CreateBooking,
            Some(customer_id),
            caller.user_id,
        )?;

        let booking = self
            .repository
            .create(
                customer_id,
                request.vehicle_id,
                request.rent_start_date,
                request.rent_end_date,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            booking,
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<BookingWithDetails>>, AppError> {
        authorize(caller.role, Operation::ListBookings, None, caller.user_id)?;

        let today = Utc::now().date_naive();
        let bookings = self
            .repository
            .list_with_details(caller.role, caller.user_id, today)
            .await?;

        Ok(ApiResponse::success_with_message(
            bookings,
            "Reservas obtenidas exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        caller: &AuthenticatedUser,
        booking_id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<Booking>, AppError> {
        // La propiedad de la reserva se verifica sobre la fila bloqueada
        authorize(
            caller.role,
            Operation::UpdateBookingStatus,
            None,
            caller.user_id,
        )?;

        let today = Utc::now().date_naive();
        let booking = self
            .repository
            .update_status(booking_id, request.status, caller.role, caller.user_id, today)
            .await?;

        let message = match booking.status {
            BookingStatus::Cancelled => "Reserva cancelada exitosamente",
            BookingStatus::Returned => {
                "Reserva marcada como devuelta. El vehículo está disponible nuevamente"
            }
            BookingStatus::Active => "Estado de la reserva actualizado",
        };

        Ok(ApiResponse::success_with_message(
            booking,
            message.to_string(),
        ))
    }
}
