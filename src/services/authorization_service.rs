//! Servicio de autorización
//!
//! Este módulo implementa el chequeo de capacidades por rol como un
//! predicado explícito evaluado antes de cada operación, en lugar de
//! middleware de roles por ruta.

use uuid::Uuid;

use crate::models::user::UserRole;
use crate::utils::errors::AppError;

/// Operaciones de la API sujetas a autorización
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListUsers,
    UpdateUser,
    DeleteUser,
    CreateVehicle,
    ListVehicles,
    GetVehicle,
    UpdateVehicle,
    DeleteVehicle,
    CreateBooking,
    ListBookings,
    UpdateBookingStatus,
}

/// Predicado de autorización: (rol, operación, dueño del recurso) -> permitido
///
/// `resource_owner` es el dueño del recurso afectado cuando se conoce antes
/// de abrir la transacción; `None` significa que el chequeo de propiedad se
/// difiere al row-lock de la operación (caso UpdateBookingStatus).
pub fn authorize(
    role: UserRole,
    operation: Operation,
    resource_owner: Option<Uuid>,
    caller_id: Uuid,
) -> Result<(), AppError> {
    if role == UserRole::Admin {
        return Ok(());
    }

    let allowed = match operation {
        Operation::ListVehicles | Operation::GetVehicle | Operation::ListBookings => true,

        // Scoped al propio usuario
        Operation::CreateBooking | Operation::UpdateUser => {
            resource_owner.map_or(true, |owner| owner == caller_id)
        }

        // La propiedad se verifica sobre la fila bloqueada
        Operation::UpdateBookingStatus => true,

        Operation::ListUsers
        | Operation::DeleteUser
        | Operation::CreateVehicle
        | Operation::UpdateVehicle
        | Operation::DeleteVehicle => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You are not authorized to perform this operation".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_can_do_everything() {
        let admin = Uuid::new_v4();
        let other = Uuid::new_v4();

        for op in [
            Operation::ListUsers,
            Operation::UpdateUser,
            Operation::DeleteUser,
            Operation::CreateVehicle,
            Operation::ListVehicles,
            Operation::GetVehicle,
            Operation::UpdateVehicle,
            Operation::DeleteVehicle,
            Operation::CreateBooking,
            Operation::ListBookings,
            Operation::UpdateBookingStatus,
        ] {
            assert!(authorize(UserRole::Admin, op, Some(other), admin).is_ok());
        }
    }

    #[test]
    fn test_customer_read_access() {
        let caller = Uuid::new_v4();
        assert!(authorize(UserRole::Customer, Operation::ListVehicles, None, caller).is_ok());
        assert!(authorize(UserRole::Customer, Operation::GetVehicle, None, caller).is_ok());
        assert!(authorize(UserRole::Customer, Operation::ListBookings, None, caller).is_ok());
    }

    #[test]
    fn test_customer_cannot_manage_fleet_or_users() {
        let caller = Uuid::new_v4();
        for op in [
            Operation::ListUsers,
            Operation::DeleteUser,
            Operation::CreateVehicle,
            Operation::UpdateVehicle,
            Operation::DeleteVehicle,
        ] {
            assert!(authorize(UserRole::Customer, op, None, caller).is_err());
        }
    }

    #[test]
    fn test_customer_scoped_to_own_records() {
        let caller = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(
            authorize(UserRole::Customer, Operation::CreateBooking, Some(caller), caller).is_ok()
        );
        assert!(
            authorize(UserRole::Customer, Operation::CreateBooking, Some(other), caller).is_err()
        );
        assert!(authorize(UserRole::Customer, Operation::UpdateUser, Some(caller), caller).is_ok());
        assert!(authorize(UserRole::Customer, Operation::UpdateUser, Some(other), caller).is_err());
    }
}
