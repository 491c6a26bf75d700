//! Reglas de negocio de las reservas
//!
//! Este módulo concentra la lógica pura del ciclo de vida de una reserva:
//! cálculo del precio, la máquina de estados de las transiciones y la
//! selección de reservas vencidas para el auto-return. Todo es puro y
//! sin I/O; el repositorio aplica los resultados dentro de su transacción.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus};
use crate::models::user::UserRole;
use crate::utils::errors::AppError;

/// Fallos de las reglas de reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingRuleError {
    #[error("Vehicle is not available for booking")]
    VehicleNotAvailable,

    #[error("rent_end_date must be after rent_start_date")]
    InvalidDateRange,

    #[error("daily_rent_price must be greater than zero")]
    InvalidDailyPrice,

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Cannot cancel booking after start date")]
    CannotCancelAfterStart,

    #[error("Only active bookings can be marked as returned")]
    OnlyActiveCanBeReturned,
}

impl From<BookingRuleError> for AppError {
    fn from(err: BookingRuleError) -> Self {
        match err {
            BookingRuleError::VehicleNotAvailable => AppError::Conflict(err.to_string()),
            BookingRuleError::InvalidDateRange => AppError::BadRequest(err.to_string()),
            BookingRuleError::InvalidDailyPrice => AppError::BadRequest(err.to_string()),
            BookingRuleError::NotAuthorized => AppError::Forbidden(err.to_string()),
            BookingRuleError::CannotCancelAfterStart => AppError::BadRequest(err.to_string()),
            BookingRuleError::OnlyActiveCanBeReturned => AppError::BadRequest(err.to_string()),
        }
    }
}

/// Días completos entre las dos fechas del alquiler
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Precio total del alquiler: daily_rent_price × días
pub fn rental_price(
    daily_rent_price: Decimal,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Decimal, BookingRuleError> {
    let days = rental_days(start, end);
    if days <= 0 {
        return Err(BookingRuleError::InvalidDateRange);
    }

    if daily_rent_price <= Decimal::ZERO {
        return Err(BookingRuleError::InvalidDailyPrice);
    }

    Ok(daily_rent_price * Decimal::from(days))
}

/// Máquina de estados de las transiciones de una reserva
///
/// Resuelve (estado actual × rol × estado pedido) al nuevo estado o a un
/// error. El auto-return del sistema (hoy > rent_end_date con reserva
/// activa) se evalúa al final y pisa cualquier resultado del rol.
/// Devolver el estado actual significa no-op idempotente.
pub fn resolve_transition(
    booking: &Booking,
    caller_role: UserRole,
    caller_id: Uuid,
    requested: BookingStatus,
    today: NaiveDate,
) -> Result<BookingStatus, BookingRuleError> {
    let mut new_status = booking.status;

    match caller_role {
        UserRole::Customer => {
            if booking.customer_id != Some(caller_id) {
                return Err(BookingRuleError::NotAuthorized);
            }

            match requested {
                BookingStatus::Cancelled => {
                    // Solo se puede cancelar antes de la fecha de inicio
                    if today >= booking.rent_start_date {
                        return Err(BookingRuleError::CannotCancelAfterStart);
                    }
                    new_status = BookingStatus::Cancelled;
                }
                BookingStatus::Active => {
                    new_status = booking.status;
                }
                BookingStatus::Returned => {
                    return Err(BookingRuleError::NotAuthorized);
                }
            }
        }
        UserRole::Admin => match requested {
            BookingStatus::Returned => {
                if booking.status.is_terminal() {
                    return Err(BookingRuleError::OnlyActiveCanBeReturned);
                }
                new_status = BookingStatus::Returned;
            }
            // Override de admin: el estado pedido se aplica tal cual
            other => {
                new_status = other;
            }
        },
    }

    // Auto-return del sistema
    if booking.status == BookingStatus::Active && today > booking.rent_end_date {
        new_status = BookingStatus::Returned;
    }

    Ok(new_status)
}

/// Transición pendiente de auto-return calculada por `reconcile`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoReturn {
    pub booking_id: Uuid,
    pub vehicle_id: Option<Uuid>,
}

/// Reserva activa ya vencida (rent_end_date estrictamente anterior a hoy)
pub fn auto_return_due(booking: &Booking, today: NaiveDate) -> bool {
    booking.status == BookingStatus::Active && booking.rent_end_date < today
}

/// Selección perezosa de auto-return aplicada antes de cada listado:
/// devuelve las reservas activas vencidas que deben pasar a `returned`
/// (y cuyos vehículos vuelven a `available`)
pub fn reconcile(today: NaiveDate, bookings: &[Booking]) -> Vec<AutoReturn> {
    bookings
        .iter()
        .filter(|b| auto_return_due(b, today))
        .map(|b| AutoReturn {
            booking_id: b.id,
            vehicle_id: b.vehicle_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(status: BookingStatus, start: NaiveDate, end: NaiveDate) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            customer_id: Some(Uuid::new_v4()),
            vehicle_id: Some(Uuid::new_v4()),
            rent_start_date: start,
            rent_end_date: end,
            total_price: Decimal::new(30000, 2),
            status,
        }
    }

    fn owner(b: &Booking) -> Uuid {
        b.customer_id.unwrap()
    }

    #[test]
    fn test_rental_price() {
        // 100/día × 3 días = 300
        let price = rental_price(
            Decimal::from(100),
            date(2024, 1, 1),
            date(2024, 1, 4),
        )
        .unwrap();
        assert_eq!(price, Decimal::from(300));
    }

    #[test]
    fn test_rental_price_invalid_range() {
        let daily = Decimal::from(100);
        assert_eq!(
            rental_price(daily, date(2024, 1, 4), date(2024, 1, 4)),
            Err(BookingRuleError::InvalidDateRange)
        );
        assert_eq!(
            rental_price(daily, date(2024, 1, 4), date(2024, 1, 1)),
            Err(BookingRuleError::InvalidDateRange)
        );
    }

    #[test]
    fn test_rental_price_invalid_daily_price() {
        assert_eq!(
            rental_price(Decimal::ZERO, date(2024, 1, 1), date(2024, 1, 4)),
            Err(BookingRuleError::InvalidDailyPrice)
        );
    }

    #[test]
    fn test_owner_can_cancel_before_start() {
        let b = booking(BookingStatus::Active, date(2024, 6, 10), date(2024, 6, 15));
        let resolved = resolve_transition(
            &b,
            UserRole::Customer,
            owner(&b),
            BookingStatus::Cancelled,
            date(2024, 6, 5),
        )
        .unwrap();
        assert_eq!(resolved, BookingStatus::Cancelled);
    }

    #[test]
    fn test_cancel_on_start_date_rejected() {
        let b = booking(BookingStatus::Active, date(2024, 6, 10), date(2024, 6, 15));
        // El mismo día de inicio ya no se puede cancelar
        let result = resolve_transition(
            &b,
            UserRole::Customer,
            owner(&b),
            BookingStatus::Cancelled,
            date(2024, 6, 10),
        );
        assert_eq!(result, Err(BookingRuleError::CannotCancelAfterStart));
    }

    #[test]
    fn test_non_owner_rejected() {
        let b = booking(BookingStatus::Active, date(2024, 6, 10), date(2024, 6, 15));
        let result = resolve_transition(
            &b,
            UserRole::Customer,
            Uuid::new_v4(),
            BookingStatus::Cancelled,
            date(2024, 6, 5),
        );
        assert_eq!(result, Err(BookingRuleError::NotAuthorized));
    }

    #[test]
    fn test_customer_cannot_mark_returned() {
        let b = booking(BookingStatus::Active, date(2024, 6, 10), date(2024, 6, 15));
        let result = resolve_transition(
            &b,
            UserRole::Customer,
            owner(&b),
            BookingStatus::Returned,
            date(2024, 6, 5),
        );
        assert_eq!(result, Err(BookingRuleError::NotAuthorized));
    }

    #[test]
    fn test_customer_requesting_active_is_noop() {
        let b = booking(BookingStatus::Active, date(2024, 6, 10), date(2024, 6, 15));
        let resolved = resolve_transition(
            &b,
            UserRole::Customer,
            owner(&b),
            BookingStatus::Active,
            date(2024, 6, 5),
        )
        .unwrap();
        assert_eq!(resolved, BookingStatus::Active);
    }

    #[test]
    fn test_admin_returns_active_booking() {
        let b = booking(BookingStatus::Active, date(2024, 6, 10), date(2024, 6, 15));
        let resolved = resolve_transition(
            &b,
            UserRole::Admin,
            Uuid::new_v4(),
            BookingStatus::Returned,
            date(2024, 6, 12),
        )
        .unwrap();
        assert_eq!(resolved, BookingStatus::Returned);
    }

    #[test]
    fn test_admin_cannot_return_terminal_booking() {
        for status in [BookingStatus::Cancelled, BookingStatus::Returned] {
            let b = booking(status, date(2024, 6, 10), date(2024, 6, 15));
            let result = resolve_transition(
                &b,
                UserRole::Admin,
                Uuid::new_v4(),
                BookingStatus::Returned,
                date(2024, 6, 12),
            );
            assert_eq!(result, Err(BookingRuleError::OnlyActiveCanBeReturned));
        }
    }

    #[test]
    fn test_admin_override_cancel() {
        let b = booking(BookingStatus::Active, date(2024, 6, 10), date(2024, 6, 15));
        let resolved = resolve_transition(
            &b,
            UserRole::Admin,
            Uuid::new_v4(),
            BookingStatus::Cancelled,
            date(2024, 6, 12),
        )
        .unwrap();
        assert_eq!(resolved, BookingStatus::Cancelled);
    }

    #[test]
    fn test_same_status_resolves_to_noop() {
        let b = booking(BookingStatus::Active, date(2024, 6, 10), date(2024, 6, 15));
        let resolved = resolve_transition(
            &b,
            UserRole::Admin,
            Uuid::new_v4(),
            BookingStatus::Active,
            date(2024, 6, 12),
        )
        .unwrap();
        assert_eq!(resolved, b.status);
    }

    #[test]
    fn test_system_auto_return_overrides_request() {
        // Reserva activa vencida: cualquier pedido resuelto termina en returned
        let b = booking(BookingStatus::Active, date(2024, 6, 1), date(2024, 6, 5));
        let resolved = resolve_transition(
            &b,
            UserRole::Admin,
            Uuid::new_v4(),
            BookingStatus::Active,
            date(2024, 6, 10),
        )
        .unwrap();
        assert_eq!(resolved, BookingStatus::Returned);

        let resolved = resolve_transition(
            &b,
            UserRole::Customer,
            owner(&b),
            BookingStatus::Active,
            date(2024, 6, 10),
        )
        .unwrap();
        assert_eq!(resolved, BookingStatus::Returned);
    }

    #[test]
    fn test_auto_return_does_not_touch_terminal_bookings() {
        let b = booking(BookingStatus::Cancelled, date(2024, 6, 1), date(2024, 6, 5));
        let resolved = resolve_transition(
            &b,
            UserRole::Admin,
            Uuid::new_v4(),
            BookingStatus::Cancelled,
            date(2024, 6, 10),
        )
        .unwrap();
        assert_eq!(resolved, BookingStatus::Cancelled);
    }

    #[test]
    fn test_reconcile_selects_only_overdue_actives() {
        let today = date(2024, 6, 10);
        let overdue = booking(BookingStatus::Active, date(2024, 6, 1), date(2024, 6, 5));
        // Termina hoy: todavía no vence (estrictamente anterior)
        let ends_today = booking(BookingStatus::Active, date(2024, 6, 5), date(2024, 6, 10));
        let ongoing = booking(BookingStatus::Active, date(2024, 6, 5), date(2024, 6, 20));
        let already_returned =
            booking(BookingStatus::Returned, date(2024, 6, 1), date(2024, 6, 5));

        let bookings = [overdue.clone(), ends_today, ongoing, already_returned];
        let transitions = reconcile(today, &bookings);

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].booking_id, overdue.id);
        assert_eq!(transitions[0].vehicle_id, overdue.vehicle_id);
    }
}
