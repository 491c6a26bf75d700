//! Repositorio de Bookings
//!
//! Motor del ciclo de vida de las reservas. Todas las operaciones que
//! tocan una reserva corren en una única transacción con locks de fila
//! (`SELECT ... FOR UPDATE`) sobre el vehículo y, en updates, la reserva.
//! Cualquier error antes del commit revierte la transacción completa.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, BookingWithDetails};
use crate::models::user::UserRole;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::services::booking_rules::{self, BookingRuleError};
use crate::utils::errors::{not_found_error, AppResult};

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear una reserva
    ///
    /// Bloquea la fila del vehículo durante toda la transacción: dos
    /// creates concurrentes sobre el mismo vehículo se serializan y el
    /// perdedor ve `availability_status = booked`.
    pub async fn create(
        &self,
        customer_id: Uuid,
        vehicle_id: Uuid,
        rent_start_date: NaiveDate,
        rent_end_date: NaiveDate,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, vehicle_name, type, registration_number, daily_rent_price, availability_status
            FROM vehicles
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found_error("Vehicle"))?;

        if vehicle.availability_status != VehicleStatus::Available {
            return Err(BookingRuleError::VehicleNotAvailable.into());
        }

        let customer_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(customer_id)
                .fetch_one(&mut *tx)
                .await?;

        if !customer_exists.0 {
            return Err(not_found_error("User"));
        }

        let total_price =
            booking_rules::rental_price(vehicle.daily_rent_price, rent_start_date, rent_end_date)?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, customer_id, vehicle_id, rent_start_date, rent_end_date, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'active')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(customer_id)
        .bind(vehicle_id)
        .bind(rent_start_date)
        .bind(rent_end_date)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await?;

        // La reserva y el flip del vehículo commitean juntos o no commitean
        sqlx::query("UPDATE vehicles SET availability_status = 'booked' WHERE id = $1")
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(booking)
    }

    /// Listar reservas, aplicando antes el auto-return perezoso
    ///
    /// Dentro de la misma transacción del listado: toda reserva activa con
    /// rent_end_date anterior a hoy pasa a `returned` y su vehículo vuelve
    /// a `available`. No hay scheduler; este es el único mecanismo de
    /// reconciliación.
    pub async fn list_with_details(
        &self,
        caller_role: UserRole,
        caller_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Vec<BookingWithDetails>> {
        let mut tx = self.pool.begin().await?;

        let due = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, customer_id, vehicle_id, rent_start_date, rent_end_date, total_price, status
            FROM bookings
            WHERE status = 'active' AND rent_end_date < $1
            FOR UPDATE
            "#,
        )
        .bind(today)
        .fetch_all(&mut *tx)
        .await?;

        let transitions = booking_rules::reconcile(today, &due);

        if !transitions.is_empty() {
            let booking_ids: Vec<Uuid> = transitions.iter().map(|t| t.booking_id).collect();
            let vehicle_ids: Vec<Uuid> = transitions.iter().filter_map(|t| t.vehicle_id).collect();

            sqlx::query("UPDATE bookings SET status = 'returned' WHERE id = ANY($1)")
                .bind(booking_ids)
                .execute(&mut *tx)
                .await?;

            if !vehicle_ids.is_empty() {
                sqlx::query(
                    "UPDATE vehicles SET availability_status = 'available' WHERE id = ANY($1)",
                )
                .bind(vehicle_ids)
                .execute(&mut *tx)
                .await?;
            }
        }

        let base_query = r#"
            SELECT
                b.id,
                b.customer_id,
                b.vehicle_id,
                b.rent_start_date,
                b.rent_end_date,
                b.total_price,
                b.status,
                u.name AS customer_name,
                u.email AS customer_email,
                v.vehicle_name,
                v.type AS vehicle_type,
                v.registration_number,
                v.daily_rent_price
            FROM bookings b
            JOIN users u ON b.customer_id = u.id
            JOIN vehicles v ON b.vehicle_id = v.id
        "#;

        let bookings = match caller_role {
            UserRole::Admin => {
                let query = format!("{} ORDER BY b.rent_start_date DESC", base_query);
                sqlx::query_as::<_, BookingWithDetails>(&query)
                    .fetch_all(&mut *tx)
                    .await?
            }
            UserRole::Customer => {
                let query = format!(
                    "{} WHERE b.customer_id = $1 ORDER BY b.rent_start_date DESC",
                    base_query
                );
                sqlx::query_as::<_, BookingWithDetails>(&query)
                    .bind(caller_id)
                    .fetch_all(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;

        Ok(bookings)
    }

    /// Transicionar el estado de una reserva
    ///
    /// Bloquea la reserva y su vehículo antes de evaluar la máquina de
    /// estados. Si el estado resuelto es el actual no se escribe nada y se
    /// devuelve el registro sin cambios (no-op idempotente).
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        requested: BookingStatus,
        caller_role: UserRole,
        caller_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE id = $1 FOR UPDATE",
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found_error("Booking"))?;

        // Lock del vehículo: serializa contra creates y otros updates
        if let Some(vehicle_id) = booking.vehicle_id {
            sqlx::query("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(vehicle_id)
                .execute(&mut *tx)
                .await?;
        }

        let new_status =
            booking_rules::resolve_transition(&booking, caller_role, caller_id, requested, today)?;

        if new_status == booking.status {
            tx.commit().await?;
            return Ok(booking);
        }

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(new_status)
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        // Al salir de active el vehículo queda disponible de nuevo
        if matches!(new_status, BookingStatus::Cancelled | BookingStatus::Returned) {
            if let Some(vehicle_id) = booking.vehicle_id {
                sqlx::query("UPDATE vehicles SET availability_status = 'available' WHERE id = $1")
                    .bind(vehicle_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok(updated)
    }
}
