//! Repositorio de Vehicles
//!
//! CRUD de la flota con el guard de integridad referencial: un vehículo
//! referenciado por una reserva activa no se puede borrar.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Campos modificables de un vehículo; None deja el valor actual
#[derive(Debug, Default)]
pub struct VehicleChanges {
    pub vehicle_name: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub daily_rent_price: Option<Decimal>,
    pub availability_status: Option<VehicleStatus>,
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_name: String,
        vehicle_type: VehicleType,
        registration_number: String,
        daily_rent_price: Decimal,
        availability_status: VehicleStatus,
    ) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, vehicle_name, type, registration_number, daily_rent_price, availability_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_name)
        .bind(vehicle_type)
        .bind(registration_number)
        .bind(daily_rent_price)
        .bind(availability_status)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY vehicle_name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn registration_number_exists(
        &self,
        registration_number: &str,
    ) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE registration_number = $1)",
        )
        .bind(registration_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Sparse update: los campos ausentes conservan el valor actual.
    /// La matrícula es inmutable una vez creada.
    pub async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Vehicle> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vehicle_name = $2, type = $3, daily_rent_price = $4, availability_status = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.vehicle_name.unwrap_or(current.vehicle_name))
        .bind(changes.vehicle_type.unwrap_or(current.vehicle_type))
        .bind(changes.daily_rent_price.unwrap_or(current.daily_rent_price))
        .bind(
            changes
                .availability_status
                .unwrap_or(current.availability_status),
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Borrar un vehículo, bloqueado si tiene reservas activas
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if !exists.0 {
            return Err(not_found_error("Vehicle"));
        }

        let has_active: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE vehicle_id = $1 AND status = 'active')",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if has_active.0 {
            return Err(AppError::BadRequest(
                "Vehicle has active bookings and cannot be deleted".to_string(),
            ));
        }

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
