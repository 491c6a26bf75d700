//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking, su máquina de estados y el
//! read-model enriquecido que devuelve el listado.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::vehicle::VehicleType;

/// Estado de la reserva - mapea al CHECK constraint de la columna status
///
/// `active` es el único estado no terminal; `cancelled` y `returned`
/// son terminales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
    Returned,
}

impl BookingStatus {
    /// `active` es el único estado desde el que se puede transicionar
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Active)
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
///
/// customer_id y vehicle_id son opcionales porque las reservas nunca se
/// borran: si el usuario o el vehículo referenciado se elimina (solo
/// posible sin reservas activas), la FK queda en NULL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
}

/// Fila del listado de reservas, con los datos del cliente y del vehículo
/// unidos en la lectura (no desnormalizados en la tabla)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingWithDetails {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub vehicle_name: String,
    pub vehicle_type: VehicleType,
    pub registration_number: String,
    pub daily_rent_price: Decimal,
}
