//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus enums para CRUD operations.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de vehículo - mapea al CHECK constraint de la columna type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bike,
    Van,
    // La columna guarda 'SUV' en mayúsculas
    #[sqlx(rename = "SUV")]
    #[serde(rename = "SUV")]
    Suv,
}

/// Estado de disponibilidad - mapea al CHECK constraint de availability_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Booked,
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub vehicle_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub registration_number: String,
    pub daily_rent_price: Decimal,
    pub availability_status: VehicleStatus,
}
