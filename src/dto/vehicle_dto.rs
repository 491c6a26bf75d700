use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{VehicleStatus, VehicleType};

// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub vehicle_name: String,

    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,

    #[validate(length(min = 3, max = 50))]
    pub registration_number: String,

    pub daily_rent_price: Decimal,

    // Ausente => available
    pub availability_status: Option<VehicleStatus>,
}

// Request para actualizar un vehículo existente (sparse update)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub vehicle_name: Option<String>,

    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,

    pub daily_rent_price: Option<Decimal>,

    pub availability_status: Option<VehicleStatus>,
}
