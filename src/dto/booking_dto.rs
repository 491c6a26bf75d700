use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::booking::BookingStatus;

// Request para crear una reserva
//
// customer_id es opcional: un admin puede reservar para cualquier usuario
// (por defecto él mismo); un customer solo para sí mismo.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Uuid,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
}

// Request para transicionar el estado de una reserva
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}
