//! Controllers de la API
//!
//! Capa fina entre las rutas y los repositorios: validación de requests,
//! autorización y armado de la respuesta.

pub mod auth_controller;
pub mod booking_controller;
pub mod user_controller;
pub mod vehicle_controller;
