//! Módulo de base de datos
//!
//! Maneja la conexión y la inicialización del schema PostgreSQL.

pub mod connection;

pub use connection::{create_pool, init_schema};
