//! Conexión a PostgreSQL
//!
//! Este módulo maneja la creación del pool de conexiones y la
//! inicialización del schema al arrancar el servidor.

use sqlx::PgPool;

use crate::config::database::DatabaseConfig;

/// Crear el pool de conexiones a partir de la configuración por defecto
pub async fn create_pool() -> Result<PgPool, sqlx::Error> {
    DatabaseConfig::default().create_pool().await
}

/// Inicializar el schema de la base de datos
///
/// Crea las tres tablas del sistema si no existen, en una sola transacción.
/// Los dominios de los enums se fuerzan con constraints CHECK y las
/// columnas únicas (email, matrícula) con UNIQUE. Las reservas nunca se
/// borran: al borrar un usuario o vehículo (solo posible sin reservas
/// activas) sus reservas terminales quedan desvinculadas via SET NULL.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(100) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            phone VARCHAR(20) NOT NULL,
            role VARCHAR(20) NOT NULL CHECK (role IN ('admin', 'customer'))
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            vehicle_name VARCHAR(100) NOT NULL,
            type VARCHAR(20) NOT NULL CHECK (type IN ('car', 'bike', 'van', 'SUV')),
            registration_number VARCHAR(50) NOT NULL UNIQUE,
            daily_rent_price NUMERIC(10,2) NOT NULL CHECK (daily_rent_price > 0),
            availability_status VARCHAR(20) NOT NULL
                CHECK (availability_status IN ('available', 'booked'))
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID REFERENCES users(id) ON DELETE SET NULL,
            vehicle_id UUID REFERENCES vehicles(id) ON DELETE SET NULL,
            rent_start_date DATE NOT NULL,
            rent_end_date DATE NOT NULL CHECK (rent_end_date > rent_start_date),
            total_price NUMERIC(10,2) NOT NULL CHECK (total_price > 0),
            status VARCHAR(20) NOT NULL CHECK (status IN ('active', 'cancelled', 'returned'))
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}
