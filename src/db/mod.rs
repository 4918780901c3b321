use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::db::entities::prelude::{Artist, Show, Venue};
use crate::server::config::ServerConfig;

pub mod entities;
pub mod genres;
pub mod models;
pub mod seed;
pub mod services;

/// Opens the connection pool described by the server configuration.
pub async fn connect(config: &ServerConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.to_owned());
    opt.max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    info!(backend = ?db.get_database_backend(), "Database connection established.");
    Ok(db)
}

/// Creates the venue, artist and show tables if they are missing.
///
/// Shows are created last since they carry foreign keys to both other tables.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut venues = schema.create_table_from_entity(Venue);
    let mut artists = schema.create_table_from_entity(Artist);
    let mut shows = schema.create_table_from_entity(Show);

    for stmt in [venues.if_not_exists(), artists.if_not_exists(), shows.if_not_exists()] {
        db.execute(backend.build(&*stmt)).await?;
    }
    Ok(())
}
