//! SeaORM entities for the booking directory tables.

pub mod artist;
pub mod show;
pub mod venue;

pub mod prelude {
    pub use super::artist::Entity as Artist;
    pub use super::show::Entity as Show;
    pub use super::venue::Entity as Venue;
}
