//! Data access layer for the rental dataset.

mod csv_loader;

pub use csv_loader::load_rentals;
