//! Data models for rental records and their categorical codes.

mod rental_record;

#[allow(unused_imports)]
pub use rental_record::{CodeError, Month, RentalData, RentalRecord, Season, Weekday, YearCode};
