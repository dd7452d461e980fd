//! Domain types for the cafe catalogue.

pub mod cafe;

pub use cafe::{Amenities, Cafe, CafeForm, CafeView, FormError, NewCafe};
