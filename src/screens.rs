//! Full-page views of the promo.

mod landing;
mod winners;

pub use landing::LandingScreen;
pub use winners::WinnersScreen;
