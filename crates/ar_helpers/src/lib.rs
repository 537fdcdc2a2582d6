//! Host-side helpers for the augmented reality games: the app builder, gesture
//! recognition, the spatial mapping session and spoken announcements.

mod app;
pub use app::*;

pub mod input;
pub mod spatial;
pub mod speech;
