pub mod engine;
pub mod rocket;

pub use engine::Engine;
pub use rocket::Rocket;
