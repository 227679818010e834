pub mod pidf;

pub use pidf::PidfController;
