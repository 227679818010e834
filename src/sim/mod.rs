pub mod config;
pub mod handoff;
pub mod model;
pub mod render;
pub mod replay;

pub use config::{Config, MissionConfig, SimConfig};
pub use handoff::Handoff;
pub use model::run_model;
pub use render::{PlotFrame, PlotSink};
pub use replay::run_replay;
