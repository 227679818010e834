pub mod force;
pub mod forces;
pub mod motion;
pub mod velocity;

pub use force::ForceDrivenBody;
pub use forces::ForceSet;
pub use motion::MotionState;
pub use velocity::VelocityDrivenBody;
