pub mod collector;
pub mod throttle;

pub use collector::{Collection, StopReason, SubmissionCollector};
pub use throttle::Throttle;
