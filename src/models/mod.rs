pub mod grid;
pub mod submission;

pub use grid::{Job, ResultGrid};
pub use submission::SubmissionRecord;
