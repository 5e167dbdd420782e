pub mod judge_client;

pub use judge_client::{JudgeClient, RecordFetcher};
