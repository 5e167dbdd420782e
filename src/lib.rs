//! # Judge Record Checker
//!
//! 抓取在线评测站的提交记录，判断一批用户在若干题目上是否满分通过，
//! 并汇总成通过矩阵
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 HTTP 会话，只暴露"取一页"能力
//! - `JudgeClient` - `RecordFetcher` 的 reqwest 实现
//!
//! ### ② 业务能力层（Services）
//! - `PageParser` - 把一页 HTML 解析成提交记录
//! - `outcome` - 满分判定
//! - `ReportWriter` - 写 JSON / CSV
//!
//! ### ③ 流程层（Workflow）
//! - `SubmissionCollector` - 一个 (用户, 题目) 的翻页流程
//! - `Throttle` - 翻页间隔
//!
//! ### ④ 编排层（Orchestration）
//! - `BatchRunner` - 任务网格与通过矩阵
//! - `App` - 由配置组装并运行

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, FetchError, ReportError};
pub use infrastructure::{JudgeClient, RecordFetcher};
pub use models::{Job, ResultGrid, SubmissionRecord};
pub use orchestrator::{App, BatchReport, BatchRunner, RunStats};
pub use services::{PageParser, ReportWriter};
pub use workflow::{Collection, StopReason, SubmissionCollector, Throttle};
