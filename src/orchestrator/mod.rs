//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 根据配置创建 HTTP 会话、收集器和落盘服务
//! - 运行批量检查，写出通过矩阵，输出统计
//!
//! ### `batch_runner` - 批量检查器
//! - 展开 (用户, 题目) 任务网格
//! - 逐个执行 收集 → 判定 → 落盘
//!
//! ## 层次关系
//!
//! ```text
//! app
//!     ↓
//! batch_runner (处理 Vec<Job>)
//!     ↓
//! workflow::SubmissionCollector (处理单个 Job 的翻页)
//!     ↓
//! services (能力层：parse / evaluate / report)
//!     ↓
//! infrastructure (基础设施：JudgeClient)
//! ```

pub mod app;
pub mod batch_runner;

pub use app::App;
pub use batch_runner::{expand_jobs, username, BatchReport, BatchRunner, RunStats};
