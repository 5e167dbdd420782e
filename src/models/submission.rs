use serde::{Deserialize, Serialize};

/// 一条提交记录
///
/// 字段保持评测站表格里显示的原始文本，不做数值/时间归一化。
/// JSON 键名与落盘文件保持一致：`time`, `problem`, `user` ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// 提交时间列
    #[serde(rename = "time")]
    pub submitted_at: String,
    #[serde(rename = "problem")]
    pub problem_label: String,
    #[serde(rename = "user")]
    pub user_label: String,
    pub language: String,
    pub status: String,
    pub score: String,
    pub time_used: String,
    /// 表格没有第 8 列时为 "N/A"
    #[serde(default = "default_memory_used")]
    pub memory_used: String,
}

pub const MEMORY_NOT_AVAILABLE: &str = "N/A";

fn default_memory_used() -> String {
    MEMORY_NOT_AVAILABLE.to_string()
}

impl SubmissionRecord {
    /// 单行摘要，格式 `[time] problem - status (score)`
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} - {} ({})",
            self.submitted_at, self.problem_label, self.status, self.score
        )
    }
}
