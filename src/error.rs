use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 评测站请求错误
    #[error("请求错误: {0}")]
    Fetch(#[from] FetchError),
    /// 结果落盘错误
    #[error("报告错误: {0}")]
    Report(#[from] ReportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 评测站请求错误
///
/// 超时、连接失败、非 2xx 状态码、读取响应体失败都归为这一类。
/// 只会中断当前 (用户, 题目) 的翻页循环，不会中断整个批次。
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("第 {page} 页请求失败: {message}")]
    Transport { page: u32, message: String },
}

impl FetchError {
    pub fn transport(page: u32, source: impl std::fmt::Display) -> Self {
        FetchError::Transport {
            page,
            message: source.to_string(),
        }
    }

    /// 出错的页码
    pub fn page(&self) -> u32 {
        match self {
            FetchError::Transport { page, .. } => *page,
        }
    }
}

/// 写入提交记录 / 结果表格失败
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("写入文件失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON 序列化失败 ({path}): {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("CSV 写入失败 ({path}): {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: &'static str,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
