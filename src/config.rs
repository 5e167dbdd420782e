use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 评测站根地址
    pub base_url: String,
    /// 请求头中的 User-Agent
    pub user_agent: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 翻页之间的礼貌性延迟（毫秒）
    pub page_delay_ms: u64,
    /// 批量模式下每个 (用户, 题目) 最多抓取的页数
    pub batch_max_pages: u32,
    /// 输出目录
    pub output_dir: String,
    /// 结果表格文件名
    pub grid_file: String,
    /// 是否逐条打印提交记录
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://tzhsoj.cn".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            request_timeout_secs: 10,
            page_delay_ms: 1000,
            batch_max_pages: 5,
            output_dir: ".".to_string(),
            grid_file: "result.csv".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认值 + 环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，缺省的键使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })
    }

    /// 环境变量覆盖当前值
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: std::env::var("JUDGE_BASE_URL").unwrap_or(self.base_url),
            user_agent: std::env::var("JUDGE_USER_AGENT").unwrap_or(self.user_agent),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.request_timeout_secs),
            page_delay_ms: env_parse("PAGE_DELAY_MS", "u64")?.unwrap_or(self.page_delay_ms),
            batch_max_pages: env_parse("BATCH_MAX_PAGES", "u32")?.unwrap_or(self.batch_max_pages),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(self.output_dir),
            grid_file: std::env::var("GRID_FILE").unwrap_or(self.grid_file),
            verbose_logging: env_parse("VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
        })
    }
}

fn env_parse<T: FromStr>(var_name: &str, expected_type: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type,
            }),
        Err(_) => Ok(None),
    }
}
