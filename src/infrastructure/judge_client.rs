//! 评测站客户端 - 基础设施层
//!
//! 持有唯一的 HTTP 会话（连接复用、默认请求头），只暴露"取一页记录"的能力

use crate::config::Config;
use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// 记录页的获取能力
///
/// 翻页循环只依赖这个 trait，测试时可以换成内存实现。
#[allow(async_fn_in_trait)]
pub trait RecordFetcher {
    /// 获取某用户某题目的第 `page` 页（从 1 开始）原始 HTML
    async fn fetch(&self, username: &str, problem_id: &str, page: u32) -> Result<String, FetchError>;
}

/// 评测站 HTTP 客户端
///
/// 职责：
/// - 持有 reqwest 会话，整个运行期间复用
/// - 固定 User-Agent、统一超时
/// - 不解析 HTML，不重试
pub struct JudgeClient {
    client: Client,
    base_url: String,
}

impl JudgeClient {
    /// 记录查询路径
    pub const RECORD_PATH: &'static str = "/record";

    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::transport(0, e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn record_url(&self) -> String {
        format!("{}{}", self.base_url, Self::RECORD_PATH)
    }

    /// 查询参数，顺序与评测站前端一致
    pub fn query_params(username: &str, problem_id: &str, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("uidOrName", username.to_string()),
            ("pid", problem_id.to_string()),
            ("tid", String::new()),
            ("lang", String::new()),
            ("status", String::new()),
            ("page", page.to_string()),
        ]
    }
}

impl RecordFetcher for JudgeClient {
    async fn fetch(&self, username: &str, problem_id: &str, page: u32) -> Result<String, FetchError> {
        let url = self.record_url();
        debug!("GET {} user={} pid={} page={}", url, username, problem_id, page);

        let response = self
            .client
            .get(&url)
            .query(&Self::query_params(username, problem_id, page))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::transport(page, e))?;

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(page, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_shape() {
        let params = JudgeClient::query_params("stu01", "P1001", 3);
        let keys: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["uidOrName", "pid", "tid", "lang", "status", "page"]);
        assert_eq!(params[0].1, "stu01");
        assert_eq!(params[1].1, "P1001");
        assert_eq!(params[2].1, "");
        assert_eq!(params[5].1, "3");
    }

    #[test]
    fn test_record_url_strips_trailing_slash() {
        let config = Config {
            base_url: "https://judge.example/".to_string(),
            ..Config::default()
        };
        let client = JudgeClient::new(&config).unwrap();
        assert_eq!(client.record_url(), "https://judge.example/record");
    }

    /// 真实评测站连通性测试
    #[tokio::test]
    #[ignore] // 需要网络：cargo test -- --ignored
    async fn test_fetch_real_judge() {
        let _ = tracing_subscriber::fmt::try_init();

        let client = JudgeClient::new(&Config::default()).unwrap();
        let result = client.fetch("1", "1000", 1).await;

        match result {
            Ok(html) => assert!(!html.is_empty()),
            Err(e) => panic!("请求失败: {}", e),
        }
    }
}
