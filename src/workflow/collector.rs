//! 提交记录收集流程 - 流程层
//!
//! 定义"一个用户在一道题上"的完整翻页流程：
//! 取页 → 解析 → 累加 → 判断是否还有下一页 → 等待 → 下一页

use crate::error::FetchError;
use crate::infrastructure::RecordFetcher;
use crate::models::SubmissionRecord;
use crate::services::PageParser;
use crate::workflow::throttle::Throttle;
use tracing::{error, info};

/// 翻页停止的原因
#[derive(Debug)]
pub enum StopReason {
    /// 某一页没有解析出任何记录
    Exhausted,
    /// 没有可用的下一页按钮
    LastPage,
    /// 达到页数上限
    PageCap,
    /// 请求失败，已收集的记录仍然保留
    Transport(FetchError),
}

/// 一次收集的完整结果
#[derive(Debug)]
pub struct Collection {
    pub records: Vec<SubmissionRecord>,
    pub stop: StopReason,
    pub pages_fetched: u32,
}

/// 提交记录收集器
///
/// - 只持有取页能力、解析器和延迟策略
/// - 请求失败在这一层被吸收，调用方总是拿到记录列表
/// - 严格按顺序执行，不并发
pub struct SubmissionCollector<F> {
    fetcher: F,
    parser: PageParser,
    throttle: Throttle,
}

impl<F: RecordFetcher> SubmissionCollector<F> {
    pub fn new(fetcher: F, throttle: Throttle) -> Self {
        Self {
            fetcher,
            parser: PageParser::new(),
            throttle,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// 收集记录，最多请求 `max_pages` 页
    pub async fn collect(
        &self,
        username: &str,
        problem_id: &str,
        max_pages: u32,
    ) -> Vec<SubmissionRecord> {
        self.collect_detailed(username, problem_id, max_pages)
            .await
            .records
    }

    /// 同 [`collect`](Self::collect)，额外返回停止原因和实际请求的页数
    pub async fn collect_detailed(
        &self,
        username: &str,
        problem_id: &str,
        max_pages: u32,
    ) -> Collection {
        let mut records = Vec::new();
        let mut pages_fetched = 0;
        let mut page = 1;

        let stop = loop {
            if page > max_pages {
                info!("Reached page limit ({})", max_pages);
                break StopReason::PageCap;
            }

            info!("Getting submissions from page {} ...", page);
            let html = match self.fetcher.fetch(username, problem_id, page).await {
                Ok(html) => html,
                Err(e) => {
                    error!("Error occurred on page {}: {}", page, e);
                    break StopReason::Transport(e);
                }
            };
            pages_fetched += 1;

            let page_records = self.parser.parse(&html);
            if page_records.is_empty() {
                info!("No more submissions");
                break StopReason::Exhausted;
            }

            info!("Page {} fetched {} submissions", page, page_records.len());
            records.extend(page_records);

            if !self.parser.has_next(&html) {
                info!("Arrived at last page");
                break StopReason::LastPage;
            }

            page += 1;
            if page <= max_pages {
                self.throttle.wait().await;
            }
        };

        Collection {
            records,
            stop,
            pages_fetched,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// 按 (用户, 题目) 预置页面的内存取页实现
    #[derive(Default)]
    pub(crate) struct ScriptedFetcher {
        pages: HashMap<(String, String), Vec<Result<String, String>>>,
        pub(crate) calls: RefCell<Vec<(String, String, u32)>>,
    }

    impl ScriptedFetcher {
        pub(crate) fn with_pages(
            mut self,
            username: &str,
            problem_id: &str,
            pages: Vec<Result<String, String>>,
        ) -> Self {
            self.pages
                .insert((username.to_string(), problem_id.to_string()), pages);
            self
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl RecordFetcher for ScriptedFetcher {
        async fn fetch(
            &self,
            username: &str,
            problem_id: &str,
            page: u32,
        ) -> Result<String, FetchError> {
            self.calls
                .borrow_mut()
                .push((username.to_string(), problem_id.to_string(), page));

            let key = (username.to_string(), problem_id.to_string());
            match self
                .pages
                .get(&key)
                .and_then(|pages| pages.get(page as usize - 1))
            {
                Some(Ok(html)) => Ok(html.clone()),
                Some(Err(message)) => Err(FetchError::transport(page, message)),
                None => Ok("<html><body>no table</body></html>".to_string()),
            }
        }
    }

    /// 生成一页记录：`rows` 行数据，`next` 决定下一页按钮状态
    pub(crate) fn record_page(first_time: &str, rows: usize, next: Option<bool>) -> String {
        let body: String = (0..rows)
            .map(|i| {
                let time = if i == 0 {
                    first_time.to_string()
                } else {
                    format!("2024-05-01 10:{:02}", i)
                };
                format!(
                    "<tr><td>{}</td><td>P1</td><td>stu01</td><td>C++</td>\
                     <td>Wrong Answer</td><td>0</td><td>{}ms</td></tr>",
                    time, i
                )
            })
            .collect();
        let pager = match next {
            Some(true) => r#"<a href="?page=next">Next</a>"#,
            Some(false) => r#"<a class="disabled">Next</a>"#,
            None => "",
        };
        format!(
            "<html><body><table><tr><th>Time</th></tr>{}</table>{}</body></html>",
            body, pager
        )
    }

    fn collector(fetcher: ScriptedFetcher) -> SubmissionCollector<ScriptedFetcher> {
        SubmissionCollector::new(fetcher, Throttle::none())
    }

    #[tokio::test]
    async fn test_walks_pages_until_last() {
        let fetcher = ScriptedFetcher::default().with_pages(
            "stu01",
            "P1",
            vec![
                Ok(record_page("a", 3, Some(true))),
                Ok(record_page("b", 2, Some(true))),
                Ok(record_page("c", 1, Some(false))),
            ],
        );
        let collector = collector(fetcher);

        let result = collector.collect_detailed("stu01", "P1", 10).await;

        assert_eq!(result.records.len(), 6);
        assert_eq!(result.records[0].submitted_at, "a");
        assert_eq!(result.records[3].submitted_at, "b");
        assert_eq!(result.records[5].submitted_at, "c");
        assert_eq!(result.pages_fetched, 3);
        assert!(matches!(result.stop, StopReason::LastPage));
    }

    #[tokio::test]
    async fn test_missing_next_button_is_last_page() {
        let fetcher = ScriptedFetcher::default().with_pages(
            "stu01",
            "P1",
            vec![Ok(record_page("a", 2, None)), Ok(record_page("b", 2, None))],
        );
        let collector = collector(fetcher);

        let result = collector.collect_detailed("stu01", "P1", 5).await;

        assert_eq!(result.records.len(), 2);
        assert_eq!(collector.fetcher().call_count(), 1);
        assert!(matches!(result.stop, StopReason::LastPage));
    }

    #[tokio::test]
    async fn test_never_exceeds_page_cap() {
        let pages = (0..10).map(|_| Ok(record_page("x", 1, Some(true)))).collect();
        let fetcher = ScriptedFetcher::default().with_pages("stu01", "P1", pages);
        let collector = collector(fetcher);

        let result = collector.collect_detailed("stu01", "P1", 5).await;

        assert_eq!(collector.fetcher().call_count(), 5);
        assert_eq!(result.records.len(), 5);
        assert!(matches!(result.stop, StopReason::PageCap));

        let pages: Vec<u32> = collector.fetcher().calls.borrow().iter().map(|c| c.2).collect();
        assert_eq!(pages, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_zero_page_cap_fetches_nothing() {
        let collector = collector(ScriptedFetcher::default());

        let result = collector.collect_detailed("stu01", "P1", 0).await;

        assert!(result.records.is_empty());
        assert_eq!(collector.fetcher().call_count(), 0);
        assert!(matches!(result.stop, StopReason::PageCap));
    }

    #[tokio::test]
    async fn test_no_table_stops_after_one_fetch() {
        let collector = collector(ScriptedFetcher::default());

        let result = collector.collect_detailed("nobody", "P1", 5).await;

        assert!(result.records.is_empty());
        assert_eq!(collector.fetcher().call_count(), 1);
        assert!(matches!(result.stop, StopReason::Exhausted));
    }

    #[tokio::test]
    async fn test_transport_error_keeps_partial_result() {
        let fetcher = ScriptedFetcher::default().with_pages(
            "stu01",
            "P1",
            vec![
                Ok(record_page("a", 2, Some(true))),
                Err("operation timed out".to_string()),
                Ok(record_page("c", 2, Some(true))),
            ],
        );
        let collector = collector(fetcher);

        let result = collector.collect_detailed("stu01", "P1", 5).await;

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.pages_fetched, 1);
        assert_eq!(collector.fetcher().call_count(), 2);
        match result.stop {
            StopReason::Transport(e) => assert_eq!(e.page(), 2),
            other => panic!("unexpected stop: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_collect_returns_records_only() {
        let fetcher = ScriptedFetcher::default().with_pages(
            "stu01",
            "P1",
            vec![Err("connection refused".to_string())],
        );
        let collector = collector(fetcher);

        assert!(collector.collect("stu01", "P1", 5).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_between_pages_only() {
        let fetcher = ScriptedFetcher::default().with_pages(
            "stu01",
            "P1",
            vec![
                Ok(record_page("a", 1, Some(true))),
                Ok(record_page("b", 1, Some(true))),
                Ok(record_page("c", 1, Some(false))),
            ],
        );
        let collector = SubmissionCollector::new(fetcher, Throttle::from_millis(1000));
        let start = tokio::time::Instant::now();

        collector.collect("stu01", "P1", 5).await;

        // 三页之间等待两次
        let elapsed = start.elapsed();
        assert!(elapsed >= std::time::Duration::from_millis(2000));
        assert!(elapsed < std::time::Duration::from_millis(3000));
    }
}
