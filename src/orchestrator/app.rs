//! 应用入口 - 编排层
//!
//! 持有配置和整个运行期间唯一的 HTTP 会话

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::JudgeClient;
use crate::orchestrator::batch_runner::{BatchRunner, RunStats};
use crate::services::ReportWriter;
use crate::utils::logging;
use crate::workflow::{SubmissionCollector, Throttle};

/// 应用主结构
pub struct App {
    config: Config,
    runner: BatchRunner<JudgeClient>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        let client = JudgeClient::new(&config)?;
        let collector =
            SubmissionCollector::new(client, Throttle::from_millis(config.page_delay_ms));
        let runner = BatchRunner::new(collector, ReportWriter::new(&config.output_dir))
            .with_max_pages(config.batch_max_pages)
            .with_verbose_logging(config.verbose_logging);

        Ok(Self { config, runner })
    }

    /// 运行批量检查并写出通过矩阵
    pub async fn run(
        &self,
        username_prefix: &str,
        member_count: usize,
        problem_ids: &[String],
    ) -> AppResult<RunStats> {
        logging::log_startup(&self.config.base_url, member_count, problem_ids.len());

        let report = self
            .runner
            .run(username_prefix, member_count, problem_ids)
            .await;

        let grid_path = self
            .runner
            .writer()
            .write_grid(&report.grid, &self.config.grid_file)?;

        logging::print_final_stats(&report.stats, &grid_path.display().to_string());

        Ok(report.stats)
    }
}
