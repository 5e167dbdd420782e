//! 批量检查器 - 编排层
//!
//! ## 职责
//!
//! 把用户名前缀和题目列表展开成 (用户, 题目) 任务网格，
//! 逐个执行"收集 → 判定 → 落盘"，并汇总通过矩阵。
//!
//! ## 设计特点
//!
//! - **严格顺序**：一个任务结束后才开始下一个，不并发
//! - **不中断**：单个任务的请求失败或写文件失败只记日志，批次总会跑完
//! - **无全局状态**：通过矩阵作为返回值交给调用方

use crate::infrastructure::RecordFetcher;
use crate::models::{Job, ResultGrid, SubmissionRecord};
use crate::services::{outcome, ReportWriter};
use crate::utils::logging;
use crate::workflow::{StopReason, SubmissionCollector};
use tracing::{debug, info, warn};

/// 批量模式下每个任务的默认页数上限
pub const BATCH_MAX_PAGES: u32 = 5;

/// 生成第 `index` 个用户名
///
/// 1..=9 补一个前导零（`stu01`），10 及以上直接拼接（`stu10`）。
pub fn username(prefix: &str, index: usize) -> String {
    if index > 9 {
        format!("{}{}", prefix, index)
    } else {
        format!("{}0{}", prefix, index)
    }
}

/// 展开任务网格：用户优先，题目按参数顺序
pub fn expand_jobs(prefix: &str, member_count: usize, problem_ids: &[String]) -> Vec<Job> {
    (1..=member_count)
        .flat_map(|index| {
            let name = username(prefix, index);
            problem_ids
                .iter()
                .map(move |pid| Job::new(name.clone(), pid.clone()))
        })
        .collect()
}

/// 运行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub jobs: usize,
    pub passed: usize,
    pub failed: usize,
    pub submissions: usize,
    /// 因请求失败提前结束收集的任务数
    pub transport_errors: usize,
    /// 提交记录文件写入失败的任务数
    pub report_failures: usize,
}

/// 一次批量运行的结果
#[derive(Debug)]
pub struct BatchReport {
    pub grid: ResultGrid,
    pub stats: RunStats,
}

/// 批量检查器
pub struct BatchRunner<F> {
    collector: SubmissionCollector<F>,
    writer: ReportWriter,
    max_pages: u32,
    verbose_logging: bool,
}

impl<F: RecordFetcher> BatchRunner<F> {
    pub fn new(collector: SubmissionCollector<F>, writer: ReportWriter) -> Self {
        Self {
            collector,
            writer,
            max_pages: BATCH_MAX_PAGES,
            verbose_logging: false,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    pub fn collector(&self) -> &SubmissionCollector<F> {
        &self.collector
    }

    pub fn writer(&self) -> &ReportWriter {
        &self.writer
    }

    /// 执行所有任务并返回通过矩阵
    pub async fn run(
        &self,
        username_prefix: &str,
        member_count: usize,
        problem_ids: &[String],
    ) -> BatchReport {
        let mut grid = ResultGrid::new(problem_ids.to_vec());
        let mut stats = RunStats::default();

        let jobs = expand_jobs(username_prefix, member_count, problem_ids);
        let total_jobs = jobs.len();

        for index in 1..=member_count {
            grid.add_user(&username(username_prefix, index));
        }

        for (job_index, job) in jobs.iter().enumerate() {
            logging::log_job_start(job_index + 1, total_jobs, &job.username, &job.problem_id);

            let bit = self.check(job, &mut stats).await;
            grid.push_outcome(&job.username, bit);
        }

        BatchReport { grid, stats }
    }

    /// 单个任务：收集 → 判定 → 落盘
    async fn check(&self, job: &Job, stats: &mut RunStats) -> u8 {
        let collection = self
            .collector
            .collect_detailed(&job.username, &job.problem_id, self.max_pages)
            .await;

        if let StopReason::Transport(ref e) = collection.stop {
            warn!("{} collection cut short: {}", job, e);
            stats.transport_errors += 1;
        }

        let records = collection.records;
        info!("Fetched {} submissions in total", records.len());
        self.log_records(&records);

        let bit = outcome::evaluate(&records);
        stats.jobs += 1;
        stats.submissions += records.len();
        if bit == 1 {
            stats.passed += 1;
            info!("{} ✓ passed", job);
        } else {
            stats.failed += 1;
            info!("{} ✗ not passed", job);
        }

        if let Err(e) = self.writer.write_submissions(&records, job) {
            warn!("{} {}", job, e);
            stats.report_failures += 1;
        }

        bit
    }

    fn log_records(&self, records: &[SubmissionRecord]) {
        for (i, record) in records.iter().enumerate() {
            if self.verbose_logging {
                info!("{}. {}", i + 1, record.summary());
            } else {
                debug!("{}. {}", i + 1, record.summary());
            }
        }
    }
}
