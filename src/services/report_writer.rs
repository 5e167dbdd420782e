//! 结果落盘服务 - 业务能力层
//!
//! 只负责"写文件"能力：每个任务的提交记录 JSON，以及最终的通过矩阵表格

use crate::error::ReportError;
use crate::models::{Job, ResultGrid, SubmissionRecord};
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// 结果写入服务
pub struct ReportWriter {
    output_dir: PathBuf,
    unsafe_chars: Regex,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            unsafe_chars: Regex::new(r"[^A-Za-z0-9_.\-]").expect("static regex must be valid"),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 某个任务对应的提交记录文件路径
    pub fn submissions_path(&self, job: &Job) -> PathBuf {
        let file_name = format!(
            "submissions_{}_{}.json",
            self.sanitize(&job.username),
            self.sanitize(&job.problem_id)
        );
        self.output_dir.join(file_name)
    }

    /// 写入某个任务的提交记录（UTF-8、缩进 2 格、不转义非 ASCII 字符）
    pub fn write_submissions(
        &self,
        records: &[SubmissionRecord],
        job: &Job,
    ) -> Result<PathBuf, ReportError> {
        let path = self.submissions_path(job);
        let shown = path.display().to_string();

        self.ensure_dir()?;
        let file = File::create(&path).map_err(|source| ReportError::Io {
            path: shown.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
            ReportError::Json {
                path: shown.clone(),
                source,
            }
        })?;
        writer.flush().map_err(|source| ReportError::Io {
            path: shown.clone(),
            source,
        })?;

        info!("Saved {} records to {}", records.len(), shown);
        Ok(path)
    }

    /// 写入通过矩阵：每个用户一行，每道题一列
    pub fn write_grid(&self, grid: &ResultGrid, file_name: &str) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(file_name);
        let shown = path.display().to_string();
        let csv_err = |source| ReportError::Csv {
            path: shown.clone(),
            source,
        };

        self.ensure_dir()?;
        let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;

        let mut header = vec![String::new()];
        header.extend(grid.problem_ids().iter().cloned());
        writer.write_record(&header).map_err(csv_err)?;

        for (username, outcomes) in grid.rows() {
            let mut record = vec![username.to_string()];
            record.extend(outcomes.iter().map(|bit| bit.to_string()));
            writer.write_record(&record).map_err(csv_err)?;
        }

        writer.flush().map_err(|source| ReportError::Io {
            path: shown.clone(),
            source,
        })?;

        info!("Saved {} rows to {}", grid.len(), shown);
        Ok(path)
    }

    fn sanitize(&self, component: &str) -> String {
        self.unsafe_chars.replace_all(component, "_").into_owned()
    }

    fn ensure_dir(&self) -> Result<(), ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.display().to_string(),
            source,
        })
    }
}
