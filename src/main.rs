use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use judge_record_checker::utils::logging;
use judge_record_checker::{App, Config};
use std::path::PathBuf;

/// 批量检查一组用户在若干题目上是否拿到满分
#[derive(Debug, Parser)]
#[command(name = "judge-record-checker", version)]
struct Cli {
    /// TOML 配置文件（也可用环境变量 CONFIG_FILE 指定）
    #[arg(long, env = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// 用户名前缀，例如 stu → stu01, stu02 ...
    username_prefix: Option<String>,

    /// 用户数量
    member_count: Option<String>,

    /// 题目 ID 列表
    problem_ids: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (Some(prefix), Some(member_count)) = (&cli.username_prefix, &cli.member_count) else {
        Cli::command().print_help()?;
        return Ok(());
    };
    if cli.problem_ids.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let member_count: usize = member_count
        .parse()
        .with_context(|| format!("无效的用户数量: {}", member_count))?;

    // 加载配置
    let config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?.with_env_overrides()?,
        None => Config::from_env()?,
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config).context("初始化失败")?;
    app.run(prefix, member_count, &cli.problem_ids).await?;

    Ok(())
}
