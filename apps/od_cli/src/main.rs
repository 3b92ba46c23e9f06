// apps/od_cli/src/main.rs

//! OceanDyn 命令行界面
//!
//! 提供水动力初始化流水线的命令行工具：
//! 输入甲板 → 结构图 → Morison 划分 → 波浪运动学 → 体积摘要。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// OceanDyn 水动力初始化命令行工具
#[derive(Parser)]
#[command(name = "od_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "OceanDyn offshore hydrodynamics toolkit", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行初始化流水线并写出摘要
    Run(commands::run::RunArgs),
    /// 显示甲板 / 配置信息
    Info(commands::info::InfoArgs),
    /// 验证甲板与配置文件
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
