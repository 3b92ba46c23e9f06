// apps/od_cli/src/commands/validate.rs

//! 甲板与配置验证命令

use anyhow::{bail, Context, Result};
use clap::Args;
use od_config::HydroConfig;
use od_io::InputDeck;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 输入甲板文件路径
    #[arg(short, long)]
    pub deck: Option<PathBuf>,

    /// 运行配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== OceanDyn 配置验证 ===");

    if args.deck.is_none() && args.config.is_none() {
        println!("用法: od_cli validate --deck <甲板文件> [--config <配置文件>]");
        return Ok(());
    }

    let mut result = ValidationResult::default();

    let config = if let Some(path) = &args.config {
        validate_config(path, &mut result)
    } else {
        Some(HydroConfig::default())
    };

    if let Some(path) = &args.deck {
        validate_deck(path, config.as_ref(), &mut result)?;
    }

    print_validation_result(&result, args.strict)
}

fn validate_config(path: &PathBuf, result: &mut ValidationResult) -> Option<HydroConfig> {
    println!("\n检查配置文件: {}", path.display());
    match HydroConfig::from_file(path) {
        Ok(c) => {
            println!("  ✓ 配置有效");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("配置无效: {e}"));
            None
        }
    }
}

fn validate_deck(
    path: &PathBuf,
    config: Option<&HydroConfig>,
    result: &mut ValidationResult,
) -> Result<()> {
    println!("\n检查甲板文件: {}", path.display());

    if !path.exists() {
        result.add_error(format!("甲板文件不存在: {}", path.display()));
        return Ok(());
    }

    let deck = match InputDeck::from_file(path).context("读取甲板失败") {
        Ok(d) => d,
        Err(e) => {
            result.add_error(format!("甲板解析失败: {e:#}"));
            return Ok(());
        }
    };
    println!("  ✓ 甲板格式有效");

    // 环境参数: default 必须有配置兜底
    match deck.environment() {
        Ok((dens, dpth, msl)) => {
            let over = config.map(|c| &c.environment);
            let covered = |file: Option<f64>, cfg: Option<f64>| file.is_some() || cfg.is_some();
            if !covered(dens, over.and_then(|e| e.wtr_dens)) {
                result.add_error("WtrDens 为 default 且运行配置未提供");
            }
            if !covered(dpth, over.and_then(|e| e.wtr_dpth)) {
                result.add_error("WtrDpth 为 default 且运行配置未提供");
            }
            if !covered(msl, over.and_then(|e| e.msl2swl)) {
                result.add_warning("MSL2SWL 为 default, 将按 0 处理");
            }
        }
        Err(e) => result.add_error(format!("环境参数缺失: {e}")),
    }

    // 波浪参数
    match deck.wave_params() {
        Ok(wp) => {
            if wp.n_step_wave() > 1_000_000 {
                result.add_warning(format!(
                    "波浪时程步数过大 ({}), 内存占用可能很高",
                    wp.n_step_wave()
                ));
            }
        }
        Err(e) => result.add_error(format!("波浪参数无效: {e}")),
    }

    // 结构图
    match deck.to_graph() {
        Ok(g) => {
            println!("  ✓ 结构图有效 ({} 构件)", g.n_members());
            // 划分尺寸为 0 的构件将使用配置默认值
            let n_default = deck.members.iter().filter(|m| m.div_size <= 0.0).count();
            if n_default > 0 {
                result.add_warning(format!("{n_default} 根构件未指定划分尺寸, 将使用配置默认值"));
            }
        }
        Err(e) => result.add_error(format!("结构图无效: {e}")),
    }

    Ok(())
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    if result.is_ok(strict) {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
