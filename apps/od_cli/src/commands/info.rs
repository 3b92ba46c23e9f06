// apps/od_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示甲板内容摘要与默认配置。

use anyhow::{Context, Result};
use clap::Args;
use od_config::HydroConfig;
use od_foundation::prelude::{DEFAULT_GRAVITY, DEFAULT_WATER_DENSITY};
use od_io::InputDeck;
use od_waves::AiryField;
use std::path::PathBuf;
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 输入甲板文件路径
    #[arg(short, long)]
    pub deck: Option<PathBuf>,

    /// 显示默认配置
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== OceanDyn 信息 ===");

    if let Some(path) = &args.deck {
        print_deck_info(path)?;
    }

    if args.defaults || args.deck.is_none() {
        print_default_config();
    }

    Ok(())
}

fn print_deck_info(path: &PathBuf) -> Result<()> {
    let deck = InputDeck::from_file(path)
        .with_context(|| format!("解析甲板 {}", path.display()))?;

    println!("=== 甲板 {} ===", path.display());
    println!("关节点: {}", deck.joints.len());
    println!("属性集: {}", deck.propsets.len());
    println!("构件:   {}", deck.members.len());

    let (dens, dpth, msl) = deck.environment()?;
    let show = |v: Option<f64>| match v {
        Some(x) => format!("{x}"),
        None => "default (需运行配置提供)".to_string(),
    };
    println!("\n环境:");
    println!("  WtrDens = {}", show(dens));
    println!("  WtrDpth = {}", show(dpth));
    println!("  MSL2SWL = {}", show(msl));

    match deck.wave_params() {
        Ok(wp) => {
            println!("\n波浪:");
            println!("  模式: {:?}, 拉伸: {:?}", wp.mode, wp.stretch);
            println!("  Hs = {} m, Tp = {} s", wp.hs, wp.tp);
            println!(
                "  时程: {} s × {} s → {} 步",
                wp.tmax,
                wp.dt,
                wp.n_step_wave()
            );
            if let Some(depth) = dpth {
                let total_depth = depth + msl.unwrap_or(0.0);
                if let Ok(field) =
                    AiryField::synthesize(&wp, total_depth, DEFAULT_GRAVITY, DEFAULT_WATER_DENSITY)
                {
                    if let Some(lambda) = field.dominant_wavelength() {
                        println!("  主波长: {lambda:.2} m");
                    }
                }
            }
        }
        Err(e) => println!("\n波浪参数不完整: {e}"),
    }

    match deck.to_graph() {
        Ok(g) => {
            let total_len: f64 = g.member_indices().map(|mi| g.member_length(mi)).sum();
            println!("\n结构图有效, 构件总长 {total_len:.2} m");
        }
        Err(e) => println!("\n结构图无效: {e}"),
    }
    println!();
    Ok(())
}

fn print_default_config() {
    println!("=== 默认配置 ===");
    let config = HydroConfig::default();
    println!("重力加速度: {} m/s²", config.environment.gravity);
    println!("默认划分尺寸: {} m", config.morison.default_div_size);
    println!("输出目录: {}", config.output.directory.display());
    println!("写摘要: {}", config.output.write_summary);
    println!("写运动学 CSV: {}", config.output.write_kinematics);
}
