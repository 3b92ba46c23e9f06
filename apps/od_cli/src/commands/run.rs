// apps/od_cli/src/commands/run.rs

//! 运行初始化流水线命令
//!
//! 读取输入甲板与可选运行配置，执行 HydroDyn 初始化，
//! 写出摘要与可选的波浪运动学 CSV。

use anyhow::{Context, Result};
use clap::Args;
use od_config::HydroConfig;
use od_io::InputDeck;
use od_morison::{Environment, HydroModel, VolumeMethod};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// 输入甲板文件路径 (.dat)
    #[arg(short, long)]
    pub deck: PathBuf,

    /// 运行配置文件路径 (.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出目录（覆盖配置）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 海水密度覆盖 [kg/m³]
    #[arg(long)]
    pub wtr_dens: Option<f64>,

    /// 水深覆盖 [m]
    #[arg(long)]
    pub wtr_dpth: Option<f64>,

    /// MSL2SWL 覆盖 [m]
    #[arg(long)]
    pub msl2swl: Option<f64>,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== OceanDyn 初始化启动 ===");
    let start = Instant::now();

    // 配置加载与命令行覆盖
    let mut config = match &args.config {
        Some(path) => HydroConfig::from_file(path)
            .with_context(|| format!("加载配置 {}", path.display()))?,
        None => HydroConfig::default(),
    };
    if let Some(v) = args.wtr_dens {
        config.environment.wtr_dens = Some(v);
    }
    if let Some(v) = args.wtr_dpth {
        config.environment.wtr_dpth = Some(v);
    }
    if let Some(v) = args.msl2swl {
        config.environment.msl2swl = Some(v);
    }
    if let Some(dir) = args.output {
        config.output.directory = dir;
    }

    // 甲板 → 图 / 环境 / 波浪参数
    let deck = InputDeck::from_file(&args.deck)
        .with_context(|| format!("解析甲板 {}", args.deck.display()))?;
    let graph = deck.to_graph().context("构建结构图失败")?;
    info!(
        "结构图: {} 关节点, {} 属性集, {} 构件",
        graph.n_joints(),
        graph.n_propsets(),
        graph.n_members()
    );

    let (file_dens, file_dpth, file_msl) = deck.environment()?;
    let env = Environment::resolve(file_dens, file_dpth, file_msl, &config.environment)
        .context("解析环境参数失败")?;
    let wave_params = deck.wave_params().context("解析波浪参数失败")?;

    // 初始化
    let model = HydroModel::init(graph, env, wave_params, &config.morison)
        .context("水动力初始化失败")?;

    info!(
        "体积: 结构 {:.3} m³, 水下 {:.3} m³",
        model.volume_structure(VolumeMethod::Morison)?,
        model.volume_submerged(VolumeMethod::Morison)?
    );

    // 输出
    std::fs::create_dir_all(&config.output.directory)?;
    let stem = args
        .deck
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    if config.output.write_summary {
        let path = config.output.directory.join(format!("{stem}.sum"));
        od_io::write_summary_file(&path, &model)?;
    }

    if config.output.write_kinematics {
        let kin = model.kinematics();
        let nodes: Vec<usize> = if config.output.kinematics_nodes.is_empty() {
            (0..kin.n_nodes()).collect()
        } else {
            config.output.kinematics_nodes.clone()
        };
        let elev_path = config.output.directory.join(format!("{stem}_elev.csv"));
        od_io::write_elevation_csv_file(&elev_path, kin, &nodes)?;
        for &n in &nodes {
            let path = config
                .output
                .directory
                .join(format!("{stem}_node{n}.csv"));
            od_io::write_kinematics_csv_file(&path, kin, n)?;
        }
    }

    info!("=== 初始化完成, 耗时 {:.2} s ===", start.elapsed().as_secs_f64());
    Ok(())
}
