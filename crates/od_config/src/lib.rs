// crates/od_config/src/lib.rs

//! OceanDyn 配置层
//!
//! 提供运行配置的加载、校验与序列化：
//! - [`HydroConfig`]: 环境 / Morison / 输出三段式配置
//! - [`ConfigError`]: 配置错误类型
//!
//! 输入甲板文件（.dat）中标记为 `default` 的环境参数在这里以
//! `Option<f64>` 表达，初始化时统一解析。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hydro_config;

pub use error::ConfigError;
pub use hydro_config::{EnvironmentConfig, HydroConfig, MorisonConfig, OutputConfig};
