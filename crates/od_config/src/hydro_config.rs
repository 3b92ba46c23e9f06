// crates/od_config/src/hydro_config.rs

//! HydroConfig - 运行配置（全 f64）
//!
//! 定义水动力初始化运行的所有配置参数。环境参数允许为空，
//! 对应输入文件中的 `default` 标记：初始化时输入文件与运行
//! 配置必须至少有一方给出具体数值。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 运行配置
///
/// 所有参数使用 f64 存储以便 JSON 序列化。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HydroConfig {
    /// 环境参数
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Morison 离散化参数
    #[serde(default)]
    pub morison: MorisonConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 环境参数配置
///
/// `None` 表示沿用输入文件中的值；若文件中标记为 `default`
/// 则初始化时报 [`ConfigError::Missing`]。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// 重力加速度 [m/s²]
    #[serde(default = "default_gravity")]
    pub gravity: f64,

    /// 海水密度 [kg/m³]
    #[serde(default)]
    pub wtr_dens: Option<f64>,

    /// 水深（海底到平均海平面 MSL）[m]
    #[serde(default)]
    pub wtr_dpth: Option<f64>,

    /// MSL 到静水面 SWL 的偏移 [m]
    #[serde(default)]
    pub msl2swl: Option<f64>,
}

fn default_gravity() -> f64 {
    9.81
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            wtr_dens: None,
            wtr_dpth: None,
            msl2swl: None,
        }
    }
}

/// Morison 离散化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorisonConfig {
    /// 构件未指定划分尺寸时的默认值 [m]
    #[serde(default = "default_div_size")]
    pub default_div_size: f64,
}

fn default_div_size() -> f64 {
    0.5
}

impl Default for MorisonConfig {
    fn default() -> Self {
        Self {
            default_div_size: default_div_size(),
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出目录
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// 是否写出 .sum 摘要文件
    #[serde(default = "default_true")]
    pub write_summary: bool,

    /// 是否写出波面高程/节点运动学 CSV
    #[serde(default)]
    pub write_kinematics: bool,

    /// 运动学 CSV 输出的节点下标（空表示全部）
    #[serde(default)]
    pub kinematics_nodes: Vec<usize>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            write_summary: true,
            write_kinematics: false,
            kinematics_nodes: Vec::new(),
        }
    }
}

impl HydroConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;

        let config: HydroConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 重力验证
        if self.environment.gravity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "environment.gravity".to_string(),
                value: self.environment.gravity.to_string(),
                reason: "重力必须为正".to_string(),
            });
        }

        // 密度验证
        if let Some(rho) = self.environment.wtr_dens {
            if rho <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "environment.wtr_dens".to_string(),
                    value: rho.to_string(),
                    reason: "密度必须为正".to_string(),
                });
            }
        }

        // 水深验证
        if let Some(d) = self.environment.wtr_dpth {
            if d < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "environment.wtr_dpth".to_string(),
                    value: d.to_string(),
                    reason: "水深不能为负".to_string(),
                });
            }
        }

        // 划分尺寸验证
        if self.morison.default_div_size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "morison.default_div_size".to_string(),
                value: self.morison.default_div_size.to_string(),
                reason: "划分尺寸必须为正".to_string(),
            });
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HydroConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.environment.gravity - 9.81).abs() < 1e-12);
        assert!(config.environment.wtr_dpth.is_none());
    }

    #[test]
    fn test_invalid_gravity() {
        let mut config = HydroConfig::default();
        config.environment.gravity = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_density() {
        let mut config = HydroConfig::default();
        config.environment.wtr_dens = Some(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_div_size() {
        let mut config = HydroConfig::default();
        config.morison.default_div_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialize_deserialize() {
        let mut config = HydroConfig::default();
        config.environment.wtr_dpth = Some(50.0);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: HydroConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.environment.wtr_dpth, Some(50.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"environment": {"wtr_dens": 1000.0}}"#;
        let config: HydroConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.environment.wtr_dens, Some(1000.0));
        assert!((config.environment.gravity - 9.81).abs() < 1e-12);
        assert!(config.output.write_summary);
    }
}
