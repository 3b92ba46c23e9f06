// crates/od_morison/src/lib.rs

//! OceanDyn Morison 层
//!
//! 实现 HydroDyn 初始化流水线的结构侧：
//! - [`geometry`]: 锥台体积 / 形心与部分浸没积分
//! - [`partition`]: 构件划分与节点池生成
//! - [`model`]: 环境解析、体积积分与 [`model::HydroModel`] 初始化驱动
//!
//! 节点坐标在划分时统一转换到静水面（SWL）参考系，
//! 波浪层据此生成节点运动学时间序列。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod geometry;
pub mod model;
pub mod partition;

pub use geometry::{submerged_frustum_volume, tapered_cylinder_geom};
pub use model::{Environment, HydroModel, MemberVolumes, MorisonModel, VolumeMethod};
pub use partition::{MorisonDiscretization, MorisonMember};
