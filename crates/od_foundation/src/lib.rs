// crates/od_foundation/src/lib.rs

//! OceanDyn Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`index`]: 强类型索引系统
//! - [`constants`]: 物理常数默认值
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 serde 和 thiserror
//! 2. **类型安全**: 编译期防止索引误用（节点/构件/属性集索引互不混用）
//! 3. **f64 精度策略**: 水动力初始化对精度敏感，全程使用 f64

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod error;
pub mod index;

// 重导出常用类型
pub use error::{OdError, OdResult};
pub use index::{Idx, JointIndex, MemberIndex, NodeIndex, PropSetIndex};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::constants::{DEFAULT_GRAVITY, DEFAULT_WATER_DENSITY};
    pub use crate::error::{OdError, OdResult};
    pub use crate::index::{Idx, JointIndex, MemberIndex, NodeIndex, PropSetIndex};
}
