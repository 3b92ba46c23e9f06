// crates/od_graph/src/lib.rs

//! OceanDyn 结构图层
//!
//! 提供水下结构的图表示，是输入甲板与 Morison 离散化之间的桥梁：
//! - [`Joint`]: 关节点（三维点）
//! - [`PropSet`]: 圆管截面属性（外径/壁厚）
//! - [`Member`]: 构件（关节点对 + 两端截面 + 划分尺寸 + 势流标记）
//! - [`StructuralGraph`]: 只读图容器，带几何查询
//! - [`GraphBuilder`]: 带校验的构建器

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod joint;
pub mod member;

pub use graph::{GraphBuilder, StructuralGraph};
pub use joint::{Joint, PropSet};
pub use member::Member;
