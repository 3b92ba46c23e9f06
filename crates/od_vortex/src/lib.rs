// crates/od_vortex/src/lib.rs

//! OceanDyn 势流工具层
//!
//! 轴对称涡环与 2D 面元法几何：
//! - [`elliptic`]: 完全椭圆积分 K(m)、E(m)
//! - [`ring`]: 单涡环诱导速度与多环叠加
//! - [`axisym`]: 涡量场 → 涡环离散 → 诱导速度，预定义涡量分布
//! - [`panel`]: 翼型面元切向 / 法向 / 中点 / 长度 / 曲率

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod axisym;
pub mod elliptic;
pub mod panel;
pub mod ring;

pub use axisym::{axisym_u, grid_spacing, AxisymGrid, VorticityDistribution};
pub use elliptic::{ellip_e, ellip_k};
pub use panel::{airfoil_params, CurvatureMethod, PanelGeometry};
pub use ring::{ring_u, rings_u, VortexRing};
