// crates/od_waves/src/lib.rs

//! OceanDyn 波浪层
//!
//! 提供线性波理论的波场合成与节点运动学生成：
//! - [`dispersion`]: 色散关系求解（Newton 迭代）
//! - [`spectrum`]: JONSWAP 谱
//! - [`airy`]: 波浪成分合成与有限水深 Airy 运动学
//! - [`field`]: 节点池运动学时间序列（湿/干标记、自由面拉伸）

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod airy;
pub mod dispersion;
pub mod field;
pub mod spectrum;

pub use airy::{AiryField, KinSample, StretchMode, WaveComponent, WaveMode, WaveParams};
pub use dispersion::{deep_water_wavelength, solve_wavenumber};
pub use field::WaveKinField;
pub use spectrum::{default_peak_shape, JonswapSpectrum};
