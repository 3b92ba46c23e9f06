// crates/od_io/src/lib.rs

//! OceanDyn 输入输出层
//!
//! - [`deck`]: FAST/HydroDyn 风格输入甲板解析与 甲板 → 结构图 转换
//! - [`summary`]: 初始化摘要（.sum）写出
//! - [`export`]: 波面高程 / 节点运动学 CSV 导出

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod deck;
pub mod export;
pub mod summary;

pub use deck::{InputDeck, JointRow, MemberRow, PropSetRow};
pub use export::{write_elevation_csv_file, write_kinematics_csv_file};
pub use summary::{write_summary, write_summary_file};
