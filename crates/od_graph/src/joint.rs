// crates/od_graph/src/joint.rs

//! 关节点与截面属性集
//!
//! 关节点（Joint）是输入甲板中定义的三维点；截面属性集（PropSet）
//! 描述圆管截面的外径与壁厚。二者都携带输入文件中的外部 ID，
//! 内部引用统一使用强类型索引。

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 关节点：外部 ID + 三维坐标
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Joint {
    /// 输入文件中的 JointID
    pub id: u32,
    /// 坐标 [m]，z 轴向上，z=0 为平均海平面
    #[serde(with = "dvec3_serde")]
    pub point: DVec3,
}

impl Joint {
    /// 创建关节点
    pub fn new(id: u32, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            point: DVec3::new(x, y, z),
        }
    }

    /// 高程（z 坐标）[m]
    #[inline]
    pub fn elevation(&self) -> f64 {
        self.point.z
    }
}

/// 圆管截面属性集：外径与壁厚
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PropSet {
    /// 输入文件中的 PropSetID
    pub id: u32,
    /// 外径 D [m]
    pub diameter: f64,
    /// 壁厚 t [m]
    pub thickness: f64,
}

impl PropSet {
    /// 创建属性集
    pub fn new(id: u32, diameter: f64, thickness: f64) -> Self {
        Self {
            id,
            diameter,
            thickness,
        }
    }

    /// 外半径 [m]
    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// 内半径 [m]
    #[inline]
    pub fn inner_radius(&self) -> f64 {
        self.diameter / 2.0 - self.thickness
    }

    /// 截面几何是否有效（0 < 2t < D）
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.diameter > 0.0 && self.thickness > 0.0 && 2.0 * self.thickness < self.diameter
    }
}

/// DVec3 的 serde 适配（序列化为 [x, y, z]）
mod dvec3_serde {
    use glam::DVec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &DVec3, s: S) -> Result<S::Ok, S::Error> {
        [v.x, v.y, v.z].serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DVec3, D::Error> {
        let a = <[f64; 3]>::deserialize(d)?;
        Ok(DVec3::from_array(a))
    }
}
