// crates/od_graph/src/member.rs

//! 构件定义
//!
//! 构件（Member）连接两个关节点，截面可沿轴线锥形过渡
//! （两端各引用一个属性集）。`div_size` 控制 Morison 离散化
//! 时的目标单元长度；`potential` 标记势流构件（不作划分，
//! 载荷由势流求解器承担）。

use od_foundation::{JointIndex, PropSetIndex};
use serde::{Deserialize, Serialize};

/// 构件：关节点对 + 两端截面属性
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Member {
    /// 输入文件中的 MemberID
    pub id: u32,
    /// 端点 1 关节点索引
    pub joint1: JointIndex,
    /// 端点 2 关节点索引
    pub joint2: JointIndex,
    /// 端点 1 属性集索引
    pub prop1: PropSetIndex,
    /// 端点 2 属性集索引
    pub prop2: PropSetIndex,
    /// 目标划分尺寸 [m]，None 时使用配置默认值
    pub div_size: Option<f64>,
    /// 势流构件标记（PropPot）
    pub potential: bool,
}

impl Member {
    /// 创建构件
    pub fn new(
        id: u32,
        joint1: JointIndex,
        joint2: JointIndex,
        prop1: PropSetIndex,
        prop2: PropSetIndex,
    ) -> Self {
        Self {
            id,
            joint1,
            joint2,
            prop1,
            prop2,
            div_size: None,
            potential: false,
        }
    }

    /// 设置划分尺寸
    pub fn with_div_size(mut self, div_size: f64) -> Self {
        self.div_size = Some(div_size);
        self
    }

    /// 设置势流标记
    pub fn with_potential(mut self, potential: bool) -> Self {
        self.potential = potential;
        self
    }

    /// 截面是否锥形（两端属性集不同）
    #[inline]
    pub fn is_tapered(&self) -> bool {
        self.prop1 != self.prop2
    }
}
