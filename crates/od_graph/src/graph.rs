// crates/od_graph/src/graph.rs

//! 结构图：关节点 / 属性集 / 构件的容器
//!
//! 通过 [`GraphBuilder`] 构建，构建时校验：
//! - 外部 ID 不重复
//! - 构件引用的关节点 / 属性集存在
//! - 构件两端关节点不同、长度非零
//! - 截面几何有效（0 < 2t < D）
//!
//! 构建完成后图是只读的，几何查询（长度、方向、沿轴插值）
//! 由图方法提供。

use glam::DVec3;
use od_foundation::index::{joint, member, propset};
use od_foundation::{JointIndex, MemberIndex, OdError, OdResult, PropSetIndex};
use std::collections::HashMap;

use crate::joint::{Joint, PropSet};
use crate::member::Member;

/// 结构图
#[derive(Debug, Clone)]
pub struct StructuralGraph {
    joints: Vec<Joint>,
    propsets: Vec<PropSet>,
    members: Vec<Member>,
    joint_ids: HashMap<u32, JointIndex>,
    member_ids: HashMap<u32, MemberIndex>,
}

impl StructuralGraph {
    /// 关节点数量
    #[inline]
    pub fn n_joints(&self) -> usize {
        self.joints.len()
    }

    /// 属性集数量
    #[inline]
    pub fn n_propsets(&self) -> usize {
        self.propsets.len()
    }

    /// 构件数量
    #[inline]
    pub fn n_members(&self) -> usize {
        self.members.len()
    }

    /// 关节点切片
    #[inline]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// 构件切片
    #[inline]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// 属性集切片
    #[inline]
    pub fn propsets(&self) -> &[PropSet] {
        &self.propsets
    }

    /// 按内部索引取关节点
    #[inline]
    pub fn joint(&self, idx: JointIndex) -> &Joint {
        &self.joints[idx.as_usize()]
    }

    /// 按内部索引取属性集
    #[inline]
    pub fn propset(&self, idx: PropSetIndex) -> &PropSet {
        &self.propsets[idx.as_usize()]
    }

    /// 按内部索引取构件
    #[inline]
    pub fn member(&self, idx: MemberIndex) -> &Member {
        &self.members[idx.as_usize()]
    }

    /// 按外部 JointID 查找
    pub fn find_joint(&self, id: u32) -> Option<JointIndex> {
        self.joint_ids.get(&id).copied()
    }

    /// 按外部 MemberID 查找
    pub fn find_member(&self, id: u32) -> Option<MemberIndex> {
        self.member_ids.get(&id).copied()
    }

    /// 构件索引迭代器
    pub fn member_indices(&self) -> impl Iterator<Item = MemberIndex> {
        (0..self.members.len()).map(member)
    }

    // ========================================================================
    // 几何查询
    // ========================================================================

    /// 构件两端坐标
    #[inline]
    pub fn member_endpoints(&self, idx: MemberIndex) -> (DVec3, DVec3) {
        let m = self.member(idx);
        (self.joint(m.joint1).point, self.joint(m.joint2).point)
    }

    /// 构件长度 [m]
    pub fn member_length(&self, idx: MemberIndex) -> f64 {
        let (p1, p2) = self.member_endpoints(idx);
        (p2 - p1).length()
    }

    /// 构件轴向单位向量（端点 1 指向端点 2）
    pub fn member_direction(&self, idx: MemberIndex) -> DVec3 {
        let (p1, p2) = self.member_endpoints(idx);
        (p2 - p1).normalize()
    }

    /// 沿构件轴线插值位置，s ∈ [0, 1]
    pub fn member_position(&self, idx: MemberIndex, s: f64) -> DVec3 {
        let (p1, p2) = self.member_endpoints(idx);
        p1.lerp(p2, s)
    }

    /// 构件两端外半径 (R1, R2) [m]
    pub fn member_end_radii(&self, idx: MemberIndex) -> (f64, f64) {
        let m = self.member(idx);
        (
            self.propset(m.prop1).radius(),
            self.propset(m.prop2).radius(),
        )
    }

    /// 构件两端壁厚 (t1, t2) [m]
    pub fn member_end_thickness(&self, idx: MemberIndex) -> (f64, f64) {
        let m = self.member(idx);
        (
            self.propset(m.prop1).thickness,
            self.propset(m.prop2).thickness,
        )
    }
}

/// 结构图构建器
#[derive(Debug, Default)]
pub struct GraphBuilder {
    joints: Vec<Joint>,
    propsets: Vec<PropSet>,
    raw_members: Vec<RawMember>,
}

/// 构建期构件（引用外部 ID，尚未解析）
#[derive(Debug, Clone, Copy)]
struct RawMember {
    id: u32,
    joint1_id: u32,
    joint2_id: u32,
    prop1_id: u32,
    prop2_id: u32,
    div_size: Option<f64>,
    potential: bool,
}

impl GraphBuilder {
    /// 创建空构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加关节点
    pub fn add_joint(&mut self, id: u32, x: f64, y: f64, z: f64) -> &mut Self {
        self.joints.push(Joint::new(id, x, y, z));
        self
    }

    /// 添加属性集
    pub fn add_propset(&mut self, id: u32, diameter: f64, thickness: f64) -> &mut Self {
        self.propsets.push(PropSet::new(id, diameter, thickness));
        self
    }

    /// 添加构件（外部 ID 引用）
    #[allow(clippy::too_many_arguments)]
    pub fn add_member(
        &mut self,
        id: u32,
        joint1_id: u32,
        joint2_id: u32,
        prop1_id: u32,
        prop2_id: u32,
        div_size: Option<f64>,
        potential: bool,
    ) -> &mut Self {
        self.raw_members.push(RawMember {
            id,
            joint1_id,
            joint2_id,
            prop1_id,
            prop2_id,
            div_size,
            potential,
        });
        self
    }

    /// 构建并校验结构图
    pub fn build(self) -> OdResult<StructuralGraph> {
        // 外部 ID 映射，检测重复
        let mut joint_ids = HashMap::with_capacity(self.joints.len());
        for (i, j) in self.joints.iter().enumerate() {
            if joint_ids.insert(j.id, joint(i)).is_some() {
                return Err(OdError::invalid_graph(format!("重复的 JointID: {}", j.id)));
            }
        }

        let mut propset_ids = HashMap::with_capacity(self.propsets.len());
        for (i, p) in self.propsets.iter().enumerate() {
            if propset_ids.insert(p.id, propset(i)).is_some() {
                return Err(OdError::invalid_graph(format!(
                    "重复的 PropSetID: {}",
                    p.id
                )));
            }
            if !p.is_valid() {
                return Err(OdError::invalid_graph(format!(
                    "属性集 {} 截面无效: D={}, t={}",
                    p.id, p.diameter, p.thickness
                )));
            }
        }

        let mut member_ids = HashMap::with_capacity(self.raw_members.len());
        let mut members = Vec::with_capacity(self.raw_members.len());
        for (i, rm) in self.raw_members.iter().enumerate() {
            if member_ids.insert(rm.id, member(i)).is_some() {
                return Err(OdError::invalid_graph(format!(
                    "重复的 MemberID: {}",
                    rm.id
                )));
            }

            let lookup_joint = |jid: u32| -> OdResult<JointIndex> {
                joint_ids.get(&jid).copied().ok_or_else(|| {
                    OdError::invalid_graph(format!(
                        "构件 {} 引用了不存在的 JointID {}",
                        rm.id, jid
                    ))
                })
            };
            let lookup_prop = |pid: u32| -> OdResult<PropSetIndex> {
                propset_ids.get(&pid).copied().ok_or_else(|| {
                    OdError::invalid_graph(format!(
                        "构件 {} 引用了不存在的 PropSetID {}",
                        rm.id, pid
                    ))
                })
            };

            let j1 = lookup_joint(rm.joint1_id)?;
            let j2 = lookup_joint(rm.joint2_id)?;
            if j1 == j2 {
                return Err(OdError::invalid_graph(format!(
                    "构件 {} 两端为同一关节点 {}",
                    rm.id, rm.joint1_id
                )));
            }

            let length = (self.joints[j2.as_usize()].point - self.joints[j1.as_usize()].point)
                .length();
            if length <= 0.0 {
                return Err(OdError::invalid_graph(format!(
                    "构件 {} 长度为零",
                    rm.id
                )));
            }

            if let Some(ds) = rm.div_size {
                if ds <= 0.0 {
                    return Err(OdError::invalid_graph(format!(
                        "构件 {} 划分尺寸无效: {}",
                        rm.id, ds
                    )));
                }
            }

            let mut member =
                Member::new(rm.id, j1, j2, lookup_prop(rm.prop1_id)?, lookup_prop(rm.prop2_id)?)
                    .with_potential(rm.potential);
            member.div_size = rm.div_size;
            members.push(member);
        }

        Ok(StructuralGraph {
            joints: self.joints,
            propsets: self.propsets,
            members,
            joint_ids,
            member_ids,
        })
    }
}
