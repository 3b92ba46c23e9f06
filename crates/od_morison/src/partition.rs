// crates/od_morison/src/partition.rs

//! Morison 离散化：构件划分与节点池
//!
//! 将结构图的每个非势流构件按目标单元长度划分：
//! numDiv = ceil(L / divSize)，内部节点沿轴线线性插值；
//! 势流构件不划分（单段）。
//!
//! 节点池顺序：先全部关节点（与图中顺序一致），再按构件顺序
//! 追加内部节点。这一顺序即波浪运动学网格的节点顺序。
//!
//! 所有节点坐标转换到静水面（SWL）参考系：z_swl = z_msl − MSL2SWL。

use glam::DVec3;
use od_foundation::{MemberIndex, OdError, OdResult};
use od_graph::StructuralGraph;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 单个构件的 Morison 离散化数据
///
/// 节点数组长度均为 `n_div + 1`（两端 + 内部节点）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorisonMember {
    /// 对应结构图构件索引
    pub member: MemberIndex,
    /// 输入文件 MemberID
    pub id: u32,
    /// 划分段数
    pub n_div: usize,
    /// 单段轴向长度 dl [m]
    pub dl: f64,
    /// 构件总长 [m]
    pub length: f64,
    /// 节点池下标（两端 + 内部，沿轴向有序）
    pub node_ids: Vec<usize>,
    /// 外半径（线性锥形插值）[m]
    pub r: Vec<f64>,
    /// 壁厚 [m]
    pub t: Vec<f64>,
    /// 海生物附着厚度 [m]（保留钩子，当前为零）
    pub t_mg: Vec<f64>,
    /// 含海生物外半径 RMG = R + tMG [m]
    pub r_mg: Vec<f64>,
    /// 内半径 Rin = R − t [m]
    pub r_in: Vec<f64>,
    /// 势流构件标记
    pub potential: bool,
}

/// Morison 离散化结果：节点池 + 构件数据
#[derive(Debug, Clone)]
pub struct MorisonDiscretization {
    /// 节点坐标（SWL 参考系）
    nodes: Vec<DVec3>,
    /// 关节点数量（节点池前缀）
    n_joints: usize,
    /// 构件离散化数据
    members: Vec<MorisonMember>,
}

impl MorisonDiscretization {
    /// 对结构图做 Morison 划分
    ///
    /// `msl2swl` 为 MSL 到 SWL 的偏移；`default_div_size` 在构件
    /// 未指定划分尺寸时使用。
    pub fn build(
        graph: &StructuralGraph,
        msl2swl: f64,
        default_div_size: f64,
    ) -> OdResult<Self> {
        if graph.n_members() == 0 {
            return Err(OdError::invalid_graph("结构图不含构件"));
        }
        OdError::check_range("default_div_size", default_div_size, 1e-9, f64::INFINITY)?;

        // 关节点先入池，MSL → SWL
        let mut nodes: Vec<DVec3> = graph
            .joints()
            .iter()
            .map(|j| j.point - DVec3::new(0.0, 0.0, msl2swl))
            .collect();
        let n_joints = nodes.len();

        let mut members = Vec::with_capacity(graph.n_members());
        for mi in graph.member_indices() {
            let m = graph.member(mi);
            let length = graph.member_length(mi);
            let (r1, r2) = graph.member_end_radii(mi);
            let (t1, t2) = graph.member_end_thickness(mi);

            // 势流构件不划分
            let n_div = if m.potential {
                1
            } else {
                let div_size = m.div_size.unwrap_or(default_div_size);
                (length / div_size).ceil().max(1.0) as usize
            };
            let dl = length / n_div as f64;

            // 节点下标：端点 1 + 内部 + 端点 2
            let mut node_ids = Vec::with_capacity(n_div + 1);
            node_ids.push(m.joint1.as_usize());
            for j in 1..n_div {
                let s = j as f64 / n_div as f64;
                let p = graph.member_position(mi, s) - DVec3::new(0.0, 0.0, msl2swl);
                node_ids.push(nodes.len());
                nodes.push(p);
            }
            node_ids.push(m.joint2.as_usize());

            // 端属性沿轴线线性插值
            let n_pts = n_div + 1;
            let lerp = |a: f64, b: f64, j: usize| a + (b - a) * j as f64 / n_div as f64;
            let r: Vec<f64> = (0..n_pts).map(|j| lerp(r1, r2, j)).collect();
            let t: Vec<f64> = (0..n_pts).map(|j| lerp(t1, t2, j)).collect();
            let t_mg = vec![0.0; n_pts];
            let r_mg: Vec<f64> = r.iter().zip(&t_mg).map(|(r, tm)| r + tm).collect();
            let r_in: Vec<f64> = r.iter().zip(&t).map(|(r, t)| r - t).collect();

            debug!(
                "构件 {}: L={:.3} m, numDiv={}, dl={:.3} m",
                m.id, length, n_div, dl
            );

            members.push(MorisonMember {
                member: mi,
                id: m.id,
                n_div,
                dl,
                length,
                node_ids,
                r,
                t,
                t_mg,
                r_mg,
                r_in,
                potential: m.potential,
            });
        }

        Ok(Self {
            nodes,
            n_joints,
            members,
        })
    }

    /// 节点池坐标（SWL 参考系）
    #[inline]
    pub fn nodes(&self) -> &[DVec3] {
        &self.nodes
    }

    /// 节点总数
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// 关节点数量（节点池前缀长度）
    #[inline]
    pub fn n_joints(&self) -> usize {
        self.n_joints
    }

    /// 构件离散化数据
    #[inline]
    pub fn members(&self) -> &[MorisonMember] {
        &self.members
    }

    /// 某构件的节点坐标序列
    pub fn member_node_positions(&self, m: &MorisonMember) -> Vec<DVec3> {
        m.node_ids.iter().map(|&i| self.nodes[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use od_graph::GraphBuilder;

    fn two_member_graph() -> StructuralGraph {
        let mut b = GraphBuilder::new();
        b.add_joint(1, 0.0, 0.0, -20.0)
            .add_joint(2, 0.0, 0.0, 0.0)
            .add_joint(3, 10.0, 0.0, 0.0)
            .add_propset(1, 6.0, 0.06)
            .add_propset(2, 4.0, 0.04)
            // 竖直锥形构件，L=20，divSize=4 → 5 段
            .add_member(1, 1, 2, 1, 2, Some(4.0), false)
            // 水平构件，L=10，divSize=3 → ceil(10/3)=4 段
            .add_member(2, 2, 3, 2, 2, Some(3.0), false);
        b.build().unwrap()
    }

    #[test]
    fn test_division_counts() {
        let g = two_member_graph();
        let disc = MorisonDiscretization::build(&g, 0.0, 0.5).unwrap();
        let m1 = &disc.members()[0];
        let m2 = &disc.members()[1];
        assert_eq!(m1.n_div, 5);
        assert!((m1.dl - 4.0).abs() < 1e-12);
        assert_eq!(m2.n_div, 4);
        assert!((m2.dl - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_node_pool_ordering() {
        let g = two_member_graph();
        let disc = MorisonDiscretization::build(&g, 0.0, 0.5).unwrap();
        // 前 3 个为关节点
        assert_eq!(disc.n_joints(), 3);
        // 总数 = 关节点 + (5-1) + (4-1)
        assert_eq!(disc.n_nodes(), 3 + 4 + 3);
        // 构件 1 的内部节点紧随关节点
        let m1 = &disc.members()[0];
        assert_eq!(m1.node_ids[0], 0);
        assert_eq!(m1.node_ids[5], 1);
        assert_eq!(m1.node_ids[1], 3);
    }

    #[test]
    fn test_interior_node_positions() {
        let g = two_member_graph();
        let disc = MorisonDiscretization::build(&g, 0.0, 0.5).unwrap();
        let m1 = &disc.members()[0];
        let pos = disc.member_node_positions(m1);
        // 竖直构件 z: -20 → 0，内部节点等距
        for (j, p) in pos.iter().enumerate() {
            let expected_z = -20.0 + 4.0 * j as f64;
            assert!((p.z - expected_z).abs() < 1e-12, "节点 {j}");
        }
    }

    #[test]
    fn test_radius_taper_interpolation() {
        let g = two_member_graph();
        let disc = MorisonDiscretization::build(&g, 0.0, 0.5).unwrap();
        let m1 = &disc.members()[0];
        // R: 3.0 → 2.0 线性
        assert!((m1.r[0] - 3.0).abs() < 1e-12);
        assert!((m1.r[5] - 2.0).abs() < 1e-12);
        assert!((m1.r[2] - (3.0 - 0.4 * 1.0)).abs() < 1e-12);
        // Rin = R − t, RMG = R（无海生物）
        for j in 0..6 {
            assert!((m1.r_in[j] - (m1.r[j] - m1.t[j])).abs() < 1e-12);
            assert!((m1.r_mg[j] - m1.r[j]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_msl2swl_shift() {
        let g = two_member_graph();
        let disc = MorisonDiscretization::build(&g, 1.5, 0.5).unwrap();
        // 关节点 2 原 z=0（MSL），SWL 系下 z=-1.5
        assert!((disc.nodes()[1].z + 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_potential_member_not_divided() {
        let mut b = GraphBuilder::new();
        b.add_joint(1, 0.0, 0.0, -10.0)
            .add_joint(2, 0.0, 0.0, 0.0)
            .add_propset(1, 6.0, 0.06)
            .add_member(1, 1, 2, 1, 1, Some(0.5), true);
        let g = b.build().unwrap();
        let disc = MorisonDiscretization::build(&g, 0.5, 0.5).unwrap();
        let m = &disc.members()[0];
        assert!(m.potential);
        assert_eq!(m.n_div, 1);
        assert_eq!(disc.n_nodes(), 2);
    }

    #[test]
    fn test_default_div_size_applied() {
        let mut b = GraphBuilder::new();
        b.add_joint(1, 0.0, 0.0, -10.0)
            .add_joint(2, 0.0, 0.0, 0.0)
            .add_propset(1, 6.0, 0.06)
            .add_member(1, 1, 2, 1, 1, None, false);
        let g = b.build().unwrap();
        let disc = MorisonDiscretization::build(&g, 0.0, 2.5).unwrap();
        assert_eq!(disc.members()[0].n_div, 4);
    }
}
