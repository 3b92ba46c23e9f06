// crates/od_waves/src/field.rs

//! 节点波浪运动学场
//!
//! 对 Morison 节点池中的每个节点生成时间序列：速度、加速度、
//! 动压、湿/干标记与波面高程。湿区判定与自由面拉伸遵循
//! HydroDyn 的 WvStretch_Init 语义：
//!
//! - 模式 0（不拉伸）: 节点湿当且仅当 −d ≤ z ≤ 0，对所有时刻成立
//! - 模式 1（垂向拉伸）: 湿当且仅当 −d ≤ z ≤ η(t)；z ≥ 0 处取 z = 0 的运动学
//! - 模式 2（外插拉伸）: 同模式 1，但 z ≥ 0 处取 z = 0 的一阶 Taylor 外插
//!
//! 所有模式下最后一个时间步复制第 0 步（周期闭合）。
//! 干节点运动学恒为零。

use glam::DVec3;
use od_foundation::{OdError, OdResult};
use rayon::prelude::*;
use tracing::info;

use crate::airy::{AiryField, KinSample, StretchMode, WaveParams};

/// 节点波浪运动学场
///
/// 存储为节点主序：`idx = node * n_times + step`。
#[derive(Debug, Clone)]
pub struct WaveKinField {
    times: Vec<f64>,
    n_nodes: usize,
    wet: Vec<bool>,
    vel: Vec<DVec3>,
    acc: Vec<DVec3>,
    dyn_p: Vec<f64>,
    elev: Vec<f64>,
}

/// 单个节点的时间序列（生成期中间量）
struct NodeSeries {
    wet: Vec<bool>,
    vel: Vec<DVec3>,
    acc: Vec<DVec3>,
    dyn_p: Vec<f64>,
    elev: Vec<f64>,
}

impl WaveKinField {
    /// 生成节点运动学场
    ///
    /// `positions` 为节点坐标（z 相对静水面 SWL），`field` 为已合成
    /// 的波场。节点循环并行执行。
    pub fn generate(
        field: &AiryField,
        params: &WaveParams,
        positions: &[DVec3],
    ) -> OdResult<Self> {
        if positions.is_empty() {
            return Err(OdError::invalid_input("节点列表为空"));
        }
        let n_steps = params.n_step_wave();
        let nt = n_steps + 1;
        let times: Vec<f64> = (0..nt).map(|i| i as f64 * params.dt).collect();
        let depth = field.depth();

        info!(
            "生成波浪运动学: {} 节点 × {} 时间步, 拉伸模式 {:?}",
            positions.len(),
            nt,
            params.stretch
        );

        let series: Vec<NodeSeries> = positions
            .par_iter()
            .map(|p| Self::node_series(field, params.stretch, *p, depth, &times))
            .collect();

        // 展平为节点主序
        let n_nodes = positions.len();
        let mut wet = Vec::with_capacity(n_nodes * nt);
        let mut vel = Vec::with_capacity(n_nodes * nt);
        let mut acc = Vec::with_capacity(n_nodes * nt);
        let mut dyn_p = Vec::with_capacity(n_nodes * nt);
        let mut elev = Vec::with_capacity(n_nodes * nt);
        for s in series {
            wet.extend(s.wet);
            vel.extend(s.vel);
            acc.extend(s.acc);
            dyn_p.extend(s.dyn_p);
            elev.extend(s.elev);
        }

        Ok(Self {
            times,
            n_nodes,
            wet,
            vel,
            acc,
            dyn_p,
            elev,
        })
    }

    /// 单节点时间序列
    fn node_series(
        field: &AiryField,
        stretch: StretchMode,
        p: DVec3,
        depth: f64,
        times: &[f64],
    ) -> NodeSeries {
        let nt = times.len();
        let mut s = NodeSeries {
            wet: vec![false; nt],
            vel: vec![DVec3::ZERO; nt],
            acc: vec![DVec3::ZERO; nt],
            dyn_p: vec![0.0; nt],
            elev: vec![0.0; nt],
        };

        for (it, &t) in times.iter().enumerate().take(nt - 1) {
            let eta = field.elevation(p.x, p.y, t);
            s.elev[it] = eta;

            let (wet, kin) = match stretch {
                StretchMode::None => {
                    // 湿区与时间无关：海底以上、静水面以下
                    if p.z < -depth || p.z > 0.0 {
                        (false, KinSample::ZERO)
                    } else {
                        (true, field.kinematics(p.x, p.y, p.z, t))
                    }
                }
                StretchMode::Vertical => {
                    if p.z < -depth || p.z > eta {
                        (false, KinSample::ZERO)
                    } else if p.z >= 0.0 {
                        // 静水面以上、瞬时波面以下：取 z = 0 的运动学
                        (true, field.kinematics(p.x, p.y, 0.0, t))
                    } else {
                        (true, field.kinematics(p.x, p.y, p.z, t))
                    }
                }
                StretchMode::Extrapolation => {
                    if p.z < -depth || p.z > eta {
                        (false, KinSample::ZERO)
                    } else if p.z >= 0.0 {
                        // 一阶 Taylor 外插: K(0) + z·∂K/∂z(0)
                        let k0 = field.kinematics(p.x, p.y, 0.0, t);
                        let dk = field.kinematics_dz_at_surface(p.x, p.y, t);
                        (
                            true,
                            KinSample {
                                vel: k0.vel + p.z * dk.vel,
                                acc: k0.acc + p.z * dk.acc,
                                dyn_p: k0.dyn_p + p.z * dk.dyn_p,
                            },
                        )
                    } else {
                        (true, field.kinematics(p.x, p.y, p.z, t))
                    }
                }
            };

            s.wet[it] = wet;
            s.vel[it] = kin.vel;
            s.acc[it] = kin.acc;
            s.dyn_p[it] = kin.dyn_p;
        }

        // 最后一步复制第 0 步（周期闭合）
        s.wet[nt - 1] = s.wet[0];
        s.vel[nt - 1] = s.vel[0];
        s.acc[nt - 1] = s.acc[0];
        s.dyn_p[nt - 1] = s.dyn_p[0];
        s.elev[nt - 1] = s.elev[0];

        s
    }

    #[inline]
    fn idx(&self, node: usize, step: usize) -> usize {
        debug_assert!(node < self.n_nodes && step < self.times.len());
        node * self.times.len() + step
    }

    /// 时间数组 [s]
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// 节点数量
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// 时间步数量（含闭合步）
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.times.len()
    }

    /// 节点在某步是否湿
    #[inline]
    pub fn is_wet(&self, node: usize, step: usize) -> bool {
        self.wet[self.idx(node, step)]
    }

    /// 节点是否在任意时刻湿过
    pub fn is_ever_wet(&self, node: usize) -> bool {
        let nt = self.times.len();
        self.wet[node * nt..(node + 1) * nt].iter().any(|&w| w)
    }

    /// 速度采样 [m/s]
    #[inline]
    pub fn velocity(&self, node: usize, step: usize) -> DVec3 {
        self.vel[self.idx(node, step)]
    }

    /// 加速度采样 [m/s²]
    #[inline]
    pub fn acceleration(&self, node: usize, step: usize) -> DVec3 {
        self.acc[self.idx(node, step)]
    }

    /// 动压采样 [Pa]
    #[inline]
    pub fn dynamic_pressure(&self, node: usize, step: usize) -> f64 {
        self.dyn_p[self.idx(node, step)]
    }

    /// 波面高程采样 [m]
    #[inline]
    pub fn elevation(&self, node: usize, step: usize) -> f64 {
        self.elev[self.idx(node, step)]
    }

    /// 节点波面高程序列
    pub fn elevation_series(&self, node: usize) -> &[f64] {
        let nt = self.times.len();
        &self.elev[node * nt..(node + 1) * nt]
    }
}
