// crates/od_morison/src/model.rs

//! 水动力模型初始化流水线
//!
//! [`HydroModel::init`] 依次完成：
//! 1. 环境参数解析（输入文件 `default` 值与运行配置合并）
//! 2. Morison 划分（节点池生成）
//! 3. 波场合成与节点运动学时间序列
//! 4. 构件体积积分（总体积 / 水下体积）
//!
//! 体积查询提供三种方法：
//! - `NoDiv`: 直接对整根构件做锥台积分
//! - `Div`: 按划分逐段积分后求和
//! - `Morison`: 取初始化时缓存的模型总量
//!
//! 两条积分路径在线性锥形截面下解析一致，作为一致性校验。

use od_config::{EnvironmentConfig, MorisonConfig};
use od_foundation::{OdError, OdResult};
use od_graph::StructuralGraph;
use od_waves::{AiryField, WaveKinField, WaveParams};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::geometry::{submerged_frustum_volume, tapered_cylinder_geom};
use crate::partition::{MorisonDiscretization, MorisonMember};

/// 已解析的环境参数
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Environment {
    /// 重力加速度 [m/s²]
    pub gravity: f64,
    /// 海水密度 [kg/m³]
    pub wtr_dens: f64,
    /// 总水深（海底到静水面 SWL）= WtrDpth + MSL2SWL [m]
    pub wtr_dpth: f64,
    /// MSL 到 SWL 偏移 [m]
    pub msl2swl: f64,
}

impl Environment {
    /// 合并输入文件值与运行配置
    ///
    /// 输入文件中标记 `default`（即 None）的参数必须由运行配置提供，
    /// 否则报错。运行配置中的 Some 值优先于文件值。
    pub fn resolve(
        file_wtr_dens: Option<f64>,
        file_wtr_dpth: Option<f64>,
        file_msl2swl: Option<f64>,
        overrides: &EnvironmentConfig,
    ) -> OdResult<Self> {
        let pick = |key: &str, over: Option<f64>, file: Option<f64>| -> OdResult<f64> {
            over.or(file).ok_or_else(|| {
                OdError::missing_key(format!("{key} 在输入文件中为 default 且运行配置未提供"))
            })
        };
        let wtr_dens = pick("WtrDens", overrides.wtr_dens, file_wtr_dens)?;
        let wtr_dpth = pick("WtrDpth", overrides.wtr_dpth, file_wtr_dpth)?;
        let msl2swl = pick("MSL2SWL", overrides.msl2swl, file_msl2swl).unwrap_or(0.0);

        OdError::check_range("WtrDens", wtr_dens, 1e-6, f64::INFINITY)?;
        OdError::check_range("WtrDpth", wtr_dpth, 0.0, f64::INFINITY)?;

        Ok(Self {
            gravity: overrides.gravity,
            wtr_dens,
            wtr_dpth: wtr_dpth + msl2swl,
            msl2swl,
        })
    }
}

/// 体积计算方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeMethod {
    /// 整根构件直接积分
    NoDiv,
    /// 按划分逐段积分
    Div,
    /// 初始化时缓存的 Morison 模型总量
    Morison,
}

/// 单构件体积结果（初始化时缓存）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MemberVolumes {
    /// 外轮廓总体积 Vouter [m³]
    pub outer: f64,
    /// 水下体积 Vsubmerged [m³]
    pub submerged: f64,
}

/// Morison 模型：离散化 + 节点运动学绑定 + 体积总量
#[derive(Debug)]
pub struct MorisonModel {
    disc: MorisonDiscretization,
    volumes: Vec<MemberVolumes>,
    volume_structure: f64,
    volume_submerged: f64,
}

impl MorisonModel {
    /// 由离散化初始化模型，校验运动学场与节点池一致
    pub fn init(disc: MorisonDiscretization, kin: &WaveKinField) -> OdResult<Self> {
        OdError::check_size("WaveKin 节点数", disc.n_nodes(), kin.n_nodes())?;

        let mut volumes = Vec::with_capacity(disc.members().len());
        let mut total_outer = 0.0;
        let mut total_sub = 0.0;
        for m in disc.members() {
            let v = Self::member_volumes_divided(&disc, m)?;
            total_outer += v.outer;
            total_sub += v.submerged;
            volumes.push(v);
        }

        info!(
            "Morison 初始化: {} 构件, {} 节点, V={:.3} m³, V水下={:.3} m³",
            disc.members().len(),
            disc.n_nodes(),
            total_outer,
            total_sub
        );

        Ok(Self {
            disc,
            volumes,
            volume_structure: total_outer,
            volume_submerged: total_sub,
        })
    }

    /// 按划分逐段积分单构件体积
    fn member_volumes_divided(
        disc: &MorisonDiscretization,
        m: &MorisonMember,
    ) -> OdResult<MemberVolumes> {
        let pos = disc.member_node_positions(m);
        let mut outer = 0.0;
        let mut submerged = 0.0;
        for j in 0..m.n_div {
            let (z1, z2) = (pos[j].z, pos[j + 1].z);
            let (r1, r2) = (m.r_mg[j], m.r_mg[j + 1]);
            outer += tapered_cylinder_geom(r1, r2, m.dl).0;
            submerged += submerged_frustum_volume(z1, r1, z2, r2, m.dl);
        }
        Ok(MemberVolumes { outer, submerged })
    }

    /// 离散化数据
    #[inline]
    pub fn discretization(&self) -> &MorisonDiscretization {
        &self.disc
    }

    /// 单构件体积（初始化缓存）
    #[inline]
    pub fn member_volumes(&self) -> &[MemberVolumes] {
        &self.volumes
    }

    /// 结构总体积 [m³]
    #[inline]
    pub fn volume_structure(&self) -> f64 {
        self.volume_structure
    }

    /// 水下总体积 [m³]
    #[inline]
    pub fn volume_submerged(&self) -> f64 {
        self.volume_submerged
    }
}

/// 水动力模型：图 + 环境 + 波浪 + Morison
#[derive(Debug)]
pub struct HydroModel {
    env: Environment,
    graph: StructuralGraph,
    waves: AiryField,
    wave_params: WaveParams,
    kin: WaveKinField,
    morison: MorisonModel,
}

impl HydroModel {
    /// 初始化水动力模型
    pub fn init(
        graph: StructuralGraph,
        env: Environment,
        wave_params: WaveParams,
        morison_config: &MorisonConfig,
    ) -> OdResult<Self> {
        info!(
            "HydroDyn 初始化: 水深={} m, 密度={} kg/m³, 重力={} m/s²",
            env.wtr_dpth, env.wtr_dens, env.gravity
        );

        // Morison 划分（节点池即波浪运动学网格）
        let disc =
            MorisonDiscretization::build(&graph, env.msl2swl, morison_config.default_div_size)?;

        // 波场合成与节点运动学
        let waves = AiryField::synthesize(&wave_params, env.wtr_dpth, env.gravity, env.wtr_dens)?;
        let kin = WaveKinField::generate(&waves, &wave_params, disc.nodes())?;

        // Morison 模型绑定
        let morison = MorisonModel::init(disc, &kin)?;

        Ok(Self {
            env,
            graph,
            waves,
            wave_params,
            kin,
            morison,
        })
    }

    /// 环境参数
    #[inline]
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// 结构图
    #[inline]
    pub fn graph(&self) -> &StructuralGraph {
        &self.graph
    }

    /// 波场
    #[inline]
    pub fn waves(&self) -> &AiryField {
        &self.waves
    }

    /// 波浪参数
    #[inline]
    pub fn wave_params(&self) -> &WaveParams {
        &self.wave_params
    }

    /// 节点运动学场
    #[inline]
    pub fn kinematics(&self) -> &WaveKinField {
        &self.kin
    }

    /// Morison 模型
    #[inline]
    pub fn morison(&self) -> &MorisonModel {
        &self.morison
    }

    // ========================================================================
    // 构件体积（NoDiv 直接积分路径）
    // ========================================================================

    /// 检查构件端点不低于海底
    fn check_above_seabed(&self, za: f64, zb: f64, id: u32) -> OdResult<()> {
        if za < -self.env.wtr_dpth || zb < -self.env.wtr_dpth {
            return Err(OdError::not_implemented(format!(
                "构件 {id} 端点低于海底（z < −WtrDpth）"
            )));
        }
        Ok(())
    }

    /// 单构件外轮廓体积（整根直接积分）[m³]
    pub fn member_volume_structure(&self, id: u32) -> OdResult<f64> {
        let mi = self
            .graph
            .find_member(id)
            .ok_or_else(|| OdError::invalid_input(format!("不存在的 MemberID {id}")))?;
        let (p1, p2) = self.graph.member_endpoints(mi);
        let (za, zb) = (p1.z - self.env.msl2swl, p2.z - self.env.msl2swl);
        self.check_above_seabed(za, zb, id)?;

        let (r1, r2) = self.graph.member_end_radii(mi);
        Ok(tapered_cylinder_geom(r1, r2, self.graph.member_length(mi)).0)
    }

    /// 单构件水下体积（整根直接积分，跨水面时插值到 z = 0）[m³]
    pub fn member_volume_submerged(&self, id: u32) -> OdResult<f64> {
        let mi = self
            .graph
            .find_member(id)
            .ok_or_else(|| OdError::invalid_input(format!("不存在的 MemberID {id}")))?;
        let (p1, p2) = self.graph.member_endpoints(mi);
        let (za, zb) = (p1.z - self.env.msl2swl, p2.z - self.env.msl2swl);
        self.check_above_seabed(za, zb, id)?;

        let (r1, r2) = self.graph.member_end_radii(mi);
        Ok(submerged_frustum_volume(
            za,
            r1,
            zb,
            r2,
            self.graph.member_length(mi),
        ))
    }

    /// 结构总体积 [m³]
    pub fn volume_structure(&self, method: VolumeMethod) -> OdResult<f64> {
        match method {
            VolumeMethod::Morison => Ok(self.morison.volume_structure()),
            VolumeMethod::Div => Ok(self
                .morison
                .member_volumes()
                .iter()
                .map(|v| v.outer)
                .sum()),
            VolumeMethod::NoDiv => {
                let mut total = 0.0;
                for m in self.graph.members() {
                    total += self.member_volume_structure(m.id)?;
                }
                Ok(total)
            }
        }
    }

    /// 水下总体积 [m³]
    pub fn volume_submerged(&self, method: VolumeMethod) -> OdResult<f64> {
        match method {
            VolumeMethod::Morison => Ok(self.morison.volume_submerged()),
            VolumeMethod::Div => Ok(self
                .morison
                .member_volumes()
                .iter()
                .map(|v| v.submerged)
                .sum()),
            VolumeMethod::NoDiv => {
                let mut total = 0.0;
                for m in self.graph.members() {
                    total += self.member_volume_submerged(m.id)?;
                }
                Ok(total)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use od_graph::GraphBuilder;
    use od_waves::{StretchMode, WaveMode};
    use std::f64::consts::PI;

    fn spar_graph() -> StructuralGraph {
        let mut b = GraphBuilder::new();
        // 竖直柱：z −20 → +4（跨水面），锥形 R 3 → 2
        b.add_joint(1, 0.0, 0.0, -20.0)
            .add_joint(2, 0.0, 0.0, 4.0)
            // 水平全浸构件 z = −10
            .add_joint(3, 5.0, 0.0, -10.0)
            .add_joint(4, 15.0, 0.0, -10.0)
            .add_propset(1, 6.0, 0.06)
            .add_propset(2, 4.0, 0.04)
            .add_member(1, 1, 2, 1, 2, Some(2.0), false)
            .add_member(2, 3, 4, 2, 2, Some(2.0), false);
        b.build().unwrap()
    }

    fn env() -> Environment {
        Environment {
            gravity: 9.81,
            wtr_dens: 1025.0,
            wtr_dpth: 50.0,
            msl2swl: 0.0,
        }
    }

    fn wave_params() -> WaveParams {
        WaveParams {
            mode: WaveMode::Regular,
            stretch: StretchMode::None,
            hs: 2.0,
            tp: 8.0,
            tmax: 40.0,
            dt: 0.5,
            ..Default::default()
        }
    }

    fn model() -> HydroModel {
        HydroModel::init(
            spar_graph(),
            env(),
            wave_params(),
            &MorisonConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_environment_resolve_priority() {
        let mut overrides = EnvironmentConfig::default();
        overrides.wtr_dens = Some(1000.0);
        let e = Environment::resolve(Some(1025.0), Some(40.0), Some(2.0), &overrides).unwrap();
        // 覆盖值优先
        assert!((e.wtr_dens - 1000.0).abs() < 1e-12);
        // 总水深 = WtrDpth + MSL2SWL
        assert!((e.wtr_dpth - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_environment_resolve_missing() {
        let overrides = EnvironmentConfig::default();
        assert!(Environment::resolve(None, Some(40.0), Some(0.0), &overrides).is_err());
        assert!(Environment::resolve(Some(1025.0), None, Some(0.0), &overrides).is_err());
    }

    #[test]
    fn test_msl2swl_defaults_to_zero() {
        let overrides = EnvironmentConfig::default();
        let e = Environment::resolve(Some(1025.0), Some(40.0), None, &overrides).unwrap();
        assert_eq!(e.msl2swl, 0.0);
        assert!((e.wtr_dpth - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_member_volume_structure_direct() {
        let m = model();
        // 构件 2：等截面 R=2, L=10
        let v = m.member_volume_structure(2).unwrap();
        assert!((v - PI * 4.0 * 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_member_volume_submerged_partial() {
        let m = model();
        // 构件 1 跨水面：z −20 → 4，水下比例 20/24
        let v_sub = m.member_volume_submerged(1).unwrap();
        let v_full = m.member_volume_structure(1).unwrap();
        assert!(v_sub > 0.0 && v_sub < v_full);

        // 手工核对：交点半径 = 3 + (2−3)·(20/24)
        let r0 = 3.0 + (2.0 - 3.0) * (20.0 / 24.0);
        let l_sub = 24.0 * 20.0 / 24.0;
        let (expected, _) = tapered_cylinder_geom(3.0, r0, l_sub);
        assert!((v_sub - expected).abs() < 1e-10);
    }

    #[test]
    fn test_member_volume_fully_submerged() {
        let m = model();
        let v_sub = m.member_volume_submerged(2).unwrap();
        let v_full = m.member_volume_structure(2).unwrap();
        assert!((v_sub - v_full).abs() < 1e-12);
    }

    #[test]
    fn test_div_nodiv_consistency() {
        // 线性锥形下两条积分路径解析一致（原始驱动的交叉校验）
        let m = model();
        let v_nodiv = m.volume_structure(VolumeMethod::NoDiv).unwrap();
        let v_div = m.volume_structure(VolumeMethod::Div).unwrap();
        let v_mor = m.volume_structure(VolumeMethod::Morison).unwrap();
        assert!((v_nodiv - v_div).abs() < 1e-8, "{v_nodiv} vs {v_div}");
        assert!((v_div - v_mor).abs() < 1e-12);

        let s_nodiv = m.volume_submerged(VolumeMethod::NoDiv).unwrap();
        let s_div = m.volume_submerged(VolumeMethod::Div).unwrap();
        assert!((s_nodiv - s_div).abs() < 1e-8, "{s_nodiv} vs {s_div}");
    }

    #[test]
    fn test_volumes_nonnegative() {
        let m = model();
        assert!(m.volume_structure(VolumeMethod::Morison).unwrap() >= 0.0);
        assert!(m.volume_submerged(VolumeMethod::Morison).unwrap() >= 0.0);
        assert!(
            m.volume_submerged(VolumeMethod::Morison).unwrap()
                <= m.volume_structure(VolumeMethod::Morison).unwrap()
        );
    }

    #[test]
    fn test_below_seabed_rejected() {
        let mut b = GraphBuilder::new();
        b.add_joint(1, 0.0, 0.0, -80.0)
            .add_joint(2, 0.0, 0.0, 0.0)
            .add_propset(1, 6.0, 0.06)
            .add_member(1, 1, 2, 1, 1, Some(5.0), false);
        let g = b.build().unwrap();
        let m = HydroModel::init(g, env(), wave_params(), &MorisonConfig::default()).unwrap();
        // 端点 z=-80 < −50
        assert!(m.member_volume_submerged(1).is_err());
        assert!(m.member_volume_structure(1).is_err());
    }

    #[test]
    fn test_kinematics_grid_matches_node_pool() {
        let m = model();
        assert_eq!(
            m.kinematics().n_nodes(),
            m.morison().discretization().n_nodes()
        );
        // 水下节点应有非零运动学
        let disc = m.morison().discretization();
        let kin = m.kinematics();
        let mut found_wet = false;
        for (j, p) in disc.nodes().iter().enumerate() {
            if p.z < 0.0 && p.z > -50.0 {
                assert!(kin.is_wet(j, 0));
                found_wet = true;
            }
        }
        assert!(found_wet);
    }

    #[test]
    fn test_unknown_member_id() {
        let m = model();
        assert!(m.member_volume_structure(99).is_err());
    }
}
