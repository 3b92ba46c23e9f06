// crates/od_waves/src/airy.rs

//! 线性（Airy）波场
//!
//! 波浪由一组线性成分叠加而成：
//! - WaveMod 0: 静水（无成分）
//! - WaveMod 1: 规则波（单成分，幅值 Hs/2，频率 2π/Tp）
//! - WaveMod 2: 不规则波（JONSWAP 谱离散，随机相位）
//!
//! 有限水深运动学使用数值稳定的指数形式双曲函数比，
//! 避免大 kh 时 cosh/sinh 溢出。

use glam::DVec3;
use od_foundation::{OdError, OdResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use tracing::debug;

use crate::dispersion::solve_wavenumber;
use crate::spectrum::JonswapSpectrum;

/// 波浪模式（输入甲板 WaveMod）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WaveMode {
    /// 静水
    #[default]
    Still,
    /// 规则波
    Regular,
    /// 不规则波（JONSWAP）
    Irregular,
}

impl WaveMode {
    /// 从输入甲板整数码转换
    pub fn from_code(code: i64) -> OdResult<Self> {
        match code {
            0 => Ok(Self::Still),
            1 => Ok(Self::Regular),
            2 => Ok(Self::Irregular),
            _ => Err(OdError::invalid_input(format!("不支持的 WaveMod: {code}"))),
        }
    }
}

/// 波面拉伸模式（输入甲板 WaveStMod）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StretchMode {
    /// 不拉伸：湿区为 -d ≤ z ≤ 0，与时间无关
    #[default]
    None,
    /// 垂向拉伸：z > 0 处取 z = 0 的运动学
    Vertical,
    /// 外插拉伸：z > 0 处取 z = 0 的一阶 Taylor 外插
    Extrapolation,
}

impl StretchMode {
    /// 从输入甲板整数码转换
    pub fn from_code(code: i64) -> OdResult<Self> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Vertical),
            2 => Ok(Self::Extrapolation),
            _ => Err(OdError::invalid_input(format!(
                "不支持的 WaveStMod: {code}"
            ))),
        }
    }
}

/// 波浪生成参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveParams {
    /// 波浪模式
    pub mode: WaveMode,
    /// 拉伸模式
    pub stretch: StretchMode,
    /// 波浪时程长度 WaveTMax [s]
    pub tmax: f64,
    /// 时间步长 WaveDT [s]
    pub dt: f64,
    /// 有效波高 Hs（规则波为波高 H）[m]
    pub hs: f64,
    /// 谱峰周期 Tp（规则波为周期 T）[s]
    pub tp: f64,
    /// JONSWAP 峰形参数 γ，None 时按 DNV 经验式
    pub gamma: Option<f64>,
    /// 波向 [度]，0 为 +x 方向
    pub direction_deg: f64,
    /// 不规则波随机种子
    pub seed: u64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            mode: WaveMode::Still,
            stretch: StretchMode::None,
            tmax: 3600.0,
            dt: 0.25,
            hs: 0.0,
            tp: 10.0,
            gamma: None,
            direction_deg: 0.0,
            seed: 42,
        }
    }
}

impl WaveParams {
    /// 参数校验
    pub fn validate(&self) -> OdResult<()> {
        OdError::check_range("WaveTMax", self.tmax, 1e-6, f64::INFINITY)?;
        OdError::check_range("WaveDT", self.dt, 1e-6, self.tmax)?;
        if self.mode != WaveMode::Still {
            OdError::check_range("WaveHs", self.hs, 0.0, f64::INFINITY)?;
            OdError::check_range("WaveTp", self.tp, 1e-6, f64::INFINITY)?;
        }
        Ok(())
    }

    /// 波浪时程步数 NStepWave = ceil(WaveTMax/WaveDT)
    ///
    /// 时间数组长度为 NStepWave + 1，最后一步复制第 0 步（周期闭合）。
    pub fn n_step_wave(&self) -> usize {
        (self.tmax / self.dt).ceil() as usize
    }
}

/// 单个线性波成分
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaveComponent {
    /// 幅值 a [m]
    pub amplitude: f64,
    /// 角频率 ω [rad/s]
    pub omega: f64,
    /// 波数 k [1/m]
    pub wavenumber: f64,
    /// 初相位 φ [rad]
    pub phase: f64,
}

/// 某点某时刻的波浪运动学采样
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KinSample {
    /// 速度 [m/s]
    pub vel: DVec3,
    /// 加速度 [m/s²]
    pub acc: DVec3,
    /// 动压 [Pa]
    pub dyn_p: f64,
}

impl KinSample {
    /// 全零采样（干节点）
    pub const ZERO: Self = Self {
        vel: DVec3::ZERO,
        acc: DVec3::ZERO,
        dyn_p: 0.0,
    };
}

/// Airy 波场：成分叠加 + 有限水深运动学
#[derive(Debug, Clone)]
pub struct AiryField {
    components: Vec<WaveComponent>,
    /// 总水深（海底到静水面）[m]
    depth: f64,
    /// 重力加速度 [m/s²]
    gravity: f64,
    /// 海水密度 [kg/m³]
    rho: f64,
    /// 波向余弦
    dir_cos: f64,
    /// 波向正弦
    dir_sin: f64,
}

impl AiryField {
    /// 由参数合成波场成分
    pub fn synthesize(params: &WaveParams, depth: f64, gravity: f64, rho: f64) -> OdResult<Self> {
        params.validate()?;
        OdError::check_range("WtrDpth", depth, 1e-6, f64::INFINITY)?;

        let dir = params.direction_deg.to_radians();
        let mut components = Vec::new();

        match params.mode {
            WaveMode::Still => {}
            WaveMode::Regular => {
                let omega = TAU / params.tp;
                let (k, _) = solve_wavenumber(omega, depth, gravity);
                components.push(WaveComponent {
                    amplitude: params.hs / 2.0,
                    omega,
                    wavenumber: k,
                    phase: 0.0,
                });
            }
            WaveMode::Irregular => {
                let spectrum = JonswapSpectrum::new(params.hs, params.tp, params.gamma);
                debug!(
                    "JONSWAP 谱: Hs={} m, Tp={} s, γ={:.3}",
                    params.hs, params.tp, spectrum.gamma
                );

                // 频率离散: Δf = 1/WaveTMax，截止于 Nyquist 频率
                let df = 1.0 / params.tmax;
                let f_max = 1.0 / (2.0 * params.dt);
                let n_freq = (f_max / df).floor() as usize;

                let mut rng = StdRng::seed_from_u64(params.seed);
                for i in 1..=n_freq {
                    let f = i as f64 * df;
                    let a = (2.0 * spectrum.density(f) * df).sqrt();
                    let phase = rng.gen_range(0.0..TAU);
                    if a < 1e-12 {
                        continue;
                    }
                    let omega = TAU * f;
                    let (k, _) = solve_wavenumber(omega, depth, gravity);
                    components.push(WaveComponent {
                        amplitude: a,
                        omega,
                        wavenumber: k,
                        phase,
                    });
                }
                debug!("不规则波成分数: {}", components.len());
            }
        }

        Ok(Self {
            components,
            depth,
            gravity,
            rho,
            dir_cos: dir.cos(),
            dir_sin: dir.sin(),
        })
    }

    /// 成分列表
    #[inline]
    pub fn components(&self) -> &[WaveComponent] {
        &self.components
    }

    /// 总水深 [m]
    #[inline]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// 成分相位 ψ = k(x·cosθ + y·sinθ) − ωt + φ
    #[inline]
    fn psi(&self, c: &WaveComponent, x: f64, y: f64, t: f64) -> f64 {
        c.wavenumber * (x * self.dir_cos + y * self.dir_sin) - c.omega * t + c.phase
    }

    /// 波面高程 η(x, y, t) [m]
    pub fn elevation(&self, x: f64, y: f64, t: f64) -> f64 {
        self.components
            .iter()
            .map(|c| c.amplitude * self.psi(c, x, y, t).cos())
            .sum()
    }

    /// 运动学采样（z ≤ 0，静水面以下）
    ///
    /// 双曲函数比使用指数形式：
    /// cosh(k(z+d))/sinh(kd) = (e^{kz} + e^{−k(z+2d)})/(1 − e^{−2kd})
    pub fn kinematics(&self, x: f64, y: f64, z: f64, t: f64) -> KinSample {
        let mut out = KinSample::ZERO;
        let d = self.depth;

        for c in &self.components {
            let k = c.wavenumber;
            let psi = self.psi(c, x, y, t);
            let (sin_psi, cos_psi) = psi.sin_cos();

            let e_kz = (k * z).exp();
            let e_kzd = (-k * (z + 2.0 * d)).exp();
            let e_2kd = (-2.0 * k * d).exp();
            // cosh(k(z+d))/sinh(kd), sinh(k(z+d))/sinh(kd), cosh(k(z+d))/cosh(kd)
            let ch_sh = (e_kz + e_kzd) / (1.0 - e_2kd);
            let sh_sh = (e_kz - e_kzd) / (1.0 - e_2kd);
            let ch_ch = (e_kz + e_kzd) / (1.0 + e_2kd);

            let aw = c.amplitude * c.omega;
            let u = aw * ch_sh * cos_psi;
            let w = aw * sh_sh * sin_psi;
            out.vel.x += u * self.dir_cos;
            out.vel.y += u * self.dir_sin;
            out.vel.z += w;

            let aw2 = aw * c.omega;
            let du = aw2 * ch_sh * sin_psi;
            let dw = -aw2 * sh_sh * cos_psi;
            out.acc.x += du * self.dir_cos;
            out.acc.y += du * self.dir_sin;
            out.acc.z += dw;

            out.dyn_p += self.rho * self.gravity * c.amplitude * ch_ch * cos_psi;
        }
        out
    }

    /// 运动学对 z 的偏导在 z = 0 处的采样（外插拉伸用）
    pub fn kinematics_dz_at_surface(&self, x: f64, y: f64, t: f64) -> KinSample {
        let mut out = KinSample::ZERO;
        let d = self.depth;

        for c in &self.components {
            let k = c.wavenumber;
            let psi = self.psi(c, x, y, t);
            let (sin_psi, cos_psi) = psi.sin_cos();

            let tanh_kd = (k * d).tanh();
            // z = 0 处: ∂(ch/sh)/∂z = k, ∂(sh/sh)/∂z = k/tanh(kd), ∂(ch/ch)/∂z = k·tanh(kd)
            let aw = c.amplitude * c.omega;
            let du = aw * k * cos_psi;
            let dw = aw * k / tanh_kd * sin_psi;
            out.vel.x += du * self.dir_cos;
            out.vel.y += du * self.dir_sin;
            out.vel.z += dw;

            let aw2 = aw * c.omega;
            let ddu = aw2 * k * sin_psi;
            let ddw = -aw2 * k / tanh_kd * cos_psi;
            out.acc.x += ddu * self.dir_cos;
            out.acc.y += ddu * self.dir_sin;
            out.acc.z += ddw;

            out.dyn_p += self.rho * self.gravity * c.amplitude * k * tanh_kd * cos_psi;
        }
        out
    }

    /// 波长（规则波时为主成分波长）[m]
    pub fn dominant_wavelength(&self) -> Option<f64> {
        self.components
            .iter()
            .max_by(|a, b| a.amplitude.total_cmp(&b.amplitude))
            .map(|c| TAU / c.wavenumber)
    }
}

/// 角频率 ω = 2π/T
pub fn angular_frequency(period: f64) -> f64 {
    2.0 * PI / period
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f64 = 9.81;
    const RHO: f64 = 1025.0;

    fn regular_params() -> WaveParams {
        WaveParams {
            mode: WaveMode::Regular,
            hs: 2.0,
            tp: 10.0,
            tmax: 100.0,
            dt: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_still_water_is_empty() {
        let field = AiryField::synthesize(&WaveParams::default(), 50.0, G, RHO).unwrap();
        assert!(field.components().is_empty());
        assert_eq!(field.elevation(0.0, 0.0, 10.0), 0.0);
        assert_eq!(field.kinematics(0.0, 0.0, -5.0, 10.0), KinSample::ZERO);
    }

    #[test]
    fn test_regular_wave_amplitude() {
        let field = AiryField::synthesize(&regular_params(), 50.0, G, RHO).unwrap();
        assert_eq!(field.components().len(), 1);
        // t=0, x=0, φ=0 → η = a = Hs/2
        assert!((field.elevation(0.0, 0.0, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_regular_wave_periodicity() {
        let field = AiryField::synthesize(&regular_params(), 50.0, G, RHO).unwrap();
        let e0 = field.elevation(3.0, 0.0, 1.0);
        let e1 = field.elevation(3.0, 0.0, 1.0 + 10.0);
        assert!((e0 - e1).abs() < 1e-9);
    }

    #[test]
    fn test_kinematics_decay_with_depth() {
        let field = AiryField::synthesize(&regular_params(), 200.0, G, RHO).unwrap();
        let shallow = field.kinematics(0.0, 0.0, -2.0, 0.0);
        let deep = field.kinematics(0.0, 0.0, -80.0, 0.0);
        assert!(shallow.vel.length() > deep.vel.length());
        assert!(shallow.dyn_p.abs() > deep.dyn_p.abs());
    }

    #[test]
    fn test_surface_dynamic_pressure() {
        // z=0 处动压 = ρ·g·η
        let field = AiryField::synthesize(&regular_params(), 50.0, G, RHO).unwrap();
        let eta = field.elevation(1.0, 0.0, 2.0);
        let kin = field.kinematics(1.0, 0.0, 0.0, 2.0);
        assert!((kin.dyn_p - RHO * G * eta).abs() / (RHO * G) < 1e-9);
    }

    #[test]
    fn test_direction_rotates_velocity() {
        let mut params = regular_params();
        params.direction_deg = 90.0;
        let field = AiryField::synthesize(&params, 50.0, G, RHO).unwrap();
        let kin = field.kinematics(0.0, 0.0, -1.0, 0.0);
        // 波向 +y 时 x 向速度为零
        assert!(kin.vel.x.abs() < 1e-12);
        assert!(kin.vel.y.abs() > 0.0);
    }

    #[test]
    fn test_irregular_components_and_seed() {
        let params = WaveParams {
            mode: WaveMode::Irregular,
            hs: 2.5,
            tp: 9.0,
            tmax: 600.0,
            dt: 0.5,
            seed: 7,
            ..Default::default()
        };
        let f1 = AiryField::synthesize(&params, 80.0, G, RHO).unwrap();
        let f2 = AiryField::synthesize(&params, 80.0, G, RHO).unwrap();
        assert!(!f1.components().is_empty());
        // 同种子 → 同相位 → 同波面
        assert_eq!(
            f1.elevation(0.0, 0.0, 33.0),
            f2.elevation(0.0, 0.0, 33.0)
        );

        let mut params2 = params.clone();
        params2.seed = 8;
        let f3 = AiryField::synthesize(&params2, 80.0, G, RHO).unwrap();
        assert!((f1.elevation(0.0, 0.0, 33.0) - f3.elevation(0.0, 0.0, 33.0)).abs() > 1e-9);
    }

    #[test]
    fn test_irregular_variance_matches_hs() {
        let params = WaveParams {
            mode: WaveMode::Irregular,
            hs: 3.0,
            tp: 10.0,
            tmax: 1200.0,
            dt: 0.25,
            ..Default::default()
        };
        let field = AiryField::synthesize(&params, 100.0, G, RHO).unwrap();
        // σ² = Σa²/2 ≈ Hs²/16
        let var: f64 = field
            .components()
            .iter()
            .map(|c| c.amplitude * c.amplitude / 2.0)
            .sum();
        let hs_back = 4.0 * var.sqrt();
        assert!((hs_back - 3.0).abs() / 3.0 < 0.05);
    }

    #[test]
    fn test_dominant_wavelength() {
        let still = AiryField::synthesize(&WaveParams::default(), 50.0, G, RHO).unwrap();
        assert!(still.dominant_wavelength().is_none());

        let field = AiryField::synthesize(&regular_params(), 50.0, G, RHO).unwrap();
        let lambda = field.dominant_wavelength().unwrap();
        // 波长满足色散关系 ω² = g·k·tanh(kd)
        let k = TAU / lambda;
        let omega = TAU / 10.0;
        assert!((omega * omega - G * k * (k * 50.0).tanh()).abs() < 1e-9);
    }

    #[test]
    fn test_extrapolation_derivative_consistency() {
        // z=0 偏导与有限差分一致
        let field = AiryField::synthesize(&regular_params(), 50.0, G, RHO).unwrap();
        let dz = 1e-5;
        let k0 = field.kinematics(0.0, 0.0, 0.0, 3.0);
        let km = field.kinematics(0.0, 0.0, -dz, 3.0);
        let ddz = field.kinematics_dz_at_surface(0.0, 0.0, 3.0);
        assert!(((k0.vel.x - km.vel.x) / dz - ddz.vel.x).abs() < 1e-3);
        assert!(((k0.dyn_p - km.dyn_p) / dz - ddz.dyn_p).abs() < 1.0);
    }

    #[test]
    fn test_invalid_wave_code() {
        assert!(WaveMode::from_code(5).is_err());
        assert!(StretchMode::from_code(-1).is_err());
    }
}
