// crates/od_vortex/src/ring.rs

//! 轴对称涡环诱导速度
//!
//! 单个切向涡环在子午面 (r, z) 处的诱导速度，采用椭圆积分
//! 表达（Yoon & Heister 形式）：
//!
//! a² = (r+R)² + z² (+ ε²), m = 4rR/a², A = z²+r²+R², B = −2rR
//! I₁ = 4K(m)/a, I₂ = 4E(m)/(a³(1−m))
//! ur = ΓR/(4π)·(z/B)·(I₁ − A·I₂)
//! uz = ΓR/(4π)·((R + rA/B)·I₂ − (r/B)·I₁)
//!
//! ε > 0 时为 Saffman 正则化核。轴上 (r = 0) 使用解析极限
//! uz = ΓR²/(2(R²+z²)^{3/2})，ur = 0。

use rayon::prelude::*;

use crate::elliptic::{ellip_e, ellip_k};

const EPS_AXIS: f64 = 1e-7;

/// 单个涡环：半径、轴向位置、环量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexRing {
    /// 环半径 R [m]
    pub radius: f64,
    /// 环所在轴向位置 z [m]
    pub z: f64,
    /// 环量 Γ [m²/s]
    pub circulation: f64,
}

impl VortexRing {
    /// 构造涡环
    pub fn new(radius: f64, z: f64, circulation: f64) -> Self {
        Self {
            radius,
            z,
            circulation,
        }
    }

    /// 在控制点 (r, z) 处的诱导速度 (ur, uz)
    ///
    /// `epsilon` 为正则化核半径，0 表示奇异环。
    pub fn induced_velocity(&self, r: f64, z: f64, epsilon: f64) -> (f64, f64) {
        ring_u(r, z - self.z, self.circulation, self.radius, epsilon)
    }
}

/// 位于原点的涡环在 (r, z) 处的诱导速度 (ur, uz)
pub fn ring_u(r: f64, z: f64, gamma: f64, ring_radius: f64, epsilon: f64) -> (f64, f64) {
    let big_r = ring_radius;

    // 轴上解析极限
    if r.abs() < EPS_AXIS * big_r {
        let d2 = big_r * big_r + z * z + epsilon * epsilon;
        let uz = gamma / 2.0 * big_r * big_r / d2.powf(1.5);
        return (0.0, uz);
    }

    // 奇异环在环线本身的邻域内速度无定义，置零
    if epsilon == 0.0 && (r - big_r).abs() < EPS_AXIS * big_r && z.abs() < EPS_AXIS * big_r {
        return (0.0, 0.0);
    }

    let a2 = (r + big_r) * (r + big_r) + z * z + epsilon * epsilon;
    let a = a2.sqrt();
    let m = 4.0 * r * big_r / a2;
    let big_a = z * z + r * r + big_r * big_r + epsilon * epsilon;
    let big_b = -2.0 * r * big_r;

    let k = ellip_k(m);
    let e = ellip_e(m);
    let i1 = 4.0 / a * k;
    let i2 = 4.0 / (a2 * a) * e / (1.0 - m);

    let c = gamma * big_r / (4.0 * std::f64::consts::PI);
    let ur = c * (z / big_b) * (i1 - big_a * i2);
    let uz = c * ((big_r + r * big_a / big_b) * i2 - r / big_b * i1);
    (ur, uz)
}

/// 多涡环叠加：每个控制点累加所有环的诱导速度
///
/// 控制点循环并行执行。返回 (ur, uz) 两个与控制点等长的数组。
pub fn rings_u(
    rings: &[VortexRing],
    r_cp: &[f64],
    z_cp: &[f64],
    epsilon: f64,
) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(r_cp.len(), z_cp.len());
    let pairs: Vec<(f64, f64)> = r_cp
        .par_iter()
        .zip(z_cp.par_iter())
        .map(|(&r, &z)| {
            let mut ur = 0.0;
            let mut uz = 0.0;
            for ring in rings {
                let (dur, duz) = ring.induced_velocity(r, z, epsilon);
                ur += dur;
                uz += duz;
            }
            (ur, uz)
        })
        .collect();
    pairs.into_iter().unzip()
}
