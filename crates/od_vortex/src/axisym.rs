// crates/od_vortex/src/axisym.rs

//! 轴对称涡量场诱导速度
//!
//! 将子午面 (z, r) 网格上的切向涡量 ω 转换为逐单元涡环环量
//! Γ = ω·dr·dz，再叠加所有环的诱导速度。
//!
//! 网格可非均匀，单元尺寸取相邻间距的平均。涡量场按行主序
//! 存储：`idx = iz * nr + ir`。

use od_foundation::{OdError, OdResult};
use tracing::warn;

use crate::ring::{rings_u, VortexRing};

/// 非均匀一维网格的单元尺寸
///
/// 内部点取相邻间距的平均，端点取相邻单格间距。
pub fn grid_spacing(coords: &[f64]) -> OdResult<Vec<f64>> {
    if coords.len() < 2 {
        return Err(OdError::invalid_input("网格至少需要两个坐标"));
    }
    let n = coords.len();
    let mut d = Vec::with_capacity(n);
    for i in 0..n {
        let left = if i == 0 {
            coords[1] - coords[0]
        } else {
            coords[i] - coords[i - 1]
        };
        let right = if i == n - 1 {
            coords[n - 1] - coords[n - 2]
        } else {
            coords[i + 1] - coords[i]
        };
        d.push((left + right) / 2.0);
    }
    Ok(d)
}

/// 子午面网格：径向坐标 r 与轴向坐标 z
#[derive(Debug, Clone)]
pub struct AxisymGrid {
    /// 径向坐标（递增）
    pub r: Vec<f64>,
    /// 轴向坐标（递增）
    pub z: Vec<f64>,
}

impl AxisymGrid {
    /// 构造网格并校验坐标递增
    pub fn new(r: Vec<f64>, z: Vec<f64>) -> OdResult<Self> {
        for coords in [&r, &z] {
            if coords.len() < 2 {
                return Err(OdError::invalid_input("网格至少需要两个坐标"));
            }
            if coords.windows(2).any(|w| w[1] <= w[0]) {
                return Err(OdError::invalid_input("网格坐标必须严格递增"));
            }
        }
        Ok(Self { r, z })
    }

    /// 径向点数
    #[inline]
    pub fn nr(&self) -> usize {
        self.r.len()
    }

    /// 轴向点数
    #[inline]
    pub fn nz(&self) -> usize {
        self.z.len()
    }

    /// 涡量场数组长度 nz × nr
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nr() * self.nz()
    }

    /// 行主序下标
    #[inline]
    pub fn idx(&self, iz: usize, ir: usize) -> usize {
        iz * self.nr() + ir
    }

    /// 最近网格点下标 (iz, ir)
    pub fn nearest(&self, r0: f64, z0: f64) -> (usize, usize) {
        let nearest_1d = |coords: &[f64], x: f64| -> usize {
            let mut best = 0;
            let mut best_d = f64::INFINITY;
            for (i, &c) in coords.iter().enumerate() {
                let d = (c - x).abs();
                if d < best_d {
                    best_d = d;
                    best = i;
                }
            }
            best
        };
        (nearest_1d(&self.z, z0), nearest_1d(&self.r, r0))
    }
}

/// 涡量场 → 涡环列表 → 控制点诱导速度
///
/// `omega` 长度须为 `grid.n_cells()`。返回控制点处的 (ur, uz)。
pub fn axisym_u(
    grid: &AxisymGrid,
    omega: &[f64],
    r_cp: &[f64],
    z_cp: &[f64],
    epsilon: f64,
) -> OdResult<(Vec<f64>, Vec<f64>)> {
    OdError::check_size("omega", grid.n_cells(), omega.len())?;
    OdError::check_size("控制点", r_cp.len(), z_cp.len())?;

    let dr = grid_spacing(&grid.r)?;
    let dz = grid_spacing(&grid.z)?;

    // 涡量 → 环量，零环量单元跳过
    let mut rings = Vec::new();
    for iz in 0..grid.nz() {
        for ir in 0..grid.nr() {
            let g = omega[grid.idx(iz, ir)] * dr[ir] * dz[iz];
            if g.abs() > 1e-16 {
                rings.push(VortexRing::new(grid.r[ir], grid.z[iz], g));
            }
        }
    }

    Ok(rings_u(&rings, r_cp, z_cp, epsilon))
}

/// 预定义涡量分布
#[derive(Debug, Clone, Copy)]
pub enum VorticityDistribution {
    /// 零涡量（均匀流校验用）
    Zero,
    /// 奇异涡环：环量集中在最近的单个网格单元
    SingularRing {
        /// 环量 Γ
        gamma: f64,
        /// 环半径
        r: f64,
        /// 环轴向位置
        z: f64,
    },
    /// 涡柱：切向涡片强度 γ_t 分布于一列单元
    Cylinder {
        /// 涡片强度 γ_t
        gamma_t: f64,
        /// 柱半径
        r: f64,
        /// 起始轴向位置
        z: f64,
        /// 柱长
        length: f64,
    },
    /// 正则化涡环：紧支集涡量补丁 (1 − ρ²)^k
    RegularizedRing {
        /// 总环量 Γ
        gamma: f64,
        /// 环半径
        r: f64,
        /// 环轴向位置
        z: f64,
        /// 核半径 rc
        core_radius: f64,
        /// 补丁指数 k
        exponent: f64,
    },
}

impl VorticityDistribution {
    /// 在网格上采样涡量场（行主序 nz × nr）
    pub fn sample(&self, grid: &AxisymGrid) -> OdResult<Vec<f64>> {
        let mut om = vec![0.0; grid.n_cells()];
        let dr = grid_spacing(&grid.r)?;
        let dz = grid_spacing(&grid.z)?;

        match *self {
            Self::Zero => {}
            Self::SingularRing { gamma, r, z } => {
                let (iz, ir) = grid.nearest(r, z);
                let d = ((grid.r[ir] - r).powi(2) + (grid.z[iz] - z).powi(2)).sqrt();
                if d > 1e-6 {
                    warn!(
                        "网格不含环点，环置于 ({}, {}) 而非 ({}, {})",
                        grid.r[ir], grid.z[iz], r, z
                    );
                }
                om[grid.idx(iz, ir)] = gamma / (dr[ir] * dz[iz]);
            }
            Self::Cylinder {
                gamma_t,
                r,
                z,
                length,
            } => {
                let (iz, ir) = grid.nearest(r, z);
                let (iz_end, _) = grid.nearest(r, z + length);
                let d = ((grid.r[ir] - r).powi(2) + (grid.z[iz] - z).powi(2)).sqrt();
                if d > 1e-6 {
                    warn!(
                        "网格不含柱端点，柱置于 ({}, {}) 而非 ({}, {})",
                        grid.r[ir], grid.z[iz], r, z
                    );
                }
                for k in iz..iz_end {
                    om[grid.idx(k, ir)] = gamma_t / dr[ir];
                }
            }
            Self::RegularizedRing {
                gamma,
                r,
                z,
                core_radius,
                exponent,
            } => {
                OdError::check_range("core_radius", core_radius, 1e-12, f64::INFINITY)?;
                let scale = gamma * (exponent + 1.0) / std::f64::consts::PI
                    / (core_radius * core_radius);
                for iz in 0..grid.nz() {
                    for ir in 0..grid.nr() {
                        let rho = ((grid.r[ir] - r).powi(2) + (grid.z[iz] - z).powi(2)).sqrt()
                            / core_radius;
                        if rho <= 1.0 {
                            om[grid.idx(iz, ir)] = scale * (1.0 - rho * rho).powf(exponent);
                        }
                    }
                }
            }
        }
        Ok(om)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::ring_u;

    fn uniform_grid() -> AxisymGrid {
        let r: Vec<f64> = (0..41).map(|i| i as f64 * 0.05).collect();
        let z: Vec<f64> = (0..61).map(|i| -1.0 + i as f64 * 0.05).collect();
        AxisymGrid::new(r, z).unwrap()
    }

    #[test]
    fn test_grid_spacing_uniform() {
        let d = grid_spacing(&[0.0, 1.0, 2.0, 3.0]).unwrap();
        assert!(d.iter().all(|&x| (x - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_grid_spacing_nonuniform_averages() {
        // 间距 1, 3 → 中点取平均 2
        let d = grid_spacing(&[0.0, 1.0, 4.0]).unwrap();
        assert!((d[0] - 1.0).abs() < 1e-12);
        assert!((d[1] - 2.0).abs() < 1e-12);
        assert!((d[2] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_grid_spacing_too_short() {
        assert!(grid_spacing(&[1.0]).is_err());
    }

    #[test]
    fn test_grid_rejects_nonmonotonic() {
        assert!(AxisymGrid::new(vec![0.0, 2.0, 1.0], vec![0.0, 1.0]).is_err());
    }

    #[test]
    fn test_zero_distribution_zero_velocity() {
        let grid = uniform_grid();
        let om = VorticityDistribution::Zero.sample(&grid).unwrap();
        let (ur, uz) = axisym_u(&grid, &om, &[0.5], &[0.0], 0.0).unwrap();
        assert_eq!(ur[0], 0.0);
        assert_eq!(uz[0], 0.0);
    }

    #[test]
    fn test_singular_ring_circulation_recovered() {
        // Σ ω·dr·dz = Γ
        let grid = uniform_grid();
        let dist = VorticityDistribution::SingularRing {
            gamma: -1.0,
            r: 1.0,
            z: 0.0,
        };
        let om = dist.sample(&grid).unwrap();
        let dr = grid_spacing(&grid.r).unwrap();
        let dz = grid_spacing(&grid.z).unwrap();
        let mut total = 0.0;
        for iz in 0..grid.nz() {
            for ir in 0..grid.nr() {
                total += om[grid.idx(iz, ir)] * dr[ir] * dz[iz];
            }
        }
        assert!((total + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_singular_ring_matches_direct_ring() {
        // 环点在网格上：axisym_u 与 ring_u 应逐点一致
        let grid = uniform_grid();
        let dist = VorticityDistribution::SingularRing {
            gamma: -1.0,
            r: 1.0,
            z: 0.0,
        };
        let om = dist.sample(&grid).unwrap();
        let (ur, uz) = axisym_u(&grid, &om, &[0.3, 1.6], &[0.4, -0.2], 0.0).unwrap();
        for (i, (&r, &z)) in [0.3, 1.6].iter().zip([0.4, -0.2].iter()).enumerate() {
            let (ur0, uz0) = ring_u(r, z, -1.0, 1.0, 0.0);
            assert!((ur[i] - ur0).abs() < 1e-12);
            assert!((uz[i] - uz0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_regularized_ring_circulation_recovered() {
        let grid = uniform_grid();
        let dist = VorticityDistribution::RegularizedRing {
            gamma: 2.0,
            r: 1.0,
            z: 0.0,
            core_radius: 0.2,
            exponent: 2.0,
        };
        let om = dist.sample(&grid).unwrap();
        let dr = grid_spacing(&grid.r).unwrap();
        let dz = grid_spacing(&grid.z).unwrap();
        let mut total = 0.0;
        for iz in 0..grid.nz() {
            for ir in 0..grid.nr() {
                total += om[grid.idx(iz, ir)] * dr[ir] * dz[iz];
            }
        }
        // 补丁离散积分 ≈ Γ（网格分辨率决定精度）
        assert!((total - 2.0).abs() / 2.0 < 0.05, "total={total}");
    }

    #[test]
    fn test_cylinder_fills_axial_range() {
        let grid = uniform_grid();
        let dist = VorticityDistribution::Cylinder {
            gamma_t: -1.0,
            r: 1.0,
            z: 0.0,
            length: 0.5,
        };
        let om = dist.sample(&grid).unwrap();
        let nonzero = om.iter().filter(|&&x| x != 0.0).count();
        // 0.5 长度 / 0.05 间距 = 10 单元
        assert_eq!(nonzero, 10);
    }

    #[test]
    fn test_omega_size_mismatch_rejected() {
        let grid = uniform_grid();
        assert!(axisym_u(&grid, &[0.0; 3], &[0.5], &[0.0], 0.0).is_err());
    }
}
