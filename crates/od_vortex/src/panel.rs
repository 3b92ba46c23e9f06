// crates/od_vortex/src/panel.rs

//! 2D 面元法几何工具
//!
//! 由闭合翼型坐标（下缘后缘出发顺时针一周）计算每个面元的
//! 切向量、法向量、中点、长度与曲率。
//!
//! 曲率方法：
//! - Menger: 过相邻三点的外接圆曲率 4·A/(L₁L₂L₃)，首尾环绕
//! - Lewis: 相邻面元斜率差 Δβ/(2·ds)
//! - Zero: 全零
//!
//! 曲率出现 NaN（如重合点）时置零并告警。

use glam::DVec2;
use od_foundation::{OdError, OdResult};
use tracing::warn;

/// 曲率计算方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurvatureMethod {
    /// 三点外接圆（Menger）
    #[default]
    Menger,
    /// 斜率差（Lewis）
    Lewis,
    /// 全零
    Zero,
}

/// 面元几何：n 个点产生 n−1 个面元
#[derive(Debug, Clone)]
pub struct PanelGeometry {
    /// 单位切向量（点 i 指向点 i+1）
    pub tangents: Vec<DVec2>,
    /// 单位法向量 (−t_y, t_x)
    pub normals: Vec<DVec2>,
    /// 面元中点
    pub mids: Vec<DVec2>,
    /// 面元长度
    pub ds: Vec<f64>,
    /// 面元曲率
    pub curvature: Vec<f64>,
}

/// 计算翼型面元几何
pub fn airfoil_params(x: &[f64], y: &[f64], method: CurvatureMethod) -> OdResult<PanelGeometry> {
    OdError::check_size("翼型坐标", x.len(), y.len())?;
    if x.len() < 3 {
        return Err(OdError::invalid_input("翼型至少需要 3 个点"));
    }

    let n_panels = x.len() - 1;
    let mut tangents = Vec::with_capacity(n_panels);
    let mut normals = Vec::with_capacity(n_panels);
    let mut mids = Vec::with_capacity(n_panels);
    let mut ds = Vec::with_capacity(n_panels);

    for i in 0..n_panels {
        let p1 = DVec2::new(x[i], y[i]);
        let p2 = DVec2::new(x[i + 1], y[i + 1]);
        let dp = p2 - p1;
        let len = dp.length();
        if len <= 0.0 {
            return Err(OdError::invalid_input(format!("面元 {i} 长度为零")));
        }
        let t = dp / len;
        tangents.push(t);
        normals.push(DVec2::new(-t.y, t.x));
        mids.push((p1 + p2) / 2.0);
        ds.push(len);
    }

    let curvature = compute_curvature(x, y, &tangents, &ds, method);

    Ok(PanelGeometry {
        tangents,
        normals,
        mids,
        ds,
        curvature,
    })
}

/// 面元曲率
///
/// 返回长度 n−1 的数组，NaN 置零并告警。
fn compute_curvature(
    x: &[f64],
    y: &[f64],
    tangents: &[DVec2],
    ds: &[f64],
    method: CurvatureMethod,
) -> Vec<f64> {
    let n_panels = x.len() - 1;
    let mut curv = vec![0.0; n_panels];

    match method {
        CurvatureMethod::Zero => {}
        CurvatureMethod::Menger => {
            // 首尾环绕：点 i 的邻居为 i−1 与 i+1（模多边形）
            let n = x.len();
            let at = |i: isize| -> DVec2 {
                let j = if i < 0 {
                    n - 1
                } else if i as usize >= n {
                    0
                } else {
                    i as usize
                };
                DVec2::new(x[j], y[j])
            };
            for i in 0..n_panels {
                let p1 = at(i as isize - 1);
                let p2 = at(i as isize);
                let p3 = at(i as isize + 1);
                let l1 = (p2 - p1).length();
                let l2 = (p3 - p2).length();
                let l3 = (p1 - p3).length();
                let area = 0.5 * ((p2.x - p1.x) * (p3.y - p1.y) - (p2.y - p1.y) * (p3.x - p1.x));
                curv[i] = 4.0 * area / (l1 * l2 * l3);
            }
        }
        CurvatureMethod::Lewis => {
            // 斜率取 [−3π/2, π/2]，避免后缘处跳变
            let m = n_panels;
            let slope: Vec<f64> = tangents
                .iter()
                .map(|t| {
                    let s = t.y.atan2(t.x);
                    if s > std::f64::consts::FRAC_PI_2 {
                        s - std::f64::consts::TAU
                    } else {
                        s
                    }
                })
                .collect();
            let mut cds = vec![0.0; m];
            cds[0] = slope[1] - slope[m - 1] - std::f64::consts::TAU;
            for i in 1..m - 1 {
                cds[i] = slope[i + 1] - slope[i - 1];
            }
            cds[m - 1] = slope[0] - slope[m - 2] - std::f64::consts::TAU;
            for i in 0..m {
                curv[i] = cds[i] / ds[i] / 2.0;
            }
        }
    }

    let n_nan = curv.iter().filter(|c| c.is_nan()).count();
    if n_nan > 0 {
        warn!("曲率计算出现 {} 个 NaN，已置零", n_nan);
        for c in curv.iter_mut() {
            if c.is_nan() {
                *c = 0.0;
            }
        }
    }
    curv
}
