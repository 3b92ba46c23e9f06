// crates/od_vortex/src/elliptic.rs

//! 第一、二类完全椭圆积分
//!
//! Hastings 多项式近似（Abramowitz & Stegun 17.3.34 / 17.3.36），
//! 参数 m ∈ [0, 1)，绝对误差 < 2e-8。涡环诱导速度公式使用。

/// 第一类完全椭圆积分 K(m)
///
/// m → 1 时发散，返回 +∞。
pub fn ellip_k(m: f64) -> f64 {
    if m >= 1.0 {
        return f64::INFINITY;
    }
    let m1 = 1.0 - m;
    let p = 1.38629436112
        + m1 * (0.09666344259 + m1 * (0.03590092383 + m1 * (0.03742563713 + m1 * 0.01451196212)));
    let q = 0.5
        + m1 * (0.12498593597 + m1 * (0.06880248576 + m1 * (0.03328355346 + m1 * 0.00441787012)));
    p + q * (1.0 / m1).ln()
}

/// 第二类完全椭圆积分 E(m)
///
/// E(0) = π/2, E(1) = 1。
pub fn ellip_e(m: f64) -> f64 {
    if m >= 1.0 {
        return 1.0;
    }
    let m1 = 1.0 - m;
    let p = 1.0
        + m1 * (0.44325141463 + m1 * (0.06260601220 + m1 * (0.04757383546 + m1 * 0.01736506451)));
    let q = m1
        * (0.24998368310 + m1 * (0.09200180037 + m1 * (0.04069697526 + m1 * 0.00526449639)));
    p + q * (1.0 / m1).ln()
}
