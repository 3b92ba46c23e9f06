// crates/od_waves/src/dispersion.rs

//! 线性波色散关系
//!
//! 求解 ω² = gk·tanh(kh)，并给出群速度因子 n = Cg/C。

/// 求解色散关系 ω² = gk·tanh(kh)
///
/// 返回 (k, n)，其中 n = Cg/C = 群速度/相速度。
///
/// 以深水近似 k₀ = ω²/g 作初始猜测，Newton-Raphson 迭代。
pub fn solve_wavenumber(omega: f64, depth: f64, gravity: f64) -> (f64, f64) {
    let h = depth.max(0.01);
    let g = gravity;

    // 初始猜测（深水近似）
    let k0 = omega * omega / g;

    // Newton-Raphson 迭代
    let mut k = k0;
    for _ in 0..20 {
        let kh = k * h;
        let tanh_kh = kh.tanh();
        let f = omega * omega - g * k * tanh_kh;
        let df = -g * (tanh_kh + k * h * (1.0 - tanh_kh * tanh_kh));

        let dk = -f / df;
        k += dk;

        if dk.abs() < 1e-12 * k {
            break;
        }
    }

    // 群速度因子 n = Cg/C = 0.5(1 + 2kh/sinh(2kh))
    let kh = k * h;
    let sinh_2kh = (2.0 * kh).sinh();
    let n = if sinh_2kh.is_finite() && sinh_2kh.abs() > 1e-10 {
        0.5 * (1.0 + 2.0 * kh / sinh_2kh)
    } else if kh > 1.0 {
        0.5 // 深水极限（sinh 溢出时）
    } else {
        1.0 // 浅水极限
    };

    (k, n)
}

/// 深水波长 L0 = gT²/(2π)
pub fn deep_water_wavelength(period: f64, gravity: f64) -> f64 {
    gravity * period * period / (2.0 * std::f64::consts::PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const G: f64 = 9.81;

    #[test]
    fn test_dispersion_residual() {
        let omega = 2.0 * PI / 10.0;
        for depth in [2.0, 20.0, 200.0] {
            let (k, _) = solve_wavenumber(omega, depth, G);
            let residual = omega * omega - G * k * (k * depth).tanh();
            assert!(residual.abs() < 1e-8, "depth={depth}: residual={residual}");
        }
    }

    #[test]
    fn test_deep_water_limit() {
        let omega = 2.0 * PI / 8.0;
        let (k, n) = solve_wavenumber(omega, 1000.0, G);
        // 深水: k → ω²/g, n → 0.5
        assert!((k - omega * omega / G).abs() / k < 1e-6);
        assert!((n - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_shallow_water_limit() {
        let omega = 2.0 * PI / 20.0;
        let (k, n) = solve_wavenumber(omega, 1.0, G);
        // 浅水: C → √(gh), n → 1
        let c = omega / k;
        assert!((c - (G * 1.0_f64).sqrt()).abs() / c < 0.05);
        assert!(n > 0.95);
    }

    #[test]
    fn test_shallow_wavenumber_larger() {
        let omega = 2.0 * PI / 8.0;
        let (k_deep, _) = solve_wavenumber(omega, 100.0, G);
        let (k_shallow, _) = solve_wavenumber(omega, 1.0, G);
        assert!(k_shallow > k_deep);
    }

    #[test]
    fn test_deep_water_wavelength() {
        // T = 10 s → L0 ≈ 156 m
        let l0 = deep_water_wavelength(10.0, G);
        assert!((l0 - 156.1).abs() < 1.0);
    }
}
