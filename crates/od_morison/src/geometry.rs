// crates/od_morison/src/geometry.rs

//! 锥台（锥形圆柱）几何积分
//!
//! Morison 构件是两端半径可不同的圆管，体积与形心沿用
//! 圆台（frustum）解析公式。

/// 锥台体积与形心
///
/// 半径从 r1 过渡到 r2，长度 h。返回 (体积, 自 r1 端量起的形心距离)。
///
/// V = πh/3·(r1² + r1·r2 + r2²)
/// h_c = h/4·(r1² + 2·r1·r2 + 3·r2²)/(r1² + r1·r2 + r2²)
pub fn tapered_cylinder_geom(r1: f64, r2: f64, h: f64) -> (f64, f64) {
    let s = r1 * r1 + r1 * r2 + r2 * r2;
    if s <= 0.0 || h <= 0.0 {
        return (0.0, 0.0);
    }
    let volume = std::f64::consts::PI * h / 3.0 * s;
    let centroid = h / 4.0 * (r1 * r1 + 2.0 * r1 * r2 + 3.0 * r2 * r2) / s;
    (volume, centroid)
}

/// 部分浸没锥台的水下体积
///
/// 端点高程 (z1, z2)（相对静水面 SWL）、端半径 (r1, r2)、轴向长度
/// `length`。完全在水上返回 0，完全浸没返回整段体积，跨越 z = 0
/// 时在交点处插值半径后积分水下段。
pub fn submerged_frustum_volume(z1: f64, r1: f64, z2: f64, r2: f64, length: f64) -> f64 {
    if z1 >= 0.0 && z2 >= 0.0 {
        return 0.0; // 完全在水上
    }
    if z1 < 0.0 && z2 < 0.0 {
        return tapered_cylinder_geom(r1, r2, length).0; // 完全浸没
    }

    // 跨越静水面：下端 → z = 0 段
    let (z_low, r_low, z_high, r_high) = if z1 <= z2 {
        (z1, r1, z2, r2)
    } else {
        (z2, r2, z1, r1)
    };
    let dz = z_high - z_low;
    if dz <= 0.0 {
        // 水平段不可能跨越水面
        return 0.0;
    }
    let frac = (0.0 - z_low) / dz;
    let r0 = r_low + (r_high - r_low) * frac;
    let l_sub = length * frac;
    tapered_cylinder_geom(r_low, r0, l_sub).0
}
