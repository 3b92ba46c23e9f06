// crates/od_foundation/src/constants.rs

//! 物理常数默认值
//!
//! 与 OpenFAST HydroDyn 的默认输入保持一致。

/// 默认重力加速度 [m/s²]
pub const DEFAULT_GRAVITY: f64 = 9.81;

/// 默认海水密度 [kg/m³]
pub const DEFAULT_WATER_DENSITY: f64 = 1025.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_sane() {
        assert!(DEFAULT_GRAVITY > 9.0 && DEFAULT_GRAVITY < 10.0);
        assert!(DEFAULT_WATER_DENSITY > 1000.0);
    }
}
