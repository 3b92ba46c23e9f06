// crates/od_waves/src/spectrum.rs

//! JONSWAP 波浪谱
//!
//! 以有效波高 Hs 与谱峰周期 Tp 参数化的单边谱 S(f)。

use serde::{Deserialize, Serialize};

/// JONSWAP 谱
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JonswapSpectrum {
    /// 有效波高 Hs [m]
    pub hs: f64,
    /// 谱峰周期 Tp [s]
    pub tp: f64,
    /// 峰形参数 γ
    pub gamma: f64,
}

impl JonswapSpectrum {
    /// 创建谱；`gamma` 为 None 时按 DNV-RP-C205 经验式确定
    pub fn new(hs: f64, tp: f64, gamma: Option<f64>) -> Self {
        let gamma = gamma.unwrap_or_else(|| default_peak_shape(hs, tp));
        Self { hs, tp, gamma }
    }

    /// 谱峰频率 fp = 1/Tp [Hz]
    #[inline]
    pub fn peak_frequency(&self) -> f64 {
        1.0 / self.tp
    }

    /// 谱密度 S(f) [m²·s]
    ///
    /// S(f) = (5/16)·Hs²·fp⁴/f⁵·exp(−5/4·(fp/f)⁴)·Aγ·γ^b
    /// b = exp(−(f−fp)²/(2σ²fp²)), σ = 0.07 (f ≤ fp) / 0.09 (f > fp)
    /// Aγ = 1 − 0.287·ln γ （归一化，保持 Hs 不变）
    pub fn density(&self, f: f64) -> f64 {
        if f <= 0.0 {
            return 0.0;
        }
        let fp = self.peak_frequency();
        let sigma = if f <= fp { 0.07 } else { 0.09 };
        let b = (-((f - fp) * (f - fp)) / (2.0 * sigma * sigma * fp * fp)).exp();
        let pm = 5.0 / 16.0 * self.hs * self.hs * fp.powi(4) / f.powi(5)
            * (-1.25 * (fp / f).powi(4)).exp();
        let a_gamma = 1.0 - 0.287 * self.gamma.ln();
        pm * a_gamma * self.gamma.powf(b)
    }
}

/// DNV-RP-C205 峰形参数经验式
///
/// x = Tp/√Hs：x ≤ 3.6 → γ=5；x ≥ 5 → γ=1；之间 γ = exp(5.75 − 1.15x)。
pub fn default_peak_shape(hs: f64, tp: f64) -> f64 {
    let x = tp / hs.sqrt();
    if x <= 3.6 {
        5.0
    } else if x >= 5.0 {
        1.0
    } else {
        (5.75 - 1.15 * x).exp()
    }
}
