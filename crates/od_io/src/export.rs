// crates/od_io/src/export.rs

//! 波面高程与节点运动学 CSV 导出

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use od_foundation::{OdError, OdResult};
use od_waves::WaveKinField;
use tracing::info;

/// 写波面高程 CSV：第一列时间，其后每个节点一列
pub fn write_elevation_csv<W: Write>(
    w: &mut W,
    kin: &WaveKinField,
    nodes: &[usize],
) -> OdResult<()> {
    for &n in nodes {
        OdError::check_index("节点", n, kin.n_nodes())?;
    }
    write!(w, "time_s")?;
    for &n in nodes {
        write!(w, ",eta_node{n}_m")?;
    }
    writeln!(w)?;
    let series: Vec<&[f64]> = nodes.iter().map(|&n| kin.elevation_series(n)).collect();
    for (it, t) in kin.times().iter().enumerate() {
        write!(w, "{t:.6}")?;
        for s in &series {
            write!(w, ",{:.6}", s[it])?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// 写单节点运动学 CSV：时间、速度、加速度、动压、湿标记
pub fn write_kinematics_csv<W: Write>(
    w: &mut W,
    kin: &WaveKinField,
    node: usize,
) -> OdResult<()> {
    OdError::check_index("节点", node, kin.n_nodes())?;
    writeln!(
        w,
        "time_s,vx_mps,vy_mps,vz_mps,ax_mps2,ay_mps2,az_mps2,dynp_pa,wet"
    )?;
    for (it, t) in kin.times().iter().enumerate() {
        let v = kin.velocity(node, it);
        let a = kin.acceleration(node, it);
        writeln!(
            w,
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{}",
            t,
            v.x,
            v.y,
            v.z,
            a.x,
            a.y,
            a.z,
            kin.dynamic_pressure(node, it),
            if kin.is_wet(node, it) { 1 } else { 0 }
        )?;
    }
    Ok(())
}

/// 写波面高程 CSV 文件
pub fn write_elevation_csv_file<P: AsRef<Path>>(
    path: P,
    kin: &WaveKinField,
    nodes: &[usize],
) -> OdResult<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| OdError::io_with_source(format!("创建 CSV {}", path.display()), e))?;
    let mut w = BufWriter::new(file);
    write_elevation_csv(&mut w, kin, nodes)?;
    w.flush()?;
    info!("波面高程已写出: {}", path.display());
    Ok(())
}

/// 写单节点运动学 CSV 文件
pub fn write_kinematics_csv_file<P: AsRef<Path>>(
    path: P,
    kin: &WaveKinField,
    node: usize,
) -> OdResult<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| OdError::io_with_source(format!("创建 CSV {}", path.display()), e))?;
    let mut w = BufWriter::new(file);
    write_kinematics_csv(&mut w, kin, node)?;
    w.flush()?;
    info!("节点运动学已写出: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use od_waves::{AiryField, WaveMode, WaveParams};

    fn kin() -> WaveKinField {
        let params = WaveParams {
            mode: WaveMode::Regular,
            hs: 2.0,
            tp: 8.0,
            tmax: 4.0,
            dt: 0.5,
            ..Default::default()
        };
        let field = AiryField::synthesize(&params, 50.0, 9.81, 1025.0).unwrap();
        let nodes = vec![DVec3::new(0.0, 0.0, -5.0), DVec3::new(0.0, 0.0, -10.0)];
        WaveKinField::generate(&field, &params, &nodes).unwrap()
    }

    #[test]
    fn test_elevation_csv_shape() {
        let k = kin();
        let mut buf = Vec::new();
        write_elevation_csv(&mut buf, &k, &[0, 1]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // 表头 + NStepWave+1 行
        assert_eq!(lines.len(), 1 + k.n_steps());
        assert_eq!(lines[0], "time_s,eta_node0_m,eta_node1_m");
        assert_eq!(lines[1].split(',').count(), 3);
    }

    #[test]
    fn test_kinematics_csv_wet_column() {
        let k = kin();
        let mut buf = Vec::new();
        write_kinematics_csv(&mut buf, &k, 0).unwrap();
        let text = String::from_utf8(buf).unwrap();
        // 水下节点每行都湿
        for line in text.lines().skip(1) {
            assert!(line.ends_with(",1"));
        }
    }

    #[test]
    fn test_bad_node_rejected() {
        let k = kin();
        let mut buf = Vec::new();
        assert!(write_kinematics_csv(&mut buf, &k, 99).is_err());
        assert!(write_elevation_csv(&mut buf, &k, &[0, 99]).is_err());
    }
}
