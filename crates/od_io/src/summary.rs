// crates/od_io/src/summary.rs

//! 初始化摘要（.sum）写出
//!
//! 文本格式，分四段：文件头（工具名 / 版本 / 时间戳）、环境参数、
//! Morison 节点表、构件表与体积总量。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use od_foundation::{OdError, OdResult};
use od_morison::{HydroModel, VolumeMethod};
use tracing::info;

/// 写摘要到任意输出流
pub fn write_summary<W: Write>(w: &mut W, model: &HydroModel) -> OdResult<()> {
    let env = model.environment();
    let disc = model.morison().discretization();
    let kin = model.kinematics();

    writeln!(w, "OceanDyn 初始化摘要")?;
    writeln!(w, "版本: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(w, "生成时间: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(w)?;

    // ========================================================================
    // 环境参数
    // ========================================================================
    writeln!(w, "[环境]")?;
    writeln!(w, "  重力加速度      = {:>12.4} m/s^2", env.gravity)?;
    writeln!(w, "  海水密度        = {:>12.4} kg/m^3", env.wtr_dens)?;
    writeln!(w, "  总水深 (至SWL)  = {:>12.4} m", env.wtr_dpth)?;
    writeln!(w, "  MSL2SWL         = {:>12.4} m", env.msl2swl)?;
    writeln!(w)?;

    // ========================================================================
    // 节点表
    // ========================================================================
    writeln!(w, "[Morison 节点] 共 {} 个（前 {} 个为关节点）", disc.n_nodes(), disc.n_joints())?;
    writeln!(
        w,
        "  {:>6} {:>12} {:>12} {:>12} {:>6}",
        "节点", "x [m]", "y [m]", "z [m]", "入水"
    )?;
    for (i, p) in disc.nodes().iter().enumerate() {
        writeln!(
            w,
            "  {:>6} {:>12.4} {:>12.4} {:>12.4} {:>6}",
            i,
            p.x,
            p.y,
            p.z,
            if kin.is_ever_wet(i) { 1 } else { 0 }
        )?;
    }
    writeln!(w)?;

    // ========================================================================
    // 构件表
    // ========================================================================
    writeln!(w, "[构件] 共 {} 根", disc.members().len())?;
    writeln!(
        w,
        "  {:>6} {:>6} {:>10} {:>8} {:>8} {:>12} {:>12} {:>6}",
        "ID", "段数", "长度 [m]", "R1 [m]", "R2 [m]", "V外 [m^3]", "V水下 [m^3]", "势流"
    )?;
    for (m, v) in disc.members().iter().zip(model.morison().member_volumes()) {
        writeln!(
            w,
            "  {:>6} {:>6} {:>10.3} {:>8.3} {:>8.3} {:>12.4} {:>12.4} {:>6}",
            m.id,
            m.n_div,
            m.length,
            m.r[0],
            m.r[m.n_div],
            v.outer,
            v.submerged,
            if m.potential { "T" } else { "F" }
        )?;
    }
    writeln!(w)?;

    // ========================================================================
    // 体积总量
    // ========================================================================
    let v_total = model.volume_structure(VolumeMethod::Morison)?;
    let v_sub = model.volume_submerged(VolumeMethod::Morison)?;
    writeln!(w, "[体积总量]")?;
    writeln!(w, "  结构总体积      = {v_total:>14.4} m^3")?;
    writeln!(w, "  水下总体积      = {v_sub:>14.4} m^3")?;

    Ok(())
}

/// 写摘要文件
pub fn write_summary_file<P: AsRef<Path>>(path: P, model: &HydroModel) -> OdResult<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| OdError::io_with_source(format!("创建摘要文件 {}", path.display()), e))?;
    let mut w = BufWriter::new(file);
    write_summary(&mut w, model)?;
    w.flush()?;
    info!("摘要已写出: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use od_config::MorisonConfig;
    use od_graph::GraphBuilder;
    use od_morison::Environment;
    use od_waves::{WaveMode, WaveParams};

    fn model() -> HydroModel {
        let mut b = GraphBuilder::new();
        b.add_joint(1, 0.0, 0.0, -20.0)
            .add_joint(2, 0.0, 0.0, 4.0)
            .add_propset(1, 6.0, 0.06)
            .add_member(1, 1, 2, 1, 1, Some(4.0), false);
        let graph = b.build().unwrap();
        let env = Environment {
            gravity: 9.81,
            wtr_dens: 1025.0,
            wtr_dpth: 50.0,
            msl2swl: 0.0,
        };
        let params = WaveParams {
            mode: WaveMode::Regular,
            hs: 2.0,
            tp: 10.0,
            tmax: 20.0,
            dt: 0.5,
            ..Default::default()
        };
        HydroModel::init(graph, env, params, &MorisonConfig::default()).unwrap()
    }

    #[test]
    fn test_summary_sections_present() {
        let m = model();
        let mut buf = Vec::new();
        write_summary(&mut buf, &m).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("[环境]"));
        assert!(text.contains("[Morison 节点]"));
        assert!(text.contains("[构件]"));
        assert!(text.contains("[体积总量]"));
        assert!(text.contains("1025.0000"));
    }

    #[test]
    fn test_summary_member_rows() {
        let m = model();
        let mut buf = Vec::new();
        write_summary(&mut buf, &m).unwrap();
        let text = String::from_utf8(buf).unwrap();
        // 单构件 L=24, divSize=4 → 6 段
        assert!(text.contains("共 1 根"));
        let member_line = text
            .lines()
            .find(|l| l.contains("24.000"))
            .expect("构件行缺失");
        assert!(member_line.contains(" 6 "));
    }
}
