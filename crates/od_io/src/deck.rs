// crates/od_io/src/deck.rs

//! FAST/HydroDyn 风格输入甲板解析
//!
//! 甲板为行式文本：
//! - 标量行 `<值> <键> [- 注释]`
//! - 分隔行（`---` 开头）、注释行（`!`、`#`）跳过
//! - 表格：`NJoints`/`NPropSets`/`NMembers` 行之后为列头行与数据行
//! - 环境参数可写 `default`（大小写不敏感），解析为未设定，
//!   初始化时由运行配置补齐
//!
//! 解析错误携带文件与行号。

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use od_foundation::{OdError, OdResult};
use od_graph::{GraphBuilder, StructuralGraph};
use od_waves::{StretchMode, WaveMode, WaveParams};
use tracing::debug;

/// 关节点表行
#[derive(Debug, Clone, Copy)]
pub struct JointRow {
    /// JointID
    pub id: u32,
    /// x 坐标 [m]
    pub x: f64,
    /// y 坐标 [m]
    pub y: f64,
    /// z 坐标（MSL 参考系）[m]
    pub z: f64,
}

/// 截面属性表行
#[derive(Debug, Clone, Copy)]
pub struct PropSetRow {
    /// PropSetID
    pub id: u32,
    /// 外径 PropD [m]
    pub diameter: f64,
    /// 壁厚 PropThck [m]
    pub thickness: f64,
}

/// 构件表行
#[derive(Debug, Clone, Copy)]
pub struct MemberRow {
    /// MemberID
    pub id: u32,
    /// 端点 1 JointID
    pub joint1: u32,
    /// 端点 2 JointID
    pub joint2: u32,
    /// 端点 1 PropSetID
    pub prop1: u32,
    /// 端点 2 PropSetID
    pub prop2: u32,
    /// 划分尺寸 MDivSize [m]
    pub div_size: f64,
    /// 势流构件标记 PropPot
    pub potential: bool,
}

/// 已解析的输入甲板
#[derive(Debug, Clone)]
pub struct InputDeck {
    path: PathBuf,
    /// 标量键值（键小写）
    values: HashMap<String, (String, usize)>,
    /// 关节点表
    pub joints: Vec<JointRow>,
    /// 截面属性表
    pub propsets: Vec<PropSetRow>,
    /// 构件表
    pub members: Vec<MemberRow>,
}

impl InputDeck {
    /// 从文件解析
    pub fn from_file<P: AsRef<Path>>(path: P) -> OdResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OdError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| OdError::io_with_source(format!("读取甲板 {}", path.display()), e))?;
        Self::parse_str(&content, path)
    }

    /// 从字符串解析，`path` 仅用于错误定位
    pub fn parse_str(content: &str, path: impl Into<PathBuf>) -> OdResult<Self> {
        let path = path.into();
        let mut deck = Self {
            path: path.clone(),
            values: HashMap::new(),
            joints: Vec::new(),
            propsets: Vec::new(),
            members: Vec::new(),
        };

        let lines: Vec<&str> = content.lines().collect();
        let mut i = 0;
        while i < lines.len() {
            let lineno = i + 1;
            let line = lines[i].trim();
            i += 1;
            if is_skippable(line) {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let (Some(value), Some(key)) = (tokens.next(), tokens.next()) else {
                continue; // 孤立 token 行（表格列头等）忽略
            };

            match key.to_ascii_lowercase().as_str() {
                "njoints" => {
                    let n = parse_count(&path, lineno, value)?;
                    i = deck.parse_table(&lines, i, n, |deck, path, lineno, cols| {
                        deck.joints.push(JointRow {
                            id: parse_u32(path, lineno, col(path, lineno, cols, 0)?)?,
                            x: parse_f64(path, lineno, col(path, lineno, cols, 1)?)?,
                            y: parse_f64(path, lineno, col(path, lineno, cols, 2)?)?,
                            z: parse_f64(path, lineno, col(path, lineno, cols, 3)?)?,
                        });
                        Ok(())
                    })?;
                }
                "npropsets" => {
                    let n = parse_count(&path, lineno, value)?;
                    i = deck.parse_table(&lines, i, n, |deck, path, lineno, cols| {
                        deck.propsets.push(PropSetRow {
                            id: parse_u32(path, lineno, col(path, lineno, cols, 0)?)?,
                            diameter: parse_f64(path, lineno, col(path, lineno, cols, 1)?)?,
                            thickness: parse_f64(path, lineno, col(path, lineno, cols, 2)?)?,
                        });
                        Ok(())
                    })?;
                }
                "nmembers" => {
                    let n = parse_count(&path, lineno, value)?;
                    i = deck.parse_table(&lines, i, n, |deck, path, lineno, cols| {
                        let potential = parse_bool(
                            path,
                            lineno,
                            col(path, lineno, cols, cols.len() - 1)?,
                        )?;
                        deck.members.push(MemberRow {
                            id: parse_u32(path, lineno, col(path, lineno, cols, 0)?)?,
                            joint1: parse_u32(path, lineno, col(path, lineno, cols, 1)?)?,
                            joint2: parse_u32(path, lineno, col(path, lineno, cols, 2)?)?,
                            prop1: parse_u32(path, lineno, col(path, lineno, cols, 3)?)?,
                            prop2: parse_u32(path, lineno, col(path, lineno, cols, 4)?)?,
                            div_size: parse_f64(path, lineno, col(path, lineno, cols, 5)?)?,
                            potential,
                        });
                        Ok(())
                    })?;
                }
                k => {
                    deck.values.insert(k.to_string(), (value.to_string(), lineno));
                }
            }
        }

        debug!(
            "甲板 {}: {} 标量键, {} 关节点, {} 属性集, {} 构件",
            path.display(),
            deck.values.len(),
            deck.joints.len(),
            deck.propsets.len(),
            deck.members.len()
        );
        Ok(deck)
    }

    /// 读取 N 行表格数据，跳过列头行（首 token 非数字的行）
    fn parse_table(
        &mut self,
        lines: &[&str],
        mut i: usize,
        n: usize,
        mut row: impl FnMut(&mut Self, &Path, usize, &[&str]) -> OdResult<()>,
    ) -> OdResult<usize> {
        let path = self.path.clone();
        let mut parsed = 0;
        while parsed < n {
            if i >= lines.len() {
                return Err(OdError::parse(
                    &path,
                    lines.len(),
                    format!("表格不完整: 期望 {n} 行, 实际 {parsed} 行"),
                ));
            }
            let lineno = i + 1;
            let line = lines[i].trim();
            i += 1;
            if is_skippable(line) {
                continue;
            }
            let cols: Vec<&str> = line.split_whitespace().collect();
            // 列头 / 单位行：首列非数字
            if cols[0].parse::<f64>().is_err() {
                continue;
            }
            row(self, &path, lineno, &cols)?;
            parsed += 1;
        }
        Ok(i)
    }

    /// 原始键值（键大小写不敏感）
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_ascii_lowercase())
            .map(|(v, _)| v.as_str())
    }

    /// 必选浮点键
    pub fn get_f64(&self, key: &str) -> OdResult<f64> {
        let (v, lineno) = self
            .values
            .get(&key.to_ascii_lowercase())
            .ok_or_else(|| OdError::missing_key(key))?;
        parse_f64(&self.path, *lineno, v)
    }

    /// 可选浮点键，缺失时取给定默认值
    pub fn get_f64_or(&self, key: &str, default: f64) -> OdResult<f64> {
        match self.values.get(&key.to_ascii_lowercase()) {
            Some((v, lineno)) => parse_f64(&self.path, *lineno, v),
            None => Ok(default),
        }
    }

    /// 必选整数键
    pub fn get_i64(&self, key: &str) -> OdResult<i64> {
        let (v, lineno) = self
            .values
            .get(&key.to_ascii_lowercase())
            .ok_or_else(|| OdError::missing_key(key))?;
        v.parse::<i64>()
            .map_err(|_| OdError::parse(&self.path, *lineno, format!("无法解析整数: {v}")))
    }

    /// 可选整数键
    pub fn get_i64_or(&self, key: &str, default: i64) -> OdResult<i64> {
        match self.values.get(&key.to_ascii_lowercase()) {
            Some((v, lineno)) => v
                .parse::<i64>()
                .map_err(|_| OdError::parse(&self.path, *lineno, format!("无法解析整数: {v}"))),
            None => Ok(default),
        }
    }

    /// 允许 `default` 的浮点键：`default` → None
    pub fn get_defaultable(&self, key: &str) -> OdResult<Option<f64>> {
        let Some((v, lineno)) = self.values.get(&key.to_ascii_lowercase()) else {
            return Err(OdError::missing_key(key));
        };
        if v.eq_ignore_ascii_case("default") {
            return Ok(None);
        }
        parse_f64(&self.path, *lineno, v).map(Some)
    }

    /// 环境参数三元组 (WtrDens, WtrDpth, MSL2SWL)，`default` → None
    pub fn environment(&self) -> OdResult<(Option<f64>, Option<f64>, Option<f64>)> {
        Ok((
            self.get_defaultable("WtrDens")?,
            self.get_defaultable("WtrDpth")?,
            self.get_defaultable("MSL2SWL")?,
        ))
    }

    /// 波浪参数块
    pub fn wave_params(&self) -> OdResult<WaveParams> {
        let mode = WaveMode::from_code(self.get_i64("WaveMod")?)?;
        let stretch = StretchMode::from_code(self.get_i64_or("WaveStMod", 0)?)?;
        let tmax = self.get_f64("WaveTMax")?;
        let dt = self.get_f64("WaveDT")?;
        let (hs, tp) = if mode == WaveMode::Still {
            (self.get_f64_or("WaveHs", 0.0)?, self.get_f64_or("WaveTp", 10.0)?)
        } else {
            (self.get_f64("WaveHs")?, self.get_f64("WaveTp")?)
        };
        // WavePkShp 的 default 表示按 DNV 经验式取 γ
        let gamma = match self.raw("WavePkShp") {
            None => None,
            Some(v) if v.eq_ignore_ascii_case("default") => None,
            Some(_) => self.get_defaultable("WavePkShp")?,
        };
        let params = WaveParams {
            mode,
            stretch,
            tmax,
            dt,
            hs,
            tp,
            gamma,
            direction_deg: self.get_f64_or("WaveDir", 0.0)?,
            seed: self.get_i64_or("WaveSeed(1)", 42)?.unsigned_abs(),
        };
        params.validate()?;
        Ok(params)
    }

    /// 表格 → 结构图
    pub fn to_graph(&self) -> OdResult<StructuralGraph> {
        if self.joints.is_empty() {
            return Err(OdError::invalid_input(format!(
                "甲板 {} 不含关节点表",
                self.path.display()
            )));
        }
        let mut b = GraphBuilder::new();
        for j in &self.joints {
            b.add_joint(j.id, j.x, j.y, j.z);
        }
        for p in &self.propsets {
            b.add_propset(p.id, p.diameter, p.thickness);
        }
        for m in &self.members {
            let div = if m.div_size > 0.0 {
                Some(m.div_size)
            } else {
                None
            };
            b.add_member(m.id, m.joint1, m.joint2, m.prop1, m.prop2, div, m.potential);
        }
        b.build()
    }
}

fn col<'a>(path: &Path, lineno: usize, cols: &[&'a str], i: usize) -> OdResult<&'a str> {
    cols.get(i)
        .copied()
        .ok_or_else(|| OdError::parse(path, lineno, format!("缺少第 {} 列", i + 1)))
}

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with("---") || line.starts_with('!') || line.starts_with('#')
}

fn parse_f64(path: &Path, lineno: usize, v: &str) -> OdResult<f64> {
    v.parse::<f64>()
        .map_err(|_| OdError::parse(path, lineno, format!("无法解析浮点数: {v}")))
}

fn parse_u32(path: &Path, lineno: usize, v: &str) -> OdResult<u32> {
    // 表格 ID 列可能写成浮点形式
    let f = parse_f64(path, lineno, v)?;
    if f < 0.0 || f.fract() != 0.0 {
        return Err(OdError::parse(path, lineno, format!("无效的 ID: {v}")));
    }
    Ok(f as u32)
}

fn parse_bool(path: &Path, lineno: usize, v: &str) -> OdResult<bool> {
    match v.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(OdError::parse(
            path,
            lineno,
            format!("无法解析布尔值: {v}"),
        )),
    }
}

fn parse_count(path: &Path, lineno: usize, v: &str) -> OdResult<usize> {
    v.parse::<usize>()
        .map_err(|_| OdError::parse(path, lineno, format!("无法解析表格行数: {v}")))
}
