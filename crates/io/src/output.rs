use std::io::Write;

use serde::Serialize;

use potflow_domain::Grid;
use potflow_elements::FieldSample;
use potflow_fields::{Component, FieldError, FieldResult};
use potflow_types::Vector2;

use crate::error::IoError;

/// 格子評価の出力。各配列は `shape = [rows, cols]` の入れ子配列。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDocument {
    pub shape: [usize; 2],
    pub r2_floor: f64,
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub u: Vec<Vec<f64>>,
    pub v: Vec<Vec<f64>>,
    pub psi: Vec<Vec<f64>>,
    pub phi: Vec<Vec<f64>>,
}

impl FieldDocument {
    /// 格子とその評価結果から出力文書を組み立てる。形状が異なればエラー。
    pub fn new(grid: &Grid, result: &FieldResult, r2_floor: f64) -> Result<Self, IoError> {
        if grid.shape() != result.shape() {
            return Err(FieldError::GridMismatch {
                result: result.shape(),
                grid: grid.shape(),
            }
            .into());
        }
        let (rows, cols) = grid.shape();
        let nest = |flat: &[f64]| -> Vec<Vec<f64>> {
            if cols == 0 {
                vec![Vec::new(); rows]
            } else {
                flat.chunks(cols).map(<[f64]>::to_vec).collect()
            }
        };
        Ok(Self {
            shape: [rows, cols],
            r2_floor,
            x: nest(grid.x()),
            y: nest(grid.y()),
            u: result.component_rows(Component::U),
            v: result.component_rows(Component::V),
            psi: result.component_rows(Component::Psi),
            phi: result.component_rows(Component::Phi),
        })
    }
}

/// 単一点評価の読み取り値。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbeReport {
    pub x: f64,
    pub y: f64,
    pub u: f64,
    pub v: f64,
    pub psi: f64,
    pub phi: f64,
    pub speed: f64,
}

impl ProbeReport {
    pub fn new(p: Vector2, s: &FieldSample) -> Self {
        Self {
            x: p.x(),
            y: p.y(),
            u: s.u(),
            v: s.v(),
            psi: s.psi,
            phi: s.phi,
            speed: s.speed(),
        }
    }
}

/// 整形済み JSON を書き出す。
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<(), IoError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use potflow_elements::FlowElement;
    use potflow_fields::{R2_FLOOR, evaluate, evaluate_point};

    #[test]
    fn document_nests_rows() {
        let grid = Grid::uniform((-1.0, 1.0), (0.0, 1.0), 3, 2);
        let result = evaluate(&[FlowElement::uniform(2.0)], &grid.clone().into());
        let doc = FieldDocument::new(&grid, &result, R2_FLOOR).unwrap();
        assert_eq!(doc.shape, [2, 3]);
        assert_eq!(doc.x, vec![vec![-1.0, 0.0, 1.0], vec![-1.0, 0.0, 1.0]]);
        assert_eq!(doc.y[1], vec![1.0, 1.0, 1.0]);
        assert_eq!(doc.u, vec![vec![2.0; 3]; 2]);
        assert_eq!(doc.psi[1], vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn document_rejects_mismatched_grid() {
        let grid = Grid::uniform((-1.0, 1.0), (0.0, 1.0), 3, 2);
        let other = Grid::uniform((-1.0, 1.0), (0.0, 1.0), 2, 2);
        let result = evaluate(&[FlowElement::uniform(2.0)], &grid.into());
        assert!(matches!(
            FieldDocument::new(&other, &result, R2_FLOOR),
            Err(IoError::Field(FieldError::GridMismatch { .. }))
        ));
    }

    #[test]
    fn probe_report_json_fields() {
        let p = Vector2::new(2.0, 2.0);
        let s = evaluate_point(&[FlowElement::source(5.0, (0.0, 0.0))], p);
        let report = ProbeReport::new(p, &s);
        let mut buf = Vec::new();
        write_json(&mut buf, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["x"], 2.0);
        let psi = value["psi"].as_f64().unwrap();
        assert!((psi - 0.625).abs() < 1e-12);
        assert!(value.get("speed").is_some());
    }
}
