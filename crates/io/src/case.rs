use std::path::Path;

use serde::{Deserialize, Serialize};

use potflow_domain::Grid;
use potflow_elements::FlowElement;
use potflow_fields::FieldEvaluator;
use potflow_types::Vector2;

use crate::error::IoError;

/// ケースファイル中の流れ要素。`kind` タグで種別を判別する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementSpec {
    Uniform {
        strength: f64,
        #[serde(default)]
        angle: f64,
    },
    Source {
        strength: f64,
        x: f64,
        y: f64,
    },
    Sink {
        strength: f64,
        x: f64,
        y: f64,
    },
    Vortex {
        strength: f64,
        x: f64,
        y: f64,
    },
    Doublet {
        strength: f64,
        x: f64,
        y: f64,
    },
}

impl ElementSpec {
    fn kind(&self) -> &'static str {
        match self {
            ElementSpec::Uniform { .. } => "uniform",
            ElementSpec::Source { .. } => "source",
            ElementSpec::Sink { .. } => "sink",
            ElementSpec::Vortex { .. } => "vortex",
            ElementSpec::Doublet { .. } => "doublet",
        }
    }

    /// 検証して [`FlowElement`][] に変換する。
    ///
    /// 強さ・座標・角度は有限値でなければならず、湧き出し・吸い込みの強さは非負。
    pub fn to_element(&self, index: usize) -> Result<FlowElement, IoError> {
        let invalid = |reason: String| IoError::InvalidElement {
            index,
            kind: self.kind(),
            reason,
        };
        let finite = |name: &str, value: f64| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(invalid(format!("{name} must be finite, got {value}")))
            }
        };
        let non_negative = |value: f64| {
            if value >= 0.0 {
                Ok(value)
            } else {
                Err(invalid(format!(
                    "strength must be non-negative, got {value}; the sign is carried by the kind"
                )))
            }
        };

        let element = match *self {
            ElementSpec::Uniform { strength, angle } => FlowElement::uniform_at_angle(
                finite("strength", strength)?,
                finite("angle", angle)?,
            ),
            ElementSpec::Source { strength, x, y } => FlowElement::source(
                non_negative(finite("strength", strength)?)?,
                (finite("x", x)?, finite("y", y)?),
            ),
            ElementSpec::Sink { strength, x, y } => FlowElement::sink(
                non_negative(finite("strength", strength)?)?,
                (finite("x", x)?, finite("y", y)?),
            ),
            ElementSpec::Vortex { strength, x, y } => FlowElement::vortex(
                finite("strength", strength)?,
                (finite("x", x)?, finite("y", y)?),
            ),
            ElementSpec::Doublet { strength, x, y } => FlowElement::doublet(
                finite("strength", strength)?,
                (finite("x", x)?, finite("y", y)?),
            ),
        };
        Ok(element)
    }
}

impl From<&FlowElement> for ElementSpec {
    fn from(e: &FlowElement) -> Self {
        let (x, y) = e.location().map_or((0.0, 0.0), |p| (p.x(), p.y()));
        match *e {
            FlowElement::Uniform { strength, angle } => ElementSpec::Uniform { strength, angle },
            FlowElement::Source { strength, .. } => ElementSpec::Source { strength, x, y },
            FlowElement::Sink { strength, .. } => ElementSpec::Sink { strength, x, y },
            FlowElement::Vortex { strength, .. } => ElementSpec::Vortex { strength, x, y },
            FlowElement::Doublet { strength, .. } => ElementSpec::Doublet { strength, x, y },
        }
    }
}

/// ケースファイルから受け付ける格子の最大ノード数（4096²）。
pub const MAX_GRID_NODES: usize = 4096 * 4096;

/// 評価格子の指定。既定は [-4, 4]² を 100×100 点で覆う。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub nx: usize,
    pub ny: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            x_range: [-4.0, 4.0],
            y_range: [-4.0, 4.0],
            nx: 100,
            ny: 100,
        }
    }
}

impl GridSpec {
    /// 範囲が有限で、点数が [`MAX_GRID_NODES`][] 以下であることを確かめて格子を構築する。
    pub fn build(&self) -> Result<Grid, IoError> {
        let mut bounds = self.x_range.iter().chain(&self.y_range);
        if let Some(b) = bounds.find(|b| !b.is_finite()) {
            return Err(IoError::InvalidGrid(format!("range bound {b} is not finite")));
        }
        let nodes = self.nx.checked_mul(self.ny);
        if self.nx.max(self.ny) > MAX_GRID_NODES || nodes.is_none_or(|n| n > MAX_GRID_NODES) {
            return Err(IoError::InvalidGrid(format!(
                "{}x{} nodes exceeds the limit of {MAX_GRID_NODES}",
                self.nx, self.ny
            )));
        }
        Ok(Grid::uniform(
            (self.x_range[0], self.x_range[1]),
            (self.y_range[0], self.y_range[1]),
            self.nx,
            self.ny,
        ))
    }
}

/// ケースファイル全体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub probes: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r2_floor: Option<f64>,
}

impl CaseFile {
    pub fn from_elements(elements: &[FlowElement]) -> Self {
        Self {
            elements: elements.iter().map(ElementSpec::from).collect(),
            grid: GridSpec::default(),
            probes: Vec::new(),
            r2_floor: None,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, IoError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| IoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 全要素を検証して変換する。強さ 0 の要素は寄与しないので取り除く。
    pub fn flow_elements(&self) -> Result<Vec<FlowElement>, IoError> {
        let mut elements = Vec::with_capacity(self.elements.len());
        for (index, spec) in self.elements.iter().enumerate() {
            let element = spec.to_element(index)?;
            if element.is_inert() {
                log::debug!("dropping zero-strength {} at index {index}", element.kind_name());
                continue;
            }
            elements.push(element);
        }
        Ok(elements)
    }

    pub fn grid(&self) -> Result<Grid, IoError> {
        self.grid.build()
    }

    pub fn probe_points(&self) -> Vec<Vector2> {
        self.probes.iter().copied().map(Vector2::from).collect()
    }

    /// `r2_floor` の指定があればそれを、なければ既定値を使う評価器。
    pub fn evaluator(&self) -> Result<FieldEvaluator, IoError> {
        match self.r2_floor {
            Some(floor) => Ok(FieldEvaluator::with_r2_floor(floor)?),
            None => Ok(FieldEvaluator::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use potflow_elements::R2_FLOOR;
    use potflow_fields::FieldError;

    const RANKINE: &str = r#"{
        "elements": [
            { "kind": "uniform", "strength": 2.0 },
            { "kind": "source", "strength": 5.0, "x": 0.0, "y": 0.0 }
        ],
        "grid": { "nx": 21, "ny": 11 },
        "probes": [[2.0, 2.0]]
    }"#;

    #[test]
    fn parses_minimal_case() {
        let case = CaseFile::from_json_str(RANKINE).unwrap();
        let elements = case.flow_elements().unwrap();
        assert_eq!(
            elements,
            vec![
                FlowElement::uniform(2.0),
                FlowElement::source(5.0, (0.0, 0.0))
            ]
        );
        assert_eq!(case.probe_points(), vec![Vector2::new(2.0, 2.0)]);
        assert!(case.r2_floor.is_none());
    }

    #[test]
    fn grid_defaults_fill_missing_fields() {
        let case = CaseFile::from_json_str(RANKINE).unwrap();
        assert_eq!(case.grid.x_range, [-4.0, 4.0]);
        let grid = case.grid().unwrap();
        assert_eq!(grid.shape(), (11, 21));
    }

    #[test]
    fn missing_grid_uses_original_layout() {
        let case = CaseFile::from_json_str(r#"{ "elements": [] }"#).unwrap();
        assert_eq!(case.grid, GridSpec::default());
        assert_eq!(case.grid().unwrap().shape(), (100, 100));
    }

    #[test]
    fn rejects_negative_source_strength() {
        let json = r#"{ "elements": [
            { "kind": "uniform", "strength": 1.0 },
            { "kind": "sink", "strength": -1.0, "x": 0.0, "y": 0.0 }
        ] }"#;
        let err = CaseFile::from_json_str(json)
            .unwrap()
            .flow_elements()
            .unwrap_err();
        match err {
            IoError::InvalidElement { index, kind, .. } => {
                assert_eq!(index, 1);
                assert_eq!(kind, "sink");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn negative_vortex_strength_is_allowed() {
        let json = r#"{ "elements": [ { "kind": "vortex", "strength": -3.0, "x": 1.0, "y": 2.0 } ] }"#;
        let elements = CaseFile::from_json_str(json).unwrap().flow_elements().unwrap();
        assert_eq!(elements, vec![FlowElement::vortex(-3.0, (1.0, 2.0))]);
    }

    #[test]
    fn drops_inert_elements() {
        let json = r#"{ "elements": [
            { "kind": "uniform", "strength": 1.0 },
            { "kind": "vortex", "strength": 0.0, "x": 0.0, "y": 0.0 }
        ] }"#;
        let elements = CaseFile::from_json_str(json).unwrap().flow_elements().unwrap();
        assert_eq!(elements, vec![FlowElement::uniform(1.0)]);
    }

    #[test]
    fn unknown_kind_is_json_error() {
        let json = r#"{ "elements": [ { "kind": "dipole", "strength": 1.0 } ] }"#;
        assert!(matches!(CaseFile::from_json_str(json), Err(IoError::Json(_))));
    }

    #[test]
    fn non_finite_grid_bound_rejected() {
        let spec = GridSpec {
            x_range: [f64::NEG_INFINITY, 1.0],
            ..GridSpec::default()
        };
        assert!(matches!(spec.build(), Err(IoError::InvalidGrid(_))));
    }

    #[test]
    fn oversized_grid_rejected() {
        for (nx, ny) in [(usize::MAX, 2), (1 << 20, 1 << 20), (0, MAX_GRID_NODES + 1)] {
            let spec = GridSpec {
                nx,
                ny,
                ..GridSpec::default()
            };
            assert!(
                matches!(spec.build(), Err(IoError::InvalidGrid(_))),
                "{nx}x{ny} accepted"
            );
        }
        let small = GridSpec {
            nx: 1,
            ny: 1,
            ..GridSpec::default()
        };
        assert_eq!(small.build().unwrap().shape(), (1, 1));
    }

    #[test]
    fn oversized_grid_in_case_file() {
        let json = r#"{ "elements": [], "grid": { "nx": 18446744073709551615, "ny": 3 } }"#;
        let case = CaseFile::from_json_str(json).unwrap();
        assert!(matches!(case.grid(), Err(IoError::InvalidGrid(_))));
    }

    #[test]
    fn evaluator_floor_from_case() {
        let mut case = CaseFile::from_json_str(RANKINE).unwrap();
        assert_eq!(case.evaluator().unwrap().r2_floor(), R2_FLOOR);
        case.r2_floor = Some(1e-3);
        assert_eq!(case.evaluator().unwrap().r2_floor(), 1e-3);
        case.r2_floor = Some(0.0);
        assert!(matches!(
            case.evaluator(),
            Err(IoError::Field(FieldError::InvalidR2Floor(_)))
        ));
    }

    #[test]
    fn from_elements_round_trips_through_json() {
        let elements = vec![
            FlowElement::uniform_at_angle(1.0, 0.25),
            FlowElement::doublet(-2.0, (0.5, -0.5)),
        ];
        let json = CaseFile::from_elements(&elements).to_json_string().unwrap();
        let back = CaseFile::from_json_str(&json).unwrap().flow_elements().unwrap();
        assert_eq!(back, elements);
    }

    #[test]
    fn read_missing_file_reports_path() {
        let err = CaseFile::read("/nonexistent/potflow/case.json").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("/nonexistent/potflow/case.json"), "{msg}");
    }
}
