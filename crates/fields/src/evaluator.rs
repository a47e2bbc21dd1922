use potflow_domain::{EvaluationDomain, Grid};
use potflow_elements::{FieldSample, FlowElement, R2_FLOOR};
use potflow_types::{Vector2, superpose};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::FieldError;
use crate::result::FieldResult;

/// 流れ要素の重ね合わせで場を評価する。
///
/// 状態は特異点クランプの下限 `r2_floor` のみで、評価は入力に対する純関数。
/// 同じ評価器を複数スレッドから同時に使ってよい。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEvaluator {
    r2_floor: f64,
}

impl Default for FieldEvaluator {
    fn default() -> Self {
        Self { r2_floor: R2_FLOOR }
    }
}

impl FieldEvaluator {
    /// 既定の下限 [`R2_FLOOR`][] を使う評価器。
    pub fn new() -> Self {
        Self::default()
    }

    /// 特異点クランプの下限を指定する。有限の正値でなければエラー。
    pub fn with_r2_floor(r2_floor: f64) -> Result<Self, FieldError> {
        if r2_floor.is_finite() && r2_floor > 0.0 {
            Ok(Self { r2_floor })
        } else {
            Err(FieldError::InvalidR2Floor(r2_floor))
        }
    }

    pub fn r2_floor(&self) -> f64 {
        self.r2_floor
    }

    /// 1 点における全要素の寄与の総和。
    #[inline]
    pub fn evaluate_point(&self, elements: &[FlowElement], p: Vector2) -> FieldSample {
        superpose(elements.iter().map(|e| e.contribution_at(p, self.r2_floor)))
    }

    /// 領域の全ノードで場を評価する。結果の形状は `domain.shape()` と一致する。
    pub fn evaluate(&self, elements: &[FlowElement], domain: &EvaluationDomain) -> FieldResult {
        self.evaluate_nodes(elements, domain.shape(), domain.len(), |k| domain.node(k))
    }

    /// 格子での評価。
    pub fn evaluate_grid(&self, elements: &[FlowElement], grid: &Grid) -> FieldResult {
        self.evaluate_nodes(elements, grid.shape(), grid.len(), |k| grid.node(k))
    }

    /// 入れ子配列の座標で評価する。X と Y の形状が異なれば
    /// [`FieldError::InvalidInput`][] を返し、何も計算しない。
    pub fn evaluate_arrays(
        &self,
        elements: &[FlowElement],
        x: &[Vec<f64>],
        y: &[Vec<f64>],
    ) -> Result<FieldResult, FieldError> {
        let domain = EvaluationDomain::from_arrays(x, y)?;
        Ok(self.evaluate(elements, &domain))
    }

    fn evaluate_nodes<F>(
        &self,
        elements: &[FlowElement],
        (rows, cols): (usize, usize),
        n: usize,
        node: F,
    ) -> FieldResult
    where
        F: Fn(usize) -> Vector2 + Sync + Send,
    {
        log::debug!(
            "evaluating {} element(s) over {rows}x{cols} node(s), r2_floor = {:e}",
            elements.len(),
            self.r2_floor
        );
        for e in elements {
            log::trace!("element {} strength {}", e.kind_name(), e.strength());
        }
        let samples = self.map_nodes(n, node, elements);
        FieldResult::from_samples((rows, cols), &samples)
    }

    #[cfg(not(feature = "parallel"))]
    fn map_nodes<F>(&self, n: usize, node: F, elements: &[FlowElement]) -> Vec<FieldSample>
    where
        F: Fn(usize) -> Vector2,
    {
        (0..n)
            .map(|k| self.evaluate_point(elements, node(k)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn map_nodes<F>(&self, n: usize, node: F, elements: &[FlowElement]) -> Vec<FieldSample>
    where
        F: Fn(usize) -> Vector2 + Sync + Send,
    {
        (0..n)
            .into_par_iter()
            .map(|k| self.evaluate_point(elements, node(k)))
            .collect()
    }
}

/// 既定の評価器で領域全体を評価する。
pub fn evaluate(elements: &[FlowElement], domain: &EvaluationDomain) -> FieldResult {
    FieldEvaluator::default().evaluate(elements, domain)
}

/// 既定の評価器で 1 点を評価する。
pub fn evaluate_point(elements: &[FlowElement], p: Vector2) -> FieldSample {
    FieldEvaluator::default().evaluate_point(elements, p)
}

/// 既定の評価器で入れ子配列の座標を評価する。
pub fn evaluate_arrays(
    elements: &[FlowElement],
    x: &[Vec<f64>],
    y: &[Vec<f64>],
) -> Result<FieldResult, FieldError> {
    FieldEvaluator::default().evaluate_arrays(elements, x, y)
}
