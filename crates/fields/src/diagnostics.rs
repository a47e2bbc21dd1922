//! 評価結果の後処理: 速さ、圧力係数、差分による発散・渦度、よどみ点探索。
//!
//! 差分演算は `meshgrid` 形式の直交格子（行方向に y、列方向に x が変化する）を
//! 前提とし、内部ノードのみ値を持つ。境界ノードは `None`。
use potflow_domain::Grid;
use potflow_elements::FlowElement;
use potflow_types::Vector2;

use crate::error::FieldError;
use crate::evaluator::FieldEvaluator;
use crate::result::FieldResult;

impl FieldResult {
    /// 各ノードの速さ `|V|`。
    pub fn speed(&self) -> Vec<f64> {
        self.u()
            .iter()
            .zip(self.v())
            .map(|(u, v)| u.hypot(*v))
            .collect()
    }

    /// 最大の速さ。空の結果では 0。
    pub fn max_speed(&self) -> f64 {
        self.speed().into_iter().fold(0.0, f64::max)
    }

    /// 圧力係数 `Cp = 1 − |V|² / U∞²`。
    ///
    /// `free_stream_speed` が 0 または非有限なら定義できないので `None`。
    pub fn pressure_coefficient(&self, free_stream_speed: f64) -> Option<Vec<f64>> {
        if !free_stream_speed.is_finite() || free_stream_speed == 0.0 {
            return None;
        }
        let u_inf2 = free_stream_speed * free_stream_speed;
        Some(
            self.u()
                .iter()
                .zip(self.v())
                .map(|(u, v)| 1.0 - (u * u + v * v) / u_inf2)
                .collect(),
        )
    }

    /// 中心差分による発散 `∂u/∂x + ∂v/∂y`。
    pub fn divergence(&self, grid: &Grid) -> Result<Vec<Option<f64>>, FieldError> {
        self.check_grid(grid)?;
        Ok(self.interior_map(grid, |ddx, ddy| Some(ddx(self.u())? + ddy(self.v())?)))
    }

    /// 中心差分による渦度 `∂v/∂x − ∂u/∂y`。
    pub fn vorticity(&self, grid: &Grid) -> Result<Vec<Option<f64>>, FieldError> {
        self.check_grid(grid)?;
        Ok(self.interior_map(grid, |ddx, ddy| Some(ddx(self.v())? - ddy(self.u())?)))
    }

    fn check_grid(&self, grid: &Grid) -> Result<(), FieldError> {
        if self.shape() == grid.shape() {
            Ok(())
        } else {
            Err(FieldError::GridMismatch {
                result: self.shape(),
                grid: grid.shape(),
            })
        }
    }

    /// 内部ノードごとに、x・y 方向の差分演算子を渡して `op` を評価する。
    fn interior_map<F>(&self, grid: &Grid, op: F) -> Vec<Option<f64>>
    where
        F: Fn(&dyn Fn(&[f64]) -> Option<f64>, &dyn Fn(&[f64]) -> Option<f64>) -> Option<f64>,
    {
        let (rows, cols) = self.shape();
        let (x, y) = (grid.x(), grid.y());
        let mut out = vec![None; rows * cols];
        for i in 1..rows.saturating_sub(1) {
            for j in 1..cols.saturating_sub(1) {
                let k = i * cols + j;
                let ddx = |f: &[f64]| central(f[k + 1] - f[k - 1], x[k + 1] - x[k - 1]);
                let ddy = |f: &[f64]| central(f[k + cols] - f[k - cols], y[k + cols] - y[k - cols]);
                out[k] = op(&ddx, &ddy);
            }
        }
        out
    }
}

fn central(df: f64, dx: f64) -> Option<f64> {
    (dx != 0.0).then(|| df / dx)
}

impl FieldEvaluator {
    /// よどみ点の候補となる格子ノードを探す。
    ///
    /// 内部ノードのうち、速さが `tol` 未満かつ周囲 8 ノード以下であるものを返す。
    /// クランプ半径内（`r² < r2_floor`）のノードは速度が人工的に小さくなるため除外する。
    pub fn stagnation_points(
        &self,
        elements: &[FlowElement],
        grid: &Grid,
        result: &FieldResult,
        tol: f64,
    ) -> Result<Vec<Vector2>, FieldError> {
        result.check_grid(grid)?;
        let (rows, cols) = grid.shape();
        let speed = result.speed();
        let singular: Vec<Vector2> = elements.iter().filter_map(FlowElement::location).collect();

        let mut found = Vec::new();
        for i in 1..rows.saturating_sub(1) {
            for j in 1..cols.saturating_sub(1) {
                let k = i * cols + j;
                if speed[k] >= tol {
                    continue;
                }
                let p = grid.node(k);
                if singular
                    .iter()
                    .any(|&c| (p - c).mag_sqr() < self.r2_floor())
                {
                    continue;
                }
                let neighbours = (i - 1..=i + 1)
                    .flat_map(|ii| (j - 1..=j + 1).map(move |jj| ii * cols + jj))
                    .filter(|&kk| kk != k);
                let mut is_local_min = true;
                let mut any_greater = false;
                for kk in neighbours {
                    is_local_min &= speed[k] <= speed[kk];
                    any_greater |= speed[k] < speed[kk];
                }
                // 一様な平坦部はよどみ点とみなさない
                if is_local_min && any_greater {
                    found.push(p);
                }
            }
        }
        log::debug!("found {} stagnation point candidate(s)", found.len());
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;

    fn uniform_grid(n: usize) -> Grid {
        Grid::uniform((-2.0, 2.0), (-2.0, 2.0), n, n)
    }

    #[test]
    fn speed_of_uniform_flow() {
        let grid = uniform_grid(5);
        let r = evaluate(&[FlowElement::uniform(-3.0)], &grid.into());
        assert!(r.speed().iter().all(|&s| (s - 3.0).abs() < 1e-14));
        assert!((r.max_speed() - 3.0).abs() < 1e-14);
    }

    #[test]
    fn pressure_coefficient_free_stream_is_zero() {
        let grid = uniform_grid(4);
        let r = evaluate(&[FlowElement::uniform(2.0)], &grid.into());
        let cp = r.pressure_coefficient(2.0).unwrap();
        assert!(cp.iter().all(|c| c.abs() < 1e-14));
        assert!(r.pressure_coefficient(0.0).is_none());
        assert!(r.pressure_coefficient(f64::NAN).is_none());
    }

    #[test]
    fn cylinder_surface_pressure() {
        // U=1, K = 2π U R² で半径 R=1 の円柱。表面最上点で Cp = −3
        let elements = [
            FlowElement::uniform(1.0),
            FlowElement::doublet(2.0 * std::f64::consts::PI, (0.0, 0.0)),
        ];
        let r = evaluate(&elements, &potflow_domain::EvaluationDomain::point(0.0, 1.0));
        let cp = r.pressure_coefficient(1.0).unwrap();
        assert!((cp[0] + 3.0).abs() < 1e-12, "cp = {}", cp[0]);
    }

    #[test]
    fn boundary_nodes_have_no_derivative() {
        let grid = uniform_grid(4);
        let r = evaluate(&[FlowElement::uniform(1.0)], &grid.clone().into());
        let div = r.divergence(&grid).unwrap();
        assert_eq!(div.len(), 16);
        assert!(div[0].is_none());
        assert!(div[3].is_none());
        assert!(div[5].is_some());
        assert!(div[15].is_none());
    }

    #[test]
    fn vortex_vorticity_vanishes_away_from_core() {
        let grid = Grid::uniform((1.0, 3.0), (1.0, 3.0), 81, 81);
        let elements = [FlowElement::vortex(3.0, (0.0, 0.0))];
        let r = evaluate(&elements, &grid.clone().into());
        for w in r.vorticity(&grid).unwrap().into_iter().flatten() {
            assert!(w.abs() < 1e-2, "vorticity {w}");
        }
        for d in r.divergence(&grid).unwrap().into_iter().flatten() {
            assert!(d.abs() < 1e-2, "divergence {d}");
        }
    }

    #[test]
    fn grid_mismatch_is_reported() {
        let r = evaluate(&[FlowElement::uniform(1.0)], &uniform_grid(3).into());
        let err = r.divergence(&uniform_grid(4)).unwrap_err();
        assert_eq!(
            err,
            FieldError::GridMismatch {
                result: (3, 3),
                grid: (4, 4)
            }
        );
    }

    #[test]
    fn flat_zero_speed_region_has_no_stagnation_points() {
        let elements = [FlowElement::uniform(0.0)];
        let grid = uniform_grid(5);
        let ev = FieldEvaluator::new();
        let r = ev.evaluate_grid(&elements, &grid);
        let points = ev.stagnation_points(&elements, &grid, &r, 0.05).unwrap();
        assert!(points.is_empty(), "points = {points:?}");
    }

    #[test]
    fn rankine_half_body_stagnation_point() {
        let elements = [
            FlowElement::uniform(2.0),
            FlowElement::source(5.0, (0.0, 0.0)),
        ];
        let grid = Grid::uniform((-1.0, 1.0), (-1.0, 1.0), 201, 201);
        let ev = FieldEvaluator::new();
        let r = ev.evaluate_grid(&elements, &grid);
        let points = ev.stagnation_points(&elements, &grid, &r, 0.05).unwrap();
        assert_eq!(points.len(), 1, "points = {points:?}");
        let expected_x = -5.0 / (2.0 * std::f64::consts::PI * 2.0);
        assert!((points[0].x() - expected_x).abs() < 0.01);
        assert!(points[0].y().abs() < 0.01);
    }
}
