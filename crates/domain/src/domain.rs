use potflow_types::Vector2;

use crate::error::DomainError;
use crate::grid::Grid;

/// 評価対象の座標集合。
///
/// 格子と単一点は同じノード列ビュー（[`len`](Self::len) と
/// [`node`](Self::node)）を公開し、単一点は 1×1 格子として振る舞う。
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationDomain {
    Grid(Grid),
    Point(Vector2),
}

impl EvaluationDomain {
    pub fn point(x: f64, y: f64) -> Self {
        EvaluationDomain::Point(Vector2::new(x, y))
    }

    /// 入れ子配列の X, Y から格子領域を構築する。
    pub fn from_arrays(x: &[Vec<f64>], y: &[Vec<f64>]) -> Result<Self, DomainError> {
        Grid::from_arrays(x, y).map(EvaluationDomain::Grid)
    }

    /// `(rows, cols)`。単一点は `(1, 1)`。
    pub fn shape(&self) -> (usize, usize) {
        match self {
            EvaluationDomain::Grid(grid) => grid.shape(),
            EvaluationDomain::Point(_) => (1, 1),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EvaluationDomain::Grid(grid) => grid.len(),
            EvaluationDomain::Point(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 行優先インデックス `k` のノード座標。
    ///
    /// # Panics
    ///
    /// `k >= self.len()` の場合、実行時パニックとなる。
    #[inline]
    pub fn node(&self, k: usize) -> Vector2 {
        match self {
            EvaluationDomain::Grid(grid) => grid.node(k),
            EvaluationDomain::Point(p) => {
                assert!(k == 0, "point domain has a single node, got index {k}");
                *p
            }
        }
    }

    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            EvaluationDomain::Grid(grid) => Some(grid),
            EvaluationDomain::Point(_) => None,
        }
    }
}

impl From<Grid> for EvaluationDomain {
    fn from(grid: Grid) -> Self {
        EvaluationDomain::Grid(grid)
    }
}

impl From<Vector2> for EvaluationDomain {
    fn from(p: Vector2) -> Self {
        EvaluationDomain::Point(p)
    }
}
