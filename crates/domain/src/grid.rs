use potflow_types::Vector2;

use crate::error::DomainError;

/// `[start, end]` を `n` 等分点で刻んだ数列を返す。
///
/// 端点 `end` を含み、最後の要素は丸め誤差なしで `end` に一致する。
/// `n == 0` なら空、`n == 1` なら `[start]`。
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// 行優先の 2 次元サンプル格子。
///
/// `x`・`y` は同じ形状 `(rows, cols)` の座標配列で、ノード `(i, j)` の座標は
/// `(x[i * cols + j], y[i * cols + j])`。[`Grid::meshgrid`][] で構築した場合は
/// 行方向が y、列方向が x に対応する。
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    x: Vec<f64>,
    y: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// 行優先のフラットな座標バッファから格子を構築する。
    ///
    /// いずれかのバッファ長が `rows * cols` と一致しない場合は
    /// [`DomainError::LengthMismatch`][]、`rows * cols` が `usize` に収まらない場合は
    /// [`DomainError::TooLarge`][] を返す。
    pub fn new(x: Vec<f64>, y: Vec<f64>, rows: usize, cols: usize) -> Result<Self, DomainError> {
        let expected = rows
            .checked_mul(cols)
            .ok_or(DomainError::TooLarge { rows, cols })?;
        if x.len() != expected {
            return Err(DomainError::LengthMismatch {
                array: "X",
                expected,
                got: x.len(),
            });
        }
        if y.len() != expected {
            return Err(DomainError::LengthMismatch {
                array: "Y",
                expected,
                got: y.len(),
            });
        }
        Ok(Self { x, y, rows, cols })
    }

    /// 入れ子配列（行の配列）の X, Y から格子を構築する。
    ///
    /// 各配列内で行長が揃っていなければ [`DomainError::RaggedRows`][]、
    /// X と Y の形状が異なれば [`DomainError::ShapeMismatch`][] を返す。
    pub fn from_arrays(x: &[Vec<f64>], y: &[Vec<f64>]) -> Result<Self, DomainError> {
        let x_shape = rect_shape("X", x)?;
        let y_shape = rect_shape("Y", y)?;
        if x_shape != y_shape {
            return Err(DomainError::ShapeMismatch { x_shape, y_shape });
        }
        let (rows, cols) = x_shape;
        Ok(Self {
            x: x.concat(),
            y: y.concat(),
            rows,
            cols,
        })
    }

    /// numpy の `meshgrid(xs, ys)` と同じ規約で格子を構築する。
    ///
    /// 形状は `(ys.len(), xs.len())`。`X[i][j] = xs[j]`, `Y[i][j] = ys[i]`。
    ///
    /// # Panics
    ///
    /// ノード数 `xs.len() * ys.len()` が確保できない場合、実行時パニックとなる。
    /// 外部入力から格子を作る場合は呼び出し側で点数を制限すること。
    pub fn meshgrid(xs: &[f64], ys: &[f64]) -> Self {
        let rows = ys.len();
        let cols = xs.len();
        let mut x = Vec::with_capacity(rows * cols);
        let mut y = Vec::with_capacity(rows * cols);
        for &yi in ys {
            for &xj in xs {
                x.push(xj);
                y.push(yi);
            }
        }
        Self { x, y, rows, cols }
    }

    /// 矩形領域 `x_range × y_range` を `nx × ny` 点で等間隔に覆う格子。
    pub fn uniform(x_range: (f64, f64), y_range: (f64, f64), nx: usize, ny: usize) -> Self {
        let xs = linspace(x_range.0, x_range.1, nx);
        let ys = linspace(y_range.0, y_range.1, ny);
        Self::meshgrid(&xs, &ys)
    }

    /// `(rows, cols)`。
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 総ノード数 `rows * cols`。
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// 行優先の X 座標バッファ。
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// 行優先の Y 座標バッファ。
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// 行優先インデックス `k` のノード座標。
    ///
    /// # Panics
    ///
    /// `k >= self.len()` の場合、実行時パニックとなる。
    #[inline]
    pub fn node(&self, k: usize) -> Vector2 {
        Vector2::new(self.x[k], self.y[k])
    }

    /// ノード `(i, j)` の座標。範囲外なら `None`。
    pub fn node_at(&self, i: usize, j: usize) -> Option<Vector2> {
        (i < self.rows && j < self.cols).then(|| self.node(i * self.cols + j))
    }

    /// 全ノード座標を行優先で列挙する。
    pub fn nodes(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| Vector2::new(x, y))
    }
}

/// 入れ子配列が矩形であることを確認し、その形状を返す。
fn rect_shape(array: &'static str, rows: &[Vec<f64>]) -> Result<(usize, usize), DomainError> {
    let cols = rows.first().map_or(0, Vec::len);
    for (row, r) in rows.iter().enumerate() {
        if r.len() != cols {
            return Err(DomainError::RaggedRows {
                array,
                row,
                expected: cols,
                got: r.len(),
            });
        }
    }
    Ok((rows.len(), cols))
}
