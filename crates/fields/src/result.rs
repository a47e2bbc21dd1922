use potflow_elements::FieldSample;
use potflow_types::Vector2;

/// [`FieldResult`][] の成分指定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    U,
    V,
    Psi,
    Phi,
}

impl Component {
    pub const ALL: [Component; 4] = [Component::U, Component::V, Component::Psi, Component::Phi];

    pub fn name(&self) -> &'static str {
        match self {
            Component::U => "u",
            Component::V => "v",
            Component::Psi => "psi",
            Component::Phi => "phi",
        }
    }
}

/// 評価領域と同じ形状を持つ 4 つの出力場 `(u, v, ψ, ϕ)`。
///
/// 各バッファは行優先で、インデックスは入力領域のノード番号と一致する。
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResult {
    rows: usize,
    cols: usize,
    u: Vec<f64>,
    v: Vec<f64>,
    psi: Vec<f64>,
    phi: Vec<f64>,
}

impl FieldResult {
    /// 行優先のサンプル列から構築する。`samples.len() == rows * cols` が前提。
    pub(crate) fn from_samples(shape: (usize, usize), samples: &[FieldSample]) -> Self {
        debug_assert_eq!(samples.len(), shape.0 * shape.1);
        let n = samples.len();
        let mut u = Vec::with_capacity(n);
        let mut v = Vec::with_capacity(n);
        let mut psi = Vec::with_capacity(n);
        let mut phi = Vec::with_capacity(n);
        for s in samples {
            u.push(s.u());
            v.push(s.v());
            psi.push(s.psi);
            phi.push(s.phi);
        }
        Self {
            rows: shape.0,
            cols: shape.1,
            u,
            v,
            psi,
            phi,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    pub fn u(&self) -> &[f64] {
        &self.u
    }

    pub fn v(&self) -> &[f64] {
        &self.v
    }

    pub fn psi(&self) -> &[f64] {
        &self.psi
    }

    pub fn phi(&self) -> &[f64] {
        &self.phi
    }

    pub fn component(&self, c: Component) -> &[f64] {
        match c {
            Component::U => &self.u,
            Component::V => &self.v,
            Component::Psi => &self.psi,
            Component::Phi => &self.phi,
        }
    }

    /// 成分を入れ子配列（行の配列）として返す。
    pub fn component_rows(&self, c: Component) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.component(c)
            .chunks(self.cols)
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// 行優先インデックス `k` の値。範囲外なら `None`。
    pub fn get(&self, k: usize) -> Option<FieldSample> {
        (k < self.len()).then(|| {
            FieldSample::new(
                Vector2::new(self.u[k], self.v[k]),
                self.psi[k],
                self.phi[k],
            )
        })
    }

    /// ノード `(i, j)` の値。範囲外なら `None`。
    pub fn sample(&self, i: usize, j: usize) -> Option<FieldSample> {
        if i < self.rows && j < self.cols {
            self.get(i * self.cols + j)
        } else {
            None
        }
    }

    /// 1×1 の結果（単一点評価）ならその値を返す。
    pub fn as_point(&self) -> Option<FieldSample> {
        if self.shape() == (1, 1) {
            self.get(0)
        } else {
            None
        }
    }

    /// 全出力が有限値かどうか。
    pub fn is_finite(&self) -> bool {
        Component::ALL
            .iter()
            .all(|&c| self.component(c).iter().all(|x| x.is_finite()))
    }
}
