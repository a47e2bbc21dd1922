use std::f64::consts::PI;

use potflow_types::Vector2;

use crate::sample::FieldSample;

/// ポテンシャル流れの基本解（特異点）。
///
/// 各要素の寄与は `d = p − location`, `r² = max(|d|², r2_floor)`,
/// `θ = atan2(d.y, d.x)`, `k = strength / 2π` として次の閉形式で与えられる。
///
/// | 要素      | u                    | v                 | ψ              | ϕ              |
/// |-----------|----------------------|-------------------|----------------|----------------|
/// | `Uniform` | `U cosα`             | `U sinα`          | `U(y cosα − x sinα)` | `U(x cosα + y sinα)` |
/// | `Source`  | `k·dx/r²`            | `k·dy/r²`         | `k·θ`          | `(k/2)·ln r²`  |
/// | `Sink`    | `−k·dx/r²`           | `−k·dy/r²`        | `−k·θ`         | `−(k/2)·ln r²` |
/// | `Vortex`  | `−k·dy/r²`           | `k·dx/r²`         | `−k·ln r`      | `k·θ`          |
/// | `Doublet` | `−k·(dx²−dy²)/r⁴`    | `−k·2·dx·dy/r⁴`   | `−k·dy/r²`     | `k·dx/r²`      |
///
/// すべての要素で `u = ∂ψ/∂y = ∂ϕ/∂x`, `v = −∂ψ/∂x = ∂ϕ/∂y` が成り立つ。
/// 符号に注意: `Vortex` の ψ・ϕ と `Doublet` の ϕ は、逆符号
/// （`Vortex`: ψ = `+k·ln r`, ϕ = `−k·θ`、`Doublet`: ϕ = `−k·dx/r²`）で書かれた公式表と
/// 一致しない。そうした表は上の関係を満たさないため、ここでは速度成分 u, v を基準に
/// ψ・ϕ の符号を揃えている。u, v 自体は同じ。
/// `Vortex` の強さ `Γ` は反時計回りを正とする。
/// `θ` は各中心から負の x 軸方向に分岐線を持ち、連続化（unwrap）はしない。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowElement {
    /// 一様流。速さ `strength`、x 軸からの傾き `angle` [rad]。
    Uniform { strength: f64, angle: f64 },
    /// 湧き出し。`strength ≥ 0` は単位奥行きあたりの体積流量。
    Source { strength: f64, location: Vector2 },
    /// 吸い込み。`strength ≥ 0`、符号は種別側に含まれる。
    Sink { strength: f64, location: Vector2 },
    /// 渦。`strength` は循環 `Γ`。
    Vortex { strength: f64, location: Vector2 },
    /// 二重湧き出し。`strength` は `K`。
    Doublet { strength: f64, location: Vector2 },
}

impl FlowElement {
    /// +x 方向の一様流。
    pub fn uniform(strength: f64) -> Self {
        FlowElement::Uniform {
            strength,
            angle: 0.0,
        }
    }

    /// x 軸から `angle` [rad] 傾いた一様流。
    pub fn uniform_at_angle(strength: f64, angle: f64) -> Self {
        FlowElement::Uniform { strength, angle }
    }

    pub fn source(strength: f64, location: impl Into<Vector2>) -> Self {
        FlowElement::Source {
            strength,
            location: location.into(),
        }
    }

    pub fn sink(strength: f64, location: impl Into<Vector2>) -> Self {
        FlowElement::Sink {
            strength,
            location: location.into(),
        }
    }

    pub fn vortex(strength: f64, location: impl Into<Vector2>) -> Self {
        FlowElement::Vortex {
            strength,
            location: location.into(),
        }
    }

    pub fn doublet(strength: f64, location: impl Into<Vector2>) -> Self {
        FlowElement::Doublet {
            strength,
            location: location.into(),
        }
    }

    pub fn strength(&self) -> f64 {
        match *self {
            FlowElement::Uniform { strength, .. }
            | FlowElement::Source { strength, .. }
            | FlowElement::Sink { strength, .. }
            | FlowElement::Vortex { strength, .. }
            | FlowElement::Doublet { strength, .. } => strength,
        }
    }

    /// 特異点の位置。一様流は位置を持たないので `None`。
    pub fn location(&self) -> Option<Vector2> {
        match *self {
            FlowElement::Uniform { .. } => None,
            FlowElement::Source { location, .. }
            | FlowElement::Sink { location, .. }
            | FlowElement::Vortex { location, .. }
            | FlowElement::Doublet { location, .. } => Some(location),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FlowElement::Uniform { .. } => "uniform",
            FlowElement::Source { .. } => "source",
            FlowElement::Sink { .. } => "sink",
            FlowElement::Vortex { .. } => "vortex",
            FlowElement::Doublet { .. } => "doublet",
        }
    }

    /// 強さがちょうど 0 で、場に何も寄与しない要素かどうか。
    pub fn is_inert(&self) -> bool {
        self.strength() == 0.0
    }

    /// 点 `p` におけるこの要素の寄与を返す。
    ///
    /// 特異点からの距離の二乗は `r2_floor` で下からクランプするため、
    /// `r2_floor > 0` である限り出力は常に有限となる。
    pub fn contribution_at(&self, p: Vector2, r2_floor: f64) -> FieldSample {
        match *self {
            FlowElement::Uniform { strength, angle } => uniform(strength, angle, p),
            FlowElement::Source { strength, location } => {
                radial(strength, p - location, r2_floor)
            }
            FlowElement::Sink { strength, location } => radial(-strength, p - location, r2_floor),
            FlowElement::Vortex { strength, location } => {
                rotational(strength, p - location, r2_floor)
            }
            FlowElement::Doublet { strength, location } => {
                doublet(strength, p - location, r2_floor)
            }
        }
    }
}

fn uniform(strength: f64, angle: f64, p: Vector2) -> FieldSample {
    // angle == 0 のとき cos = 1, sin = 0 で厳密に (U, 0, U·y, U·x) に一致する
    let (sin, cos) = angle.sin_cos();
    let (x, y) = (p.x(), p.y());
    FieldSample::new(
        Vector2::new(strength * cos, strength * sin),
        strength * (y * cos - x * sin),
        strength * (x * cos + y * sin),
    )
}

/// 湧き出し（`m > 0`）と吸い込み（`m < 0`）。
fn radial(m: f64, d: Vector2, r2_floor: f64) -> FieldSample {
    let k = m / (2.0 * PI);
    let r2 = d.mag_sqr().max(r2_floor);
    FieldSample::new(
        d * (k / r2),
        k * d.y().atan2(d.x()),
        m / (4.0 * PI) * r2.ln(),
    )
}

fn rotational(gamma: f64, d: Vector2, r2_floor: f64) -> FieldSample {
    let k = gamma / (2.0 * PI);
    let r2 = d.mag_sqr().max(r2_floor);
    FieldSample::new(
        Vector2::new(-k * d.y() / r2, k * d.x() / r2),
        // ln r = ln(r²) / 2
        -0.5 * k * r2.ln(),
        k * d.y().atan2(d.x()),
    )
}

fn doublet(strength: f64, d: Vector2, r2_floor: f64) -> FieldSample {
    let k = strength / (2.0 * PI);
    let r2 = d.mag_sqr().max(r2_floor);
    let r4 = r2 * r2;
    let (dx, dy) = (d.x(), d.y());
    FieldSample::new(
        Vector2::new(-k * (dx * dx - dy * dy) / r4, -k * (2.0 * dx * dy) / r4),
        -k * dy / r2,
        k * dx / r2,
    )
}
