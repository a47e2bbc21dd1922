//! Elementary potential-flow singularities
//!
//! Each [`FlowElement`] yields a closed-form [`FieldSample`] (velocity, stream
//! function, velocity potential) at any location. Fields of several elements
//! superpose additively.

mod element;
mod sample;

pub use element::FlowElement;
pub use sample::FieldSample;

/// 特異点近傍で `r²` をクランプする下限値。
///
/// 要素位置からの距離の二乗がこの値を下回る点では、除算・対数の前に
/// `r² = R2_FLOOR` として扱う。格子評価と単一点評価は同じ値を使う必要がある。
/// クランプ半径 `√R2_FLOOR ≈ 3.2e-3` 以内の値は有限だが物理的な意味はない。
pub const R2_FLOOR: f64 = 1e-5;
