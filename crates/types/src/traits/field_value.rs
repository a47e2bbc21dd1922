use std::ops::{Add, Mul, Neg, Sub};

use crate::vector::Vector2;

/// フィールド値として使用可能な型の共通インターフェース。
///
/// スーパートレイトバウンドとして加算・減算・スカラー倍・符号反転を要求し、
/// 零元（加法単位元）とノルムを定義する。
/// ポテンシャル流れの重ね合わせはこの trait の加算とスカラー倍だけで表現される。
/// 静的ディスパッチ専用設計のため `dyn FieldValue` は意図的に非サポート。
///
/// # compile_fail 例
///
/// `Copy` をスーパートレイトに持つため、トレイトオブジェクトにはできない:
///
/// ```compile_fail
/// use potflow_types::FieldValue;
/// fn takes(_: &dyn FieldValue) {}
/// ```
pub trait FieldValue:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> + Neg<Output = Self>
{
    /// 加法単位元を返す。`Self::zero() + x == x` をすべての `x` について保証する。
    fn zero() -> Self;

    /// ノルムを返す。常に非負の `f64` を返す。
    ///
    /// 零元に対して `Self::zero().mag() < 1e-14` を保証する。
    fn mag(&self) -> f64;
}

// ===== f64 =====

impl FieldValue for f64 {
    fn zero() -> Self {
        0.0_f64
    }

    fn mag(&self) -> f64 {
        self.abs()
    }
}

// ===== Vector2 =====

impl FieldValue for Vector2 {
    fn zero() -> Self {
        Vector2::new(0.0, 0.0)
    }

    /// Euclidean ノルム `√(x² + y²)`。
    fn mag(&self) -> f64 {
        self.x().hypot(self.y())
    }
}

/// 複数の値を重ね合わせる（総和を取る）。空の場合は零元を返す。
pub fn superpose<T: FieldValue>(values: impl IntoIterator<Item = T>) -> T {
    values.into_iter().fold(T::zero(), |acc, v| acc + v)
}
