/// フィールド演算の基盤となる trait 群。
///
/// - [`FieldValue`][]: フィールド値の統一インターフェース（加減算・スカラー倍・零元・ノルム）
/// - [`superpose`][]: フィールド値の列を線形に重ね合わせる
mod field_value;

pub use field_value::{FieldValue, superpose};
