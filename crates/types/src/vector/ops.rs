/// `Vector2` の基本算術演算を提供する。
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::Vector2;

impl Add for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let a = self.as_array();
        let b = rhs.as_array();
        Vector2::new(a[0] + b[0], a[1] + b[1])
    }
}

impl Sub for Vector2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let a = self.as_array();
        let b = rhs.as_array();
        Vector2::new(a[0] - b[0], a[1] - b[1])
    }
}

impl Neg for Vector2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        let a = self.as_array();
        Vector2::new(-a[0], -a[1])
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    /// スカラー倍（右）: `v * s`。全成分に `s` を乗じる。
    #[inline]
    fn mul(self, s: f64) -> Self {
        let a = self.as_array();
        Vector2::new(a[0] * s, a[1] * s)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    /// スカラー倍（左）: `s * v`。`v * s` に委譲する。
    #[inline]
    fn mul(self, v: Vector2) -> Vector2 {
        v * self
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn div(self, s: f64) -> Self {
        let a = self.as_array();
        Vector2::new(a[0] / s, a[1] / s)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, s: f64) {
        *self = *self * s;
    }
}

impl DivAssign<f64> for Vector2 {
    #[inline]
    fn div_assign(&mut self, s: f64) {
        *self = *self / s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(got: Vector2, expected: Vector2) {
        let d = got - expected;
        let err = d.x().abs().max(d.y().abs());
        assert!(err < 1e-14, "got {got:?}, expected {expected:?}");
    }

    #[test]
    fn test_add_sub_neg() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(0.5, -3.0);
        assert_close(a + b, Vector2::new(1.5, -1.0));
        assert_close(a - b, Vector2::new(0.5, 5.0));
        assert_close(-a, Vector2::new(-1.0, -2.0));
    }

    #[test]
    fn test_scalar_mul_commutes() {
        let v = Vector2::new(1.0, -2.0);
        assert_close(v * 3.0, 3.0 * v);
        assert_close(v * 3.0, Vector2::new(3.0, -6.0));
    }

    #[test]
    fn test_div() {
        let v = Vector2::new(2.0, -4.0);
        assert_close(v / 2.0, Vector2::new(1.0, -2.0));
    }

    #[test]
    fn test_assign_ops() {
        let mut v = Vector2::new(1.0, 1.0);
        v += Vector2::new(1.0, 2.0);
        assert_close(v, Vector2::new(2.0, 3.0));
        v -= Vector2::new(1.0, 1.0);
        assert_close(v, Vector2::new(1.0, 2.0));
        v *= 4.0;
        assert_close(v, Vector2::new(4.0, 8.0));
        v /= 2.0;
        assert_close(v, Vector2::new(2.0, 4.0));
    }
}
