use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use potflow_types::{FieldValue, Vector2};

/// 1 点における流れ場の値: 速度 `(u, v)`、流れ関数 `ψ`、速度ポテンシャル `ϕ`。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldSample {
    pub velocity: Vector2,
    pub psi: f64,
    pub phi: f64,
}

impl FieldSample {
    pub const fn new(velocity: Vector2, psi: f64, phi: f64) -> Self {
        Self { velocity, psi, phi }
    }

    #[inline]
    pub fn u(&self) -> f64 {
        self.velocity.x()
    }

    #[inline]
    pub fn v(&self) -> f64 {
        self.velocity.y()
    }

    /// 速さ `|V|`。
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.mag()
    }

    pub fn is_finite(&self) -> bool {
        self.velocity.is_finite() && self.psi.is_finite() && self.phi.is_finite()
    }
}

impl Add for FieldSample {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        FieldSample::new(
            self.velocity + rhs.velocity,
            self.psi + rhs.psi,
            self.phi + rhs.phi,
        )
    }
}

impl Sub for FieldSample {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        FieldSample::new(
            self.velocity - rhs.velocity,
            self.psi - rhs.psi,
            self.phi - rhs.phi,
        )
    }
}

impl Neg for FieldSample {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        FieldSample::new(-self.velocity, -self.psi, -self.phi)
    }
}

impl Mul<f64> for FieldSample {
    type Output = Self;

    /// 強さのスケーリング。全要素の寄与は強さに線形なので `s` 倍がそのまま成り立つ。
    #[inline]
    fn mul(self, s: f64) -> Self {
        FieldSample::new(self.velocity * s, self.psi * s, self.phi * s)
    }
}

impl AddAssign for FieldSample {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl FieldValue for FieldSample {
    fn zero() -> Self {
        FieldSample::new(Vector2::zero(), 0.0, 0.0)
    }

    /// 4 成分 `(u, v, ψ, ϕ)` の Euclidean ノルム。速さは [`FieldSample::speed`][] を使う。
    fn mag(&self) -> f64 {
        let u = self.u();
        let v = self.v();
        (u * u + v * v + self.psi * self.psi + self.phi * self.phi).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_mag_is_zero() {
        assert!(FieldSample::zero().mag() < 1e-14);
        assert_eq!(FieldSample::zero(), FieldSample::default());
    }

    #[test]
    fn test_add_componentwise() {
        let a = FieldSample::new(Vector2::new(1.0, 2.0), 3.0, 4.0);
        let b = FieldSample::new(Vector2::new(0.5, -1.0), -3.0, 1.0);
        let c = a + b;
        assert_eq!(c.u(), 1.5);
        assert_eq!(c.v(), 1.0);
        assert_eq!(c.psi, 0.0);
        assert_eq!(c.phi, 5.0);
    }

    #[test]
    fn test_sub_neg_consistent() {
        let a = FieldSample::new(Vector2::new(1.0, 2.0), 3.0, 4.0);
        let b = FieldSample::new(Vector2::new(0.5, -1.0), -3.0, 1.0);
        assert_eq!(a - b, a + (-b));
    }

    #[test]
    fn test_speed() {
        let s = FieldSample::new(Vector2::new(3.0, 4.0), 100.0, -7.0);
        assert!((s.speed() - 5.0).abs() < 1e-14);
    }

    #[test]
    fn test_is_finite() {
        let mut s = FieldSample::zero();
        assert!(s.is_finite());
        s.phi = f64::INFINITY;
        assert!(!s.is_finite());
    }
}
