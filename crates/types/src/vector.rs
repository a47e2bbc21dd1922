/// 2 次元ベクトル型と、その算術演算。
mod ops;

/// 平面上の 2 成分ベクトル。位置・速度の両方に用いる。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    data: [f64; 2],
}

impl Vector2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { data: [x, y] }
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.data[0]
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.data[1]
    }

    #[inline]
    pub const fn as_array(&self) -> [f64; 2] {
        self.data
    }

    /// 内積 `a·b`。
    #[inline]
    pub fn dot(&self, rhs: &Self) -> f64 {
        self.data[0] * rhs.data[0] + self.data[1] * rhs.data[1]
    }

    /// 3 次元外積の z 成分 `a.x·b.y − a.y·b.x`。
    #[inline]
    pub fn cross(&self, rhs: &Self) -> f64 {
        self.data[0] * rhs.data[1] - self.data[1] * rhs.data[0]
    }

    /// 二乗ノルム `x² + y²`。平方根を取らないため距離比較に使う。
    #[inline]
    pub fn mag_sqr(&self) -> f64 {
        self.dot(self)
    }

    /// すべての成分が有限値かどうか。
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.data[0].is_finite() && self.data[1].is_finite()
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vector2::new(x, y)
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(data: [f64; 2]) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let v = Vector2::new(1.5, -2.0);
        assert_eq!(v.x(), 1.5);
        assert_eq!(v.y(), -2.0);
        assert_eq!(v.as_array(), [1.5, -2.0]);
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);
        assert!((a.dot(&b) - 11.0).abs() < 1e-14);
        // 1·4 − 2·3 = −2
        assert!((a.cross(&b) + 2.0).abs() < 1e-14);
        // 反対称性
        assert!((a.cross(&b) + b.cross(&a)).abs() < 1e-14);
    }

    #[test]
    fn test_mag_sqr() {
        let v = Vector2::new(3.0, 4.0);
        assert!((v.mag_sqr() - 25.0).abs() < 1e-14);
    }

    #[test]
    fn test_is_finite() {
        assert!(Vector2::new(0.0, 1.0).is_finite());
        assert!(!Vector2::new(f64::NAN, 1.0).is_finite());
        assert!(!Vector2::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_from_tuple_and_array() {
        assert_eq!(Vector2::from((1.0, 2.0)), Vector2::new(1.0, 2.0));
        assert_eq!(Vector2::from([1.0, 2.0]), Vector2::new(1.0, 2.0));
    }
}
