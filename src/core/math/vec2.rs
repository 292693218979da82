use crate::core::traits::Real;
use std::ops;

/// 2D vector (also used to represent positions).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec2<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T> Vec2<T>
where
    T: Real,
{
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Vec2 { x, y }
    }

    /// Zero vector (x = 0, y = 0).
    #[inline]
    pub fn zero() -> Self {
        Vec2::new(T::zero(), T::zero())
    }

    /// Uniformly scale by `scale_factor`.
    #[inline]
    pub fn scale(&self, scale_factor: T) -> Self {
        Vec2::new(scale_factor * self.x, scale_factor * self.y)
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Perpendicular dot product (`self.x * other.y - self.y * other.x`).
    #[inline]
    pub fn perp_dot(&self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length_squared(&self) -> T {
        self.dot(*self)
    }

    #[inline]
    pub fn length(&self) -> T {
        self.dot(*self).sqrt()
    }

    /// Unit length vector pointing in the same direction.
    #[inline]
    pub fn normalize(&self) -> Self {
        self.scale(T::one() / self.length())
    }

    /// Vector rotated 90 degrees counter clockwise.
    #[inline]
    pub fn perp(&self) -> Self {
        Vec2::new(-self.y, self.x)
    }

    /// Unit length vector rotated 90 degrees counter clockwise.
    #[inline]
    pub fn unit_perp(&self) -> Self {
        self.perp().normalize()
    }

    /// Fuzzy equal comparison with another vector using the `fuzzy_epsilon` given.
    #[inline]
    pub fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: T) -> bool {
        self.x.fuzzy_eq_eps(other.x, fuzzy_epsilon) && self.y.fuzzy_eq_eps(other.y, fuzzy_epsilon)
    }

    /// Fuzzy equal comparison with another vector using `T::fuzzy_epsilon()`.
    #[inline]
    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }
}

impl<T: Real> ops::Add for Vec2<T> {
    type Output = Vec2<T>;
    #[inline]
    fn add(self, rhs: Vec2<T>) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Real> ops::Sub for Vec2<T> {
    type Output = Vec2<T>;
    #[inline]
    fn sub(self, rhs: Vec2<T>) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Real> ops::Neg for Vec2<T> {
    type Output = Vec2<T>;
    #[inline]
    fn neg(self) -> Self::Output {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    #[test]
    fn basic_ops() {
        let v1 = Vec2::new(4.0, 5.0);
        let v2 = Vec2::new(1.0, 2.0);
        assert!((v1 + v2).fuzzy_eq(Vec2::new(5.0, 7.0)));
        assert!((v1 - v2).fuzzy_eq(Vec2::new(3.0, 3.0)));
        assert!((-v1).fuzzy_eq(Vec2::new(-4.0, -5.0)));
        assert!(v1.perp().fuzzy_eq(Vec2::new(-5.0, 4.0)));
        assert!(Vec2::new(3.0, 4.0).length().fuzzy_eq(5.0));
    }
}
