use num::{NumCast, Zero, Float};
use std::{
    fmt::{Debug, Display, LowerExp}, iter::Sum, ops::{Add, AddAssign, Sub, SubAssign}
};
use rand::distributions::uniform::SampleUniform;

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// A coordinate in the 2-D plane. Generated points lie within the unit square `[0,1)×[0,1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T: Primitive> {
    pub x: T,
    pub y: T
}
impl<T: Primitive> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between `self` and `other`.
    /// Does not overflow for finite coordinates whose squares would exceed the range of `T`.
    #[inline(always)]
    pub fn distance(&self, other: &Point<T>) -> T {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline(always)]
    pub fn squared_distance(&self, other: &Point<T>) -> T {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        dx * dx + dy * dy
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Ordered points that are clustered. The order aligns with the rows of an [`crate::Assignment`].
pub type PointSet<T> = Vec<Point<T>>;

/// Ordered cluster centers, one per cluster index.
pub type CentroidSet<T> = Vec<Point<T>>;
