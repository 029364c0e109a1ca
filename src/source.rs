use crate::point::*;
use rand::Rng;

/// Generate **n** points, with both coordinates drawn independently and uniformly from `[0,1)`.
///
/// Pass a seeded generator (e.g. `StdRng::seed_from_u64`) for repeatable point sets.
pub fn generate<T: Primitive, R: Rng + ?Sized>(n: usize, rnd: &mut R) -> PointSet<T> {
    (0..n)
        .map(|_| Point::new(rnd.gen_range(T::zero()..T::one()), rnd.gen_range(T::zero()..T::one())))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test] fn unit_square_f32() { unit_square::<f32>(); }
    #[test] fn unit_square_f64() { unit_square::<f64>(); }

    fn unit_square<T: Primitive>() {
        let mut rnd = StdRng::seed_from_u64(1337);
        let points: PointSet<T> = generate(1000, &mut rnd);
        assert_eq!(points.len(), 1000);
        assert!(points.iter().all(|p| p.x >= T::zero() && p.x < T::one() && p.y >= T::zero() && p.y < T::one()));
    }

    #[test]
    fn seeded_source_is_repeatable() {
        let a: PointSet<f64> = generate(64, &mut StdRng::seed_from_u64(9));
        let b: PointSet<f64> = generate(64, &mut StdRng::seed_from_u64(9));
        let c: PointSet<f64> = generate(64, &mut StdRng::seed_from_u64(10));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn empty_source() {
        let points: PointSet<f32> = generate(0, &mut StdRng::seed_from_u64(1));
        assert!(points.is_empty());
    }
}
