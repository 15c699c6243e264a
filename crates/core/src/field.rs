//! Scalar fields: the seam between noise generation and the geometry that
//! consumes it.
//!
//! A [`ScalarField`] returns one real value at any point in the plane. The
//! flow tracer and blob contour are generic over it, so any deterministic
//! field can steer them.

/// A deterministic source of scalar values over the plane.
///
/// Implementations must be pure: the same `(x, y)` always returns the same
/// value, and sampling never mutates the field. `Send + Sync` lets
/// independent traces and blobs share one field across worker threads.
pub trait ScalarField: Send + Sync {
    /// Sample the field at `(x, y)`.
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<F: ScalarField + ?Sized> ScalarField for &F {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

impl<F: ScalarField + ?Sized> ScalarField for Box<F> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

/// A field with the same value everywhere.
///
/// Useful for steering a tracer in a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantField(pub f64);

impl ScalarField for ConstantField {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_field_ignores_position() {
        let field = ConstantField(0.25);
        assert_eq!(field.sample(0.0, 0.0), 0.25);
        assert_eq!(field.sample(-1e6, 3.5), 0.25);
    }

    #[test]
    fn reference_and_box_delegate() {
        let field = ConstantField(0.75);
        let by_ref: &dyn ScalarField = &field;
        let boxed: Box<dyn ScalarField> = Box::new(field);
        assert_eq!(by_ref.sample(1.0, 2.0), 0.75);
        assert_eq!(boxed.sample(1.0, 2.0), 0.75);
        assert_eq!((&boxed).sample(1.0, 2.0), 0.75);
    }

    #[test]
    fn scalar_field_is_object_safe() {
        let fields: Vec<Box<dyn ScalarField>> =
            vec![Box::new(ConstantField(0.1)), Box::new(ConstantField(0.9))];
        let sum: f64 = fields.iter().map(|f| f.sample(0.0, 0.0)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
