//! Column-major 4x4 matrix helpers.
//!
//! Layout follows the OpenGL convention: element `col * 4 + row`, so the
//! translation of an affine transform lives in `m[12]`, `m[13]`, `m[14]`.
//! The buffers are handed to shaders as-is.

/// 16 single-precision floats, column-major.
pub type Matrix4 = [f32; 16];

#[rustfmt::skip]
pub const IDENTITY: Matrix4 = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Returns `a × b`.
///
/// The product is accumulated into a fresh buffer, so callers can pass the
/// same matrix as both operands and write the result back afterwards.
pub fn mat_mul(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let mut out = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            let mut acc = 0.0f32;
            for k in 0..4 {
                acc += a[k * 4 + row] * b[col * 4 + k];
            }
            out[col * 4 + row] = acc;
        }
    }
    out
}

/// Right-handed rotation about +X by `angle` radians.
#[rustfmt::skip]
pub fn rotation_x(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    [
        1.0, 0.0, 0.0, 0.0,
        0.0,   c,   s, 0.0,
        0.0,  -s,   c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// Right-handed rotation about +Y by `angle` radians.
#[rustfmt::skip]
pub fn rotation_y(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    [
          c, 0.0,  -s, 0.0,
        0.0, 1.0, 0.0, 0.0,
          s, 0.0,   c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// Right-handed rotation about +Z by `angle` radians.
#[rustfmt::skip]
pub fn rotation_z(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    [
          c,   s, 0.0, 0.0,
         -s,   c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// Uniform scaling `diag(s, s, s, 1)`.
#[rustfmt::skip]
pub fn scaling(s: f32) -> Matrix4 {
    [
          s, 0.0, 0.0, 0.0,
        0.0,   s, 0.0, 0.0,
        0.0, 0.0,   s, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

#[rustfmt::skip]
pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
          x,   y,   z, 1.0,
    ]
}

/// Applies `m` to a homogeneous column vector.
pub fn transform_point(m: &Matrix4, p: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = (0..4).map(|k| m[k * 4 + row] * p[k]).sum();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx_eq(a: &[f32], b: &[f32]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn identity_is_neutral() {
        let m = rotation_y(0.7);
        assert_eq!(mat_mul(&IDENTITY, &m), m);
        assert_eq!(mat_mul(&m, &IDENTITY), m);
    }

    #[test]
    fn translation_column_is_last() {
        let t = translation(1.0, 2.0, 3.0);
        assert_eq!(&t[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(transform_point(&t, [0.0, 0.0, 0.0, 1.0]), [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn rotations_are_right_handed() {
        // +X rotated a quarter turn about Z lands on +Y.
        let p = transform_point(&rotation_z(FRAC_PI_2), [1.0, 0.0, 0.0, 1.0]);
        assert!(approx_eq(&p, &[0.0, 1.0, 0.0, 1.0]));
        // +Y about X lands on +Z.
        let p = transform_point(&rotation_x(FRAC_PI_2), [0.0, 1.0, 0.0, 1.0]);
        assert!(approx_eq(&p, &[0.0, 0.0, 1.0, 1.0]));
        // +Z about Y lands on +X.
        let p = transform_point(&rotation_y(FRAC_PI_2), [0.0, 0.0, 1.0, 1.0]);
        assert!(approx_eq(&p, &[1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn scaling_leaves_w_alone() {
        let p = transform_point(&scaling(0.5), [2.0, -4.0, 6.0, 1.0]);
        assert_eq!(p, [1.0, -2.0, 3.0, 1.0]);
    }

    #[test]
    fn product_with_itself_is_safe() {
        let r = rotation_z(FRAC_PI_2);
        let rr = mat_mul(&r, &r);
        assert!(approx_eq(&rr, &rotation_z(2.0 * FRAC_PI_2)));
    }
}
