use orrery_transform::Matrix4;

/// Symmetric perspective projection in the `gluPerspective` form.
///
/// `focal` is `cot(fov_y / 2)`. The x scale is corrected for the window's
/// aspect ratio so a sphere stays round when the window is not square.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub focal: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    /// d = 4, near = 3, far = 7: frames a 5-unit-away scene of radius ~2.
    fn default() -> Self {
        Self {
            focal: 4.0,
            near: 3.0,
            far: 7.0,
        }
    }
}

impl Projection {
    /// Projection for a `[-1, 1]` clip depth range, as the classic lab builds it.
    #[cfg(test)]
    fn matrix_gl(&self, width: u32, height: u32) -> Matrix4 {
        let (n, f) = (self.near, self.far);
        self.build(width, height, -(f + n) / (f - n), -2.0 * f * n / (f - n))
    }

    /// Projection for a `[0, 1]` clip depth range (wgpu, Vulkan, Metal, D3D).
    pub fn matrix(&self, width: u32, height: u32) -> Matrix4 {
        let (n, f) = (self.near, self.far);
        self.build(width, height, -f / (f - n), -f * n / (f - n))
    }

    fn build(&self, width: u32, height: u32, a: f32, b: f32) -> Matrix4 {
        let d = self.focal;
        let aspect_x = d * height.max(1) as f32 / width.max(1) as f32;
        #[rustfmt::skip]
        let m = [
            aspect_x, 0.0, 0.0,  0.0,
            0.0,        d, 0.0,  0.0,
            0.0,      0.0,   a, -1.0,
            0.0,      0.0,   b,  0.0,
        ];
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_transform::matrix::transform_point;

    fn ndc_z(m: &Matrix4, z: f32) -> f32 {
        let p = transform_point(m, [0.0, 0.0, z, 1.0]);
        p[2] / p[3]
    }

    #[test]
    fn default_matches_the_lab_matrix() {
        let p = Projection::default().matrix_gl(500, 500);
        assert_eq!(
            p,
            [4.0, 0.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0, -2.5, -1.0, 0.0, 0.0, -10.5, 0.0]
        );
    }

    #[test]
    fn depth_ranges() {
        let proj = Projection::default();
        let gl = proj.matrix_gl(1, 1);
        assert!((ndc_z(&gl, -3.0) + 1.0).abs() < 1e-5);
        assert!((ndc_z(&gl, -7.0) - 1.0).abs() < 1e-5);

        let wgpu = proj.matrix(1, 1);
        assert!(ndc_z(&wgpu, -3.0).abs() < 1e-5);
        assert!((ndc_z(&wgpu, -7.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn wide_window_narrows_x() {
        let p = Projection::default().matrix(800, 400);
        assert_eq!(p[0], 2.0);
        assert_eq!(p[5], 4.0);
    }

    #[test]
    fn zero_size_does_not_divide_by_zero() {
        let p = Projection::default().matrix(0, 0);
        assert!(p[0].is_finite());
    }
}
