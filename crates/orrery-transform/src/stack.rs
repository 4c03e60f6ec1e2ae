use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

use crate::matrix::{self, Matrix4, IDENTITY};

/// Scalar accepted by the angle/scale operations.
///
/// Scene code is usually driven by `f64` (time, user input) while the matrices
/// stay `f32`; `f64` arguments are narrowed on entry.
pub trait Scalar: Copy {
    fn to_f32(self) -> f32;
}

impl Scalar for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
}

impl Scalar for f64 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

/// Push/pop-scoped stack of column-major 4x4 matrices.
///
/// Invariants:
/// - at least one node (the root) always exists
/// - `push` duplicates the top, so the pre-push transform is recoverable
/// - transforms right-multiply into the top: `top ← top × M`
///
/// The stack is single-owner and per-frame; it is `Send` but not `Sync`.
/// Inputs are not validated: a NaN angle ends up in the matrix.
pub struct MatrixStack {
    /// Index 0 is the root, the last element is the current matrix.
    nodes: Vec<Matrix4>,

    _not_sync: PhantomData<Cell<()>>,
}

impl MatrixStack {
    /// Creates a stack holding a single identity matrix.
    pub fn new() -> Self {
        Self {
            nodes: vec![IDENTITY],
            _not_sync: PhantomData,
        }
    }

    /// Sets the current matrix to identity. Nodes below are untouched.
    pub fn init(&mut self) {
        *self.top_mut() = IDENTITY;
    }

    /// Read-only view of the current matrix, ready for a shader uniform.
    pub fn current_matrix(&self) -> &Matrix4 {
        self.top()
    }

    /// Adds a level holding a copy of the current matrix.
    pub fn push(&mut self) {
        let copy = *self.top();
        self.nodes.push(copy);
    }

    /// Removes the current matrix, exposing the one below.
    ///
    /// At depth 1 this does nothing: the root is never removed.
    pub fn pop(&mut self) {
        if self.nodes.len() > 1 {
            self.nodes.pop();
        } else {
            log::trace!("pop at root ignored");
        }
    }

    /// Drops every level above the root. The root keeps its current value.
    pub fn flush(&mut self) {
        self.nodes.truncate(1);
    }

    /// Number of live matrices, always at least 1.
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    pub fn rot_x<S: Scalar>(&mut self, angle: S) {
        self.right_multiply(&matrix::rotation_x(angle.to_f32()));
    }

    pub fn rot_y<S: Scalar>(&mut self, angle: S) {
        self.right_multiply(&matrix::rotation_y(angle.to_f32()));
    }

    pub fn rot_z<S: Scalar>(&mut self, angle: S) {
        self.right_multiply(&matrix::rotation_z(angle.to_f32()));
    }

    /// Uniform scaling by `s` in the current local frame.
    pub fn scale<S: Scalar>(&mut self, s: S) {
        self.right_multiply(&matrix::scaling(s.to_f32()));
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.right_multiply(&matrix::translation(x, y, z));
    }

    /// Logs the whole stack (top first) at info level.
    pub fn print(&self) {
        log::info!("{self}");
    }

    /// Debug-build check that every `push` was matched by a `pop`.
    ///
    /// Call at the start of a frame.
    #[track_caller]
    pub fn debug_assert_balanced(&self) {
        debug_assert_eq!(
            self.depth(),
            1,
            "MatrixStack: unbalanced push/pop, depth is {} at frame start",
            self.depth()
        );
    }

    fn right_multiply(&mut self, m: &Matrix4) {
        // Full product first, then overwrite the top.
        let product = matrix::mat_mul(self.top(), m);
        *self.top_mut() = product;
    }

    fn top(&self) -> &Matrix4 {
        // `nodes` is never empty: created with the root and `pop` keeps it.
        &self.nodes[self.nodes.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Matrix4 {
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MatrixStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixStack")
            .field("depth", &self.depth())
            .field("top", self.top())
            .finish()
    }
}

impl fmt::Display for MatrixStack {
    /// Prints each matrix row by row, top of the stack first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "matrix stack, depth {}:", self.depth())?;
        for (level, m) in self.nodes.iter().enumerate().rev() {
            writeln!(f, "[{level}]")?;
            for row in 0..4 {
                writeln!(
                    f,
                    "  {:9.4} {:9.4} {:9.4} {:9.4}",
                    m[row],
                    m[4 + row],
                    m[8 + row],
                    m[12 + row]
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{mat_mul, rotation_x, rotation_y, transform_point};
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx_eq(a: &[f32], b: &[f32]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    fn assert_send<T: Send>() {}

    #[test]
    fn starts_at_identity_with_depth_one() {
        let stack = MatrixStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current_matrix(), &IDENTITY);
    }

    #[test]
    fn init_resets_only_the_top() {
        let mut stack = MatrixStack::new();
        stack.translate(1.0, 2.0, 3.0);
        let root = *stack.current_matrix();
        stack.push();
        stack.rot_z(0.3f32);
        stack.init();
        assert_eq!(stack.current_matrix(), &IDENTITY);
        stack.pop();
        assert_eq!(stack.current_matrix(), &root);
    }

    #[test]
    fn push_copies_the_top() {
        let mut stack = MatrixStack::new();
        stack.rot_y(0.25f32);
        stack.translate(0.5, -1.0, 2.0);
        let before = *stack.current_matrix();
        stack.push();
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current_matrix(), &before);
    }

    #[test]
    fn push_then_pop_restores_bit_exact() {
        let mut stack = MatrixStack::new();
        stack.rot_x(1.1f64);
        stack.scale(3.0f32);
        let before = *stack.current_matrix();

        stack.push();
        stack.rot_y(0.7f32);
        stack.translate(4.0, 5.0, 6.0);
        stack.scale(0.1f64);
        stack.rot_z(f64::NAN);
        stack.pop();

        let restored = stack.current_matrix();
        for (a, b) in before.iter().zip(restored) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn depth_accounting() {
        let mut stack = MatrixStack::new();
        for _ in 0..5 {
            stack.push();
        }
        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 1 + 5 - 2);
        stack.flush();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn pop_at_root_is_a_no_op() {
        let mut stack = MatrixStack::new();
        stack.translate(7.0, 0.0, 0.0);
        let before = *stack.current_matrix();
        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current_matrix(), &before);
    }

    #[test]
    fn flush_keeps_root_state() {
        let mut stack = MatrixStack::new();
        stack.translate(0.0, 0.0, -5.0);
        let root = *stack.current_matrix();
        stack.push();
        stack.rot_x(0.5f32);
        stack.push();
        stack.flush();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current_matrix(), &root);
    }

    #[test]
    fn rotations_right_multiply() {
        let (a, b) = (0.4f32, -1.3f32);
        let mut stack = MatrixStack::new();
        stack.rot_x(a);
        stack.rot_y(b);
        let expected = mat_mul(&rotation_x(a), &rotation_y(b));
        assert!(approx_eq(stack.current_matrix(), &expected));
    }

    #[test]
    fn translate_and_rotate_do_not_commute() {
        let origin = [0.0, 0.0, 0.0, 1.0];

        let mut a = MatrixStack::new();
        a.translate(1.0, 0.0, 0.0);
        a.rot_y(FRAC_PI_2);
        let pa = transform_point(a.current_matrix(), origin);

        let mut b = MatrixStack::new();
        b.rot_y(FRAC_PI_2);
        b.translate(1.0, 0.0, 0.0);
        let pb = transform_point(b.current_matrix(), origin);

        assert!(approx_eq(&pa, &[1.0, 0.0, 0.0, 1.0]));
        assert!(approx_eq(&pb, &[0.0, 0.0, -1.0, 1.0]));
        assert!(!approx_eq(&pa, &pb));
    }

    #[test]
    fn translate_inside_push_scope() {
        let mut stack = MatrixStack::new();
        stack.push();
        stack.translate(1.0, 0.0, 0.0);
        assert_eq!(&stack.current_matrix()[12..15], &[1.0, 0.0, 0.0]);
        stack.pop();
        assert_eq!(stack.current_matrix(), &IDENTITY);
    }

    #[test]
    fn half_turn_twice_is_identity() {
        let mut stack = MatrixStack::new();
        stack.rot_z(PI);
        stack.rot_z(PI);
        assert!(approx_eq(stack.current_matrix(), &IDENTITY));
    }

    #[test]
    fn f64_arguments_are_narrowed() {
        let mut wide = MatrixStack::new();
        wide.rot_y(0.3f64);
        wide.scale(2.0f64);
        let mut narrow = MatrixStack::new();
        narrow.rot_y(0.3f32);
        narrow.scale(2.0f32);
        assert_eq!(wide.current_matrix(), narrow.current_matrix());
    }

    #[test]
    fn nan_is_not_sanitized() {
        let mut stack = MatrixStack::new();
        stack.rot_x(f32::NAN);
        assert!(stack.current_matrix().iter().any(|v| v.is_nan()));
    }

    #[test]
    fn display_lists_every_level() {
        let mut stack = MatrixStack::new();
        stack.push();
        stack.push();
        let text = stack.to_string();
        assert!(text.starts_with("matrix stack, depth 3:"));
        assert!(text.contains("[0]") && text.contains("[1]") && text.contains("[2]"));
        stack.print();
    }

    #[test]
    fn balanced_after_nested_scopes() {
        let mut stack = MatrixStack::new();
        stack.push();
        stack.push();
        stack.pop();
        stack.pop();
        stack.debug_assert_balanced();
        assert_send::<MatrixStack>();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unbalanced push/pop")]
    fn unbalanced_stack_is_caught_in_debug() {
        let mut stack = MatrixStack::new();
        stack.push();
        stack.debug_assert_balanced();
    }
}
