//! Hierarchical transforms for the **Orrery** lab.
//!
//! A [`MatrixStack`] is the classic "scene graph via stack": push to save the
//! current frame, right-multiply local rotations/scales/translations into the
//! top, read the top for a draw call, then pop back to the parent frame.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`matrix`] | `Matrix4`, `IDENTITY`, `mat_mul`, elementary transforms |
//! | [`stack`] | `MatrixStack`, `Scalar` |
//!
//! # Quick start
//!
//! ```rust
//! use orrery_transform::MatrixStack;
//!
//! let mut stack = MatrixStack::new();
//! stack.push();
//! stack.translate(1.0, 0.0, 0.0);
//! assert_eq!(&stack.current_matrix()[12..15], &[1.0, 0.0, 0.0]);
//! stack.pop();
//! assert_eq!(stack.depth(), 1);
//! ```

pub mod matrix;
pub mod stack;

pub use matrix::{Matrix4, IDENTITY};
pub use stack::{MatrixStack, Scalar};
