//! Matrix chains in row-vector order.
//!
//! glam stores matrices column-major and multiplies column vectors, so a chain
//! written `a × b × c` for row vectors (`v × a` applied first) is `c * b * a`
//! here. The in-memory layout of the result is identical to the row-major
//! row-vector matrix.

use glam::Mat4;

/// Fold `matrices` into one transform. The first entry is applied first.
///
/// An empty slice yields the identity.
pub fn multiply_chain(matrices: &[Mat4]) -> Mat4 {
    matrices.iter().fold(Mat4::IDENTITY, |acc, m| *m * acc)
}

/// Replace `target` with the fold of `matrices`. Leaves `target` untouched when
/// the slice is empty.
pub fn multiply_chain_in_place(target: &mut Mat4, matrices: &[Mat4]) {
    if matrices.is_empty() {
        return;
    }
    *target = multiply_chain(matrices);
}
