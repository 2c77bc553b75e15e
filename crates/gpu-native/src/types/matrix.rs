use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Depth of each native matrix stack (`GPU_MATRIX_STACK_MAX`).
pub const MATRIX_STACK_MAX: usize = 5;

/// Column-major 4x4 matrix, the layout OpenGL and SDL_gpu use.
pub type Mat4 = [f32; 16];

/// Which stack the matrix functions operate on (`GPU_MODELVIEW`/`GPU_PROJECTION`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum MatrixMode {
    #[default]
    ModelView = 0,
    Projection = 1,
}

/// Snapshot of a matrix stack; the last element is the current matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStack {
    matrices: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self { matrices: vec![identity()] }
    }

    pub fn from_matrices(matrices: Vec<Mat4>) -> Self {
        Self { matrices }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.matrices.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Mat4> {
        self.matrices.get(index)
    }

    #[inline]
    pub fn top(&self) -> Option<&Mat4> {
        self.matrices.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Mat4> {
        self.matrices.last_mut()
    }

    /// Duplicates the top matrix. Returns false when the stack is full.
    pub fn push(&mut self) -> bool {
        if self.matrices.len() >= MATRIX_STACK_MAX {
            return false;
        }
        let top = self.top().copied().unwrap_or_else(identity);
        self.matrices.push(top);
        true
    }

    /// Pops the top matrix. The bottom matrix is never removed.
    pub fn pop(&mut self) -> bool {
        if self.matrices.len() <= 1 {
            return false;
        }
        self.matrices.pop();
        true
    }

    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

// ── column-major helpers ─────────────────────────────────────────────────

pub const fn identity() -> Mat4 {
    [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// `a * b`
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [0.0; 16];
    for col in 0..4 {
        for row in 0..4 {
            out[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
        }
    }
    out
}

pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = identity();
    m[12] = x;
    m[13] = y;
    m[14] = z;
    m
}

pub fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = identity();
    m[0] = x;
    m[5] = y;
    m[10] = z;
    m
}

/// Rotation of `degrees` around the axis `(x, y, z)`; a zero axis yields identity.
pub fn rotation(degrees: f32, x: f32, y: f32, z: f32) -> Mat4 {
    let len = (x * x + y * y + z * z).sqrt();
    if len == 0.0 {
        return identity();
    }
    let (x, y, z) = (x / len, y / len, z / len);
    let (s, c) = degrees.to_radians().sin_cos();
    let t = 1.0 - c;
    [
        t * x * x + c,
        t * x * y + s * z,
        t * x * z - s * y,
        0.0,
        t * x * y - s * z,
        t * y * y + c,
        t * y * z + s * x,
        0.0,
        t * x * z + s * y,
        t * y * z - s * x,
        t * z * z + c,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
    ]
}

pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let mut m = identity();
    m[0] = 2.0 / (right - left);
    m[5] = 2.0 / (top - bottom);
    m[10] = -2.0 / (far - near);
    m[12] = -(right + left) / (right - left);
    m[13] = -(top + bottom) / (top - bottom);
    m[14] = -(far + near) / (far - near);
    m
}

pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let mut m = [0.0; 16];
    m[0] = 2.0 * near / (right - left);
    m[5] = 2.0 * near / (top - bottom);
    m[8] = (right + left) / (right - left);
    m[9] = (top + bottom) / (top - bottom);
    m[10] = -(far + near) / (far - near);
    m[11] = -1.0;
    m[14] = -2.0 * far * near / (far - near);
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    // ── stack ───────────────────────────────────────────────────────────

    #[test]
    fn push_is_bounded() {
        let mut s = MatrixStack::new();
        for _ in 1..MATRIX_STACK_MAX {
            assert!(s.push());
        }
        assert!(!s.push());
        assert_eq!(s.size(), MATRIX_STACK_MAX);
    }

    #[test]
    fn pop_keeps_bottom() {
        let mut s = MatrixStack::new();
        assert!(!s.pop());
        assert_eq!(s.size(), 1);
    }

    // ── helpers ─────────────────────────────────────────────────────────

    #[test]
    fn translate_then_scale_composes() {
        let m = multiply(&translation(10.0, 20.0, 0.0), &scaling(2.0, 3.0, 1.0));
        assert_eq!(m[0], 2.0);
        assert_eq!(m[5], 3.0);
        assert_eq!(m[12], 10.0);
        assert_eq!(m[13], 20.0);
    }

    #[test]
    fn quarter_turn_about_z() {
        let m = rotation(90.0, 0.0, 0.0, 1.0);
        assert!(close(m[0], 0.0));
        assert!(close(m[1], 1.0));
        assert!(close(m[4], -1.0));
    }

    #[test]
    fn ortho_maps_corners_to_clip_space() {
        let m = ortho(0.0, 100.0, 50.0, 0.0, -1.0, 1.0);
        // x = 100 -> +1, y = 0 -> +1
        assert!(close(m[0] * 100.0 + m[12], 1.0));
        assert!(close(m[13], 1.0));
    }
}
