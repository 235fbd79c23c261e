use glam::{DMat3, DVec3};

/// Result of the singular value decomposition `m = u * diag(s) * v^T` of a 3x3 matrix.
#[derive(Debug, Clone, Copy)]
pub struct Svd3 {
    u: DMat3,
    s: DVec3,
    v: DMat3,
}

impl Svd3 {
    /// Left singular vectors as the columns of an orthogonal matrix.
    pub fn u(&self) -> &DMat3 {
        &self.u
    }

    /// Singular values in non-increasing order.
    pub fn s(&self) -> &DVec3 {
        &self.s
    }

    /// Right singular vectors as the columns of an orthogonal matrix.
    pub fn v(&self) -> &DMat3 {
        &self.v
    }
}

/// Compute the singular value decomposition of a 3x3 matrix.
///
/// The decomposition runs in f64 with faer. The columns of `u` and `v` are
/// ordered so that the singular values are non-increasing.
///
/// Example:
///
/// ```
/// use glam::{DMat3, DVec3};
/// use kornia_procrustes::svd::svd3;
///
/// let m = DMat3::from_diagonal(DVec3::new(1.0, 3.0, 2.0));
/// let svd = svd3(&m);
/// assert!(svd.s().abs_diff_eq(DVec3::new(3.0, 2.0, 1.0), 1e-12));
/// ```
pub fn svd3(m: &DMat3) -> Svd3 {
    let mat = faer::Mat::<f64>::from_fn(3, 3, |i, j| m.col(j)[i]);
    let svd = mat.svd();
    let (u, s, v) = (svd.u(), svd.s_diagonal(), svd.v());

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| s.read(b).total_cmp(&s.read(a)));

    let col = |mat: faer::MatRef<'_, f64>, j: usize| {
        DVec3::new(mat.read(0, j), mat.read(1, j), mat.read(2, j))
    };

    Svd3 {
        u: DMat3::from_cols(col(u, order[0]), col(u, order[1]), col(u, order[2])),
        s: DVec3::new(s.read(order[0]), s.read(order[1]), s.read(order[2])),
        v: DMat3::from_cols(col(v, order[0]), col(v, order[1]), col(v, order[2])),
    }
}
