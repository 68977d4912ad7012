//! Single-face geodesic subdivision.
//!
//! A face is split into a regular triangular grid of `f²` triangles. Grid
//! points are barycentric combinations of the three corners, projected back
//! onto the unit sphere. Barycentric placement is used for every point, so
//! the grid is symmetric under rotation of the corner labels.

use glam::DVec3;

use crate::error::{MeshError, Result};

/// The subdivided grid for one face, before global deduplication.
#[derive(Debug, Clone)]
pub struct FacePatch {
    /// Unit-length grid points.
    pub points: Vec<DVec3>,
    /// Triangles as indices into `points`, wound like the input corners.
    pub triangles: Vec<[u32; 3]>,
}

/// Number of grid points in a patch of frequency `f`.
#[must_use]
pub const fn patch_point_count(f: u32) -> usize {
    let f = f as usize;
    (f + 1) * (f + 2) / 2
}

/// Subdivide the spherical triangle `(v0, v1, v2)` at frequency `f`.
///
/// Point `(i, j)` carries weight `i` on `v1`, `j` on `v2` and `f - i - j` on
/// `v0`. `f = 1` yields the corners and a single triangle.
///
/// # Errors
///
/// Returns [`MeshError::InvalidArgument`] if `f` is zero.
pub fn subdivide_face(corners: [DVec3; 3], f: u32) -> Result<FacePatch> {
    if f == 0 {
        return Err(MeshError::invalid("frequency", "must be at least 1, got 0"));
    }

    let [v0, v1, v2] = corners;
    let scale = 1.0 / f64::from(f);

    // Rows by i; row i holds f - i + 1 points.
    let mut points = Vec::with_capacity(patch_point_count(f));
    let mut row_start = Vec::with_capacity(f as usize + 1);
    for i in 0..=f {
        row_start.push(points.len());
        for j in 0..=(f - i) {
            let w0 = f64::from(f - i - j) * scale;
            let w1 = f64::from(i) * scale;
            let w2 = f64::from(j) * scale;
            points.push((v0 * w0 + v1 * w1 + v2 * w2).normalize());
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let at = |i: u32, j: u32| (row_start[i as usize] + j as usize) as u32;

    let mut triangles = Vec::with_capacity((f * f) as usize);
    for i in 0..f {
        for j in 0..(f - i) {
            triangles.push([at(i, j), at(i + 1, j), at(i, j + 1)]);
            if i + j + 1 < f {
                triangles.push([at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]);
            }
        }
    }

    Ok(FacePatch { points, triangles })
}
