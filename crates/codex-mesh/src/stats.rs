//! Edge length statistics.

use crate::mesh::Mesh;

/// Summary of great-circle edge lengths in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStats {
    pub count: usize,
    pub min_km: f64,
    pub median_km: f64,
    pub max_km: f64,
}

impl EdgeStats {
    /// Compute statistics over all edges of `mesh`.
    ///
    /// Returns `None` when the mesh has no edges.
    #[must_use]
    pub fn compute(mesh: &Mesh, radius_km: f64) -> Option<Self> {
        Self::from_lengths(mesh.edge_lengths_km(radius_km))
    }

    /// Compute statistics from raw lengths.
    #[must_use]
    pub fn from_lengths(mut lengths: Vec<f64>) -> Option<Self> {
        lengths.sort_by(f64::total_cmp);
        let median_km = median_of_sorted(&lengths)?;
        Some(Self {
            count: lengths.len(),
            min_km: lengths[0],
            median_km,
            max_km: lengths[lengths.len() - 1],
        })
    }
}

/// Median of an ascending slice; even lengths average the two middle values.
#[must_use]
pub fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) * 0.5),
    }
}
