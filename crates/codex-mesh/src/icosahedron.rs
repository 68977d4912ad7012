//! Base icosahedron.

use glam::DVec3;

/// Number of base vertices.
pub const VERTEX_COUNT: usize = 12;
/// Number of base faces.
pub const FACE_COUNT: usize = 20;

/// 20 faces as vertex indices. Winding is fixed up in [`Icosahedron::new`].
const FACE_TABLE: [[u32; 3]; FACE_COUNT] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// A regular icosahedron inscribed in the unit sphere.
#[derive(Debug, Clone)]
pub struct Icosahedron {
    /// Unit-length corner vertices.
    pub vertices: [DVec3; VERTEX_COUNT],
    /// Faces, counter-clockwise when viewed from outside.
    pub faces: [[u32; 3]; FACE_COUNT],
}

impl Icosahedron {
    /// Build the canonical icosahedron.
    ///
    /// Vertices are the cyclic permutations of `(0, ±1, ±φ)`, normalized.
    #[must_use]
    pub fn new() -> Self {
        let phi = (1.0 + 5.0_f64.sqrt()) * 0.5;
        let vertices = [
            DVec3::new(-1.0, phi, 0.0),
            DVec3::new(1.0, phi, 0.0),
            DVec3::new(-1.0, -phi, 0.0),
            DVec3::new(1.0, -phi, 0.0),
            DVec3::new(0.0, -1.0, phi),
            DVec3::new(0.0, 1.0, phi),
            DVec3::new(0.0, -1.0, -phi),
            DVec3::new(0.0, 1.0, -phi),
            DVec3::new(phi, 0.0, -1.0),
            DVec3::new(phi, 0.0, 1.0),
            DVec3::new(-phi, 0.0, -1.0),
            DVec3::new(-phi, 0.0, 1.0),
        ]
        .map(DVec3::normalize);

        let faces = FACE_TABLE.map(|tri| outward_ccw(&vertices, tri));

        Self { vertices, faces }
    }

    /// Corner positions of face `index`.
    #[must_use]
    pub fn face_corners(&self, index: usize) -> [DVec3; 3] {
        self.faces[index].map(|i| self.vertices[i as usize])
    }
}

impl Default for Icosahedron {
    fn default() -> Self {
        Self::new()
    }
}

/// Swap B and C when the face normal points towards the origin.
fn outward_ccw(vertices: &[DVec3], [a, b, c]: [u32; 3]) -> [u32; 3] {
    let (pa, pb, pc) = (
        vertices[a as usize],
        vertices[b as usize],
        vertices[c as usize],
    );
    let normal = (pb - pa).cross(pc - pa);
    if normal.dot(pa + pb + pc) < 0.0 {
        [a, c, b]
    } else {
        [a, b, c]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    fn face_edges(face: [u32; 3]) -> [(u32, u32); 3] {
        let [a, b, c] = face;
        [(a, b), (b, c), (c, a)].map(|(i, j)| (i.min(j), i.max(j)))
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let ico = Icosahedron::new();
        for v in ico.vertices {
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_every_vertex_has_degree_five() {
        let ico = Icosahedron::new();
        let mut degree = [0usize; VERTEX_COUNT];
        for face in ico.faces {
            for i in face {
                degree[i as usize] += 1;
            }
        }
        assert!(degree.iter().all(|&d| d == 5), "{degree:?}");
    }

    #[test]
    fn test_every_edge_shared_by_two_faces() {
        let ico = Icosahedron::new();
        let mut edge_faces: HashMap<(u32, u32), usize> = HashMap::new();
        for face in ico.faces {
            for e in face_edges(face) {
                *edge_faces.entry(e).or_default() += 1;
            }
        }
        assert_eq!(edge_faces.len(), 30);
        assert!(edge_faces.values().all(|&n| n == 2));
    }

    #[test]
    fn test_face_neighbourhoods() {
        let ico = Icosahedron::new();
        for (fi, face) in ico.faces.iter().enumerate() {
            let corners: HashSet<u32> = face.iter().copied().collect();
            let mut vertex_neighbours = 0;
            let mut edge_neighbours = 0;
            for (gi, other) in ico.faces.iter().enumerate() {
                if gi == fi {
                    continue;
                }
                let shared = other.iter().filter(|i| corners.contains(i)).count();
                if shared >= 1 {
                    vertex_neighbours += 1;
                }
                if shared == 2 {
                    edge_neighbours += 1;
                }
            }
            assert_eq!(edge_neighbours, 3, "face {fi}");
            assert_eq!(vertex_neighbours, 9, "face {fi}");
        }
    }

    #[test]
    fn test_faces_wound_outward() {
        let ico = Icosahedron::new();
        for i in 0..FACE_COUNT {
            let [a, b, c] = ico.face_corners(i);
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a + b + c) > 0.0, "face {i} is wound inward");
        }
    }

    #[test]
    fn test_edges_are_equal_length() {
        let ico = Icosahedron::new();
        let [a, b, _] = ico.face_corners(0);
        let reference = a.distance(b);
        for face in ico.faces {
            for (i, j) in face_edges(face) {
                let len = ico.vertices[i as usize].distance(ico.vertices[j as usize]);
                assert!((len - reference).abs() < 1e-12);
            }
        }
    }
}
