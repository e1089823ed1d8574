//! Symmetric quadrature tables for the unit triangle and tetrahedron
//!
//! Reference triangle: (0,0), (1,0), (0,1). Weights sum to 1/2.
//! Reference tet: (0,0,0), (1,0,0), (0,1,0), (0,0,1). Weights sum to 1/6.
//!
//! Points are generated from barycentric orbits, so each table only lists
//! the orbit generators.

// Allow excessive precision for high-precision mathematical constants
#![allow(clippy::excessive_precision)]

/// Highest tabulated triangle order
pub const TRI_MAX_ORDER: usize = 6;

/// Highest tabulated tetrahedron order
pub const TET_MAX_ORDER: usize = 5;

/// Flat (locations, weights) storage of a simplex rule
#[derive(Debug, Default)]
pub(crate) struct SimplexTable {
    pub locations: Vec<f64>,
    pub weights: Vec<f64>,
}

impl SimplexTable {
    fn push(&mut self, coords: &[f64], weight: f64) {
        self.locations.extend_from_slice(coords);
        self.weights.push(weight);
    }

    /// Centroid of the triangle
    fn tri_s3(&mut self, w: f64) {
        let c = 1.0 / 3.0;
        self.push(&[c, c], w);
    }

    /// Barycentric (a, a, 1-2a) and its 3 permutations
    fn tri_s21(&mut self, a: f64, w: f64) {
        let b = 1.0 - 2.0 * a;
        self.push(&[a, a], w);
        self.push(&[b, a], w);
        self.push(&[a, b], w);
    }

    /// Barycentric (a, b, 1-a-b) and its 6 permutations
    fn tri_s111(&mut self, a: f64, b: f64, w: f64) {
        let c = 1.0 - a - b;
        self.push(&[a, b], w);
        self.push(&[b, a], w);
        self.push(&[a, c], w);
        self.push(&[c, a], w);
        self.push(&[b, c], w);
        self.push(&[c, b], w);
    }

    /// Centroid of the tetrahedron
    fn tet_s4(&mut self, w: f64) {
        self.push(&[0.25, 0.25, 0.25], w);
    }

    /// Barycentric (a, a, a, 1-3a) and its 4 permutations
    fn tet_s31(&mut self, a: f64, w: f64) {
        let b = 1.0 - 3.0 * a;
        self.push(&[a, a, a], w);
        self.push(&[b, a, a], w);
        self.push(&[a, b, a], w);
        self.push(&[a, a, b], w);
    }

    /// Barycentric (a, a, b, b) with b = 1/2 - a and its 6 permutations
    fn tet_s22(&mut self, a: f64, w: f64) {
        let b = 0.5 - a;
        self.push(&[a, a, b], w);
        self.push(&[a, b, a], w);
        self.push(&[b, a, a], w);
        self.push(&[a, b, b], w);
        self.push(&[b, a, b], w);
        self.push(&[b, b, a], w);
    }
}

/// Triangle rule exact to at least `order`, or `None` past the table
pub(crate) fn triangle(order: usize) -> Option<SimplexTable> {
    let mut t = SimplexTable::default();
    match order {
        0 | 1 => {
            // 1-point centroid rule (degree 1)
            t.tri_s3(0.5);
        }
        2 => {
            // 3-point rule (degree 2)
            t.tri_s21(1.0 / 6.0, 1.0 / 6.0);
        }
        3 => {
            // Strang-Fix 4-point rule (degree 3), negative centroid weight
            t.tri_s3(-27.0 / 96.0);
            t.tri_s21(0.2, 25.0 / 96.0);
        }
        4 | 5 => {
            // Radon 7-point rule (degree 5)
            let s15 = 15.0_f64.sqrt();
            t.tri_s3(9.0 / 80.0);
            t.tri_s21((6.0 - s15) / 21.0, (155.0 - s15) / 2400.0);
            t.tri_s21((6.0 + s15) / 21.0, (155.0 + s15) / 2400.0);
        }
        6 => {
            // Dunavant 12-point rule (degree 6)
            t.tri_s21(
                0.063089014491502228340331602870819,
                0.5 * 0.050844906370206816920936809106869,
            );
            t.tri_s21(
                0.249286745170910421291638553107019,
                0.5 * 0.116786275726379366030690538687898,
            );
            t.tri_s111(
                0.053145049844816947353249671631398,
                0.310352451033784405416607733956552,
                0.5 * 0.082851075618373575193553456420442,
            );
        }
        _ => return None,
    }
    Some(t)
}

/// Tetrahedron rule exact to at least `order`, or `None` past the table
pub(crate) fn tetrahedron(order: usize) -> Option<SimplexTable> {
    let mut t = SimplexTable::default();
    match order {
        0 | 1 => {
            // 1-point centroid rule (degree 1)
            t.tet_s4(1.0 / 6.0);
        }
        2 => {
            // 4-point rule (degree 2)
            t.tet_s31((5.0 - 5.0_f64.sqrt()) / 20.0, 1.0 / 24.0);
        }
        3 => {
            // Keast 5-point rule (degree 3), negative centroid weight
            t.tet_s4(-2.0 / 15.0);
            t.tet_s31(1.0 / 6.0, 3.0 / 40.0);
        }
        4 | 5 => {
            // Stroud T3:5-1 15-point rule (degree 5)
            let s15 = 15.0_f64.sqrt();
            let vol = 1.0 / 6.0;
            t.tet_s4(16.0 / 135.0 * vol);
            t.tet_s31((7.0 - s15) / 34.0, (2665.0 + 14.0 * s15) / 37800.0 * vol);
            t.tet_s31((7.0 + s15) / 34.0, (2665.0 - 14.0 * s15) / 37800.0 * vol);
            t.tet_s22((10.0 - 2.0 * s15) / 40.0, 10.0 / 189.0 * vol);
        }
        _ => return None,
    }
    Some(t)
}
