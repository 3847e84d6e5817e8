use nalgebra::Vector3;

/// Periodic unit cell described by six scalars: the three edge lengths
/// `a, b, c` (Angstroms) followed by the angles `alpha, beta, gamma` (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    dimensions: [f64; 6],
}

impl UnitCell {
    pub fn new(dimensions: [f64; 6]) -> Self {
        Self { dimensions }
    }

    /// Creates a rectangular box with all angles at 90 degrees.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Self {
        Self::new([a, b, c, 90.0, 90.0, 90.0])
    }

    /// Derives the cell dimensions from the three primitive cell vectors.
    ///
    /// The lengths are the vector norms; `alpha` is the angle between `e1` and
    /// `e2`, `beta` between `e1` and `e3`, and `gamma` between `e2` and `e3`.
    pub fn from_vectors(e1: &Vector3<f64>, e2: &Vector3<f64>, e3: &Vector3<f64>) -> Self {
        Self::new([
            e1.norm(),
            e2.norm(),
            e3.norm(),
            e1.angle(e2).to_degrees(),
            e1.angle(e3).to_degrees(),
            e2.angle(e3).to_degrees(),
        ])
    }

    pub fn dimensions(&self) -> [f64; 6] {
        self.dimensions
    }

    pub fn lengths(&self) -> [f64; 3] {
        [self.dimensions[0], self.dimensions[1], self.dimensions[2]]
    }

    pub fn angles(&self) -> [f64; 3] {
        [self.dimensions[3], self.dimensions[4], self.dimensions[5]]
    }

    /// A cell can be used for wrapping only if every edge length is positive.
    pub fn is_valid(&self) -> bool {
        self.lengths().iter().all(|l| l.is_finite() && *l > 0.0)
    }
}
