use nalgebra::Point3;

/// Cartesian axis of a coordinate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn component(self, point: &Point3<f64>) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }
}

/// Current positions of every atom of a structure, addressed by atom number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coordinates {
    positions: Vec<Point3<f64>>,
}

impl Coordinates {
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self { positions }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            positions: vec![Point3::origin(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, number: usize) -> Option<&Point3<f64>> {
        self.positions.get(number)
    }

    pub fn get_mut(&mut self, number: usize) -> Option<&mut Point3<f64>> {
        self.positions.get_mut(number)
    }

    pub fn push(&mut self, position: Point3<f64>) {
        self.positions.push(position);
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Collects the positions of the given atom numbers, in the given order.
    ///
    /// Numbers outside the table are skipped; callers that need a one-to-one
    /// mapping validate the numbers beforehand.
    pub fn gather(&self, numbers: &[usize]) -> Vec<Point3<f64>> {
        numbers
            .iter()
            .filter_map(|&number| self.positions.get(number).copied())
            .collect()
    }

    /// Per-axis view over all positions.
    pub fn axis(&self, axis: Axis) -> impl Iterator<Item = f64> + '_ {
        self.positions.iter().map(move |p| axis.component(p))
    }

    pub fn x(&self) -> impl Iterator<Item = f64> + '_ {
        self.axis(Axis::X)
    }

    pub fn y(&self) -> impl Iterator<Item = f64> + '_ {
        self.axis(Axis::Y)
    }

    pub fn z(&self) -> impl Iterator<Item = f64> + '_ {
        self.axis(Axis::Z)
    }
}

impl From<Vec<Point3<f64>>> for Coordinates {
    fn from(positions: Vec<Point3<f64>>) -> Self {
        Self::new(positions)
    }
}

impl From<Vec<[f64; 3]>> for Coordinates {
    fn from(positions: Vec<[f64; 3]>) -> Self {
        Self::new(positions.into_iter().map(Point3::from).collect())
    }
}
