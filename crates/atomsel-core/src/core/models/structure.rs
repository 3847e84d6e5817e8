use super::atom::Atom;
use super::cell::UnitCell;
use super::coordinates::Coordinates;
use super::group::AtomGroup;
use super::ids::StructureId;
use super::topology::Bond;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StructureError {
    #[error("Coordinate table has {found} positions but the structure has {expected} atoms")]
    CoordinateCountMismatch { expected: usize, found: usize },

    #[error("Atom number {number} is out of range for a structure of {atoms} atoms")]
    AtomOutOfRange { number: usize, atoms: usize },
}

/// A complete molecular structure: the full atom list, current coordinates,
/// the periodic cell and the bond list.
///
/// Every structure carries a process-unique [`StructureId`] and a coordinate
/// generation counter. The generation is bumped on every change of
/// coordinates or cell so that cached selection results keyed on it are never
/// reused for different positions.
#[derive(Debug)]
pub struct Structure {
    /// Unique identity of this structure instance.
    id: StructureId,
    /// All atoms; an atom's `number` is its index in this vector.
    atoms: Vec<Atom>,
    /// Current positions, one per atom.
    coordinates: Coordinates,
    /// Periodic cell, if the structure is periodic.
    unit_cell: Option<UnitCell>,
    /// Bonds between atom numbers.
    bonds: Vec<Bond>,
    /// Incremented whenever coordinates or the unit cell change.
    generation: u64,
}

impl Default for Structure {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Structure {
    // A clone evolves independently, so it gets its own identity.
    fn clone(&self) -> Self {
        Self {
            id: StructureId::next(),
            atoms: self.atoms.clone(),
            coordinates: self.coordinates.clone(),
            unit_cell: self.unit_cell,
            bonds: self.bonds.clone(),
            generation: 0,
        }
    }
}

impl Structure {
    /// Creates a new, empty structure without a unit cell.
    pub fn new() -> Self {
        Self {
            id: StructureId::next(),
            atoms: Vec::new(),
            coordinates: Coordinates::default(),
            unit_cell: None,
            bonds: Vec::new(),
            generation: 0,
        }
    }

    pub fn id(&self) -> StructureId {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Appends an atom at the given position and returns its assigned number.
    ///
    /// # Arguments
    ///
    /// * `atom` - The atom record; its `number` field is overwritten.
    /// * `position` - The initial position of the atom.
    ///
    /// # Return
    ///
    /// The stable number of the new atom.
    pub fn add_atom(&mut self, mut atom: Atom, position: Point3<f64>) -> usize {
        let number = self.atoms.len();
        atom.number = number;
        self.atoms.push(atom);
        self.coordinates.push(position);
        self.generation += 1;
        number
    }

    /// Adds a bond between two existing atoms.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if both atoms exist, `None` otherwise.
    pub fn add_bond(&mut self, atom1: usize, atom2: usize) -> Option<()> {
        if atom1 >= self.atoms.len() || atom2 >= self.atoms.len() {
            return None;
        }
        self.bonds.push(Bond::new(atom1, atom2));
        Some(())
    }

    pub fn atom(&self, number: usize) -> Option<&Atom> {
        self.atoms.get(number)
    }

    /// Mutable access to an atom record. Counts as a change for caching
    /// purposes, since attribute edits alter selection results.
    pub fn atom_mut(&mut self, number: usize) -> Option<&mut Atom> {
        self.generation += 1;
        self.atoms.get_mut(number)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Replaces the whole coordinate table, e.g. when a new trajectory frame
    /// has been read.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::CoordinateCountMismatch`] if the table does not
    /// hold exactly one position per atom.
    pub fn set_coordinates(&mut self, coordinates: Coordinates) -> Result<(), StructureError> {
        if coordinates.len() != self.atoms.len() {
            return Err(StructureError::CoordinateCountMismatch {
                expected: self.atoms.len(),
                found: coordinates.len(),
            });
        }
        self.coordinates = coordinates;
        self.generation += 1;
        Ok(())
    }

    /// Moves a single atom.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::AtomOutOfRange`] if no atom has this number.
    pub fn set_position(
        &mut self,
        number: usize,
        position: Point3<f64>,
    ) -> Result<(), StructureError> {
        let atoms = self.atoms.len();
        let slot = self
            .coordinates
            .get_mut(number)
            .ok_or(StructureError::AtomOutOfRange { number, atoms })?;
        *slot = position;
        self.generation += 1;
        Ok(())
    }

    pub fn unit_cell(&self) -> Option<&UnitCell> {
        self.unit_cell.as_ref()
    }

    pub fn set_unit_cell(&mut self, unit_cell: Option<UnitCell>) {
        self.unit_cell = unit_cell;
        self.generation += 1;
    }

    /// Returns a group holding every atom of the structure, in number order.
    pub fn all(&self) -> AtomGroup<'_> {
        AtomGroup::new(self, (0..self.atoms.len()).collect())
    }
}
