use super::atom::Atom;
use super::cell::UnitCell;
use super::coordinates::Coordinates;
use super::ids::StructureId;
use super::structure::Structure;
use nalgebra::Point3;
use std::borrow::Cow;

/// Which atoms a selection was applied to, independent of their coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupTarget {
    pub structure: StructureId,
    /// `None` stands for "every atom of the structure, in number order".
    pub members: Option<Vec<usize>>,
}

/// Identity of a selection target, used as the selection cache key.
///
/// Two keys are equal only if they refer to the same structure instance at the
/// same coordinate generation and with the same ordered membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub target: GroupTarget,
    pub generation: u64,
}

/// The capability a selection is applied to: a flat, ordered list of atoms
/// belonging to one structure, with an addressable coordinate table.
///
/// Implemented by [`Structure`] (the whole system) and [`AtomGroup`] (an
/// already restricted sub-group).
pub trait AtomCollection {
    /// The structure owning the atoms of this collection.
    fn structure(&self) -> &Structure;

    /// Atom numbers of the members, in the collection's current order.
    fn members(&self) -> Cow<'_, [usize]>;

    /// The collection's own coordinate table, if it carries one.
    ///
    /// Collections without a table are evaluated against the positions of
    /// their parent structure.
    fn own_coordinates(&self) -> Option<&Coordinates> {
        None
    }

    fn unit_cell(&self) -> Option<&UnitCell> {
        self.structure().unit_cell()
    }

    fn group_key(&self) -> GroupKey;
}

impl AtomCollection for Structure {
    fn structure(&self) -> &Structure {
        self
    }

    fn members(&self) -> Cow<'_, [usize]> {
        Cow::Owned((0..self.len()).collect())
    }

    fn own_coordinates(&self) -> Option<&Coordinates> {
        Some(self.coordinates())
    }

    fn group_key(&self) -> GroupKey {
        GroupKey {
            target: GroupTarget {
                structure: self.id(),
                members: None,
            },
            generation: self.generation(),
        }
    }
}

/// An ordered subset of the atoms of one structure.
///
/// This is the result type of applying a selection, and can itself be the
/// target of further selections.
#[derive(Debug, Clone)]
pub struct AtomGroup<'a> {
    structure: &'a Structure,
    members: Vec<usize>,
}

impl<'a> AtomGroup<'a> {
    pub fn new(structure: &'a Structure, members: Vec<usize>) -> Self {
        Self { structure, members }
    }

    pub fn structure(&self) -> &'a Structure {
        self.structure
    }

    /// Atom numbers of the members, in group order.
    pub fn numbers(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, number: usize) -> bool {
        self.members.contains(&number)
    }

    /// Iterates over the member atoms, in group order.
    pub fn atoms(&self) -> impl Iterator<Item = &'a Atom> + '_ {
        let structure = self.structure;
        self.members
            .iter()
            .filter_map(move |&number| structure.atom(number))
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.atoms().map(|atom| atom.name.as_str()).collect()
    }

    /// Current positions of the members, in group order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.structure.coordinates().gather(&self.members)
    }
}

impl PartialEq for AtomGroup<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.structure.id() == other.structure.id() && self.members == other.members
    }
}

impl AtomCollection for AtomGroup<'_> {
    fn structure(&self) -> &Structure {
        self.structure
    }

    fn members(&self) -> Cow<'_, [usize]> {
        Cow::Borrowed(&self.members)
    }

    fn group_key(&self) -> GroupKey {
        GroupKey {
            target: GroupTarget {
                structure: self.structure.id(),
                members: Some(self.members.clone()),
            },
            generation: self.structure.generation(),
        }
    }
}
