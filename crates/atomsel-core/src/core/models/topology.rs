/// A covalent bond between two atoms, identified by their atom numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize, // Number of the first atom
    pub atom2: usize, // Number of the second atom
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize) -> Self {
        Self { atom1, atom2 }
    }

    pub fn contains(&self, number: usize) -> bool {
        self.atom1 == number || self.atom2 == number
    }

    /// Returns the atom on the other end of the bond, if `number` is part of it.
    pub fn partner(&self, number: usize) -> Option<usize> {
        if self.atom1 == number {
            Some(self.atom2)
        } else if self.atom2 == number {
            Some(self.atom1)
        } else {
            None
        }
    }
}
