use std::hash::{Hash, Hasher};

/// Represents a single atom record of a molecular structure.
///
/// The `number` is the atom's stable identity: its position in the owning
/// [`Structure`](super::structure::Structure). It is assigned when the atom is
/// added to a structure and never changes afterwards, regardless of which
/// sub-groups the atom later appears in.
///
/// Equality and hashing only consider `number`, so two records describing the
/// same atom compare equal even if their attributes were edited independently.
#[derive(Debug, Clone)]
pub struct Atom {
    /// Stable zero-based identity within the owning structure.
    pub number: usize,
    /// The atom name (e.g., "CA", "N", "O").
    pub name: String,
    /// The force field atom type (e.g., "CT1", "NH1").
    pub atom_type: String,
    /// The name of the residue this atom belongs to (e.g., "ALA").
    pub resname: String,
    /// The residue sequence number.
    pub resid: isize,
    /// The segment identifier (e.g., "A", "PROT").
    pub segid: String,
    /// The atomic mass in atomic mass units.
    pub mass: f64,
    /// The partial charge in elementary charge units.
    pub charge: f64,
}

impl Atom {
    /// Creates a new `Atom` with an empty type and zero mass and charge.
    ///
    /// The `number` is left at zero; it is overwritten by
    /// [`Structure::add_atom`](super::structure::Structure::add_atom).
    ///
    /// # Arguments
    ///
    /// * `name` - The atom name.
    /// * `resname` - The residue name.
    /// * `resid` - The residue sequence number.
    /// * `segid` - The segment identifier.
    pub fn new(name: &str, resname: &str, resid: isize, segid: &str) -> Self {
        Self {
            number: 0,
            name: name.to_string(),
            atom_type: String::new(),
            resname: resname.to_string(),
            resid,
            segid: segid.to_string(),
            mass: 0.0,
            charge: 0.0,
        }
    }

    pub fn with_type(mut self, atom_type: &str) -> Self {
        self.atom_type = atom_type.to_string();
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    /// Returns the `(resid, segid)` pair identifying the residue of this atom.
    pub fn residue_key(&self) -> (isize, &str) {
        (self.resid, self.segid.as_str())
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new("CA", "ALA", 7, "A");

        assert_eq!(atom.number, 0);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.resname, "ALA");
        assert_eq!(atom.resid, 7);
        assert_eq!(atom.segid, "A");
        assert_eq!(atom.atom_type, "");
        assert_eq!(atom.mass, 0.0);
        assert_eq!(atom.charge, 0.0);
    }

    #[test]
    fn builder_methods_set_optional_attributes() {
        let atom = Atom::new("OG", "SER", 3, "B")
            .with_type("OH1")
            .with_mass(15.999)
            .with_charge(-0.66);

        assert_eq!(atom.atom_type, "OH1");
        assert_eq!(atom.mass, 15.999);
        assert_eq!(atom.charge, -0.66);
    }

    #[test]
    fn equality_only_considers_number() {
        let mut a = Atom::new("CA", "ALA", 1, "A");
        let mut b = Atom::new("CB", "GLY", 2, "B");
        a.number = 4;
        b.number = 4;
        assert_eq!(a, b);

        b.number = 5;
        assert_ne!(a, b);
    }

    #[test]
    fn hash_set_deduplicates_by_number() {
        let mut a = Atom::new("CA", "ALA", 1, "A");
        let mut b = Atom::new("N", "ALA", 1, "A");
        a.number = 1;
        b.number = 1;
        let set: HashSet<Atom> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn residue_key_pairs_resid_and_segid() {
        let atom = Atom::new("CA", "ALA", 12, "PROT");
        assert_eq!(atom.residue_key(), (12, "PROT"));
    }
}
