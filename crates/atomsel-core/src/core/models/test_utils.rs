use super::atom::Atom;
use super::cell::UnitCell;
use super::structure::Structure;
use nalgebra::Point3;

/// Three atoms in two residues of segment "A":
///
/// | number | name | resname | resid | position        |
/// |--------|------|---------|-------|-----------------|
/// | 0      | CA   | ALA     | 1     | (0.0, 0.0, 0.0) |
/// | 1      | CB   | ALA     | 1     | (1.5, 0.0, 0.0) |
/// | 2      | CA   | GLY     | 2     | (3.8, 0.0, 0.0) |
pub(crate) fn scenario_structure() -> Structure {
    let mut structure = Structure::new();
    structure.add_atom(
        Atom::new("CA", "ALA", 1, "A")
            .with_type("CT1")
            .with_mass(12.011)
            .with_charge(0.07),
        Point3::new(0.0, 0.0, 0.0),
    );
    structure.add_atom(
        Atom::new("CB", "ALA", 1, "A")
            .with_type("CT3")
            .with_mass(12.011)
            .with_charge(-0.27),
        Point3::new(1.5, 0.0, 0.0),
    );
    structure.add_atom(
        Atom::new("CA", "GLY", 2, "A")
            .with_type("CT2")
            .with_mass(12.011)
            .with_charge(-0.02),
        Point3::new(3.8, 0.0, 0.0),
    );
    structure.add_bond(0, 1);
    structure.set_unit_cell(Some(UnitCell::orthorhombic(50.0, 50.0, 50.0)));
    structure
}

/// A small protein fragment followed by a ligand and two waters, spread along
/// the x axis inside a 20 Angstrom cubic box.
///
/// | number | name | resname | resid | segid | x     |
/// |--------|------|---------|-------|-------|-------|
/// | 0      | N    | ALA     | 1     | PROT  | 0.0   |
/// | 1      | CA   | ALA     | 1     | PROT  | 1.0   |
/// | 2      | C    | ALA     | 1     | PROT  | 2.0   |
/// | 3      | O    | ALA     | 1     | PROT  | 3.0   |
/// | 4      | CB   | ALA     | 1     | PROT  | 4.0   |
/// | 5      | N    | LYS     | 2     | PROT  | 5.0   |
/// | 6      | CA   | LYS     | 2     | PROT  | 6.0   |
/// | 7      | NZ   | LYS     | 2     | PROT  | 7.0   |
/// | 8      | C1   | LIG     | 10    | HET   | 10.0  |
/// | 9      | O1   | LIG     | 10    | HET   | 11.0  |
/// | 10     | OH2  | TIP3    | 20    | SOLV  | 15.0  |
/// | 11     | OH2  | TIP3    | 21    | SOLV  | 19.5  |
pub(crate) fn fragment_structure() -> Structure {
    let rows: [(&str, &str, isize, &str, f64, f64, f64); 12] = [
        ("N", "ALA", 1, "PROT", 14.007, -0.47, 0.0),
        ("CA", "ALA", 1, "PROT", 12.011, 0.07, 1.0),
        ("C", "ALA", 1, "PROT", 12.011, 0.51, 2.0),
        ("O", "ALA", 1, "PROT", 15.999, -0.51, 3.0),
        ("CB", "ALA", 1, "PROT", 12.011, -0.27, 4.0),
        ("N", "LYS", 2, "PROT", 14.007, -0.47, 5.0),
        ("CA", "LYS", 2, "PROT", 12.011, 0.07, 6.0),
        ("NZ", "LYS", 2, "PROT", 14.007, -0.30, 7.0),
        ("C1", "LIG", 10, "HET", 12.011, 0.10, 10.0),
        ("O1", "LIG", 10, "HET", 15.999, -0.40, 11.0),
        ("OH2", "TIP3", 20, "SOLV", 15.999, -0.834, 15.0),
        ("OH2", "TIP3", 21, "SOLV", 15.999, -0.834, 19.5),
    ];

    let mut structure = Structure::new();
    for (name, resname, resid, segid, mass, charge, x) in rows {
        structure.add_atom(
            Atom::new(name, resname, resid, segid)
                .with_mass(mass)
                .with_charge(charge),
            Point3::new(x, 0.0, 0.0),
        );
    }
    for (a, b) in [(0, 1), (1, 2), (2, 3), (1, 4), (2, 5), (5, 6), (6, 7), (8, 9)] {
        structure.add_bond(a, b);
    }
    structure.set_unit_cell(Some(UnitCell::orthorhombic(20.0, 20.0, 20.0)));
    structure
}
