use phf::{Set, phf_set};

/// Residue names recognized as protein: the CHARMM27 protein residues plus a
/// few manually added variants (`HIS`, `CHO`, `EAM`).
static PROTEIN_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "HSD",
    "HSE", "HSP", "ILE", "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR",
    "TRP", "TYR", "VAL", "ALAD",
    "CHO", "EAM",
};

/// Main-chain heavy atoms. C-terminal `OT*` oxygens are deliberately absent.
static BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "N", "CA", "C", "O",
};

pub const ALPHA_CARBON_NAME: &str = "CA";

pub fn is_protein_residue(residue_name: &str) -> bool {
    PROTEIN_RESIDUE_NAMES.contains(residue_name)
}

pub fn is_backbone_atom(atom_name: &str) -> bool {
    BACKBONE_ATOM_NAMES.contains(atom_name)
}

pub fn is_alpha_carbon(atom_name: &str) -> bool {
    atom_name == ALPHA_CARBON_NAME
}
