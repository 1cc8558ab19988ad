// src/io/mod.rs
pub mod oszicar;
pub mod poscar;

use crate::error::Result;
use crate::model::Structure;

/// Load a crystal structure from the file at `path`.
///
/// POSCAR/CONTCAR files carry no telling extension, so there is no format
/// dispatch here; the structure format is always VASP.
pub fn load_structure(path: &str) -> Result<Structure> {
    poscar::parse(path)
}

pub fn save_structure(path: &str, structure: &Structure) -> Result<()> {
    poscar::write(path, structure)
}
