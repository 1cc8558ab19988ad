// src/physics/bonds.rs

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::io;
use crate::model::Structure;

/// All A–B bond lengths shorter than `r` Angstroms in the structure at `path`.
///
/// Pipeline: load the structure, locate the sites of both species, build the
/// periodic distance matrix, keep the entries below the threshold.
pub fn bond_lengths(path: &str, species_a: &str, species_b: &str, r: f64) -> Result<Vec<f64>> {
    if !r.is_finite() || r < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "bond length threshold must be non-negative, got {r}"
        )));
    }

    let structure = io::load_structure(path)?;
    let (c1, c2) = species_indices(&structure, species_a, species_b);
    let dist = distance_matrix(&structure, &c1, &c2)?;

    Ok(distances_below(&dist, r))
}

/// Site indices of species A and B, in native site order.
///
/// Either list may be empty if the label has no matching sites. When both
/// labels are equal every match lands in the first list.
pub fn species_indices(
    structure: &Structure,
    species_a: &str,
    species_b: &str,
) -> (Vec<usize>, Vec<usize>) {
    let mut c1 = Vec::new();
    let mut c2 = Vec::new();

    for (i, site) in structure.sites.iter().enumerate() {
        if site.species_label() == species_a {
            c1.push(i);
        } else if site.species_label() == species_b {
            c2.push(i);
        }
    }

    (c1, c2)
}

/// Full |A| × |B| matrix of minimum-image distances between two index sets.
///
/// Walks the index collections themselves, so the sets need not be
/// contiguous blocks of the site list.
pub fn distance_matrix(structure: &Structure, a: &[usize], b: &[usize]) -> Result<DMatrix<f64>> {
    let mut dist = DMatrix::zeros(a.len(), b.len());

    for (row, &i) in a.iter().enumerate() {
        for (col, &j) in b.iter().enumerate() {
            dist[(row, col)] = structure.distance(i, j)?;
        }
    }

    Ok(dist)
}

/// Entries strictly below `r`, in row-major scan order.
pub fn distances_below(dist: &DMatrix<f64>, r: f64) -> Vec<f64> {
    let mut neighbours = Vec::new();

    for row in dist.row_iter() {
        for &d in row.iter() {
            if d < r {
                neighbours.push(d);
            }
        }
    }

    neighbours
}
