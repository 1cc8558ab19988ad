// src/model/structure.rs

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::linalg;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Site {
    pub label: String,
    // Cartesian position in Angstroms
    pub position: [f64; 3],
}

impl Site {
    pub fn species_label(&self) -> &str {
        &self.label
    }

    pub fn coordinates(&self) -> [f64; 3] {
        self.position
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Structure {
    // Lattice vectors: [a_vec, b_vec, c_vec]
    pub lattice: [[f64; 3]; 3],
    pub sites: Vec<Site>,
    // Title line carried over from the source file
    #[serde(skip)]
    pub comment: String,
}

impl Structure {
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Periodic minimum-image distance between sites `i` and `j` in Angstroms.
    pub fn distance(&self, i: usize, j: usize) -> Result<f64> {
        let n_sites = self.sites.len();
        let site_i = self
            .sites
            .get(i)
            .ok_or(Error::IndexOutOfRange { index: i, n_sites })?;
        let site_j = self
            .sites
            .get(j)
            .ok_or(Error::IndexOutOfRange { index: j, n_sites })?;

        linalg::min_image_distance(site_i.position, site_j.position, self.lattice)
            .ok_or_else(|| Error::InvalidArgument("lattice matrix is singular".to_string()))
    }
}
