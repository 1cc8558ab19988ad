// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

fn lattice_matrix(lattice: [[f64; 3]; 3]) -> Matrix3<f64> {
  Matrix3::from_row_slice(&[
    lattice[0][0],
    lattice[0][1],
    lattice[0][2],
    lattice[1][0],
    lattice[1][1],
    lattice[1][2],
    lattice[2][0],
    lattice[2][1],
    lattice[2][2],
  ])
}

/// Convert fractional coordinates to Cartesian using lattice matrix
///
/// # Arguments
/// * `frac` - Fractional coordinates [x, y, z] in range [0, 1]
/// * `lattice` - Lattice vectors as row matrix [[ax, ay, az], [bx, by, bz], [cx, cy, cz]]
///
/// # Returns
/// Cartesian coordinates in Angstroms
///
/// # Formula
/// ```text
/// Cartesian = Lattice^T × Fractional
/// ```
pub fn frac_to_cart(frac: [f64; 3], lattice: [[f64; 3]; 3]) -> [f64; 3] {
  let frac_vec = Vector3::from(frac);
  let cart_vec = lattice_matrix(lattice).transpose() * frac_vec;

  [cart_vec.x, cart_vec.y, cart_vec.z]
}

/// Convert Cartesian coordinates to fractional using lattice matrix
///
/// # Arguments
/// * `cart` - Cartesian coordinates in Angstroms
/// * `lattice` - Lattice vectors as row matrix [[ax, ay, az], [bx, by, bz], [cx, cy, cz]]
///
/// # Returns
/// Fractional coordinates [x, y, z] or None if lattice is singular
///
/// # Formula
/// ```text
/// Fractional = (Lattice^T)^-1 × Cartesian
/// ```
pub fn cart_to_frac(cart: [f64; 3], lattice: [[f64; 3]; 3]) -> Option<[f64; 3]> {
  let cart_vec = Vector3::from(cart);
  let inv_lat = lattice_matrix(lattice).transpose().try_inverse()?;
  let frac_vec = inv_lat * cart_vec;

  Some([frac_vec.x, frac_vec.y, frac_vec.z])
}

/// Minimum-image distance between two Cartesian points under periodic
/// boundary conditions, or None if the lattice is singular.
///
/// The separation is reduced into the central cell in fractional space,
/// then the 27 surrounding images are scanned. The extra scan keeps the
/// result exact for strongly skewed cells, where plain component-wise
/// rounding can pick a non-minimal image.
pub fn min_image_distance(a: [f64; 3], b: [f64; 3], lattice: [[f64; 3]; 3]) -> Option<f64> {
  let lat_mat = lattice_matrix(lattice);
  let inv_lat = lat_mat.transpose().try_inverse()?;

  let mut frac = inv_lat * (Vector3::from(b) - Vector3::from(a));
  for k in 0..3 {
    frac[k] -= frac[k].round();
  }

  let mut best = f64::MAX;
  for dx in -1..=1 {
    for dy in -1..=1 {
      for dz in -1..=1 {
        let shifted = frac + Vector3::new(dx as f64, dy as f64, dz as f64);
        let cart = lat_mat.transpose() * shifted;
        let d = cart.norm();
        if d < best {
          best = d;
        }
      }
    }
  }

  Some(best)
}
