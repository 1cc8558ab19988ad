// src/physics/adsorption.rs

use crate::error::{Error, Result};

/// Last entry of the energy series: the converged energy of the run.
pub fn final_energy(series: &[f64]) -> Result<f64> {
    series.last().copied().ok_or(Error::EmptySeries)
}

/// Per-atom adsorption energies relative to the bare substrate and the
/// adsorbate chemical potential.
///
/// **Formula**: E_ads[i] = (E[i] - (natoms · µ_ads + E_stoich)) / natoms
///
/// Where:
/// - E[i] = total energy of configuration i (adsorbate + substrate)
/// - E_stoich = reference energy of the bare substrate
/// - µ_ads = chemical potential per adsorbate atom
/// - natoms = number of adsorbate atoms
pub fn adsorption_energies(data: &[f64], stoich: f64, natoms: f64, ads: f64) -> Result<Vec<f64>> {
    if natoms == 0.0 || !natoms.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "adsorbate atom count must be finite and nonzero, got {natoms}"
        )));
    }

    let reference = natoms * ads + stoich;
    Ok(data.iter().map(|e| (e - reference) / natoms).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_energy_is_last() {
        assert_eq!(final_energy(&[1.0, 2.0, 3.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_final_energy_empty_fails() {
        assert!(matches!(final_energy(&[]), Err(Error::EmptySeries)));
    }

    #[test]
    fn test_adsorption_energy_identity() {
        // 2 O atoms on a slab: E_slab = -120.0, µ_O = -4.93
        let data = [-131.2, -131.8, -132.1];
        let (stoich, natoms, ads) = (-120.0, 2.0, -4.93);

        let out = adsorption_energies(&data, stoich, natoms, ads).unwrap();

        assert_eq!(out.len(), data.len());
        for (i, e) in data.iter().enumerate() {
            let expected = (e - (natoms * ads + stoich)) / natoms;
            assert!((out[i] - expected).abs() < 1e-12);
        }
        // Spot check the first value by hand:
        // (-131.2 - (2 * -4.93 + -120.0)) / 2 = -0.67
        assert!((out[0] - (-0.67)).abs() < 1e-12);
    }

    #[test]
    fn test_adsorption_energy_varied_inputs() {
        let data = [-812.4, 0.0, 93.7, -0.003];
        for &(stoich, natoms, ads) in &[(-800.0, 1.0, -2.5), (13.7, 4.0, 0.0), (0.0, 0.5, 7.1)] {
            let out = adsorption_energies(&data, stoich, natoms, ads).unwrap();
            for (i, e) in data.iter().enumerate() {
                assert!((out[i] - (e - (natoms * ads + stoich)) / natoms).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_natoms_fails() {
        let result = adsorption_energies(&[-131.2], -120.0, 0.0, -4.93);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_series_maps_to_empty() {
        assert!(adsorption_energies(&[], -120.0, 2.0, -4.93).unwrap().is_empty());
    }
}
