// src/io/oszicar.rs

use std::fs::File;
use std::io::{self, BufRead};

use crate::error::{Error, Result};

/// Free energies of every ionic step in an OSZICAR-style log, in file order.
///
/// An ionic step summary looks like
///
/// ```text
///    1 F= -.85164539E+03 E0= -.85164539E+03  d E =-.851645E+03
/// ```
///
/// Lines whose second field is not `F=` (electronic SCF iterations, headers)
/// are skipped. The last entry is the converged energy of the run.
pub fn read_energy_series(path: &str) -> Result<Vec<f64>> {
    let file = File::open(path)?;
    let reader = io::BufReader::new(file);

    let mut energies = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.get(1) != Some(&"F=") {
            continue;
        }

        let token = tokens
            .get(4)
            .ok_or_else(|| Error::parse(path, idx + 1, "missing free-energy field"))?;
        let energy: f64 = token.parse().map_err(|_| {
            Error::parse(path, idx + 1, format!("invalid free-energy value '{token}'"))
        })?;
        energies.push(energy);
    }

    if energies.is_empty() {
        log::warn!("no ionic step lines found in '{path}'");
    } else {
        log::debug!("read {} ionic steps from '{path}'", energies.len());
    }

    Ok(energies)
}
