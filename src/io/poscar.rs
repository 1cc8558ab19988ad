// src/io/poscar.rs

use std::fs;
use std::io::Write;

use crate::error::{Error, Result};
use crate::model::{Site, Structure};
use crate::utils::linalg;

pub fn parse(path: &str) -> Result<Structure> {
    let content = fs::read_to_string(path)?;
    parse_str(&content, path)
}

fn parse_str(content: &str, path: &str) -> Result<Structure> {
    let lines: Vec<&str> = content.lines().collect();
    let mut cursor = 0;

    let comment = take_line(&lines, &mut cursor, path, "missing comment line")?
        .trim()
        .to_string();

    // Scale
    let scale_line = take_line(&lines, &mut cursor, path, "missing scale factor")?;
    let scale = parse_f64(scale_line.trim(), path, cursor)?;

    // Lattice
    let mut lattice = [[0.0; 3]; 3];
    for row in lattice.iter_mut() {
        let line = take_line(&lines, &mut cursor, path, "missing lattice vector")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(Error::parse(path, cursor, "lattice vector needs three components"));
        }
        for (k, part) in parts[..3].iter().enumerate() {
            row[k] = parse_f64(part, path, cursor)? * scale;
        }
    }

    // Elements & Counts. VASP 5 files carry a species symbols line before
    // the counts; VASP 4 files jump straight to the counts.
    let line6 = take_line(&lines, &mut cursor, path, "missing species counts")?;
    let has_symbols = line6
        .trim()
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic());

    let (symbols, counts_line) = if has_symbols {
        let names: Vec<String> = line6.split_whitespace().map(str::to_string).collect();
        let line7 = take_line(&lines, &mut cursor, path, "missing species counts")?;
        (names, line7)
    } else {
        (Vec::new(), line6)
    };
    let counts_lineno = cursor;

    let mut counts: Vec<usize> = Vec::new();
    for token in counts_line.split_whitespace() {
        let count = token.parse().map_err(|_| {
            Error::parse(path, counts_lineno, format!("invalid species count '{token}'"))
        })?;
        counts.push(count);
    }
    if counts.is_empty() {
        return Err(Error::parse(path, counts_lineno, "missing species counts"));
    }

    // Mode, with the optional "Selective dynamics" flag line before it
    let mut mode_line = take_line(&lines, &mut cursor, path, "missing coordinate mode")?;
    if mode_line.trim().to_lowercase().starts_with('s') {
        mode_line = take_line(&lines, &mut cursor, path, "missing coordinate mode")?;
    }
    let mode_char = mode_line
        .trim()
        .chars()
        .next()
        .unwrap_or(' ')
        .to_ascii_lowercase();
    let is_cartesian = mode_char == 'c' || mode_char == 'k';

    // Sites
    let mut sites = Vec::with_capacity(counts.iter().sum());
    for (species_idx, &count) in counts.iter().enumerate() {
        let label = symbols
            .get(species_idx)
            .map(String::as_str)
            .unwrap_or("Xx")
            .to_string();

        for _ in 0..count {
            let line = take_line(&lines, &mut cursor, path, "unexpected end of coordinate block")?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return Err(Error::parse(path, cursor, "coordinate line needs three components"));
            }

            let mut coords = [0.0; 3];
            for (k, part) in parts[..3].iter().enumerate() {
                coords[k] = parse_f64(part, path, cursor)?;
            }

            let position = if is_cartesian {
                [coords[0] * scale, coords[1] * scale, coords[2] * scale]
            } else {
                linalg::frac_to_cart(coords, lattice)
            };

            sites.push(Site { label: label.clone(), position });
        }
    }

    log::debug!("parsed {} sites from '{path}'", sites.len());

    Ok(Structure { lattice, sites, comment })
}

fn take_line<'a>(lines: &[&'a str], cursor: &mut usize, path: &str, missing: &str) -> Result<&'a str> {
    let line = lines
        .get(*cursor)
        .copied()
        .ok_or_else(|| Error::parse(path, *cursor + 1, missing))?;
    *cursor += 1;
    Ok(line)
}

fn parse_f64(token: &str, path: &str, line: usize) -> Result<f64> {
    token
        .parse()
        .map_err(|_| Error::parse(path, line, format!("invalid number '{token}'")))
}

pub fn write(path: &str, structure: &Structure) -> Result<()> {
    let mut file = fs::File::create(path)?;

    // 1. Header
    let comment = if structure.comment.is_empty() {
        "Exported by vaspan"
    } else {
        structure.comment.as_str()
    };
    writeln!(file, "{comment}")?;
    writeln!(file, "1.0")?;

    // 2. Lattice Vectors
    for vec in &structure.lattice {
        writeln!(file, " {:12.8} {:12.8} {:12.8}", vec[0], vec[1], vec[2])?;
    }

    // 3. Species symbols and counts, as contiguous runs in site order.
    // Runs keep site indices stable across a write/read round trip.
    let mut runs: Vec<(&str, usize)> = Vec::new();
    for site in &structure.sites {
        match runs.last_mut() {
            Some((label, count)) if *label == site.label.as_str() => *count += 1,
            _ => runs.push((&site.label, 1)),
        }
    }

    for (label, _) in &runs {
        write!(file, " {:<4}", label)?;
    }
    writeln!(file)?;
    for (_, count) in &runs {
        write!(file, " {:<4}", count)?;
    }
    writeln!(file)?;

    // 4. Atomic Positions (Direct/Fractional)
    writeln!(file, "Direct")?;
    for site in &structure.sites {
        let frac = linalg::cart_to_frac(site.position, structure.lattice)
            .ok_or_else(|| Error::InvalidArgument("lattice matrix is singular".to_string()))?;
        writeln!(file, " {:12.8} {:12.8} {:12.8}", frac[0], frac[1], frac[2])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUTILE_SLAB: &str = "\
TiO2 slab + H
1.0
 4.60 0.00 0.00
 0.00 4.60 0.00
 0.00 0.00 9.20
 Ti O  H
 1  2  1
Direct
 0.00 0.00 0.00
 0.50 0.50 0.25
 0.50 0.50 0.75
 0.00 0.00 0.50
";

    #[test]
    fn test_parse_vasp5_direct() {
        let structure = parse_str(RUTILE_SLAB, "POSCAR").unwrap();

        assert_eq!(structure.comment, "TiO2 slab + H");
        assert_eq!(structure.site_count(), 4);

        let labels: Vec<&str> = structure.sites.iter().map(|s| s.species_label()).collect();
        assert_eq!(labels, ["Ti", "O", "O", "H"]);

        // Fractional (0.5, 0.5, 0.25) in a 4.6 x 4.6 x 9.2 cell
        let pos = structure.sites[1].coordinates();
        assert!((pos[0] - 2.3).abs() < 1e-10);
        assert!((pos[1] - 2.3).abs() < 1e-10);
        assert!((pos[2] - 2.3).abs() < 1e-10);
    }

    #[test]
    fn test_parse_vasp4_without_symbols() {
        let input = "\
bulk
2.0
 1.0 0.0 0.0
 0.0 1.0 0.0
 0.0 0.0 1.0
 2
Direct
 0.0 0.0 0.0
 0.5 0.5 0.5
";
        let structure = parse_str(input, "POSCAR").unwrap();

        assert_eq!(structure.sites[0].species_label(), "Xx");
        // Scale 2.0 applies to the lattice
        assert!((structure.lattice[0][0] - 2.0).abs() < 1e-10);
        assert!((structure.sites[1].coordinates()[0] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_parse_cartesian_with_selective_dynamics() {
        let input = "\
surface
1.0
 5.0 0.0 0.0
 0.0 5.0 0.0
 0.0 0.0 5.0
 O
 1
Selective dynamics
Cartesian
 1.0 2.0 3.0 T T F
";
        let structure = parse_str(input, "CONTCAR").unwrap();

        assert_eq!(structure.sites[0].coordinates(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_truncated_coordinates() {
        let input = "\
broken
1.0
 5.0 0.0 0.0
 0.0 5.0 0.0
 0.0 0.0 5.0
 O H
 1 1
Direct
 0.0 0.0 0.0
";
        match parse_str(input, "POSCAR") {
            Err(Error::Parse { line: 10, .. }) => {}
            other => panic!("expected Parse error at line 10, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bad_number() {
        let input = "\
broken
1.0
 5.0 zz 0.0
 0.0 5.0 0.0
 0.0 0.0 5.0
 O
 1
Direct
 0.0 0.0 0.0
";
        assert!(matches!(parse_str(input, "POSCAR"), Err(Error::Parse { line: 3, .. })));
    }

    #[test]
    fn test_write_read_roundtrip() {
        let structure = parse_str(RUTILE_SLAB, "POSCAR").unwrap();

        let path = std::env::temp_dir().join("vaspan_poscar_roundtrip.vasp");
        let path = path.to_str().unwrap();
        write(path, &structure).unwrap();
        let reloaded = parse(path).unwrap();

        assert_eq!(reloaded.site_count(), structure.site_count());
        for (a, b) in structure.sites.iter().zip(reloaded.sites.iter()) {
            assert_eq!(a.species_label(), b.species_label());
            for k in 0..3 {
                assert!((a.position[k] - b.position[k]).abs() < 1e-6);
            }
        }
    }
}
