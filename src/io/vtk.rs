//! Legacy ASCII VTK export of receiver locations and their data arrays.
//!
//! The output is a `POLYDATA` dataset with one vertex cell per point, readable
//! by ParaView and other VTK-based viewers.

use std::io::{self, Write};

use crate::math::{R3, Scalar};

/// Writes the legacy VTK ASCII file header.
pub fn write_vtk_header<W: Write>(mut writer: W, title: &str) -> io::Result<()> {
    writeln!(writer, "# vtk DataFile Version 3.0")?;
    // Titles are limited to a single line of 256 characters.
    let title: String = title.lines().next().unwrap_or_default().chars().take(255).collect();
    writeln!(writer, "{}", title)?;
    writeln!(writer, "ASCII")?;
    Ok(())
}

/// Writes `points` as a POLYDATA vertex set with one scalar array per entry of `arrays`.
pub fn write_vtk_points<W: Write>(
    mut writer: W,
    title: &str,
    points: &[R3],
    arrays: &[(&str, &[Scalar])],
) -> io::Result<()> {
    if let Some((name, _)) = arrays.iter().find(|(_, values)| values.len() != points.len()) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("array `{name}` does not match the point count"),
        ));
    }

    write_vtk_header(&mut writer, title)?;
    writeln!(writer, "DATASET POLYDATA")?;
    writeln!(writer, "POINTS {} double", points.len())?;
    for p in points {
        writeln!(writer, "{:e} {:e} {:e}", p.x, p.y, p.z)?;
    }
    writeln!(writer, "VERTICES {} {}", points.len(), points.len() * 2)?;
    for i in 0..points.len() {
        writeln!(writer, "1 {}", i)?;
    }
    if !arrays.is_empty() {
        writeln!(writer, "POINT_DATA {}", points.len())?;
        for (name, values) in arrays {
            writeln!(writer, "SCALARS {} double 1", name.replace(char::is_whitespace, "_"))?;
            writeln!(writer, "LOOKUP_TABLE default")?;
            for v in values.iter() {
                writeln!(writer, "{:e}", v)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_points_and_scalars() {
        let pts = [R3::new(0.0, 0.0, 1.0), R3::new(1.0, 2.0, 3.0)];
        let tmi = [1.5, -2.0];
        let mut buf = Vec::new();
        write_vtk_points(&mut buf, "dipole survey", &pts, &[("tmi", tmi.as_slice())])
            .expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "# vtk DataFile Version 3.0");
        assert_eq!(lines[1], "dipole survey");
        assert_eq!(lines[3], "DATASET POLYDATA");
        assert_eq!(lines[4], "POINTS 2 double");
        assert_eq!(lines[7], "VERTICES 2 4");
        let expected = "POINT_DATA 2\nSCALARS tmi double 1\nLOOKUP_TABLE default\n1.5e0\n-2e0\n";
        assert!(text.contains(expected));
    }

    #[test]
    fn rejects_misaligned_arrays() {
        let pts = [R3::zeros()];
        let err = write_vtk_points(Vec::new(), "t", &pts, &[("b_x", &[1.0, 2.0][..])]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
