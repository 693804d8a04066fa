use anyhow::{Context, Result};
use csv::ReaderBuilder;
use nalgebra::Vector3;
use serde::Deserialize;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::geometry::{NormalSet, PointSet, SurfaceSet};

/// Raw x,y,z row as exported by the capture pipeline.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
struct VertexRow {
    x: f64,
    y: f64,
    z: f64,
}

/// Utility: detect whether the file uses comma or tab as delimiter.
fn detect_delimiter<P: AsRef<Path>>(path: P) -> Result<u8> {
    let file = File::open(&path).with_context(|| {
        format!(
            "failed to open file for delimiter sniffing: {:?}",
            path.as_ref()
        )
    })?;
    let mut reader = BufReader::new(file);
    let mut first_line = String::new();
    reader
        .read_line(&mut first_line)
        .with_context(|| "failed to read first line for delimiter detection")?;

    let tabs = first_line.matches('\t').count();
    let commas = first_line.matches(',').count();

    if tabs > commas {
        Ok(b'\t')
    } else {
        Ok(b',')
    }
}

/// Reads an ordered point buffer from a headerless CSV/TSV file.
///
/// Malformed rows abort the load: unlike capture-side tooling that can skip a
/// bad contour row, a comparison run cannot tolerate holes in the buffer.
pub fn read_point_set<P: AsRef<Path>>(path: P) -> Result<PointSet> {
    let delim = detect_delimiter(&path)?;
    let file = File::open(&path).with_context(|| format!("failed to open {:?}", path.as_ref()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delim)
        .from_reader(file);

    let mut positions = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let row: VertexRow = result
            .with_context(|| format!("invalid vertex row {} in {:?}", line, path.as_ref()))?;
        positions.push(Vector3::new(row.x, row.y, row.z));
    }

    Ok(PointSet::new(positions))
}

/// Loads a labelled capture from a vertex file and a normal file.
///
/// Both are headerless x,y,z buffers; index-alignment and matching lengths
/// are re-validated by the integrity checks when a comparison starts.
pub fn read_surface<P: AsRef<Path>>(
    label: &str,
    vertices_path: P,
    normals_path: P,
) -> Result<SurfaceSet> {
    let points = read_point_set(&vertices_path)
        .with_context(|| format!("reading vertices for capture '{}'", label))?;
    let normals = read_point_set(&normals_path)
        .with_context(|| format!("reading normals for capture '{}'", label))?;

    Ok(SurfaceSet::new(
        label,
        points,
        NormalSet::new(normals.positions),
    ))
}

#[cfg(test)]
mod input_tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("bodydiff_{}_{}", std::process::id(), name));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_comma_delimited_points() {
        let path = temp_file("points.csv", "0.0,1.0,2.0\n-1.5,0.25,3.0\n");
        let points = read_point_set(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(points.len(), 2);
        assert_relative_eq!(points.positions[1].x, -1.5, epsilon = 1e-12);
        assert_relative_eq!(points.positions[1].y, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_read_tab_delimited_points() {
        let path = temp_file("points.tsv", "0.0\t1.0\t2.0\n4.0\t5.0\t6.0\n");
        let points = read_point_set(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(points.len(), 2);
        assert_relative_eq!(points.positions[0].z, 2.0, epsilon = 1e-12);
        assert_relative_eq!(points.positions[1].x, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_malformed_row_fails_fast() {
        let path = temp_file("bad.csv", "0.0,1.0,2.0\nnot,a,number\n");
        let result = read_point_set(&path);
        std::fs::remove_file(&path).ok();

        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("invalid vertex row 1"));
    }

    #[test]
    fn test_read_surface_pairs_buffers() {
        let vertices = temp_file("surface_v.csv", "0.0,0.0,0.0\n1.0,0.0,0.0\n");
        let normals = temp_file("surface_n.csv", "0.0,1.0,0.0\n0.0,1.0,0.0\n");
        let surface = read_surface("scan_a", &vertices, &normals).unwrap();
        std::fs::remove_file(&vertices).ok();
        std::fs::remove_file(&normals).ok();

        assert_eq!(surface.label, "scan_a");
        assert_eq!(surface.points.len(), 2);
        assert_eq!(surface.normals.len(), 2);
        assert_relative_eq!(surface.normals.normals[0].y, 1.0, epsilon = 1e-12);
    }
}
