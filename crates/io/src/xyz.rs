//! Plain-text `x y z` grid parsing.

use flexwave_wavelet::Grid;
use ndarray::Array2;

use crate::error::IoError;
use crate::reader::regular_spacing;

/// One grid node: coordinates in metres and the field value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Node {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) z: f64,
}

/// Parses every data line of `text`, scaling coordinates by `coord_scale`.
pub(crate) fn parse_nodes(text: &str, coord_scale: f64) -> Result<Vec<Node>, IoError> {
    let mut nodes = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();
        if fields.len() != 3 {
            return Err(IoError::Parse {
                line: idx + 1,
                reason: format!("expected 3 columns, got {}", fields.len()),
            });
        }
        let mut values = [0.0; 3];
        for (v, field) in values.iter_mut().zip(&fields) {
            *v = field.parse::<f64>().map_err(|e| IoError::Parse {
                line: idx + 1,
                reason: format!("'{field}': {e}"),
            })?;
        }
        nodes.push(Node {
            x: values[0] * coord_scale,
            y: values[1] * coord_scale,
            z: values[2],
        });
    }
    Ok(nodes)
}

/// Sorted unique coordinates, merging values closer than `tol` of the extent.
fn unique_axis(mut coords: Vec<f64>, tol: f64) -> Vec<f64> {
    coords.sort_by(f64::total_cmp);
    let extent = match (coords.first(), coords.last()) {
        (Some(first), Some(last)) => last - first,
        _ => return coords,
    };
    coords.dedup_by(|b, a| (*b - *a).abs() <= tol * extent);
    coords
}

/// Places every node on the grid implied by the unique coordinates.
pub(crate) fn assemble(nodes: &[Node], tol: f64) -> Result<Grid, IoError> {
    let xs = unique_axis(nodes.iter().map(|n| n.x).collect(), tol);
    let ys = unique_axis(nodes.iter().map(|n| n.y).collect(), tol);
    let dx = regular_spacing(&xs, tol, "x")?;
    let dy = regular_spacing(&ys, tol, "y")?;
    let (nx, ny) = (xs.len(), ys.len());

    let mut data = Array2::<f64>::zeros((nx, ny));
    let mut seen = Array2::<bool>::from_elem((nx, ny), false);
    let (x0, y0) = (xs.first().copied().unwrap_or(0.0), ys.first().copied().unwrap_or(0.0));
    for node in nodes {
        let i = (((node.x - x0) / dx).round() as usize).min(nx.saturating_sub(1));
        let j = (((node.y - y0) / dy).round() as usize).min(ny.saturating_sub(1));
        if seen[[i, j]] {
            return Err(IoError::DuplicateNode {
                x: node.x,
                y: node.y,
            });
        }
        seen[[i, j]] = true;
        data[[i, j]] = node.z;
    }

    let present = seen.iter().filter(|&&s| s).count();
    if present != nx * ny {
        return Err(IoError::MissingNodes {
            expected: nx * ny,
            got: present,
        });
    }
    Ok(Grid::new(data, dx, dy)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use flexwave_wavelet::WaveletError;

    #[test]
    fn parse_whitespace_and_commas() {
        let text = "# header\n0 0 1.5\n\n1000,0,2.5\n  0\t1000  -3\n";
        let nodes = parse_nodes(text, 1.0).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[1],
            Node {
                x: 1000.0,
                y: 0.0,
                z: 2.5
            }
        );
        assert_relative_eq!(nodes[2].z, -3.0);
    }

    #[test]
    fn parse_scales_coordinates_only() {
        let nodes = parse_nodes("2 3 4\n", 1000.0).unwrap();
        assert_eq!(
            nodes[0],
            Node {
                x: 2000.0,
                y: 3000.0,
                z: 4.0
            }
        );
    }

    #[test]
    fn parse_reports_line_numbers() {
        let err = parse_nodes("0 0 1\n0 1\n", 1.0).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }));
        let err = parse_nodes("# c\n0 0 abc\n", 1.0).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }));
    }

    #[test]
    fn unique_axis_merges_jitter() {
        let axis = unique_axis(vec![2.0, 0.0, 1.0, 1.0 + 1e-9, 0.0], 1e-6);
        assert_eq!(axis.len(), 3);
        assert_relative_eq!(axis[2], 2.0);
    }

    fn nodes_for(nx: usize, ny: usize, d: f64) -> Vec<Node> {
        let mut nodes = Vec::new();
        for j in (0..ny).rev() {
            for i in 0..nx {
                nodes.push(Node {
                    x: 5000.0 + i as f64 * d,
                    y: j as f64 * d,
                    z: (i * 10 + j) as f64,
                });
            }
        }
        nodes
    }

    #[test]
    fn assemble_any_node_order() {
        let grid = assemble(&nodes_for(4, 3, 250.0), 1e-6).unwrap();
        assert_eq!((grid.nx(), grid.ny()), (4, 3));
        assert_relative_eq!(grid.dx(), 250.0);
        assert_relative_eq!(grid.dy(), 250.0);
        assert_relative_eq!(grid.view()[[3, 1]], 31.0);
        assert_relative_eq!(grid.view()[[0, 2]], 2.0);
    }

    #[test]
    fn assemble_missing_node() {
        let mut nodes = nodes_for(3, 3, 1.0);
        nodes.remove(4);
        let err = assemble(&nodes, 1e-6).unwrap_err();
        assert!(matches!(
            err,
            IoError::MissingNodes {
                expected: 9,
                got: 8
            }
        ));
    }

    #[test]
    fn assemble_duplicate_node() {
        let mut nodes = nodes_for(3, 3, 1.0);
        nodes.push(nodes[0]);
        let err = assemble(&nodes, 1e-6).unwrap_err();
        assert!(matches!(err, IoError::DuplicateNode { .. }));
    }

    #[test]
    fn assemble_single_column_is_too_small() {
        let nodes = vec![
            Node {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            },
            Node {
                x: 0.0,
                y: 1.0,
                z: 1.0,
            },
        ];
        let err = assemble(&nodes, 1e-6).unwrap_err();
        assert!(matches!(
            err,
            IoError::Grid(WaveletError::GridTooSmall { nx: 1, ny: 2, .. })
        ));
    }

    #[test]
    fn assemble_nan_value_rejected() {
        let mut nodes = nodes_for(2, 2, 1.0);
        nodes[1].z = f64::NAN;
        let err = assemble(&nodes, 1e-6).unwrap_err();
        assert!(matches!(err, IoError::Grid(WaveletError::NonFiniteData)));
    }
}
