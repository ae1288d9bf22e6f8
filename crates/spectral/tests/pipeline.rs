//! End-to-end tests from gridded fields through the estimators.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use flexwave_spectral::{admit_coh, cross_scalogram, scalogram};
use flexwave_stats::variance;
use flexwave_wavelet::{Grid, ScaleSet, TransformConfig, padded_shape, transform};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn white_noise(n: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half_width = 3.0_f64.sqrt();
    Array2::from_shape_simple_fn((n, n), || half_width * (2.0 * rng.random::<f64>() - 1.0))
}

#[test]
fn scalogram_energy_comparable_to_variance() {
    let data = white_noise(64, 42);
    let var = variance(data.as_slice().unwrap());
    let grid = Grid::new(data, 1000.0, 1000.0).unwrap();
    let scales = ScaleSet::for_grid(&grid, 12).unwrap();
    let (nnx, nny) = padded_shape(grid.nx(), grid.ny());
    let wt = transform(&grid, nnx, nny, &scales, &TransformConfig::new()).unwrap();

    let sg = scalogram(&wt);
    let total: f64 = sg.global().values().iter().sum();
    let ratio = total / var;
    assert!(ratio > 0.1 && ratio < 10.0, "energy ratio {ratio}");
}

#[test]
fn zero_grid_gives_zero_scalogram() {
    let grid = Grid::new(Array2::zeros((32, 32)), 500.0, 500.0).unwrap();
    let scales = ScaleSet::for_grid(&grid, 4).unwrap();
    let wt = transform(&grid, 64, 64, &scales, &TransformConfig::new()).unwrap();
    let sg = scalogram(&wt);
    assert!(sg.values().iter().all(|&v| v == 0.0));
    assert!(sg.error().iter().all(|&v| v == 0.0));
}

#[test]
fn scaled_copy_is_fully_coherent() {
    let n = 48;
    let data = Array2::from_shape_fn((n, n), |(i, j)| {
        (2.0 * PI * i as f64 / 12.0).sin() * (2.0 * PI * j as f64 / 16.0).cos()
    });
    let scaled = data.mapv(|v| -2.0 * v);
    let config = TransformConfig::new().with_n_angles(12);
    let g1 = Grid::new(data, 1000.0, 1000.0).unwrap();
    let g2 = Grid::new(scaled, 1000.0, 1000.0).unwrap();
    let scales = ScaleSet::for_grid(&g1, 5).unwrap();
    let (nnx, nny) = padded_shape(n, n);
    let wt1 = transform(&g1, nnx, nny, &scales, &config).unwrap();
    let wt2 = transform(&g2, nnx, nny, &scales, &config).unwrap();

    let ac = admit_coh(&wt1, &wt2).unwrap();
    for &v in ac.admittance().iter() {
        assert_relative_eq!(v, -2.0, max_relative = 1e-8);
    }
    for &v in ac.coherence().iter() {
        assert_relative_eq!(v, 1.0, max_relative = 1e-8);
    }

    let xs = cross_scalogram(&wt1, &wt2).unwrap();
    for &c in xs.values().iter() {
        assert!(c.re <= 0.0);
    }
}
