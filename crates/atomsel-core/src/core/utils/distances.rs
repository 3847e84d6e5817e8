use itertools::Itertools;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::{DMatrix, Point3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Wraps a displacement vector into the nearest periodic image of an
/// orthorhombic box with edge lengths `box_lengths`.
pub fn minimum_image(delta: Vector3<f64>, box_lengths: &[f64; 3]) -> Vector3<f64> {
    Vector3::from_fn(|axis, _| {
        let length = box_lengths[axis];
        let d = delta[axis];
        if length > 0.0 {
            d - length * (d / length).round()
        } else {
            d
        }
    })
}

pub fn distance(a: &Point3<f64>, b: &Point3<f64>, box_lengths: Option<&[f64; 3]>) -> f64 {
    let delta = b - a;
    match box_lengths {
        Some(lengths) => minimum_image(delta, lengths).norm(),
        None => delta.norm(),
    }
}

/// Computes the full distance matrix between two coordinate sets.
///
/// Row `i`, column `j` holds the distance between `reference[i]` and
/// `configuration[j]`. With `box_lengths`, distances follow the minimum-image
/// convention.
pub fn distance_array(
    reference: &[Point3<f64>],
    configuration: &[Point3<f64>],
    box_lengths: Option<[f64; 3]>,
) -> DMatrix<f64> {
    let rows = reference.len();
    let cols = configuration.len();
    if rows == 0 || cols == 0 {
        return DMatrix::zeros(rows, cols);
    }

    let mut data = vec![0.0; rows * cols];
    let fill_row = |(row, r): (&mut [f64], &Point3<f64>)| {
        for (slot, c) in row.iter_mut().zip(configuration) {
            *slot = distance(r, c, box_lengths.as_ref());
        }
    };

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(cols).zip(reference).for_each(fill_row);

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(cols)
        .zip(reference.par_iter())
        .for_each(fill_row);

    DMatrix::from_row_slice(rows, cols, &data)
}

/// Flags every candidate lying within `cutoff` (inclusive) of at least one
/// reference position.
///
/// Without a box the query runs on a KD-tree of the distinct reference
/// positions; with a box the minimum-image distance matrix is scanned row by
/// row.
pub fn within_cutoff(
    candidates: &[Point3<f64>],
    references: &[Point3<f64>],
    cutoff: f64,
    box_lengths: Option<[f64; 3]>,
) -> Vec<bool> {
    if references.is_empty() || cutoff < 0.0 {
        return vec![false; candidates.len()];
    }

    match box_lengths {
        Some(_) => {
            let matrix = distance_array(candidates, references, box_lengths);
            matrix
                .row_iter()
                .map(|row| row.iter().any(|&d| d <= cutoff))
                .collect()
        }
        None => {
            // A KD-tree leaf holds a bounded number of items at one point, so
            // coincident references are collapsed first.
            let points: Vec<[f64; 3]> = references
                .iter()
                .map(|p| [p.x, p.y, p.z])
                .unique_by(|p| p.map(f64::to_bits))
                .collect();
            let kdtree: KdTree<f64, 3> = (&points).into();
            let cutoff_sq = cutoff * cutoff;
            candidates
                .iter()
                .map(|c| {
                    let nearest = kdtree.nearest_one::<SquaredEuclidean>(&[c.x, c.y, c.z]);
                    nearest.distance <= cutoff_sq
                })
                .collect()
        }
    }
}
