//! Small utilities: combinations, coalescing and geometric dedup helpers.

use std::cmp::Ordering;

use nalgebra::DVector;

use super::types::Hs;

/// Visit every k-combination of `0..n` in lexicographic order.
pub(crate) fn for_each_combination<F: FnMut(&[usize])>(n: usize, k: usize, mut f: F) {
    if k == 0 || k > n {
        return;
    }
    let mut idxs: Vec<usize> = (0..k).collect();
    loop {
        f(&idxs);
        // advance the rightmost index that still has room
        let mut i = k;
        loop {
            i -= 1;
            if idxs[i] != i + n - k {
                break;
            }
            if i == 0 {
                return;
            }
        }
        idxs[i] += 1;
        for j in i + 1..k {
            idxs[j] = idxs[j - 1] + 1;
        }
    }
}

/// Push a unit half-space, merging it into an existing parallel one (keep min c).
pub(crate) fn push_or_coalesce(out: &mut Vec<Hs>, h: Hs) {
    if let Some(same) = out.iter_mut().find(|o| (&o.n - &h.n).norm() < 1e-9) {
        if h.c < same.c {
            same.c = h.c;
        }
        return;
    }
    out.push(h);
}

fn lexicographic(a: &DVector<f64>, b: &DVector<f64>) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

pub(crate) fn dedup_points_in_place(points: &mut Vec<DVector<f64>>, tol: f64) {
    if points.len() < 2 {
        return;
    }
    points.sort_by(lexicographic);
    // sorting only groups along the first axis; sweep pairwise for the rest
    let mut out: Vec<DVector<f64>> = Vec::with_capacity(points.len());
    for p in points.drain(..) {
        if !out.iter().any(|q| (q - &p).norm() < tol) {
            out.push(p);
        }
    }
    *points = out;
}

/// Sort 2D points counter-clockwise around their centroid.
pub(crate) fn order_ccw(points: &mut [DVector<f64>]) {
    if points.len() < 3 {
        return;
    }
    let mut centroid = DVector::zeros(2);
    for p in points.iter() {
        centroid += p;
    }
    centroid /= points.len() as f64;
    let angle = |p: &DVector<f64>| (p[1] - centroid[1]).atan2(p[0] - centroid[0]);
    points.sort_by(|a, b| angle(a).partial_cmp(&angle(b)).unwrap_or(Ordering::Equal));
}
