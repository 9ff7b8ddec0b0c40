// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Smallest enclosing circle of a set of circles.
//!
//! Randomized incremental construction: circles are visited in a shuffled
//! order and the support basis (at most three circles) is rebuilt whenever a
//! circle falls outside the current enclosure.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`

/// A circle in layout-local coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Disc {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) r: f64,
}

/// Linear congruential generator with a fixed seed.
///
/// Packing must be reproducible, so every layout starts from the same state.
#[derive(Clone, Debug)]
pub(crate) struct Lcg(u64);

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    pub(crate) fn new() -> Self {
        Self(1)
    }

    /// Next value in `[0, 1)`.
    pub(crate) fn next_f64(&mut self) -> f64 {
        self.0 = (Self::A * self.0 + Self::C) % Self::M;
        self.0 as f64 / Self::M as f64
    }
}

fn shuffle(items: &mut [Disc], rng: &mut Lcg) {
    let mut m = items.len();
    while m > 0 {
        #[expect(clippy::cast_possible_truncation, reason = "product is in [0, m)")]
        let i = (rng.next_f64() * m as f64) as usize;
        m -= 1;
        items.swap(m, i.min(m));
    }
}

/// Encloses `circles`, or returns `None` if the basis could not be extended.
///
/// An empty input yields a zero circle at the origin.
pub(crate) fn enclose(circles: &[Disc], rng: &mut Lcg) -> Option<Disc> {
    let mut order: Vec<Disc> = circles.to_vec();
    shuffle(&mut order, rng);

    let n = order.len();
    // Restarts are expected to be rare; a run that keeps restarting is numerically
    // stuck and is reported as a failure.
    let mut restarts_left = 4 * n * n + 16;
    let mut basis: Vec<Disc> = Vec::new();
    let mut e: Option<Disc> = None;
    let mut i = 0;
    while i < n {
        let p = order[i];
        if e.is_some_and(|e| encloses_weak(e, p)) {
            i += 1;
            continue;
        }
        if restarts_left == 0 {
            return None;
        }
        restarts_left -= 1;
        basis = extend_basis(&basis, p)?;
        e = Some(enclose_basis(&basis));
        i = 0;
    }
    Some(e.unwrap_or_default())
}

/// A circle that certainly contains `circles`, centered on their centroid.
pub(crate) fn enclose_conservative(circles: &[Disc]) -> Disc {
    if circles.is_empty() {
        return Disc::default();
    }
    let n = circles.len() as f64;
    let cx = circles.iter().map(|c| c.x).sum::<f64>() / n;
    let cy = circles.iter().map(|c| c.y).sum::<f64>() / n;
    let r = circles
        .iter()
        .map(|c| ((c.x - cx) * (c.x - cx) + (c.y - cy) * (c.y - cy)).sqrt() + c.r)
        .fold(0.0, f64::max);
    Disc { x: cx, y: cy, r }
}

fn extend_basis(basis: &[Disc], p: Disc) -> Option<Vec<Disc>> {
    if encloses_weak_all(p, basis) {
        return Some(vec![p]);
    }
    for &b in basis {
        if encloses_not(p, b) && encloses_weak_all(enclose_basis2(b, p), basis) {
            return Some(vec![b, p]);
        }
    }
    for (i, &bi) in basis.iter().enumerate() {
        for &bj in &basis[i + 1..] {
            if encloses_not(enclose_basis2(bi, bj), p)
                && encloses_not(enclose_basis2(bi, p), bj)
                && encloses_not(enclose_basis2(bj, p), bi)
                && encloses_weak_all(enclose_basis3(bi, bj, p), basis)
            {
                return Some(vec![bi, bj, p]);
            }
        }
    }
    None
}

fn encloses_not(a: Disc, b: Disc) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: Disc, b: Disc) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: Disc, basis: &[Disc]) -> bool {
    basis.iter().all(|&b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Disc]) -> Disc {
    match *basis {
        [a] => a,
        [a, b] => enclose_basis2(a, b),
        [a, b, c] => enclose_basis3(a, b, c),
        _ => Disc::default(),
    }
}

fn enclose_basis2(a: Disc, b: Disc) -> Disc {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = (x21 * x21 + y21 * y21).sqrt();
    if l == 0.0 {
        // Concentric: the larger circle already encloses the other.
        return if a.r >= b.r { a } else { b };
    }
    Disc {
        x: (a.x + b.x + x21 / l * r21) / 2.0,
        y: (a.y + b.y + y21 / l * r21) / 2.0,
        r: (l + a.r + b.r) / 2.0,
    }
}

fn enclose_basis3(a: Disc, b: Disc, c: Disc) -> Disc {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);
    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });
    Disc {
        x: x1 + xa + xb * r,
        y: y1 + ya + yb * r,
        r,
    }
}
