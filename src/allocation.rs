// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine - Weighted Integer Allocation

//! Weighted integer allocation (largest-remainder method).
//!
//! Splits an integer total across buckets in proportion to real-valued
//! weights. The result always sums to exactly `total`: every daily,
//! categorical and geographic breakdown in this crate is built on it so
//! that a column foots to the figure it was derived from.

use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Split `total` into `weights.len()` non-negative integers summing to `total`.
///
/// Each bucket receives `floor(total * w / sum(w))`; the units lost to
/// flooring are handed out one at a time to the buckets with the largest
/// fractional remainders. Ties keep input order, so identical inputs always
/// produce identical output.
///
/// Callers pass positive weights. Negative or non-finite weights count as
/// zero, and a weight vector with no positive mass is split evenly rather
/// than dividing by zero.
pub fn allocate(total: u64, weights: &[f64]) -> Vec<u64> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }

    let weight_sum: f64 = weights.iter().map(|w| sanitize(*w)).sum();
    if !(weight_sum > 0.0 && weight_sum.is_finite()) {
        return allocate(total, &vec![1.0; n]);
    }

    let total_f = total as f64;
    let mut buckets = Vec::with_capacity(n);
    let mut remainders = Vec::with_capacity(n);
    for w in weights {
        let ideal = total_f * (sanitize(*w) / weight_sum);
        let floor = ideal.floor();
        buckets.push(floor as u64);
        remainders.push(ideal - floor);
    }

    // Stable sort: equal remainders stay in input order.
    let mut ranked: Vec<usize> = (0..n).collect();
    ranked.sort_by(|&a, &b| {
        remainders[b]
            .partial_cmp(&remainders[a])
            .unwrap_or(Ordering::Equal)
    });

    // Floors can sum past u64::MAX once totals exceed f64's integer range.
    let assigned: u128 = buckets.iter().map(|&b| u128::from(b)).sum();
    let total_wide = u128::from(total);
    if assigned <= total_wide {
        let leftover = total_wide - assigned;
        let (rounds, extra) = (leftover / n as u128, leftover % n as u128);
        for (rank, &idx) in ranked.iter().enumerate() {
            let share = rounds + u128::from((rank as u128) < extra);
            buckets[idx] = (u128::from(buckets[idx]) + share).min(u128::from(u64::MAX)) as u64;
        }
    } else {
        // Float error pushed the floors past the total; take the excess back
        // from the smallest remainders first.
        let mut excess = assigned - total_wide;
        while excess > 0 {
            for &idx in ranked.iter().rev() {
                if excess == 0 {
                    break;
                }
                if buckets[idx] > 0 {
                    buckets[idx] -= 1;
                    excess -= 1;
                }
            }
        }
    }

    buckets
}

/// Allocate `total` across `rows`, weighting each row by `weight(row)`.
pub fn allocate_by<T>(total: u64, rows: &[T], weight: impl Fn(&T) -> f64) -> Vec<u64> {
    let weights: Vec<f64> = rows.iter().map(weight).collect();
    allocate(total, &weights)
}

fn sanitize(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 {
        w
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
