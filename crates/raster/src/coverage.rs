//! Per-scanline coverage computation: strip selection, sub-pixel sampling,
//! hit sorting and span walking.

use crate::partition::Partitioning;
use crate::winding::FillRule;

const EPSILON: f32 = 1e-4;

struct Hit {
    x: f32,
    winding: i32,
}

/// Compute one scanline's coverage byte array (`width` bytes, one per
/// pixel) for row `y`.
#[must_use]
pub fn paint_row(partitioning: &Partitioning, y: usize, width: usize, rule: FillRule) -> Vec<u8> {
    let strip = partitioning.strip_for(y as f32 + 0.5);

    let mut accum = vec![0.0f32; width];

    if strip.requires_antialiasing {
        const STEP: f32 = 1. / 5.;
        const WEIGHT: f32 = 255. / 5.;
        let mut sample = y as f32 + 1. / 10. + EPSILON;
        for _ in 0..5 {
            accumulate_sample(strip, sample, width, rule, WEIGHT, &mut accum);
            sample += STEP;
        }
    } else {
        let sample = y as f32 + 1. / 2. + EPSILON;
        write_sample_opaque(strip, sample, width, rule, &mut accum);
    }

    accum
        .into_iter()
        .map(|v| v.round().clamp(0., 255.) as u8)
        .collect()
}

fn collect_hits(strip: &crate::partition::Strip, sample_y: f32, width: usize) -> Vec<Hit> {
    let mut hits: Vec<Hit> = strip
        .entries
        .iter()
        .filter(|entry| sample_y >= entry.segment.at.y && sample_y < entry.segment.to.y)
        .map(|entry| Hit {
            x: entry.x_at(sample_y).min(width as f32),
            winding: entry.segment.winding,
        })
        .collect();
    hybrid_sort(&mut hits);
    merge_coincident(hits)
}

/// Merge adjacent hits at (nearly) the same x, summing their windings, so a
/// shared vertex between two edges doesn't register as two separate
/// crossings.
fn merge_coincident(hits: Vec<Hit>) -> Vec<Hit> {
    let mut merged: Vec<Hit> = Vec::with_capacity(hits.len());
    for hit in hits {
        if let Some(last) = merged.last_mut() {
            if (last.x - hit.x).abs() < EPSILON {
                last.winding += hit.winding;
                continue;
            }
        }
        merged.push(hit);
    }
    merged
}

fn accumulate_sample(
    strip: &crate::partition::Strip,
    sample_y: f32,
    width: usize,
    rule: FillRule,
    weight: f32,
    accum: &mut [f32],
) {
    let hits = collect_hits(strip, sample_y, width);
    let mut running = 0;
    let mut prev_x: Option<f32> = None;
    for hit in hits {
        if let Some(px) = prev_x {
            if rule.should_fill(running) {
                add_span(accum, width, px, hit.x, weight);
            }
        }
        running += hit.winding;
        prev_x = Some(hit.x);
    }
}

/// Non-AA sampling: writes 255 directly over covered pixels rather than
/// accumulating fractional weight.
fn write_sample_opaque(strip: &crate::partition::Strip, sample_y: f32, width: usize, rule: FillRule, accum: &mut [f32]) {
    let hits = collect_hits(strip, sample_y, width);
    let mut running = 0;
    let mut prev_x: Option<f32> = None;
    for hit in hits {
        if let Some(px) = prev_x {
            if rule.should_fill(running) {
                let x0 = px.clamp(0., width as f32);
                let x1 = hit.x.clamp(0., width as f32);
                let start = x0.floor() as usize;
                let end = x1.ceil() as usize;
                for pixel in start..end.min(width) {
                    accum[pixel] = 255.;
                }
            }
        }
        running += hit.winding;
        prev_x = Some(hit.x);
    }
}

/// Adds `weight` to `accum`, scaled by each pixel's fractional overlap with
/// `[x0, x1)`.
fn add_span(accum: &mut [f32], width: usize, x0: f32, x1: f32, weight: f32) {
    let x0 = x0.clamp(0., width as f32);
    let x1 = x1.clamp(0., width as f32);
    if x1 <= x0 {
        return;
    }
    let start = x0.floor() as usize;
    let end = (x1.ceil() as usize).min(width);
    for pixel in start..end {
        let overlap = (x1.min(pixel as f32 + 1.) - x0.max(pixel as f32)).max(0.);
        accum[pixel] += weight * overlap;
    }
}

fn hybrid_sort(hits: &mut [Hit]) {
    if hits.len() <= 32 {
        insertion_sort(hits);
    } else {
        quicksort(hits);
    }
}

fn quicksort(hits: &mut [Hit]) {
    if hits.len() <= 32 {
        insertion_sort(hits);
        return;
    }
    let pivot_index = partition_lomuto(hits);
    let (left, rest) = hits.split_at_mut(pivot_index);
    quicksort(left);
    quicksort(&mut rest[1..]);
}

fn partition_lomuto(hits: &mut [Hit]) -> usize {
    let last = hits.len() - 1;
    let pivot = hits[last].x;
    let mut i = 0;
    for j in 0..last {
        if hits[j].x < pivot {
            hits.swap(i, j);
            i += 1;
        }
    }
    hits.swap(i, last);
    i
}

fn insertion_sort(hits: &mut [Hit]) {
    for i in 1..hits.len() {
        let mut j = i;
        while j > 0 && hits[j - 1].x > hits[j].x {
            hits.swap(j - 1, j);
            j -= 1;
        }
    }
}
