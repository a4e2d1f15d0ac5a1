//! Bins segments into horizontal strips for fast per-scanline queries.

use crate::segment::Segment;

/// A segment plus its line equation `y = m*x + b` (vertical segments set
/// `m = 0` and store their x-coordinate in `b`), cached so the coverage
/// engine never re-derives it per scanline.
#[derive(Clone, Copy, Debug)]
pub struct PartitionEntry {
    pub segment: Segment,
    pub m: f32,
    pub b: f32,
}

impl PartitionEntry {
    fn new(segment: Segment) -> Self {
        if segment.is_vertical() {
            Self {
                segment,
                m: 0.,
                b: segment.at.x,
            }
        } else {
            let m = (segment.to.y - segment.at.y) / (segment.to.x - segment.at.x);
            let b = segment.at.y - m * segment.at.x;
            Self { segment, m, b }
        }
    }

    /// The x-coordinate this entry's line crosses at `y`.
    #[must_use]
    pub fn x_at(&self, y: f32) -> f32 {
        if self.segment.is_vertical() {
            self.b
        } else {
            (y - self.b) / self.m
        }
    }
}

/// One horizontal band of the raster, with the entries whose y-extent
/// overlaps it.
#[derive(Clone, Debug)]
pub struct Strip {
    pub y0: f32,
    pub y1: f32,
    pub entries: Vec<PartitionEntry>,
    pub requires_antialiasing: bool,
}

/// The full set of strips covering a path's y-range.
#[derive(Clone, Debug)]
pub struct Partitioning {
    pub start_y: f32,
    pub strip_height: f32,
    pub strips: Vec<Strip>,
}

impl Partitioning {
    /// The strip covering scanline `y`.
    #[must_use]
    pub fn strip_for(&self, y: f32) -> &Strip {
        if self.strips.is_empty() {
            unreachable!("partitioning built from a non-empty segment list always has >=1 strip");
        }
        let index = ((y - self.start_y) / self.strip_height) as isize;
        let index = index.clamp(0, self.strips.len() as isize - 1) as usize;
        &self.strips[index]
    }
}

/// Partition `segments` into strips per `spec.md` §4.4: strip count is
/// `min(max(1, height/4), max(1, segments/2))`, and every entry is
/// assigned to every strip whose `[at.y, to.y]` range it intersects.
#[must_use]
pub fn partition(segments: &[Segment]) -> Partitioning {
    if segments.is_empty() {
        return Partitioning {
            start_y: 0.,
            strip_height: 1.,
            strips: vec![Strip {
                y0: 0.,
                y1: 1.,
                entries: Vec::new(),
                requires_antialiasing: false,
            }],
        };
    }

    let start_y = segments.iter().map(|s| s.at.y).fold(f32::INFINITY, f32::min);
    let end_y = segments.iter().map(|s| s.to.y).fold(f32::NEG_INFINITY, f32::max);
    let raw_height = end_y - start_y;
    let height = raw_height.max(f32::EPSILON);

    let by_height = ((height / 4.0).floor() as usize).max(1);
    let by_segment_count = (segments.len() / 2).max(1);
    let strip_count = by_height.min(by_segment_count).max(1);
    if strip_count == 1 && (raw_height <= f32::EPSILON || segments.len() < 2) {
        log::warn!(
            "partitioning collapsed to a single strip for a degenerate path (height={raw_height}, segments={})",
            segments.len()
        );
    }
    let strip_height = height / strip_count as f32;

    let entries: Vec<PartitionEntry> = segments.iter().copied().map(PartitionEntry::new).collect();

    let mut strips: Vec<Strip> = (0..strip_count)
        .map(|i| {
            let y0 = start_y + i as f32 * strip_height;
            let y1 = if i + 1 == strip_count {
                end_y
            } else {
                start_y + (i + 1) as f32 * strip_height
            };
            Strip {
                y0,
                y1,
                entries: Vec::new(),
                requires_antialiasing: false,
            }
        })
        .collect();

    for entry in &entries {
        for strip in &mut strips {
            if entry.segment.at.y <= strip.y1 && entry.segment.to.y >= strip.y0 {
                strip.entries.push(*entry);
            }
        }
    }

    for strip in &mut strips {
        strip.requires_antialiasing = !strip.entries.iter().all(|e| {
            e.segment.is_vertical()
                && e.segment.at.y.fract() == 0.
                && e.segment.to.y.fract() == 0.
                && e.segment.at.x.fract() == 0.
        });
    }

    Partitioning {
        start_y,
        strip_height,
        strips,
    }
}
