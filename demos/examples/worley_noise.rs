// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worley (cell) noise on top of the k-d index.
//!
//! Feature points are scattered through unit cells with a per-cell hash, so the
//! same cell always gets the same points. Each pixel is mapped into world space
//! with a viewport transform, then shaded by its distance to the nearest feature
//! point (F1) or by `F2 - F1`. Panning the view past the scattered cells grows
//! the corpus, which rebuilds the whole index.
//!
//! Run:
//! - `cargo run -p arbor_demos --example worley_noise -- [output-dir]`
//! - `RUST_LOG=arbor_index=debug` shows each rebuild.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use arbor_index::{DistanceMetric, Euclidean, Index, Indexable, Manhattan};
use kurbo::{Affine, Point, Rect, Vec2};

const WIDTH: usize = 256;
const HEIGHT: usize = 256;
const CELLS_ACROSS: f64 = 8.0;
const MAX_PER_CELL: u64 = 3;

#[derive(Clone, Debug, PartialEq)]
struct Feature {
    at: [f64; 2],
}

impl Feature {
    fn new(p: Point) -> Self {
        Self { at: [p.x, p.y] }
    }
}

impl Indexable for Feature {
    fn coordinates(&self) -> &[f64] {
        &self.at
    }
}

fn hash(x: i64, y: i64, salt: u64) -> u64 {
    let mut h = (x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ salt.wrapping_mul(0x1656_67B1_9E37_79F9);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    h
}

fn unit(h: u64) -> f64 {
    (h >> 11) as f64 / (1_u64 << 53) as f64
}

/// Feature points for every cell whose origin lies in `cells`.
fn scatter(cells: Rect) -> Vec<Feature> {
    let mut out = Vec::new();
    for cy in cells.y0 as i64..cells.y1 as i64 {
        for cx in cells.x0 as i64..cells.x1 as i64 {
            let count = 1 + hash(cx, cy, 0) % MAX_PER_CELL;
            for i in 0..count {
                let offset = Vec2::new(
                    unit(hash(cx, cy, 2 * i + 1)),
                    unit(hash(cx, cy, 2 * i + 2)),
                );
                out.push(Feature::new(Point::new(cx as f64, cy as f64) + offset));
            }
        }
    }
    out
}

/// Cells a view needs, with a one-cell margin so edge pixels see their true neighbors.
fn cells_for(view: Affine) -> Rect {
    let world = view.transform_rect_bbox(Rect::new(0.0, 0.0, WIDTH as f64, HEIGHT as f64));
    world.inflate(1.0, 1.0).expand()
}

struct Field {
    index: Index<Feature>,
    covered: Rect,
}

impl Field {
    fn new(view: Affine) -> Result<Self, arbor_index::Error> {
        let covered = cells_for(view);
        let mut index = Index::new(2)?;
        index.build(scatter(covered))?;
        Ok(Self { index, covered })
    }

    /// Scatter any cells `view` needs that are not covered yet. Panning is rightward only.
    fn cover(&mut self, view: Affine) -> Result<(), arbor_index::Error> {
        let needed = cells_for(view);
        if needed.x1 > self.covered.x1 {
            let strip = Rect::new(self.covered.x1, self.covered.y0, needed.x1, self.covered.y1);
            self.index.extend(scatter(strip))?;
            self.covered.x1 = needed.x1;
        }
        Ok(())
    }

    /// `F1` when `contrast` is false, otherwise `F2 - F1`, clamped to `[0, 1]`.
    fn shade(
        &self,
        metric: &dyn DistanceMetric,
        p: Point,
        contrast: bool,
    ) -> Result<f64, arbor_index::Error> {
        let found = self.index.k_nearest_with_distances(metric, 2, &[p.x, p.y])?;
        let v = match found.as_slice() {
            [f1, f2] if contrast => f2.distance - f1.distance,
            [f1, ..] => f1.distance,
            [] => 1.0,
        };
        Ok(v.clamp(0.0, 1.0))
    }
}

fn render(
    field: &Field,
    view: Affine,
    metric: &dyn DistanceMetric,
    contrast: bool,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P5\n{WIDTH} {HEIGHT}\n255\n")?;
    let mut row = vec![0_u8; WIDTH];
    for py in 0..HEIGHT {
        for (px, texel) in row.iter_mut().enumerate() {
            let world = view * Point::new(px as f64 + 0.5, py as f64 + 0.5);
            let v = field.shade(metric, world, contrast)?;
            *texel = (v * 255.0).round() as u8;
        }
        out.write_all(&row)?;
    }
    out.flush()?;
    println!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dir: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    let px_to_cells = Affine::scale(CELLS_ACROSS / WIDTH as f64);
    let mut view = px_to_cells;
    let mut field = Field::new(view)?;
    println!("{} feature points", field.index.len());

    render(&field, view, &Euclidean, false, &dir.join("worley_f1.pgm"))?;
    render(&field, view, &Euclidean, true, &dir.join("worley_f2_f1.pgm"))?;

    view = Affine::translate(Vec2::new(CELLS_ACROSS * 0.75, 0.0)) * px_to_cells;
    field.cover(view)?;
    println!("{} feature points after panning", field.index.len());
    render(&field, view, &Manhattan, false, &dir.join("worley_f1_panned.pgm"))?;
    Ok(())
}
