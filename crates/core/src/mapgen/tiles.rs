//! Platform tile art selection that avoids visible repetition.
//!
//! Every candidate `(variant, flip)` pair is scored against the tiles already
//! placed around it, then one is drawn at random from the best quarter so
//! neighbouring floors never settle into a repeating pattern.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use crate::random::RandomSource;
use crate::types::GridPos;

pub const VARIANT_COUNT: usize = 12;
pub const RECENT_WINDOW: usize = 8;

/// Variants drawn from the same source art; neighbours should not share one.
const ART_FAMILIES: [&[u8]; 3] = [&[0, 1, 2, 3], &[4, 5, 6], &[8, 9, 10]];

const BASE_SCORE: f64 = 100.0;
const ORTHOGONAL_PENALTIES: AdjacencyPenalties =
    AdjacencyPenalties { identical: 80.0, same_variant: 40.0, same_family: 60.0 };
const DIAGONAL_PENALTIES: AdjacencyPenalties =
    AdjacencyPenalties { identical: 30.0, same_variant: 15.0, same_family: 25.0 };
const USAGE_BALANCE_WEIGHT: f64 = 5.0;
const NOT_RECENT_BONUS: f64 = 20.0;
const JITTER: f64 = 10.0;
const MIN_SHORTLIST: usize = 6;

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TileGridEntry {
    pub variant: u8,
    pub flip_x: bool,
}

struct AdjacencyPenalties {
    identical: f64,
    same_variant: f64,
    same_family: f64,
}

impl AdjacencyPenalties {
    /// Family overlap stacks on top of the exact-match penalties.
    fn against(&self, neighbour: TileGridEntry, candidate: TileGridEntry) -> f64 {
        let mut penalty = 0.0;
        if neighbour == candidate {
            penalty += self.identical;
        } else if neighbour.variant == candidate.variant {
            penalty += self.same_variant;
        }
        if same_family(neighbour.variant, candidate.variant) {
            penalty += self.same_family;
        }
        penalty
    }
}

fn same_family(a: u8, b: u8) -> bool {
    ART_FAMILIES.iter().any(|family| family.contains(&a) && family.contains(&b))
}

#[derive(Clone, Debug, Default)]
pub struct TileVariantPicker {
    grid: BTreeMap<GridPos, TileGridEntry>,
    usage: [u32; VARIANT_COUNT],
    recent: VecDeque<u8>,
}

impl TileVariantPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant for a grid cell; the first answer for a cell is final.
    pub fn select_variant(
        &mut self,
        grid_x: i32,
        grid_y: i32,
        rng: &mut dyn RandomSource,
    ) -> TileGridEntry {
        let pos = GridPos { y: grid_y, x: grid_x };
        if let Some(&entry) = self.grid.get(&pos) {
            return entry;
        }

        let max_usage = self.usage.iter().copied().max().unwrap_or(0);
        let mut scored: Vec<(f64, TileGridEntry)> = Vec::with_capacity(VARIANT_COUNT * 2);
        for variant in 0..VARIANT_COUNT as u8 {
            for flip_x in [false, true] {
                let candidate = TileGridEntry { variant, flip_x };
                let score = self.score(pos, candidate, max_usage) + rng.uniform(0.0, JITTER);
                scored.push((score, candidate));
            }
        }
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let shortlist = (scored.len() / 4).max(MIN_SHORTLIST).min(scored.len());
        let pick = rng.pick_index(shortlist).unwrap_or(0);
        let entry = scored[pick].1;
        self.record(pos, entry);
        entry
    }

    pub fn entry_at(&self, grid_x: i32, grid_y: i32) -> Option<TileGridEntry> {
        self.grid.get(&GridPos { y: grid_y, x: grid_x }).copied()
    }

    pub fn usage_count(&self, variant: u8) -> u32 {
        self.usage.get(variant as usize).copied().unwrap_or(0)
    }

    pub fn recent(&self) -> impl Iterator<Item = u8> + '_ {
        self.recent.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (GridPos, TileGridEntry)> + '_ {
        self.grid.iter().map(|(&pos, &entry)| (pos, entry))
    }

    fn score(&self, pos: GridPos, candidate: TileGridEntry, max_usage: u32) -> f64 {
        let mut score = BASE_SCORE;
        for (dx, dy) in ORTHOGONAL {
            if let Some(&neighbour) = self.grid.get(&GridPos { y: pos.y + dy, x: pos.x + dx }) {
                score -= ORTHOGONAL_PENALTIES.against(neighbour, candidate);
            }
        }
        for (dx, dy) in DIAGONAL {
            if let Some(&neighbour) = self.grid.get(&GridPos { y: pos.y + dy, x: pos.x + dx }) {
                score -= DIAGONAL_PENALTIES.against(neighbour, candidate);
            }
        }
        let usage = self.usage[candidate.variant as usize];
        score += f64::from(max_usage - usage) * USAGE_BALANCE_WEIGHT;
        if !self.recent.contains(&candidate.variant) {
            score += NOT_RECENT_BONUS;
        }
        score
    }

    fn record(&mut self, pos: GridPos, entry: TileGridEntry) {
        self.grid.insert(pos, entry);
        self.usage[entry.variant as usize] += 1;
        self.recent.push_back(entry.variant);
        while self.recent.len() > RECENT_WINDOW {
            self.recent.pop_front();
        }
    }
}
