//! Grid search followed by coordinate-wise hill-climbing.
//!
//! The parameter vector is split into blocks. Each block is grid-searched in
//! turn over `linspace(-π, π, grid_slices)` per axis while the other
//! parameters stay fixed (later blocks still at zero, earlier blocks at their
//! chosen values). The whole vector is then refined jointly by
//! hill-climbing with a fixed step. Trial points and moves wrap every
//! coordinate back into [-π, π], so no scored vector leaves the search range.
//!
//! The scoring function is fallible. The optimizer itself never fails; any
//! error comes from the scorer and is returned unchanged.
//!
//! # Example
//!
//! ```
//! use qatg_core::{GridHillClimber, SearchConfig};
//!
//! let climber = GridHillClimber::new(SearchConfig::default());
//! let outcome = climber.maximize_infallible(&[2], |p| {
//!     -(p[0] - 0.3).powi(2) - (p[1] + 1.2).powi(2)
//! });
//! assert!((outcome.params[0] - 0.3).abs() < 0.02);
//! assert!((outcome.params[1] + 1.2).abs() < 0.02);
//! ```

use std::convert::Infallible;
use std::f64::consts::PI;
use std::ops::Range;

use qatg_ir::Unitary2x2;
use tracing::{debug, trace};

use crate::config::SearchConfig;

/// Result of one optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Best parameter vector found.
    pub params: Vec<f64>,
    /// Score at `params`.
    pub score: f64,
    /// Best score after the grid phase.
    pub grid_score: f64,
    /// Hill-climbing rounds that moved the point.
    pub rounds: usize,
    /// Total number of scorer evaluations.
    pub evaluations: usize,
}

/// Two-phase maximizer: per-block grid search, then joint hill-climbing.
#[derive(Debug, Clone, Copy)]
pub struct GridHillClimber {
    config: SearchConfig,
}

impl GridHillClimber {
    /// Create an optimizer with the given settings.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// The optimizer settings.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Grid coordinates for one axis: `grid_slices` points from -π to π,
    /// both endpoints included.
    ///
    /// With an odd number of slices the middle point is exactly zero.
    pub fn grid_axis(&self) -> Vec<f64> {
        let n = self.config.grid_slices;
        if n <= 1 {
            return vec![-PI; n];
        }
        let m = (n - 1) as f64;
        (0..n)
            .map(|i| PI * ((2.0 * i as f64 - m) / m))
            .collect()
    }

    /// Grid-search the dimensions in `block`, holding the rest of `base`
    /// fixed.
    ///
    /// Points are visited in nested order with the first dimension of the
    /// block outermost. The first strictly maximal point wins. Returns the
    /// chosen vector, its score and the number of evaluations.
    pub fn grid_search<E, F>(
        &self,
        base: &[f64],
        block: Range<usize>,
        score: &mut F,
    ) -> Result<(Vec<f64>, f64, usize), E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let axis = self.grid_axis();
        let dims = block.len();
        let mut point = base.to_vec();
        let mut index = vec![0usize; dims];

        let mut best: Option<(Vec<f64>, f64)> = None;
        let mut evaluations = 0;

        if axis.is_empty() || dims == 0 {
            let value = score(&point)?;
            return Ok((point, value, 1));
        }

        loop {
            for (offset, &i) in index.iter().enumerate() {
                point[block.start + offset] = axis[i];
            }
            let value = score(&point)?;
            evaluations += 1;
            if best.as_ref().is_none_or(|(_, best_value)| value > *best_value) {
                best = Some((point.clone(), value));
            }

            // Odometer step, last dimension fastest.
            let mut d = dims;
            loop {
                if d == 0 {
                    let (params, value) = best.unwrap_or_else(|| (base.to_vec(), f64::NAN));
                    return Ok((params, value, evaluations));
                }
                d -= 1;
                index[d] += 1;
                if index[d] < axis.len() {
                    break;
                }
                index[d] = 0;
            }
        }
    }

    /// Coordinate-wise hill-climbing from `start`.
    ///
    /// Every round probes `+step` and `-step` on each dimension against the
    /// score at the current point, then applies all moves at once. A round
    /// with no movement ends the search. Coordinates are wrapped into
    /// [-π, π] after every trial step and move. Returns the final point, its
    /// score, the number of rounds that moved and the number of evaluations.
    pub fn hill_climb<E, F>(
        &self,
        start: Vec<f64>,
        score: &mut F,
    ) -> Result<(Vec<f64>, f64, usize, usize), E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let step = self.config.step;
        let mut params = start;
        let mut current = score(&params)?;
        let mut evaluations = 1;
        let mut rounds = 0;
        let mut moves = vec![0.0; params.len()];
        let mut probe = params.clone();

        for _ in 0..self.config.max_rounds {
            for (d, movement) in moves.iter_mut().enumerate() {
                probe.copy_from_slice(&params);
                probe[d] = Unitary2x2::normalize_angle(params[d] + step);
                let up = score(&probe)?;
                probe[d] = Unitary2x2::normalize_angle(params[d] - step);
                let down = score(&probe)?;
                evaluations += 2;

                *movement = if up > current && up >= down {
                    step
                } else if down > current && down >= up {
                    -step
                } else if up == current && current == down {
                    // Flat in this direction: keep walking.
                    step
                } else {
                    0.0
                };
            }

            if moves.iter().all(|&m| m == 0.0) {
                break;
            }
            for (p, m) in params.iter_mut().zip(&moves) {
                *p = Unitary2x2::normalize_angle(*p + m);
            }
            current = score(&params)?;
            evaluations += 1;
            rounds += 1;
        }

        trace!(rounds, score = current, "hill climb finished");
        Ok((params, current, rounds, evaluations))
    }

    /// Maximize `score` over a vector made of blocks with the given sizes.
    ///
    /// All parameters start at zero. Each block is grid-searched in order,
    /// then the full vector is hill-climbed jointly.
    pub fn maximize<E, F>(&self, blocks: &[usize], mut score: F) -> Result<SearchOutcome, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let len: usize = blocks.iter().sum();
        let mut params = vec![0.0; len];
        let mut grid_score = f64::NAN;
        let mut evaluations = 0;

        let mut start = 0;
        for (block, &size) in blocks.iter().enumerate() {
            let (best, value, evals) = self.grid_search(&params, start..start + size, &mut score)?;
            debug!(block, score = value, ?best, "grid search");
            params = best;
            grid_score = value;
            evaluations += evals;
            start += size;
        }

        let (params, score, rounds, evals) = self.hill_climb(params, &mut score)?;
        debug!(rounds, grid_score, score, "hill climb");

        Ok(SearchOutcome {
            params,
            score,
            grid_score,
            rounds,
            evaluations: evaluations + evals,
        })
    }

    /// [`GridHillClimber::maximize`] for a scorer that cannot fail.
    pub fn maximize_infallible<F>(&self, blocks: &[usize], mut score: F) -> SearchOutcome
    where
        F: FnMut(&[f64]) -> f64,
    {
        match self.maximize(blocks, |p| Ok::<f64, Infallible>(score(p))) {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn climber(grid_slices: usize, max_rounds: usize, step: f64) -> GridHillClimber {
        GridHillClimber::new(SearchConfig {
            grid_slices,
            max_rounds,
            step,
        })
    }

    #[test]
    fn test_grid_axis_endpoints() {
        let axis = climber(21, 10, 0.01).grid_axis();
        assert_eq!(axis.len(), 21);
        assert_eq!(axis[0], -PI);
        assert_eq!(axis[20], PI);
        assert_eq!(axis[10], 0.0);
        assert!(axis.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_grid_axis_single_slice() {
        assert_eq!(climber(1, 10, 0.01).grid_axis(), vec![-PI]);
    }

    #[test]
    fn test_grid_visits_first_dimension_outermost() {
        let c = climber(3, 0, 0.01);
        let mut visited = Vec::new();
        c.grid_search(&[0.0, 0.0], 0..2, &mut |p: &[f64]| {
            visited.push(p.to_vec());
            Ok::<_, Infallible>(0.0)
        })
        .unwrap();
        assert_eq!(visited.len(), 9);
        assert_eq!(visited[0], vec![-PI, -PI]);
        assert_eq!(visited[1], vec![-PI, 0.0]);
        assert_eq!(visited[3], vec![0.0, -PI]);
    }

    #[test]
    fn test_grid_ties_keep_first_point() {
        let c = climber(5, 0, 0.01);
        let (best, value, evaluations) = c
            .grid_search(&[0.0], 0..1, &mut |_: &[f64]| Ok::<_, Infallible>(1.0))
            .unwrap();
        assert_eq!(best, vec![-PI]);
        assert_eq!(value, 1.0);
        assert_eq!(evaluations, 5);
    }

    #[test]
    fn test_grid_search_holds_other_dimensions() {
        let c = climber(5, 0, 0.01);
        let (best, _, _) = c
            .grid_search(&[0.7, 0.0, 0.0], 1..3, &mut |p: &[f64]| {
                Ok::<_, Infallible>(-(p[1] - PI / 2.0).powi(2) - p[2].powi(2))
            })
            .unwrap();
        assert_eq!(best[0], 0.7);
        assert!((best[1] - PI / 2.0).abs() < 1e-12);
        assert_eq!(best[2], 0.0);
    }

    #[test]
    fn test_hill_climb_reaches_peak() {
        let c = climber(1, 1000, 0.01);
        let (params, _, rounds, _) = c
            .hill_climb(vec![0.0], &mut |p: &[f64]| Ok::<_, Infallible>(-(p[0] - 0.5).powi(2)))
            .unwrap();
        assert!((params[0] - 0.5).abs() < 0.011);
        assert!(rounds >= 49 && rounds < 1000);
    }

    #[test]
    fn test_hill_climb_flat_score_walks_forward() {
        let c = climber(1, 7, 0.25);
        let (params, _, rounds, _) = c
            .hill_climb(vec![0.0, 1.0], &mut |_: &[f64]| Ok::<_, Infallible>(2.0))
            .unwrap();
        assert_eq!(rounds, 7);
        assert!((params[0] - 1.75).abs() < 1e-12);
        assert!((params[1] - 2.75).abs() < 1e-12);
    }

    #[test]
    fn test_hill_climb_wraps_past_pi() {
        let c = climber(1, 2, 0.25);
        let (params, _, rounds, _) = c
            .hill_climb(vec![3.0, -3.0], &mut |_: &[f64]| Ok::<_, Infallible>(1.0))
            .unwrap();
        assert_eq!(rounds, 2);
        assert!((params[0] - (3.5 - 2.0 * PI)).abs() < 1e-12);
        assert!((params[1] + 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_hill_climb_scores_only_in_range_points() {
        let c = climber(1, 50, 0.1);
        let mut out_of_range = 0;
        c.hill_climb(vec![-PI, PI], &mut |p: &[f64]| {
            out_of_range += p.iter().filter(|x| !(-PI..=PI).contains(*x)).count();
            Ok::<_, Infallible>(p[0].sin() + p[1].cos())
        })
        .unwrap();
        assert_eq!(out_of_range, 0);
    }

    #[test]
    fn test_hill_climb_stops_at_strict_maximum() {
        let c = climber(1, 100, 0.1);
        let (params, score, rounds, evaluations) = c
            .hill_climb(vec![0.0], &mut |p: &[f64]| Ok::<_, Infallible>(-p[0].abs()))
            .unwrap();
        assert_eq!(params, vec![0.0]);
        assert_eq!(score, 0.0);
        assert_eq!(rounds, 0);
        assert_eq!(evaluations, 3);
    }

    #[test]
    fn test_hill_climb_prefers_up_on_tie() {
        let c = climber(1, 1, 0.1);
        let (params, _, _, _) = c
            .hill_climb(vec![0.0], &mut |p: &[f64]| Ok::<_, Infallible>(p[0].abs()))
            .unwrap();
        assert!((params[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_maximize_two_blocks() {
        let c = climber(9, 400, 0.01);
        let target = [0.3, -0.4, 1.1, -2.0, 0.25, 0.9];
        let outcome = c.maximize_infallible(&[3, 3], |p| {
            -p.iter().zip(&target).map(|(a, b)| (a - b).powi(2)).sum::<f64>()
        });
        for (found, want) in outcome.params.iter().zip(&target) {
            assert!((found - want).abs() < 0.011, "{found} vs {want}");
        }
        assert!(outcome.score >= outcome.grid_score);
    }

    #[test]
    fn test_scorer_error_propagates() {
        let c = climber(3, 10, 0.01);
        let mut calls = 0;
        let result = c.maximize(&[3], |_| {
            calls += 1;
            if calls == 4 { Err("boom") } else { Ok(0.0) }
        });
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(calls, 4);
    }
}
