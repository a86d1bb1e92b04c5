//! Force-directed (Fruchterman-Reingold) spring layout.
//!
//! Every node repels every other node with force `k² / d`; nodes joined by
//! an edge attract with force `w · d² / k`, where `w` is the summed weight of
//! the edges between them in either direction. Each iteration moves every
//! node a fixed "temperature" step along its net force, and the temperature
//! cools linearly to zero, so the run is bounded by `iterations`.
//!
//! Initial positions are drawn from a seeded RNG, so a given seed always
//! yields the same layout. Results are centred and rescaled into `[-1, 1]`.

use std::collections::BTreeMap;

use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::builder::AssociationGraph;
use crate::domain::{GraphScene, Point, SceneNode};

const MIN_DISTANCE: f64 = 0.01;
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Spring layout tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Optimal distance between nodes. Larger spreads the graph out.
    pub k: f64,
    /// Upper bound on iterations.
    pub iterations: usize,
    pub seed: u64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            k: 0.8,
            iterations: 50,
            seed: 42,
        }
    }
}

/// Positions for every node, indexed like the graph's nodes.
#[must_use]
pub fn spring_layout(graph: &AssociationGraph, params: &LayoutParams) -> Vec<Point> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![Point::new(0.0, 0.0)],
        _ => {}
    }

    let neighbours = neighbour_weights(graph);

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.gen(), rng.gen()]).collect();

    let k = params.k;
    let mut temperature = initial_temperature(&pos);
    let cooling = temperature / (params.iterations as f64 + 1.0);

    for _ in 0..params.iterations {
        let mut displacement = vec![[0.0f64; 2]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (dx, dy, distance) = offset(&pos, i, j);
                let force = k * k / (distance * distance);
                displacement[i][0] += dx * force;
                displacement[i][1] += dy * force;
            }
            for &(j, weight) in &neighbours[i] {
                let (dx, dy, distance) = offset(&pos, i, j);
                let force = weight * distance / k;
                displacement[i][0] -= dx * force;
                displacement[i][1] -= dy * force;
            }
        }

        let mut moved: f64 = 0.0;
        for (p, d) in pos.iter_mut().zip(&displacement) {
            let length = d[0].hypot(d[1]).max(MIN_DISTANCE);
            let step = [d[0] * temperature / length, d[1] * temperature / length];
            p[0] += step[0];
            p[1] += step[1];
            moved += step[0] * step[0] + step[1] * step[1];
        }

        temperature -= cooling;
        if moved.sqrt() / (n as f64) < CONVERGENCE_THRESHOLD {
            break;
        }
    }

    rescale(&mut pos);
    pos.into_iter().map(|[x, y]| Point::new(x, y)).collect()
}

/// Lay out the graph and pair positions with items and edges.
#[must_use]
pub fn lay_out(graph: &AssociationGraph, params: &LayoutParams) -> GraphScene {
    let positions = spring_layout(graph, params);
    let nodes = graph
        .items()
        .zip(positions)
        .map(|(item, position)| SceneNode {
            item: item.to_string(),
            position,
        })
        .collect();

    GraphScene {
        nodes,
        edges: graph.edges(),
    }
}

/// Per-node attraction weights: for each node, its distinct neighbours with
/// the summed lift of the edges joining them in either direction. Self-loops
/// exert no force and are left out.
fn neighbour_weights(graph: &AssociationGraph) -> Vec<Vec<(usize, f64)>> {
    let mut merged: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); graph.node_count()];
    for edge in graph.inner().edge_references() {
        let (i, j) = (edge.source().index(), edge.target().index());
        if i != j {
            *merged[i].entry(j).or_default() += *edge.weight();
            *merged[j].entry(i).or_default() += *edge.weight();
        }
    }
    merged
        .into_iter()
        .map(|weights| weights.into_iter().collect())
        .collect()
}

fn offset(pos: &[[f64; 2]], i: usize, j: usize) -> (f64, f64, f64) {
    let dx = pos[i][0] - pos[j][0];
    let dy = pos[i][1] - pos[j][1];
    (dx, dy, dx.hypot(dy).max(MIN_DISTANCE))
}

fn initial_temperature(pos: &[[f64; 2]]) -> f64 {
    let span = |axis: usize| {
        let (lo, hi) = pos
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[axis]), hi.max(p[axis]))
            });
        hi - lo
    };
    let t = span(0).max(span(1)) * 0.1;
    if t > 0.0 {
        t
    } else {
        0.1
    }
}

fn rescale(pos: &mut [[f64; 2]]) {
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut limit: f64 = 0.0;
    for p in pos.iter_mut() {
        p[0] -= mean_x;
        p[1] -= mean_y;
        limit = limit.max(p[0].abs()).max(p[1].abs());
    }

    if limit > 0.0 {
        for p in pos.iter_mut() {
            p[0] /= limit;
            p[1] /= limit;
        }
    }
}
