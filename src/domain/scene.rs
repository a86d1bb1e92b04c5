//! Laid-out association graph, ready to draw.

use serde::Serialize;

/// A position in layout space. Layouts are rescaled into `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub item: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneEdge {
    pub source: String,
    pub target: String,
    /// Lift of the rule that produced this edge.
    pub weight: f64,
    /// Weight rounded to one decimal place.
    pub label: String,
}

/// Nodes with coordinates and directed weighted edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphScene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl GraphScene {
    #[must_use]
    pub fn node(&self, item: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.item == item)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Format an edge weight the way graph labels show it.
#[must_use]
pub fn weight_label(weight: f64) -> String {
    format!("{weight:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_label_rounds_to_one_decimal() {
        assert_eq!(weight_label(2.0), "2.0");
        assert_eq!(weight_label(3.26), "3.3");
        assert_eq!(weight_label(1.04), "1.0");
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }
}
