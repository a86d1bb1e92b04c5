//! SVG rendering of a laid-out association graph.

use crate::domain::{GraphScene, Point};
use crate::error::GraphError;
use crate::port::GraphRenderer;

/// Visual settings for the rendered graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStyle {
    pub width: u32,
    pub height: u32,
    pub node_radius: f64,
    pub node_color: String,
    pub edge_color: String,
    pub edge_opacity: f64,
    pub arrow_size: f64,
    pub node_font_size: f64,
    pub edge_font_size: f64,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            node_radius: 28.0,
            node_color: "#87ceeb".into(),
            edge_color: "#808080".into(),
            edge_opacity: 0.7,
            arrow_size: 15.0,
            node_font_size: 9.0,
            edge_font_size: 8.0,
        }
    }
}

impl GraphStyle {
    /// Blank border kept around the drawing so nodes are never clipped.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.node_radius + 10.0
    }

    /// Each canvas side must be strictly larger than this, in pixels.
    #[must_use]
    pub fn min_side(&self) -> f64 {
        2.0 * self.margin()
    }

    #[must_use]
    pub fn fits_canvas(&self) -> bool {
        let fits = |side: u32| f64::from(side) > self.min_side();
        fits(self.width) && fits(self.height)
    }
}

/// Renders scenes as standalone SVG documents.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    style: GraphStyle,
}

impl SvgRenderer {
    #[must_use]
    pub fn new(style: GraphStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &GraphStyle {
        &self.style
    }

    /// Map a layout point in `[-1, 1]` to canvas pixels, y pointing down.
    fn project(&self, point: Point, margin: f64) -> (f64, f64) {
        let inner_w = f64::from(self.style.width) - 2.0 * margin;
        let inner_h = f64::from(self.style.height) - 2.0 * margin;
        (
            margin + (point.x + 1.0) / 2.0 * inner_w,
            margin + (1.0 - point.y) / 2.0 * inner_h,
        )
    }

    fn margin(&self) -> f64 {
        self.style.margin()
    }

    fn check_canvas(&self) -> Result<(), GraphError> {
        if !self.style.fits_canvas() {
            return Err(GraphError::InvalidCanvas {
                width: self.style.width,
                height: self.style.height,
            });
        }
        Ok(())
    }
}

impl GraphRenderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, scene: &GraphScene) -> Result<String, GraphError> {
        self.check_canvas()?;
        if scene.is_empty() {
            return Err(GraphError::Empty);
        }
        if let Some(node) = scene.nodes.iter().find(|n| !n.position.is_finite()) {
            return Err(GraphError::NonFinitePosition {
                node: node.item.clone(),
            });
        }

        let style = &self.style;
        let margin = self.margin();
        let r = style.node_radius;
        let at = |item: &str| {
            scene
                .node(item)
                .map(|node| self.project(node.position, margin))
        };

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n",
            w = style.width,
            h = style.height,
        ));
        svg.push_str("<title>Association Network</title>\n");
        svg.push_str(&format!(
            "<defs><marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerUnits=\"userSpaceOnUse\" markerWidth=\"{a}\" markerHeight=\"{a}\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{c}\"/></marker></defs>\n",
            a = style.arrow_size,
            c = style.edge_color,
        ));
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

        let mut labels = Vec::with_capacity(scene.edges.len());
        svg.push_str(&format!(
            "<g stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"1.5\" fill=\"none\">\n",
            style.edge_color, style.edge_opacity
        ));
        for edge in &scene.edges {
            let (Some((x1, y1)), Some((x2, y2))) = (at(&edge.source), at(&edge.target)) else {
                continue;
            };

            if edge.source == edge.target {
                svg.push_str(&format!(
                    "<path d=\"M {:.1} {:.1} C {:.1} {:.1} {:.1} {:.1} {:.1} {:.1}\" marker-end=\"url(#arrow)\"/>\n",
                    x1 - r * 0.5,
                    y1 - r * 0.85,
                    x1 - r * 1.5,
                    y1 - r * 3.0,
                    x1 + r * 1.5,
                    y1 - r * 3.0,
                    x1 + r * 0.5,
                    y1 - r * 0.85,
                ));
                labels.push((x1, y1 - r * 2.4, &edge.label));
                continue;
            }

            let (dx, dy) = (x2 - x1, y2 - y1);
            let length = dx.hypot(dy);
            let (sx, sy, ex, ey) = if length > 2.0 * r {
                let (ux, uy) = (dx / length, dy / length);
                (x1 + ux * r, y1 + uy * r, x2 - ux * r, y2 - uy * r)
            } else {
                (x1, y1, x2, y2)
            };
            svg.push_str(&format!(
                "<line x1=\"{sx:.1}\" y1=\"{sy:.1}\" x2=\"{ex:.1}\" y2=\"{ey:.1}\" marker-end=\"url(#arrow)\"/>\n"
            ));
            labels.push(((x1 + x2) / 2.0, (y1 + y2) / 2.0, &edge.label));
        }
        svg.push_str("</g>\n");

        svg.push_str(&format!(
            "<g fill=\"{}\" fill-opacity=\"{}\">\n",
            style.node_color, style.edge_opacity
        ));
        for node in &scene.nodes {
            let (x, y) = self.project(node.position, margin);
            svg.push_str(&format!(
                "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"{r:.1}\"/>\n"
            ));
        }
        svg.push_str("</g>\n");

        svg.push_str(&format!(
            "<g font-size=\"{}\" font-weight=\"bold\" text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"#000000\">\n",
            style.node_font_size
        ));
        for node in &scene.nodes {
            let (x, y) = self.project(node.position, margin);
            svg.push_str(&format!(
                "<text x=\"{x:.1}\" y=\"{y:.1}\">{}</text>\n",
                escape(&node.item)
            ));
        }
        svg.push_str("</g>\n");

        svg.push_str(&format!(
            "<g font-size=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"#000000\" stroke=\"#ffffff\" stroke-width=\"3\" paint-order=\"stroke\">\n",
            style.edge_font_size
        ));
        for (x, y, label) in labels {
            svg.push_str(&format!(
                "<text x=\"{x:.1}\" y=\"{y:.1}\">{}</text>\n",
                escape(label)
            ));
        }
        svg.push_str("</g>\n</svg>\n");

        Ok(svg)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SceneEdge, SceneNode};

    fn scene() -> GraphScene {
        GraphScene {
            nodes: vec![
                SceneNode {
                    item: "bread".into(),
                    position: Point::new(-1.0, 0.0),
                },
                SceneNode {
                    item: "butter & jam".into(),
                    position: Point::new(1.0, 0.0),
                },
            ],
            edges: vec![SceneEdge {
                source: "bread".into(),
                target: "butter & jam".into(),
                weight: 2.46,
                label: "2.5".into(),
            }],
        }
    }

    #[test]
    fn renders_nodes_edges_and_labels() {
        let svg = SvgRenderer::default().render(&scene()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains("marker-end=\"url(#arrow)\""));
        assert!(svg.contains(">2.5</text>"));
        assert!(svg.contains(">bread</text>"));
    }

    #[test]
    fn escapes_item_names() {
        let svg = SvgRenderer::default().render(&scene()).unwrap();
        assert!(svg.contains("butter &amp; jam"));
        assert!(!svg.contains("butter & jam"));
    }

    #[test]
    fn projects_into_canvas_with_y_up() {
        let renderer = SvgRenderer::default();
        let margin = renderer.margin();
        let (x, y) = renderer.project(Point::new(-1.0, 1.0), margin);
        assert!((x - margin).abs() < 1e-9);
        assert!((y - margin).abs() < 1e-9);
        let (x, y) = renderer.project(Point::new(1.0, -1.0), margin);
        assert!((x - (1000.0 - margin)).abs() < 1e-9);
        assert!((y - (600.0 - margin)).abs() < 1e-9);
    }

    #[test]
    fn self_loop_renders_as_path() {
        let scene = GraphScene {
            nodes: vec![SceneNode {
                item: "a".into(),
                position: Point::new(0.0, 0.0),
            }],
            edges: vec![SceneEdge {
                source: "a".into(),
                target: "a".into(),
                weight: 1.5,
                label: "1.5".into(),
            }],
        };
        let svg = SvgRenderer::default().render(&scene).unwrap();
        assert!(svg.contains("<path d=\"M "));
        assert!(svg.contains(">1.5</text>"));
    }

    #[test]
    fn empty_scene_is_an_error() {
        assert!(matches!(
            SvgRenderer::default().render(&GraphScene::default()),
            Err(GraphError::Empty)
        ));
    }

    #[test]
    fn non_finite_position_is_an_error() {
        let mut scene = scene();
        scene.nodes[0].position = Point::new(f64::NAN, 0.0);
        match SvgRenderer::default().render(&scene) {
            Err(GraphError::NonFinitePosition { node }) => assert_eq!(node, "bread"),
            other => panic!("expected NonFinitePosition, got {other:?}"),
        }
    }

    #[test]
    fn tiny_canvas_is_an_error() {
        let renderer = SvgRenderer::new(GraphStyle {
            width: 40,
            height: 40,
            ..GraphStyle::default()
        });
        assert!(matches!(
            renderer.render(&scene()),
            Err(GraphError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn smallest_fitting_canvas_renders() {
        let style = GraphStyle {
            width: 77,
            height: 77,
            ..GraphStyle::default()
        };
        assert!(style.fits_canvas());
        assert!(SvgRenderer::new(style).render(&scene()).is_ok());

        let style = GraphStyle {
            width: 76,
            ..GraphStyle::default()
        };
        assert!(!style.fits_canvas());
        assert!(SvgRenderer::new(style).render(&scene()).is_err());
    }
}
