//! Vector graphics providers
//!
//! Native emits the vector component tree (`Svg`, `Rect`, ...); web emits
//! inline SVG elements the browser draws itself.

use crate::domain::{GraphicsProvider, Node, Shape, ViewBox};

fn num(value: f32) -> String {
    // 12.0 -> "12", 12.5 -> "12.5"
    format!("{}", value)
}

fn shape_node(shape: &Shape, names: [&str; 3]) -> Node {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => Node::element(names[0])
            .attr("x", num(*x))
            .attr("y", num(*y))
            .attr("width", num(*width))
            .attr("height", num(*height))
            .attr("fill", fill.as_str()),
        Shape::Circle { cx, cy, r, fill } => Node::element(names[1])
            .attr("cx", num(*cx))
            .attr("cy", num(*cy))
            .attr("r", num(*r))
            .attr("fill", fill.as_str()),
        Shape::Path { d, stroke } => Node::element(names[2])
            .attr("d", d.as_str())
            .attr("stroke", stroke.as_str()),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NativeGraphics;

impl GraphicsProvider for NativeGraphics {
    fn canvas(&self, view: ViewBox, children: Vec<Node>) -> Node {
        Node::element("Svg")
            .attr("width", num(view.width))
            .attr("height", num(view.height))
            .with_children(children)
    }

    fn shape(&self, shape: &Shape) -> Node {
        shape_node(shape, ["Rect", "Circle", "Path"])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WebGraphics;

impl GraphicsProvider for WebGraphics {
    fn canvas(&self, view: ViewBox, children: Vec<Node>) -> Node {
        Node::element("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", num(view.width))
            .attr("height", num(view.height))
            .attr(
                "viewBox",
                format!("0 0 {} {}", num(view.width), num(view.height)),
            )
            .with_children(children)
    }

    fn shape(&self, shape: &Shape) -> Node {
        shape_node(shape, ["rect", "circle", "path"])
    }
}
