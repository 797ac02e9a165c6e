//! Text rendering and tree layout for sortscope containers.
//!
//! Renderers are pure: container in, text or coordinates out. None of them
//! touch a container's comparison counters.

use std::fmt::{Display, Write as _};

use itertools::Itertools;
use serde::Serialize;
use sortscope_bst::{BinarySearchTree, BstNode};

/// Default number of values per line in [`render_rows`].
pub const DEFAULT_ROW_WIDTH: usize = 20;

/// Renders values as space-terminated tokens, `per_row` to a line.
///
/// Every full row ends with a newline and the whole listing gets one more, so
/// an empty listing is a single newline.
pub fn render_rows<'a, T, I>(values: I, per_row: usize) -> String
where
    T: Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let per_row = per_row.max(1);
    let mut out = String::new();
    for chunk in &values.into_iter().chunks(per_row) {
        let mut count = 0;
        for value in chunk {
            let _ = write!(out, "{value} ");
            count += 1;
        }
        if count == per_row {
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

/// Renders the tree as an indented diagram in pre-order.
///
/// Left children are drawn with `├── ` and right children with `└── `,
/// whichever of the two is present.
pub fn render_tree<T: Display>(tree: &BinarySearchTree<T>) -> String {
    let mut out = String::new();
    // (node, its own prefix, prefix for its children); right is pushed first
    // so the left subtree is drawn first.
    let mut stack: Vec<(&BstNode<T>, String, String)> = tree
        .root()
        .map(|root| (root, String::new(), String::new()))
        .into_iter()
        .collect();
    while let Some((node, prefix, children_prefix)) = stack.pop() {
        let _ = writeln!(out, "{prefix}{}", node.value());
        if let Some(right) = node.right() {
            stack.push((right, format!("{children_prefix}└── "), format!("{children_prefix}    ")));
        }
        if let Some(left) = node.left() {
            stack.push((left, format!("{children_prefix}├── "), format!("{children_prefix}│   ")));
        }
    }
    out
}

/// Geometry for [`layout_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutOptions {
    /// Horizontal position of the root.
    pub origin_x: f64,
    /// Vertical position of the root.
    pub origin_y: f64,
    /// Horizontal distance budget at the root; halved for each child level.
    pub spread: f64,
    /// Vertical distance between levels.
    pub level_gap: f64,
}

impl LayoutOptions {
    /// Root centred on a canvas `width` wide.
    pub fn centered(width: f64) -> Self {
        Self {
            origin_x: width / 2.0,
            ..Self::default()
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            origin_x: 400.0,
            origin_y: 100.0,
            spread: 500.0,
            level_gap: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

/// Positions of every node plus parent-to-child edges, for a drawing surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<Edge>,
    pub height: usize,
}

impl TreeLayout {
    /// Smallest canvas (width, height) that keeps every node in view.
    pub fn bounds(&self, margin: f64) -> (f64, f64) {
        let max_x = self.nodes.iter().map(|n| n.x).fold(0.0, f64::max);
        let max_y = self.nodes.iter().map(|n| n.y).fold(0.0, f64::max);
        (max_x + margin, max_y + margin)
    }
}

/// A node waiting to be placed, with the index of its already placed parent.
struct Pending<'a, T> {
    node: &'a BstNode<T>,
    x: f64,
    y: f64,
    spread: f64,
    depth: usize,
    parent: Option<usize>,
}

/// Lays the tree out top-down in pre-order.
pub fn layout_tree<T: Display>(tree: &BinarySearchTree<T>, options: LayoutOptions) -> TreeLayout {
    let mut layout = TreeLayout {
        height: tree.height(),
        ..TreeLayout::default()
    };
    let mut stack: Vec<Pending<'_, T>> = tree
        .root()
        .map(|node| Pending {
            node,
            x: options.origin_x,
            y: options.origin_y,
            spread: options.spread,
            depth: 0,
            parent: None,
        })
        .into_iter()
        .collect();

    while let Some(Pending {
        node,
        x,
        y,
        spread,
        depth,
        parent,
    }) = stack.pop()
    {
        let index = layout.nodes.len();
        layout.nodes.push(PlacedNode {
            label: node.value().to_string(),
            x,
            y,
            depth,
        });
        if let Some(from) = parent {
            layout.edges.push(Edge { from, to: index });
        }

        let offset = spread / 2.0;
        let child = |node, x| Pending {
            node,
            x,
            y: y + options.level_gap,
            spread: offset,
            depth: depth + 1,
            parent: Some(index),
        };
        if let Some(right) = node.right() {
            stack.push(child(right, x + offset));
        }
        if let Some(left) = node.left() {
            stack.push(child(left, x - offset));
        }
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BinarySearchTree<i32> {
        [5, 3, 8, 3, 1].into_iter().collect()
    }

    #[test]
    fn rows_wrap_after_width() {
        let values = [1, 2, 3, 4, 5];
        assert_eq!(render_rows(&values, 2), "1 2 \n3 4 \n5 \n");
    }

    #[test]
    fn rows_exact_multiple_ends_with_blank_line() {
        let values = [1, 2, 3, 4];
        assert_eq!(render_rows(&values, 2), "1 2 \n3 4 \n\n");
    }

    #[test]
    fn rows_empty() {
        let values: [i32; 0] = [];
        assert_eq!(render_rows(&values, DEFAULT_ROW_WIDTH), "\n");
    }

    #[test]
    fn rows_zero_width_treated_as_one() {
        assert_eq!(render_rows(&[7, 8], 0), "7 \n8 \n\n");
    }

    #[test]
    fn tree_diagram_snapshot() {
        let mut tree = sample();
        tree.add(9);
        tree.add(4);
        insta::assert_snapshot!(render_tree(&tree), @r"
        5
        ├── 3
        │   ├── 1
        │   └── 4
        └── 8
            └── 9
        ");
    }

    #[test]
    fn tree_diagram_lone_right_child_uses_corner() {
        let tree: BinarySearchTree<i32> = [1, 2].into_iter().collect();
        assert_eq!(render_tree(&tree), "1\n└── 2\n");
    }

    #[test]
    fn tree_diagram_empty() {
        let tree: BinarySearchTree<i32> = BinarySearchTree::new();
        assert_eq!(render_tree(&tree), "");
    }

    #[test]
    fn layout_halves_spread_per_level() {
        let layout = layout_tree(&sample(), LayoutOptions::centered(800.0));
        assert_eq!(layout.height, 3);
        let coords: Vec<(&str, f64, f64)> = layout
            .nodes
            .iter()
            .map(|n| (n.label.as_str(), n.x, n.y))
            .collect();
        assert_eq!(
            coords,
            vec![
                ("5", 400.0, 100.0),
                ("3", 150.0, 160.0),
                ("1", 25.0, 220.0),
                ("8", 650.0, 160.0),
            ]
        );
        assert_eq!(
            layout.edges,
            vec![Edge { from: 0, to: 1 }, Edge { from: 1, to: 2 }, Edge { from: 0, to: 3 }]
        );
    }

    #[test]
    fn layout_bounds_and_json() {
        let layout = layout_tree(&sample(), LayoutOptions::default());
        assert_eq!(layout.bounds(20.0), (670.0, 240.0));
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["nodes"][0]["label"], "5");
        assert_eq!(json["edges"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn degenerate_tree_renders_every_level() {
        let chain: BinarySearchTree<i32> = (0..3_000).collect();
        let diagram = render_tree(&chain);
        assert_eq!(diagram.lines().count(), 3_000);
        assert!(diagram.starts_with("0\n└── 1\n    └── 2\n"));

        let tree: BinarySearchTree<i32> = (0..30_000).collect();
        let layout = layout_tree(&tree, LayoutOptions::default());
        assert_eq!(layout.nodes.len(), 30_000);
        assert_eq!(layout.edges.len(), 29_999);
        assert_eq!(layout.nodes[29_999].depth, 29_999);
    }

    #[test]
    fn layout_empty_tree() {
        let tree: BinarySearchTree<i32> = BinarySearchTree::new();
        let layout = layout_tree(&tree, LayoutOptions::default());
        assert!(layout.nodes.is_empty());
        assert_eq!(layout.height, 0);
    }
}
