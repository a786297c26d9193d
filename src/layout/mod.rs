//! Layout Module - Placement of the cell row
//!
//! The track (cells plus decorations) becomes a one-row flexbox computed by
//! [Taffy](https://github.com/DioxusLabs/taffy):
//!
//! 1. Every track node becomes a fixed-size Taffy leaf
//! 2. The leaves hang off a row container with `gap` between them
//! 3. Computed positions come back as [`CellRect`]s in track order
//!
//! Decorations are measured with `unicode-width` and centered vertically
//! against the cells.

use taffy::{
    AlignItems, AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, Size, Style,
    TaffyTree,
};
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::otp::{CellTrack, TrackNode, Variant};
use crate::types::CellRect;

// =============================================================================
// OPTIONS
// =============================================================================

/// Sizes used to lay out a cell row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Columns per entry cell (border included).
    pub cell_width: u16,
    /// Rows per entry cell (border included).
    pub cell_height: u16,
    /// Columns between adjacent nodes.
    pub gap: u16,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::for_variant(Variant::Outlined)
    }
}

impl LayoutOptions {
    /// Outlined cells are 3x3 boxes, filled cells a single 3-wide row.
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Outlined => Self { cell_width: 3, cell_height: 3, gap: 1 },
            Variant::Filled => Self { cell_width: 3, cell_height: 1, gap: 1 },
        }
    }
}

// =============================================================================
// COMPUTED LAYOUT
// =============================================================================

/// Computed placement of every track node, relative to the widget origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OtpLayout {
    pub nodes: Vec<(TrackNode, CellRect)>,
    pub width: u16,
    pub height: u16,
}

impl OtpLayout {
    /// Rect of entry cell `index`.
    pub fn cell_rect(&self, index: usize) -> Option<CellRect> {
        self.nodes.iter().find_map(|(node, rect)| match node {
            TrackNode::Cell(i) if *i == index => Some(*rect),
            _ => None,
        })
    }

    /// Entry cell under a point, if any. Decorations are not hit targets.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<usize> {
        self.nodes.iter().find_map(|(node, rect)| match node {
            TrackNode::Cell(i) if rect.contains(x, y) => Some(*i),
            _ => None,
        })
    }

    /// Same layout shifted to a screen origin.
    pub fn offset(mut self, x: u16, y: u16) -> Self {
        for (_, rect) in &mut self.nodes {
            rect.x = rect.x.saturating_add(x);
            rect.y = rect.y.saturating_add(y);
        }
        self
    }
}

fn fixed(width: u16, height: u16) -> Style {
    Style {
        size: Size {
            width: Dimension::Length(width as f32),
            height: Dimension::Length(height as f32),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

/// Lay out `track` as a single row.
pub fn compute_layout(track: &CellTrack, options: &LayoutOptions) -> Result<OtpLayout> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let mut children = Vec::with_capacity(track.nodes().len());
    for node in track.nodes() {
        let style = match node {
            TrackNode::Cell(_) => fixed(options.cell_width, options.cell_height),
            TrackNode::Decoration(text) => fixed(text.width() as u16, 1),
        };
        children.push(tree.new_leaf(style)?);
    }

    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            align_items: Some(AlignItems::Center),
            gap: Size {
                width: LengthPercentage::Length(options.gap as f32),
                height: LengthPercentage::Length(0.0),
            },
            ..Default::default()
        },
        &children,
    )?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::MaxContent,
            height: AvailableSpace::MaxContent,
        },
    )?;

    let mut nodes = Vec::with_capacity(children.len());
    for (node, &child) in track.nodes().iter().zip(&children) {
        let layout = tree.layout(child)?;
        let rect = CellRect::new(
            layout.location.x.round() as u16,
            layout.location.y.round() as u16,
            layout.size.width.round() as u16,
            layout.size.height.round() as u16,
        );
        nodes.push((node.clone(), rect));
    }

    let root_layout = tree.layout(root)?;
    Ok(OtpLayout {
        nodes,
        width: root_layout.size.width.round() as u16,
        height: root_layout.size.height.round() as u16,
    })
}
