#![forbid(unsafe_code)]

//! Geometry reader: element boxes as named-point tables.

use perch_core::host::{Host, NodeId};

use crate::origin::NamedPoints;

/// Page-absolute points of the anchor element.
///
/// `None` when the host cannot measure the element.
pub fn read_anchor<H: Host>(host: &H, node: NodeId) -> Option<NamedPoints> {
    host.node_rect(node).map(|rect| NamedPoints::page(&rect))
}

/// Points of the target panel in its own frame.
///
/// Only the measured size matters; the top-left corner is `(0, 0)` because
/// the panel has not been positioned yet.
pub fn read_target<H: Host>(host: &H, node: NodeId) -> Option<NamedPoints> {
    host.node_rect(node).map(|rect| NamedPoints::local(rect.size()))
}
