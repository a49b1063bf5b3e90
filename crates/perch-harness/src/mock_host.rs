#![forbid(unsafe_code)]

//! Scripted in-memory host.
//!
//! [`MockHost`] implements [`Host`] over a tiny element table so tests can
//! drive placement and the popover lifecycle without a real framework:
//!
//! - Elements are created with a page-absolute box and can be moved or
//!   detached to simulate layout changes and unmounting.
//! - Detached roots keep the last rendered [`PanelNode`]; tests attach the
//!   root's first child explicitly with [`MockHost::attach_root`], mirroring
//!   the framework's post-mount callback.
//! - Style writes are merged per element; `top`/`left` pixel values also
//!   move the element, as a browser would.
//! - Every host call is appended to a journal for ordering assertions.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use perch_core::geometry::{Rect, Size, Viewport};
use perch_core::host::{Host, NodeId, RootId, SubscriptionId};
use perch_core::panel::PanelNode;
use perch_core::style::StyleDecls;
use serde_json::json;

/// One recorded host call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    AddRoot(RootId),
    UpdateRoot(RootId),
    RemoveRoot(RootId),
    Subscribe(SubscriptionId),
    Unsubscribe(SubscriptionId),
    ApplyStyle(NodeId),
}

impl HostCall {
    /// Stable name for JSONL logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddRoot(_) => "add_root",
            Self::UpdateRoot(_) => "update_root",
            Self::RemoveRoot(_) => "remove_root",
            Self::Subscribe(_) => "subscribe_scroll",
            Self::Unsubscribe(_) => "unsubscribe_scroll",
            Self::ApplyStyle(_) => "apply_style",
        }
    }

    fn target(&self) -> u64 {
        match self {
            Self::AddRoot(id) | Self::UpdateRoot(id) | Self::RemoveRoot(id) => id.get(),
            Self::Subscribe(id) | Self::Unsubscribe(id) => id.get(),
            Self::ApplyStyle(id) => id.get(),
        }
    }
}

#[derive(Debug)]
struct Element {
    rect: Rect,
    attached: bool,
    style: StyleDecls,
}

#[derive(Debug)]
struct Root<C> {
    panel: PanelNode<C>,
    element: Option<NodeId>,
    renders: usize,
}

#[derive(Debug)]
struct Dom<C> {
    viewport: Viewport,
    next_id: u64,
    elements: BTreeMap<NodeId, Element>,
    roots: BTreeMap<RootId, Root<C>>,
    subscriptions: BTreeSet<SubscriptionId>,
    journal: Vec<HostCall>,
}

impl<C> Dom<C> {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory [`Host`] for tests.
pub struct MockHost<C> {
    dom: Rc<RefCell<Dom<C>>>,
}

impl<C> Clone for MockHost<C> {
    fn clone(&self) -> Self {
        Self {
            dom: Rc::clone(&self.dom),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for MockHost<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockHost")
            .field("dom", &self.dom.borrow())
            .finish()
    }
}

impl<C> MockHost<C> {
    /// Create a host with an empty page.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            dom: Rc::new(RefCell::new(Dom {
                viewport,
                next_id: 0,
                elements: BTreeMap::new(),
                roots: BTreeMap::new(),
                subscriptions: BTreeSet::new(),
                journal: Vec::new(),
            })),
        }
    }

    /// Resize the viewport.
    pub fn set_viewport(&self, viewport: Viewport) {
        self.dom.borrow_mut().viewport = viewport;
    }

    /// Create an attached element with a page-absolute box.
    pub fn create_element(&self, rect: Rect) -> NodeId {
        let mut dom = self.dom.borrow_mut();
        let id = NodeId::new(dom.next_id());
        dom.elements.insert(
            id,
            Element {
                rect,
                attached: true,
                style: StyleDecls::new(),
            },
        );
        id
    }

    /// Replace an element's box.
    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        if let Some(el) = self.dom.borrow_mut().elements.get_mut(&node) {
            el.rect = rect;
        }
    }

    /// Shift an element, e.g. to simulate scrolling the page.
    pub fn move_element(&self, node: NodeId, dx: f64, dy: f64) {
        if let Some(el) = self.dom.borrow_mut().elements.get_mut(&node) {
            el.rect = el.rect.translate(dx, dy);
        }
    }

    /// Detach an element so it can no longer be measured.
    pub fn detach_element(&self, node: NodeId) {
        if let Some(el) = self.dom.borrow_mut().elements.get_mut(&node) {
            el.attached = false;
        }
    }

    /// Attach the first child element of a root with the given size.
    ///
    /// Returns `None` for unknown roots. Attaching twice returns the existing
    /// element.
    pub fn attach_root(&self, root: RootId, size: Size) -> Option<NodeId> {
        let mut dom = self.dom.borrow_mut();
        if let Some(existing) = dom.roots.get(&root)?.element {
            return Some(existing);
        }
        let id = NodeId::new(dom.next_id());
        dom.elements.insert(
            id,
            Element {
                rect: Rect::from_size(size),
                attached: true,
                style: StyleDecls::new(),
            },
        );
        if let Some(r) = dom.roots.get_mut(&root) {
            r.element = Some(id);
        }
        Some(id)
    }

    /// Merged style of an element (empty for unknown elements).
    pub fn style_of(&self, node: NodeId) -> StyleDecls {
        self.dom
            .borrow()
            .elements
            .get(&node)
            .map(|el| el.style.clone())
            .unwrap_or_default()
    }

    /// Current box of an element, attached or not.
    pub fn rect_of(&self, node: NodeId) -> Option<Rect> {
        self.dom.borrow().elements.get(&node).map(|el| el.rect)
    }

    /// Roots currently mounted, in creation order.
    pub fn live_roots(&self) -> Vec<RootId> {
        self.dom.borrow().roots.keys().copied().collect()
    }

    /// How many times a root has been rendered (initial mount included).
    pub fn render_count(&self, root: RootId) -> usize {
        self.dom.borrow().roots.get(&root).map_or(0, |r| r.renders)
    }

    /// Active scroll subscriptions.
    pub fn active_subscriptions(&self) -> Vec<SubscriptionId> {
        self.dom.borrow().subscriptions.iter().copied().collect()
    }

    /// Snapshot of the recorded host calls.
    pub fn journal(&self) -> Vec<HostCall> {
        self.dom.borrow().journal.clone()
    }

    /// Forget recorded host calls.
    pub fn clear_journal(&self) {
        self.dom.borrow_mut().journal.clear();
    }

    /// Count journal entries matching a predicate.
    pub fn count_calls(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.dom.borrow().journal.iter().filter(|c| pred(c)).count()
    }

    /// Journal as JSON lines (`{"seq":0,"call":"add_root","id":1}`).
    pub fn journal_jsonl(&self) -> String {
        let dom = self.dom.borrow();
        let mut out = String::new();
        for (seq, call) in dom.journal.iter().enumerate() {
            let line = json!({
                "seq": seq,
                "call": call.name(),
                "id": call.target(),
            });
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }

    fn record(&self, call: HostCall) {
        tracing::trace!(message = "mock_host.call", call = call.name(), id = call.target());
        self.dom.borrow_mut().journal.push(call);
    }
}

impl<C: Clone> MockHost<C> {
    /// Last panel rendered into a root.
    pub fn root_panel(&self, root: RootId) -> Option<PanelNode<C>> {
        self.dom.borrow().roots.get(&root).map(|r| r.panel.clone())
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.strip_suffix("px")?.trim().parse().ok()
}

impl<C: Clone> Host for MockHost<C> {
    type Children = C;

    fn add_root(&self, panel: PanelNode<C>) -> RootId {
        let id = {
            let mut dom = self.dom.borrow_mut();
            let id = RootId::new(dom.next_id());
            dom.roots.insert(
                id,
                Root {
                    panel,
                    element: None,
                    renders: 1,
                },
            );
            id
        };
        self.record(HostCall::AddRoot(id));
        id
    }

    fn update_root(&self, id: RootId, panel: PanelNode<C>) {
        {
            let mut dom = self.dom.borrow_mut();
            let Some(root) = dom.roots.get_mut(&id) else {
                return;
            };
            root.panel = panel;
            root.renders += 1;
        }
        self.record(HostCall::UpdateRoot(id));
    }

    fn remove_root(&self, id: RootId) {
        {
            let mut dom = self.dom.borrow_mut();
            let Some(root) = dom.roots.remove(&id) else {
                return;
            };
            if let Some(el) = root.element.and_then(|n| dom.elements.get_mut(&n)) {
                el.attached = false;
            }
        }
        self.record(HostCall::RemoveRoot(id));
    }

    fn root_element(&self, id: RootId) -> Option<NodeId> {
        self.dom.borrow().roots.get(&id)?.element
    }

    fn node_rect(&self, node: NodeId) -> Option<Rect> {
        let dom = self.dom.borrow();
        let el = dom.elements.get(&node)?;
        el.attached.then_some(el.rect)
    }

    fn viewport(&self) -> Viewport {
        self.dom.borrow().viewport
    }

    fn subscribe_scroll(&self) -> SubscriptionId {
        let id = {
            let mut dom = self.dom.borrow_mut();
            let id = SubscriptionId::new(dom.next_id());
            dom.subscriptions.insert(id);
            id
        };
        self.record(HostCall::Subscribe(id));
        id
    }

    fn unsubscribe_scroll(&self, id: SubscriptionId) {
        if !self.dom.borrow_mut().subscriptions.remove(&id) {
            return;
        }
        self.record(HostCall::Unsubscribe(id));
    }

    fn apply_style(&self, node: NodeId, style: &StyleDecls) {
        {
            let mut dom = self.dom.borrow_mut();
            let Some(el) = dom.elements.get_mut(&node) else {
                return;
            };
            el.style.merge(style);
            if let Some(top) = style.get("top").and_then(parse_px) {
                el.rect.y = top;
            }
            if let Some(left) = style.get("left").and_then(parse_px) {
                el.rect.x = left;
            }
        }
        self.record(HostCall::ApplyStyle(node));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MockHost<&'static str> {
        MockHost::new(Viewport::new(800.0, 600.0))
    }

    fn plain(children: &'static str) -> PanelNode<&'static str> {
        PanelNode::Plain {
            style: StyleDecls::new(),
            children,
        }
    }

    #[test]
    fn roots_lifecycle() {
        let host = host();
        let root = host.add_root(plain("a"));
        assert_eq!(host.live_roots(), vec![root]);
        assert_eq!(host.render_count(root), 1);

        host.update_root(root, plain("b"));
        assert_eq!(host.render_count(root), 2);
        assert_eq!(host.root_panel(root).unwrap().children(), Some(&"b"));

        let el = host.attach_root(root, Size::new(80.0, 40.0)).unwrap();
        assert_eq!(host.root_element(root), Some(el));
        assert_eq!(host.attach_root(root, Size::new(1.0, 1.0)), Some(el));

        host.remove_root(root);
        assert!(host.live_roots().is_empty());
        assert!(host.node_rect(el).is_none());
        assert_eq!(
            host.journal(),
            vec![
                HostCall::AddRoot(root),
                HostCall::UpdateRoot(root),
                HostCall::RemoveRoot(root)
            ]
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let host = host();
        host.update_root(RootId::new(99), plain("x"));
        host.remove_root(RootId::new(99));
        host.unsubscribe_scroll(SubscriptionId::new(99));
        host.apply_style(NodeId::new(99), &StyleDecls::new());
        assert!(host.journal().is_empty());
        assert!(host.attach_root(RootId::new(99), Size::default()).is_none());
    }

    #[test]
    fn style_moves_element() {
        let host = host();
        let el = host.create_element(Rect::new(0.0, 0.0, 80.0, 40.0));
        let style = StyleDecls::new().with("top", "220px").with("left", "100px");
        host.apply_style(el, &style);
        assert_eq!(host.rect_of(el), Some(Rect::new(100.0, 220.0, 80.0, 40.0)));
        assert_eq!(host.style_of(el).get("top"), Some("220px"));
    }

    #[test]
    fn subscriptions_tracked() {
        let host = host();
        let a = host.subscribe_scroll();
        let b = host.subscribe_scroll();
        assert_eq!(host.active_subscriptions(), vec![a, b]);
        host.unsubscribe_scroll(a);
        assert_eq!(host.active_subscriptions(), vec![b]);
    }

    #[test]
    fn journal_jsonl_lines() {
        let host = host();
        let root = host.add_root(plain("a"));
        host.remove_root(root);
        let jsonl = host.journal_jsonl();
        let lines: Vec<_> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["call"], "add_root");
        assert_eq!(first["seq"], 0);
        assert_eq!(first["id"], root.get());
    }
}
