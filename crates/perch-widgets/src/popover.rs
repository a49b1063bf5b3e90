#![forbid(unsafe_code)]

//! Popover lifecycle controller.
//!
//! [`Popover`] owns the open/closed state of one anchored panel. While open
//! it holds a detached render root and a scroll subscription; it re-runs the
//! placement engine whenever the host reports that the panel attached,
//! re-rendered, or the page scrolled.
//!
//! # State machine
//!
//! ```text
//!            open = true
//!   Closed ────────────────▶ Open
//!     ▲    mount root,         │
//!     │    subscribe scroll    │ open = false / destroy / drop
//!     └────────────────────────┘
//!            remove root, unsubscribe
//! ```
//!
//! The host drives the controller through three notifications:
//!
//! - [`Popover::handle_mounted`]: the root's first child attached.
//! - [`Popover::handle_updated`]: the root re-rendered.
//! - [`Popover::handle_scroll`]: the page scrolled.
//!
//! # Invariants
//!
//! - A root is mounted iff `props.open` is `true`.
//! - Each `false → true` transition mounts exactly one new root (with a fresh
//!   [`MountGate`]); each `true → false` transition removes it.
//! - The scroll subscription lives exactly as long as the root.
//! - Placement never runs while closed, without an anchor, or before the
//!   panel element is attached.
//!
//! # Failure Modes
//!
//! - An unmeasurable anchor or panel skips the pass; the next notification
//!   retries.
//! - Off-screen detection only *requests* a close through
//!   `on_request_close`; the caller decides whether `open` flips.

use std::fmt;
use std::rc::Rc;

use perch_core::host::{Host, NodeId, RootHandle, RootId, ScrollSubscription, SubscriptionId};
use perch_core::panel::PanelNode;
use perch_core::style::StyleDecls;
use perch_core::{debug, info, trace};
use perch_layout::{
    DEFAULT_POPOVER_Z_INDEX, Origin, Placement, PlacementOptions, PlacementOutcome,
    PlacementTrigger, place,
};

use crate::animation::{AnimationStrategy, DefaultAnimation, MountGate, render_animated};
use crate::config::PopoverConfig;

static DEFAULT_ANIMATION: DefaultAnimation = DefaultAnimation::new();

/// Why the popover asks its owner to close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// The anchor scrolled out of the viewport.
    OffScreen,
}

impl CloseReason {
    /// Stable reason string handed to close hooks.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OffScreen => "offScreen",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback receiving close requests.
pub type CloseHook = Rc<dyn Fn(CloseReason)>;

/// Lifecycle phase of a [`Popover`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopoverPhase {
    /// No root mounted.
    #[default]
    Closed,
    /// Root mounted and tracked.
    Open,
}

/// Declarative popover options.
#[derive(Clone)]
pub struct PopoverProps<C> {
    /// Element to anchor against. Required for placement while open.
    pub anchor: Option<NodeId>,
    /// Point on the anchor the panel attaches to.
    pub anchor_origin: Origin,
    /// Point on the panel that attaches to the anchor.
    pub target_origin: Origin,
    /// Whether the panel is shown.
    pub open: bool,
    /// Render through an animation strategy instead of a plain container.
    pub animated: bool,
    /// Strategy used when `animated`; `None` uses [`DefaultAnimation`].
    pub animation: Option<Rc<dyn AnimationStrategy>>,
    /// Try fallback alignments when the panel overflows the viewport.
    pub can_auto_position: bool,
    /// Request a close when the anchor scrolls out of view.
    pub auto_close_when_off_screen: bool,
    /// Stacking order written with each placement.
    pub z_index: i32,
    /// Extra declarations merged onto the non-animated wrapper.
    pub style: StyleDecls,
    /// Panel content.
    pub children: C,
    /// Receives close requests.
    pub on_request_close: Option<CloseHook>,
}

impl<C> PopoverProps<C> {
    /// Closed popover with default options.
    pub fn new(children: C) -> Self {
        Self {
            anchor: None,
            anchor_origin: Origin::ANCHOR_DEFAULT,
            target_origin: Origin::TARGET_DEFAULT,
            open: false,
            animated: true,
            animation: None,
            can_auto_position: true,
            auto_close_when_off_screen: true,
            z_index: DEFAULT_POPOVER_Z_INDEX,
            style: StyleDecls::new(),
            children,
            on_request_close: None,
        }
    }

    /// Closed popover with the options of `config`.
    pub fn from_config(config: &PopoverConfig, children: C) -> Self {
        Self::new(children).apply_config(config)
    }

    /// Overwrite every plain-data option with the values of `config`.
    #[must_use]
    pub fn apply_config(mut self, config: &PopoverConfig) -> Self {
        self.anchor_origin = config.anchor_origin;
        self.target_origin = config.target_origin;
        self.animated = config.animated;
        self.can_auto_position = config.can_auto_position;
        self.auto_close_when_off_screen = config.auto_close_when_off_screen;
        self.z_index = config.z_index;
        self
    }

    /// Set the anchor element.
    #[must_use]
    pub fn anchor(mut self, anchor: NodeId) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Set the anchor origin.
    #[must_use]
    pub fn anchor_origin(mut self, origin: Origin) -> Self {
        self.anchor_origin = origin;
        self
    }

    /// Set the target origin.
    #[must_use]
    pub fn target_origin(mut self, origin: Origin) -> Self {
        self.target_origin = origin;
        self
    }

    /// Set whether the panel is shown.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Enable or disable the animated wrapper.
    #[must_use]
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Use a custom animation strategy.
    #[must_use]
    pub fn animation(mut self, strategy: Rc<dyn AnimationStrategy>) -> Self {
        self.animation = Some(strategy);
        self
    }

    /// Enable or disable auto-positioning.
    #[must_use]
    pub fn can_auto_position(mut self, enabled: bool) -> Self {
        self.can_auto_position = enabled;
        self
    }

    /// Enable or disable off-screen close requests.
    #[must_use]
    pub fn auto_close_when_off_screen(mut self, enabled: bool) -> Self {
        self.auto_close_when_off_screen = enabled;
        self
    }

    /// Set the stacking order.
    #[must_use]
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set extra wrapper style.
    #[must_use]
    pub fn style(mut self, style: StyleDecls) -> Self {
        self.style = style;
        self
    }

    /// Set the close-request hook.
    #[must_use]
    pub fn on_request_close(mut self, hook: impl Fn(CloseReason) + 'static) -> Self {
        self.on_request_close = Some(Rc::new(hook));
        self
    }

    /// Placement inputs derived from these props.
    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            anchor_origin: self.anchor_origin,
            target_origin: self.target_origin,
            auto_position: self.can_auto_position,
            auto_close_off_screen: self.auto_close_when_off_screen,
            z_index: self.z_index,
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for PopoverProps<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopoverProps")
            .field("anchor", &self.anchor)
            .field("anchor_origin", &self.anchor_origin)
            .field("target_origin", &self.target_origin)
            .field("open", &self.open)
            .field("animated", &self.animated)
            .field("animation", &self.animation)
            .field("can_auto_position", &self.can_auto_position)
            .field("auto_close_when_off_screen", &self.auto_close_when_off_screen)
            .field("z_index", &self.z_index)
            .field("style", &self.style)
            .field("children", &self.children)
            .field("on_request_close", &self.on_request_close.is_some())
            .finish()
    }
}

/// Resources held while open.
struct MountedPanel<H: Host> {
    root: RootHandle<H>,
    scroll: ScrollSubscription<H>,
    gate: MountGate,
}

/// Lifecycle controller for one popover.
pub struct Popover<H: Host> {
    host: H,
    props: PopoverProps<H::Children>,
    mounted: Option<MountedPanel<H>>,
    last_placement: Option<Placement>,
}

impl<H: Host + Clone> Popover<H> {
    /// Create a controller and apply the initial props.
    pub fn new(host: H, props: PopoverProps<H::Children>) -> Self {
        let mut popover = Self {
            host,
            props,
            mounted: None,
            last_placement: None,
        };
        popover.reconcile();
        popover
    }

    /// Replace the props, mounting, unmounting or re-rendering as needed.
    pub fn update(&mut self, props: PopoverProps<H::Children>) {
        self.props = props;
        self.reconcile();
    }

    fn reconcile(&mut self) {
        match (self.props.open, self.mounted.is_some()) {
            (true, false) => self.mount(),
            (false, true) => self.unmount(),
            (true, true) => self.rerender(),
            (false, false) => {}
        }
    }

    fn mount(&mut self) {
        let gate = MountGate::new();
        let root = RootHandle::mount(self.host.clone(), render_panel(&self.props, &gate));
        let scroll = ScrollSubscription::subscribe(self.host.clone());
        info!(
            message = "popover.open",
            root = root.id().get(),
            animated = self.props.animated
        );
        self.mounted = Some(MountedPanel { root, scroll, gate });
    }

    fn rerender(&self) {
        if let Some(mounted) = &self.mounted {
            mounted
                .root
                .rerender(render_panel(&self.props, &mounted.gate));
        }
    }
}

impl<H: Host> Popover<H> {
    fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            info!(message = "popover.close", root = mounted.root.id().get());
            drop(mounted);
        }
        self.last_placement = None;
    }

    /// The panel element attached for the first time.
    ///
    /// Places the panel and flips the mount gate once the element exists.
    /// Animated panels then re-render so the strategy can run its enter
    /// transition; a plain panel that later turns animated renders the open
    /// frame directly.
    pub fn handle_mounted(&mut self) -> Option<PlacementOutcome> {
        let outcome = self.placement_pass(PlacementTrigger::Mount);
        if let Some(mounted) = &mut self.mounted {
            if mounted.root.element().is_some() && mounted.gate.mark_attached() {
                debug!(message = "popover.attached", root = mounted.root.id().get());
                if self.props.animated {
                    mounted
                        .root
                        .rerender(render_panel(&self.props, &mounted.gate));
                }
            }
        }
        outcome
    }

    /// The panel re-rendered; re-place it against current geometry.
    pub fn handle_updated(&mut self) -> Option<PlacementOutcome> {
        self.placement_pass(PlacementTrigger::Update)
    }

    /// The page scrolled; re-place and check whether the anchor left the
    /// viewport.
    ///
    /// The close hook fires at most once per call.
    pub fn handle_scroll(&mut self) -> Option<PlacementOutcome> {
        let outcome = self.placement_pass(PlacementTrigger::Scroll)?;
        if outcome.off_screen {
            if let Some(hook) = self.props.on_request_close.clone() {
                hook(CloseReason::OffScreen);
            }
        }
        Some(outcome)
    }

    fn placement_pass(&mut self, trigger: PlacementTrigger) -> Option<PlacementOutcome> {
        if !self.props.open {
            trace!(message = "popover.placement_skipped", reason = "closed");
            return None;
        }
        let Some(anchor) = self.props.anchor else {
            trace!(message = "popover.placement_skipped", reason = "no_anchor");
            return None;
        };
        let Some(target) = self.mounted.as_ref().and_then(|m| m.root.element()) else {
            trace!(message = "popover.placement_skipped", reason = "panel_unattached");
            return None;
        };
        let outcome = place(
            &self.host,
            anchor,
            target,
            &self.props.placement_options(),
            trigger,
        )?;
        self.last_placement = Some(outcome.placement);
        Some(outcome)
    }

    /// Tear down immediately. Equivalent to dropping the controller.
    pub fn destroy(self) {}

    /// Whether a root is mounted.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.mounted.is_some()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PopoverPhase {
        if self.is_open() {
            PopoverPhase::Open
        } else {
            PopoverPhase::Closed
        }
    }

    /// Identifier of the mounted root.
    pub fn root_id(&self) -> Option<RootId> {
        self.mounted.as_ref().map(|m| m.root.id())
    }

    /// Identifier of the live scroll subscription.
    pub fn scroll_subscription(&self) -> Option<SubscriptionId> {
        self.mounted.as_ref().map(|m| m.scroll.id())
    }

    /// Placement written by the most recent successful pass while open.
    pub fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }

    /// Current props.
    pub fn props(&self) -> &PopoverProps<H::Children> {
        &self.props
    }

    /// Host this controller renders into.
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: Host> Drop for Popover<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<H: Host> fmt::Debug for Popover<H>
where
    H::Children: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popover")
            .field("phase", &self.phase())
            .field("root", &self.root_id())
            .field("last_placement", &self.last_placement)
            .field("props", &self.props)
            .finish()
    }
}

/// Subtree rendered into the detached root.
fn render_panel<C: Clone>(props: &PopoverProps<C>, gate: &MountGate) -> PanelNode<C> {
    if props.animated {
        let strategy: &dyn AnimationStrategy = match &props.animation {
            Some(strategy) => strategy.as_ref(),
            None => &DEFAULT_ANIMATION,
        };
        render_animated(
            strategy,
            props.target_origin,
            gate,
            props.children.clone(),
        )
    } else {
        PanelNode::Plain {
            style: StyleDecls::new()
                .with("position", "absolute")
                .merged(&props.style),
            children: props.children.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perch_core::geometry::{Rect, Size, Viewport};
    use perch_harness::{HostCall, MockHost};
    use std::cell::RefCell;

    type TestHost = MockHost<&'static str>;

    fn setup() -> (TestHost, NodeId) {
        let host = MockHost::new(Viewport::new(1024.0, 768.0));
        let anchor = host.create_element(Rect::new(100.0, 200.0, 50.0, 20.0));
        (host, anchor)
    }

    #[test]
    fn starts_closed_without_side_effects() {
        let (host, anchor) = setup();
        let popover = Popover::new(host.clone(), PopoverProps::new("menu").anchor(anchor));
        assert_eq!(popover.phase(), PopoverPhase::Closed);
        assert!(popover.root_id().is_none());
        assert!(host.journal().is_empty());
    }

    #[test]
    fn opening_mounts_root_and_subscribes() {
        let (host, anchor) = setup();
        let popover = Popover::new(
            host.clone(),
            PopoverProps::new("menu").anchor(anchor).open(true),
        );
        let root = popover.root_id().unwrap();
        assert_eq!(host.live_roots(), vec![root]);
        assert_eq!(
            host.active_subscriptions(),
            vec![popover.scroll_subscription().unwrap()]
        );
    }

    #[test]
    fn plain_wrapper_merges_caller_style() {
        let (host, anchor) = setup();
        let props = PopoverProps::new("menu")
            .anchor(anchor)
            .open(true)
            .animated(false)
            .style(StyleDecls::new().with("background", "white"));
        let popover = Popover::new(host.clone(), props);
        let panel = host.root_panel(popover.root_id().unwrap()).unwrap();
        assert!(!panel.is_animated());
        assert_eq!(panel.style().get("position"), Some("absolute"));
        assert_eq!(panel.style().get("background"), Some("white"));
    }

    #[test]
    fn caller_style_is_not_applied_to_animated_wrapper() {
        let (host, anchor) = setup();
        let props = PopoverProps::new("menu")
            .anchor(anchor)
            .open(true)
            .style(StyleDecls::new().with("background", "white"));
        let popover = Popover::new(host.clone(), props);
        let panel = host.root_panel(popover.root_id().unwrap()).unwrap();
        assert!(panel.is_animated());
        assert_eq!(panel.style().get("background"), None);
    }

    #[test]
    fn mount_places_and_triggers_animation() {
        let (host, anchor) = setup();
        let mut popover = Popover::new(
            host.clone(),
            PopoverProps::new("menu").anchor(anchor).open(true),
        );
        let root = popover.root_id().unwrap();
        assert_eq!(
            host.root_panel(root).unwrap(),
            render_panel(popover.props(), &MountGate::new())
        );

        let panel = host.attach_root(root, Size::new(80.0, 40.0)).unwrap();
        let outcome = popover.handle_mounted().unwrap();
        assert_eq!((outcome.placement.top, outcome.placement.left), (220.0, 100.0));
        assert_eq!(host.style_of(panel).get("top"), Some("220px"));

        // Gate flipped: second render is the open frame.
        assert_eq!(host.render_count(root), 2);
        match host.root_panel(root).unwrap() {
            PanelNode::Animated { open, .. } => assert!(open),
            other => panic!("expected animated panel, got {other:?}"),
        }

        // A later attach notification does not re-trigger the animation.
        popover.handle_mounted();
        assert_eq!(host.render_count(root), 2);
    }

    #[test]
    fn early_mount_notification_keeps_inert_frame() {
        let (host, anchor) = setup();
        let mut popover = Popover::new(
            host.clone(),
            PopoverProps::new("menu").anchor(anchor).open(true),
        );
        let root = popover.root_id().unwrap();

        // Element not attached yet: nothing flips.
        assert!(popover.handle_mounted().is_none());
        assert_eq!(host.render_count(root), 1);
        assert_eq!(host.root_panel(root).unwrap().style().get("opacity"), Some("0"));

        host.attach_root(root, Size::new(80.0, 40.0));
        popover.handle_mounted();
        assert_eq!(host.render_count(root), 2);
        assert_eq!(host.root_panel(root).unwrap().style().get("opacity"), Some("1"));
    }

    #[test]
    fn custom_strategy_is_used() {
        let (host, anchor) = setup();
        let props = PopoverProps::new("menu")
            .anchor(anchor)
            .open(true)
            .animation(Rc::new(crate::animation::FadeAnimation::default()));
        let popover = Popover::new(host.clone(), props);
        let panel = host.root_panel(popover.root_id().unwrap()).unwrap();
        assert_eq!(panel.style().get("transition"), Some("opacity 150ms linear"));
        assert_eq!(panel.style().get("transform"), None);
    }

    #[test]
    fn placement_skipped_without_anchor() {
        let (host, _) = setup();
        let mut popover = Popover::new(host.clone(), PopoverProps::new("menu").open(true));
        host.attach_root(popover.root_id().unwrap(), Size::new(80.0, 40.0));
        assert!(popover.handle_mounted().is_none());
        assert!(popover.handle_updated().is_none());
        assert_eq!(host.count_calls(|c| matches!(c, HostCall::ApplyStyle(_))), 0);
        assert!(popover.last_placement().is_none());
    }

    #[test]
    fn placement_skipped_before_attach() {
        let (host, anchor) = setup();
        let mut popover = Popover::new(
            host.clone(),
            PopoverProps::new("menu").anchor(anchor).open(true),
        );
        assert!(popover.handle_updated().is_none());
        assert!(popover.handle_scroll().is_none());
    }

    #[test]
    fn props_change_while_open_rerenders() {
        let (host, anchor) = setup();
        let props = PopoverProps::new("menu").anchor(anchor).open(true);
        let mut popover = Popover::new(host.clone(), props.clone());
        let root = popover.root_id().unwrap();
        popover.update(PopoverProps {
            children: "menu v2",
            ..props
        });
        assert_eq!(popover.root_id(), Some(root));
        assert_eq!(host.render_count(root), 2);
        assert_eq!(host.root_panel(root).unwrap().children(), Some(&"menu v2"));
    }

    #[test]
    fn off_screen_scroll_requests_close_without_closing() {
        let (host, anchor) = setup();
        let requests = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&requests);
        let props = PopoverProps::new("menu")
            .anchor(anchor)
            .open(true)
            .on_request_close(move |reason| sink.borrow_mut().push(reason));
        let mut popover = Popover::new(host.clone(), props);
        host.attach_root(popover.root_id().unwrap(), Size::new(80.0, 40.0));
        popover.handle_mounted();

        host.move_element(anchor, 0.0, -210.0);
        let outcome = popover.handle_scroll().unwrap();
        assert!(outcome.off_screen);
        assert_eq!(*requests.borrow(), vec![CloseReason::OffScreen]);
        assert!(popover.is_open());
    }

    #[test]
    fn close_reason_string() {
        assert_eq!(CloseReason::OffScreen.to_string(), "offScreen");
    }

    #[test]
    fn closing_clears_last_placement() {
        let (host, anchor) = setup();
        let props = PopoverProps::new("menu").anchor(anchor).open(true);
        let mut popover = Popover::new(host.clone(), props.clone());
        host.attach_root(popover.root_id().unwrap(), Size::new(80.0, 40.0));
        popover.handle_mounted();
        assert!(popover.last_placement().is_some());
        popover.update(props.open(false));
        assert!(popover.last_placement().is_none());
        assert!(host.live_roots().is_empty());
        assert!(host.active_subscriptions().is_empty());
    }

    #[test]
    fn from_config_copies_options() {
        let config = PopoverConfig {
            animated: false,
            z_index: 7,
            ..PopoverConfig::default()
        };
        let props = PopoverProps::from_config(&config, ());
        assert!(!props.animated);
        assert!(!props.open);
        assert_eq!(props.placement_options(), config.placement_options());
    }
}
