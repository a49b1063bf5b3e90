#![forbid(unsafe_code)]

//! Host-framework contract.
//!
//! The positioning engine and the popover lifecycle never touch a rendering
//! framework directly. Everything they need (detached roots, element boxes,
//! the viewport, scroll notifications, style writes) goes through [`Host`].
//!
//! # Ownership
//!
//! Hosts are cheap handles (`Clone`) over interior-mutable framework state,
//! the way a DOM document is shared. Resources acquired from a host are
//! wrapped in RAII guards:
//!
//! - [`RootHandle`] removes its detached root on drop.
//! - [`ScrollSubscription`] unsubscribes on drop.
//!
//! so every exit path (close, destroy, panic unwinding) releases them.

use std::fmt;

use crate::geometry::{Rect, Viewport};
use crate::panel::PanelNode;
use crate::style::StyleDecls;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw host identifier.
            #[inline]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw host identifier.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a detached render root.
    RootId
);
id_type!(
    /// Opaque handle to a mounted element.
    NodeId
);
id_type!(
    /// Identifier of a scroll subscription.
    SubscriptionId
);

/// Capabilities consumed from the rendering framework.
pub trait Host {
    /// Caller-supplied panel content.
    type Children: Clone;

    /// Mount a detached render root showing `panel`.
    fn add_root(&self, panel: PanelNode<Self::Children>) -> RootId;

    /// Invalidate a root and re-render it with `panel`.
    ///
    /// Unknown ids are ignored.
    fn update_root(&self, id: RootId, panel: PanelNode<Self::Children>);

    /// Tear a root down. Unknown ids are ignored.
    fn remove_root(&self, id: RootId);

    /// Element of the root's first child, once attached.
    fn root_element(&self, id: RootId) -> Option<NodeId>;

    /// Page-absolute box of a mounted element.
    ///
    /// `None` when the element is detached or cannot be measured.
    fn node_rect(&self, node: NodeId) -> Option<Rect>;

    /// Current viewport inner size.
    fn viewport(&self) -> Viewport;

    /// Start receiving global scroll notifications.
    fn subscribe_scroll(&self) -> SubscriptionId;

    /// Stop a scroll subscription. Unknown ids are ignored.
    fn unsubscribe_scroll(&self, id: SubscriptionId);

    /// Merge style declarations onto an element.
    fn apply_style(&self, node: NodeId, style: &StyleDecls);
}

/// Exclusive ownership of one detached root.
pub struct RootHandle<H: Host> {
    host: H,
    id: RootId,
}

impl<H: Host> RootHandle<H> {
    /// Mount `panel` into a fresh detached root.
    pub fn mount(host: H, panel: PanelNode<H::Children>) -> Self {
        let id = host.add_root(panel);
        Self { host, id }
    }

    /// Root identifier.
    #[inline]
    pub fn id(&self) -> RootId {
        self.id
    }

    /// Re-render the root with new content.
    pub fn rerender(&self, panel: PanelNode<H::Children>) {
        self.host.update_root(self.id, panel);
    }

    /// Element of the root's first child, if attached.
    pub fn element(&self) -> Option<NodeId> {
        self.host.root_element(self.id)
    }
}

impl<H: Host> Drop for RootHandle<H> {
    fn drop(&mut self) {
        self.host.remove_root(self.id);
    }
}

impl<H: Host> fmt::Debug for RootHandle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootHandle").field("id", &self.id).finish()
    }
}

/// Live scroll subscription; unsubscribes on drop.
pub struct ScrollSubscription<H: Host> {
    host: H,
    id: SubscriptionId,
}

impl<H: Host> ScrollSubscription<H> {
    /// Subscribe to scroll notifications.
    pub fn subscribe(host: H) -> Self {
        let id = host.subscribe_scroll();
        Self { host, id }
    }

    /// Subscription identifier.
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl<H: Host> Drop for ScrollSubscription<H> {
    fn drop(&mut self) {
        self.host.unsubscribe_scroll(self.id);
    }
}

impl<H: Host> fmt::Debug for ScrollSubscription<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSubscription")
            .field("id", &self.id)
            .finish()
    }
}
