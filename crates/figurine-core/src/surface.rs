//! Host-surface listener subscriptions.
//!
//! Gesture and resize handling need window-level listeners that must only
//! be live while a session is active. A [`Subscription`] represents one such
//! attachment and detaches itself exactly once: on [`Subscription::release`]
//! or when dropped, whichever comes first.

use std::fmt;

/// Kinds of host events the core may listen for outside the image element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
    TouchMove,
    TouchEnd,
    Resize,
}

/// Listeners needed for the lifetime of a drag gesture.
pub const DRAG_LISTENERS: &[ListenerKind] = &[
    ListenerKind::PointerMove,
    ListenerKind::PointerUp,
    ListenerKind::TouchMove,
    ListenerKind::TouchEnd,
];

/// Listeners needed while an image is bound to a cropper.
pub const RESIZE_LISTENERS: &[ListenerKind] = &[ListenerKind::Resize];

/// A host that can attach global listeners on behalf of the core.
pub trait EventSurface {
    /// Attach listeners for `kinds` and return the guard that detaches them.
    fn subscribe(&self, kinds: &[ListenerKind]) -> Subscription;
}

/// Scoped listener attachment. Detaches on drop.
pub struct Subscription {
    kinds: Vec<ListenerKind>,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(kinds: &[ListenerKind], release: impl FnOnce() + 'static) -> Self {
        Self {
            kinds: kinds.to_vec(),
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to detach, for hosts that poll input.
    pub fn noop(kinds: &[ListenerKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
            release: None,
        }
    }

    pub fn kinds(&self) -> &[ListenerKind] {
        &self.kinds
    }

    /// Detach now. Idempotent with the drop that follows.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::trace!(kinds = ?self.kinds, "detaching listeners");
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kinds", &self.kinds)
            .field("attached", &self.release.is_some())
            .finish()
    }
}

/// Surface for hosts that deliver all input through polling (immediate-mode
/// UIs, scripted replays). Subscriptions are bookkeeping only.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolledSurface;

impl EventSurface for PolledSurface {
    fn subscribe(&self, kinds: &[ListenerKind]) -> Subscription {
        Subscription::noop(kinds)
    }
}
