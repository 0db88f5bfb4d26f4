#![forbid(unsafe_code)]

//! Outside-pointer listener registry.
//!
//! The host owns one [`PointerHub`] and forwards every pointer-down that
//! lands outside all widgets to the fields listed by
//! [`PointerHub::listeners`]. A field subscribes while its picker is open
//! and the returned [`PointerSubscription`] detaches on drop, so a closed
//! picker is never left listening.
//!
//! ```
//! use datefield_widgets::PointerHub;
//!
//! let hub = PointerHub::new();
//! let sub = hub.subscribe();
//! assert!(hub.is_listening(sub.id()));
//! drop(sub);
//! assert_eq!(hub.listener_count(), 0);
//! ```

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// Identifies one subscription on a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    listeners: BTreeSet<ListenerId>,
}

/// Shared routing table for the global pointer stream.
///
/// Cloning yields another handle to the same table.
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<HubInner>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the subscription drops.
    #[must_use = "dropping the subscription detaches the listener immediately"]
    pub fn subscribe(&self) -> PointerSubscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id = inner.next_id.wrapping_add(1);
        let id = ListenerId(inner.next_id);
        inner.listeners.insert(id);
        PointerSubscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.inner.borrow().listeners.contains(&id)
    }

    /// Snapshot of live listeners in subscription order.
    pub fn listeners(&self) -> Vec<ListenerId> {
        self.inner.borrow().listeners.iter().copied().collect()
    }
}

/// RAII handle for one hub registration.
#[derive(Debug)]
pub struct PointerSubscription {
    id: ListenerId,
    hub: Weak<RefCell<HubInner>>,
}

impl PointerSubscription {
    #[inline]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// False once the hub itself has been dropped.
    pub fn is_active(&self) -> bool {
        self.hub
            .upgrade()
            .is_some_and(|inner| inner.borrow().listeners.contains(&self.id))
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner.borrow_mut().listeners.remove(&self.id);
        }
    }
}
