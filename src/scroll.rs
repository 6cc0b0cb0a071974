//! The published vertical scroll offset and its subscribers.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(f64)>;

struct Inner {
    value: Cell<f64>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

impl Inner {
    fn is_subscribed(&self, id: u64) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }
}

/// Single-threaded observable scroll offset in pixels.
///
/// Clones share the same value. Listeners run synchronously inside
/// [`ScrollSignal::publish`], in subscription order.
#[derive(Clone)]
pub struct ScrollSignal {
    inner: Rc<Inner>,
}

impl ScrollSignal {
    pub fn new(initial: f64) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: Cell::new(sanitize_offset(initial)),
                next_id: Cell::new(1),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn get(&self) -> f64 {
        self.inner.value.get()
    }

    /// Stores `value` and notifies listeners. Publishing the current value is a no-op
    /// and returns `false`.
    pub fn publish(&self, value: f64) -> bool {
        let value = sanitize_offset(value);
        if value == self.inner.value.get() {
            return false;
        }
        self.inner.value.set(value);

        // Listeners may subscribe or unsubscribe while being notified.
        let snapshot: Vec<(u64, Listener)> = self.inner.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if self.inner.is_subscribed(id) {
                listener(value);
            }
        }
        true
    }

    pub fn subscribe(&self, listener: impl Fn(f64) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let listener: Listener = Rc::new(listener);
        self.inner.listeners.borrow_mut().push((id, listener));

        Subscription {
            id,
            signal: Rc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl PartialEq for ScrollSignal {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ScrollSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSignal")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    signal: Weak<Inner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(listener_id, _)| *listener_id != self.id);
        }
    }
}

/// Host offsets can be negative during elastic overscroll.
pub fn sanitize_offset(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_notifies_subscribers_in_order() {
        let signal = ScrollSignal::new(0.0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = seen.clone();
            signal.subscribe(move |value| seen.borrow_mut().push(("first", value)))
        };
        let second = {
            let seen = seen.clone();
            signal.subscribe(move |value| seen.borrow_mut().push(("second", value)))
        };

        assert!(signal.publish(120.0));
        assert_eq!(*seen.borrow(), vec![("first", 120.0), ("second", 120.0)]);
        drop((first, second));
    }

    #[test]
    fn republishing_the_same_value_is_a_no_op() {
        let signal = ScrollSignal::new(0.0);
        let calls = Rc::new(Cell::new(0));
        let _subscription = {
            let calls = calls.clone();
            signal.subscribe(move |_| calls.set(calls.get() + 1))
        };

        assert!(signal.publish(300.0));
        assert!(!signal.publish(300.0));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let signal = ScrollSignal::new(0.0);
        let calls = Rc::new(Cell::new(0));
        let subscription = {
            let calls = calls.clone();
            signal.subscribe(move |_| calls.set(calls.get() + 1))
        };

        signal.publish(1.0);
        drop(subscription);
        signal.publish(2.0);

        assert_eq!(calls.get(), 1);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn listener_unsubscribed_mid_dispatch_is_skipped() {
        let signal = ScrollSignal::new(0.0);
        let late_calls = Rc::new(Cell::new(0));
        let late_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let _early = {
            let late_slot = late_slot.clone();
            signal.subscribe(move |_| {
                late_slot.borrow_mut().take();
            })
        };
        let late = {
            let late_calls = late_calls.clone();
            signal.subscribe(move |_| late_calls.set(late_calls.get() + 1))
        };
        *late_slot.borrow_mut() = Some(late);

        signal.publish(10.0);
        assert_eq!(late_calls.get(), 0);
    }

    #[test]
    fn offsets_are_sanitized() {
        let signal = ScrollSignal::new(f64::NAN);
        assert_eq!(signal.get(), 0.0);

        signal.publish(-35.0);
        assert_eq!(signal.get(), 0.0);

        signal.publish(f64::INFINITY);
        assert_eq!(signal.get(), 0.0);

        signal.publish(42.5);
        assert_eq!(signal.get(), 42.5);
    }

    #[test]
    fn clones_share_state() {
        let signal = ScrollSignal::new(0.0);
        let other = signal.clone();
        other.publish(99.0);

        assert_eq!(signal.get(), 99.0);
        assert_eq!(signal, other);
        assert_ne!(signal, ScrollSignal::new(0.0));
    }
}
