// vim: set ai et ts=4 sts=4 sw=4:
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::trace;

use super::cell::Cell;

pub type Callback = Rc<dyn Fn(&BoardEvent)>;
pub type SubscriptionId = u64;

/// What the board reports to its observers. A cleared board sends a single
/// bulk event; observers are expected to re-derive full state from it.
#[derive(PartialEq, Clone, Debug)]
pub enum BoardEvent {
    CellChanged(Cell),
    Cleared,
}

/// Synchronous publish/subscribe from board mutations to the view layer.
/// Delivery is inline and ordered: every subscriber's callback completes
/// before the mutating call returns. Clones share the same listener set so
/// the board can emit through a handle its owner also holds.
pub struct ChangeNotifier {
    listeners: Rc<RefCell<HashMap<SubscriptionId, Callback>>>,
    next_id: Rc<RefCell<SubscriptionId>>,
}

impl Clone for ChangeNotifier {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        ChangeNotifier {
            listeners: Rc::new(RefCell::new(HashMap::new())),
            next_id: Rc::new(RefCell::new(0)),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&BoardEvent) + 'static,
    {
        let id = {
            let mut next_id = self.next_id.borrow_mut();
            let id = *next_id;
            *next_id += 1;
            id
        };
        self.listeners.borrow_mut().insert(id, Rc::new(callback));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    pub fn emit(&self, event: &BoardEvent) {
        let listeners = self.listeners.borrow();
        trace!(target: "notify", "emitting to {} listeners: {:?}", listeners.len(), event);
        for listener in listeners.values() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;
    use crate::cell::Cell;

    #[test]
    fn subscriber_is_called_synchronously() {
        let notifier = ChangeNotifier::new();
        let counter = Rc::new(StdCell::new(0));
        let counter_clone = counter.clone();

        notifier.subscribe(move |_event: &BoardEvent| {
            counter_clone.set(counter_clone.get() + 1);
        });

        notifier.emit(&BoardEvent::Cleared);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn all_listeners_receive_the_event() {
        let notifier = ChangeNotifier::new();
        let sum = Rc::new(StdCell::new(0));
        let sum_clone1 = sum.clone();
        let sum_clone2 = sum.clone();

        notifier.subscribe(move |_event: &BoardEvent| {
            sum_clone1.set(sum_clone1.get() + 1);
        });
        notifier.subscribe(move |_event: &BoardEvent| {
            sum_clone2.set(sum_clone2.get() + 1);
        });

        notifier.emit(&BoardEvent::CellChanged(Cell::new(0, 0)));
        assert_eq!(sum.get(), 2);
    }

    #[test]
    fn clones_share_the_listener_set() {
        let notifier = ChangeNotifier::new();
        let handle = notifier.clone();

        let counter = Rc::new(StdCell::new(0));
        let counter_clone = counter.clone();
        notifier.subscribe(move |_event: &BoardEvent| {
            counter_clone.set(counter_clone.get() + 1);
        });

        handle.emit(&BoardEvent::Cleared);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let notifier = ChangeNotifier::new();
        let counter = Rc::new(StdCell::new(0));
        let counter_clone = counter.clone();

        let sub_id = notifier.subscribe(move |_event: &BoardEvent| {
            counter_clone.set(counter_clone.get() + 1);
        });

        notifier.emit(&BoardEvent::Cleared);
        assert_eq!(counter.get(), 1);

        assert!(notifier.unsubscribe(sub_id));
        notifier.emit(&BoardEvent::Cleared);
        assert_eq!(counter.get(), 1);

        assert!(!notifier.unsubscribe(sub_id));
    }
}
