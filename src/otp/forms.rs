//! Form bridge - how a host form reads and writes the aggregate value.
//!
//! The widget implements [`ValueAccessor`]. A host registers its callbacks
//! once; both slots start as no-ops. External writes go through
//! `write_value` and never echo back as a change notification.

use std::cell::RefCell;
use std::rc::Rc;
use spark_signals::{signal, Signal};

/// Called with the new aggregate value on every committed mutation.
pub type ChangeFn = Rc<dyn Fn(&str)>;

/// Called when the user leaves the widget.
pub type TouchedFn = Rc<dyn Fn()>;

/// Contract between a form control and the widget that edits its value.
pub trait ValueAccessor {
    /// External write of the aggregate value. Must not notify `on_change`.
    fn write_value(&self, value: &str);

    fn register_on_change(&self, f: ChangeFn);

    fn register_on_touched(&self, f: TouchedFn);
}

// =============================================================================
// Callback slots
// =============================================================================

/// The two bridge callback slots, shared by all handles of a widget.
#[derive(Clone, Default)]
pub(crate) struct BridgeSlots {
    on_change: Rc<RefCell<Option<ChangeFn>>>,
    on_touched: Rc<RefCell<Option<TouchedFn>>>,
}

impl BridgeSlots {
    pub(crate) fn set_on_change(&self, f: ChangeFn) {
        *self.on_change.borrow_mut() = Some(f);
    }

    pub(crate) fn set_on_touched(&self, f: TouchedFn) {
        *self.on_touched.borrow_mut() = Some(f);
    }

    pub(crate) fn notify_change(&self, value: &str) {
        // Clone out so the callback may re-register without a borrow conflict
        let cb = self.on_change.borrow().clone();
        if let Some(cb) = cb {
            cb(value);
        }
    }

    pub(crate) fn notify_touched(&self) {
        let cb = self.on_touched.borrow().clone();
        if let Some(cb) = cb {
            cb();
        }
    }
}

// =============================================================================
// FormControl - minimal host
// =============================================================================

/// A minimal form control bound to one accessor.
///
/// Keeps the form-side copy of the value plus touched/dirty state, the way
/// a host form system would.
#[derive(Clone)]
pub struct FormControl {
    value: Signal<String>,
    touched: Signal<bool>,
    dirty: Signal<bool>,
    accessor: Rc<RefCell<Option<Rc<dyn ValueAccessor>>>>,
}

impl FormControl {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: signal(initial.into()),
            touched: signal(false),
            dirty: signal(false),
            accessor: Rc::new(RefCell::new(None)),
        }
    }

    /// Bind to an accessor: register both callbacks, then push the current value.
    pub fn bind<A: ValueAccessor + Clone + 'static>(&self, accessor: &A) {
        let value = self.value.clone();
        let dirty = self.dirty.clone();
        accessor.register_on_change(Rc::new(move |v: &str| {
            value.set(v.to_string());
            dirty.set(true);
        }));

        let touched = self.touched.clone();
        accessor.register_on_touched(Rc::new(move || { touched.set(true); }));

        accessor.write_value(&self.value.get());
        *self.accessor.borrow_mut() = Some(Rc::new(accessor.clone()));
    }

    /// Programmatic write from the form side.
    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        self.value.set(value.clone());
        let accessor = self.accessor.borrow().clone();
        if let Some(accessor) = accessor {
            accessor.write_value(&value);
        }
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

    pub fn touched(&self) -> bool {
        self.touched.get()
    }

    /// Whether the user changed the value since binding.
    pub fn dirty(&self) -> bool {
        self.dirty.get()
    }
}
