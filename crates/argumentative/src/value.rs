use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared slot for a value bound to a registered flag.
///
/// The registry keeps one clone and writes into it while parsing; the caller
/// keeps another and reads it afterwards. Each slot lives on its own heap
/// allocation, so handles stay valid however many flags are registered later.
#[derive(Default)]
pub struct Value<T>(Rc<RefCell<T>>);

/// Handle to a boolean switch.
pub type BoolValue = Value<bool>;

/// Handle to a string option or positional argument.
pub type StringValue = Value<String>;

impl<T> Value<T> {
    pub(crate) fn new(initial: T) -> Self {
        Self(Rc::new(RefCell::new(initial)))
    }

    /// Overwrite the current value.
    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Clone> Value<T> {
    /// Copy out the current value.
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl Value<String> {
    pub(crate) fn is_empty(&self) -> bool {
        self.with(String::is_empty)
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&*self.0.borrow()).finish()
    }
}

impl<T: PartialEq> PartialEq<T> for Value<T> {
    fn eq(&self, other: &T) -> bool {
        self.with(|v| v == other)
    }
}
