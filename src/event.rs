//! Subscriber-facing view of a registry.

use crate::{Callable, MulticastRegistry};

/// A handle that lets outside code subscribe to a registry without being able to
/// invoke it.
///
/// Obtained from [`MulticastRegistry::event`]. The owner of the registry keeps the
/// `invoke*` methods; subscribers only get `add` and `remove`.
///
/// # Examples
///
/// ```
/// use multicast_registry::{Callable, Event, MulticastRegistry};
///
/// struct Button {
///     clicked: MulticastRegistry<(u32,), (), ()>,
/// }
///
/// impl Button {
///     fn on_click(&self) -> Event<'_, (u32,), (), ()> {
///         self.clicked.event()
///     }
///
///     fn click(&self, x: u32) {
///         let _ = self.clicked.invoke_and_aggregate((x,));
///     }
/// }
///
/// let button = Button { clicked: MulticastRegistry::new() };
/// let handler = Callable::new(|_x: u32| Ok(()));
///
/// button.on_click().add_one(handler.clone());
/// button.click(3);
/// assert!(button.on_click().remove_one(&handler));
/// ```
pub struct Event<'a, Args, R, E> {
    registry: &'a MulticastRegistry<Args, R, E>,
}

impl<'a, Args, R, E> Event<'a, Args, R, E> {
    pub fn new(registry: &'a MulticastRegistry<Args, R, E>) -> Self {
        Self { registry }
    }

    /// See [`MulticastRegistry::add`].
    pub fn add<I, C>(&self, callables: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<Callable<Args, R, E>>>,
    {
        self.registry.add(callables)
    }

    pub fn add_one(&self, callable: Callable<Args, R, E>) {
        self.registry.add_one(callable)
    }

    /// See [`MulticastRegistry::remove`].
    pub fn remove<I, C>(&self, callables: I) -> bool
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<Callable<Args, R, E>>>,
    {
        self.registry.remove(callables)
    }

    pub fn remove_one(&self, callable: &Callable<Args, R, E>) -> bool {
        self.registry.remove_one(callable)
    }

    /// Number of callables currently subscribed.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl<Args, R, E> Clone for Event<'_, Args, R, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Args, R, E> Copy for Event<'_, Args, R, E> {}
