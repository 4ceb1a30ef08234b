//! An ordered registry of callables that are invoked together.
//!
//! A [`MulticastRegistry`] holds callables sharing one signature: an argument tuple
//! `Args`, a success type `R` and an error type `E`. Invoking the registry calls
//! every callable in insertion order with a clone of the same arguments.
//!
//! Two strategies decide what happens when a callable returns an error:
//!
//! - [`invoke`](MulticastRegistry::invoke) fails fast: the first error is returned
//!   unchanged and the remaining callables are not called.
//! - [`invoke_and_aggregate`](MulticastRegistry::invoke_and_aggregate) calls every
//!   callable and records each error in its [`InvocationOutcome`].
//!
//! # Examples
//!
//! ```
//! use multicast_registry::{Callable, MulticastRegistry};
//!
//! #[derive(Debug, PartialEq)]
//! struct DivideByZero;
//!
//! fn trim() -> Result<String, DivideByZero> {
//!     Ok("  hello world  ".trim().to_string())
//! }
//!
//! let registry = MulticastRegistry::with_callables([
//!     Callable::new(trim),
//!     Callable::new(|| Err(DivideByZero)),
//! ]);
//!
//! let result = registry.invoke_and_aggregate(());
//! assert!(result.any_failed());
//! assert_eq!(result.outcome(0).unwrap().value().unwrap(), "hello world");
//! assert_eq!(result.outcome(1).unwrap().error(), Some(&DivideByZero));
//!
//! assert_eq!(registry.invoke(()), Err(DivideByZero));
//! ```

use std::{
    convert::Infallible,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{debug, trace, warn};

use crate::{
    introspect, Callable, Event, FunctionIdentity, InvocationOutcome, InvocationResult,
    RegistryEvent,
};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the registry is
/// interacted with. It must be thread-safe because a registry may be shared.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// How an invocation pass reacts to a callable returning an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InvocationStrategy {
    /// Stop at the first error and return it.
    #[default]
    FailFast,
    /// Call every callable and collect errors in the result.
    Aggregate,
}

impl fmt::Display for InvocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationStrategy::FailFast => write!(f, "fail-fast"),
            InvocationStrategy::Aggregate => write!(f, "aggregate"),
        }
    }
}

/// An ordered collection of callables invoked as one logical operation.
///
/// Duplicates are allowed and insertion order is invocation order. All methods
/// take `&self`; the list is guarded by a mutex, and every invocation pass works
/// on a snapshot taken when it starts. Callables may therefore add or remove
/// entries while being invoked; the change applies to the next pass.
///
/// Argument and signature mismatches are rejected at compile time: every callable
/// must implement [`Function<Args>`](crate::Function) with output `Result<R, E>`.
pub struct MulticastRegistry<Args, R, E> {
    callables: Mutex<Vec<Callable<Args, R, E>>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl<Args, R, E> MulticastRegistry<Args, R, E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            callables: Mutex::new(Vec::new()),
            trace: Mutex::new(None),
        }
    }

    /// Creates a registry holding `callables` in the given order.
    ///
    /// `None` entries are skipped.
    pub fn with_callables<I, C>(callables: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<Callable<Args, R, E>>>,
    {
        let registry = Self::new();
        registry.add(callables);
        registry
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Sets a tracing callback that will be invoked on every registry interaction.
    ///
    /// The callback runs after the registry lock has been released, so it may call
    /// back into the registry.
    ///
    /// # Example
    /// ```rust
    /// use multicast_registry::MulticastRegistry;
    ///
    /// let registry: MulticastRegistry<(), (), ()> = MulticastRegistry::new();
    /// registry.set_trace_callback(|event| println!("[registry-trace] {}", event));
    /// ```
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback (disables registry tracing).
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    fn emit_event(&self, event: &RegistryEvent) {
        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    // Poisoning only occurs if a thread panicked while holding the lock; the list
    // itself is never left half-updated, so recover and continue.
    fn entries(&self) -> MutexGuard<'_, Vec<Callable<Args, R, E>>> {
        self.callables.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Appends callables in the given order.
    ///
    /// `None` entries are silently discarded. Duplicates are allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use multicast_registry::{Callable, MulticastRegistry};
    ///
    /// let registry: MulticastRegistry<(u8,), u8, ()> = MulticastRegistry::new();
    /// let double = Callable::new(|x: u8| Ok(x * 2));
    ///
    /// registry.add([Some(double.clone()), None, Some(double)]);
    /// assert_eq!(registry.len(), 2);
    /// ```
    pub fn add<I, C>(&self, callables: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<Callable<Args, R, E>>>,
    {
        let incoming: Vec<Option<Callable<Args, R, E>>> =
            callables.into_iter().map(Into::into).collect();
        let discarded = incoming.iter().filter(|c| c.is_none()).count();
        let added = incoming.len() - discarded;

        self.entries().extend(incoming.into_iter().flatten());

        debug!(added, discarded, "callables added");
        self.emit_event(&RegistryEvent::Add { added, discarded });
    }

    /// Appends a single callable.
    pub fn add_one(&self, callable: Callable<Args, R, E>) {
        self.add([callable]);
    }

    /// Removes the first stored entry equal to each given callable.
    ///
    /// Returns `true` if at least one entry was removed. `None` entries are ignored.
    ///
    /// Equality is by reference: only a handle cloned from the one that was added
    /// matches. Wrapping the same function or an identical closure again creates a
    /// new handle that removes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use multicast_registry::{Callable, MulticastRegistry};
    ///
    /// fn trim() -> Result<String, ()> {
    ///     Ok("  hello world  ".trim().to_string())
    /// }
    ///
    /// let kept = Callable::new(trim);
    /// let registry = MulticastRegistry::with_callables([kept.clone()]);
    ///
    /// // A fresh handle around the same function is a different callable.
    /// assert!(!registry.remove([Callable::new(trim)]));
    /// assert!(registry.remove([kept]));
    /// assert!(registry.is_empty());
    /// ```
    pub fn remove<I, C>(&self, callables: I) -> bool
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<Callable<Args, R, E>>>,
    {
        let targets: Vec<Callable<Args, R, E>> =
            callables.into_iter().filter_map(Into::into).collect();
        let requested = targets.len();
        let mut removed = 0;

        {
            let mut entries = self.entries();
            for target in &targets {
                if let Some(position) = entries.iter().position(|entry| entry == target) {
                    entries.remove(position);
                    removed += 1;
                }
            }
        }

        debug!(requested, removed, "callables removed");
        self.emit_event(&RegistryEvent::Remove { requested, removed });
        removed > 0
    }

    /// Removes the first stored entry equal to `callable`.
    pub fn remove_one(&self, callable: &Callable<Args, R, E>) -> bool {
        self.remove([callable.clone()])
    }

    /// Drops every stored callable.
    pub fn clear(&self) {
        let removed = {
            let mut entries = self.entries();
            let removed = entries.len();
            entries.clear();
            removed
        };

        debug!(removed, "registry cleared");
        self.emit_event(&RegistryEvent::Clear { removed });
    }

    /// A snapshot of the stored callables, in invocation order.
    pub fn callables(&self) -> Vec<Callable<Args, R, E>> {
        self.entries().clone()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// A view of this registry that can only add and remove callables.
    ///
    /// Hand it to subscribers while keeping invocation to the owner.
    pub fn event(&self) -> Event<'_, Args, R, E> {
        Event::new(self)
    }
}

impl<Args: Clone, R, E> MulticastRegistry<Args, R, E> {
    /// Invokes every callable in order and stops at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by a callable, unchanged. Callables after
    /// it are not invoked and no [`InvocationResult`] is produced.
    pub fn invoke(&self, args: Args) -> Result<InvocationResult<R, E>, E> {
        self.run(InvocationStrategy::FailFast, args, Err)
    }

    /// Invokes every callable in order, recording errors instead of stopping.
    ///
    /// Never fails; check [`InvocationResult::any_failed`].
    ///
    /// # Panics
    ///
    /// A callable that panics is not caught: the panic propagates to the caller and
    /// the callables after it are not invoked.
    pub fn invoke_and_aggregate(&self, args: Args) -> InvocationResult<R, E> {
        match self.run(InvocationStrategy::Aggregate, args, Ok::<E, Infallible>) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Invokes every callable using the given strategy.
    ///
    /// With [`InvocationStrategy::Aggregate`] this always returns `Ok`.
    pub fn invoke_with(
        &self,
        strategy: InvocationStrategy,
        args: Args,
    ) -> Result<InvocationResult<R, E>, E> {
        match strategy {
            InvocationStrategy::FailFast => self.invoke(args),
            InvocationStrategy::Aggregate => Ok(self.invoke_and_aggregate(args)),
        }
    }

    /// One invocation pass. `on_error` either hands the error back to be recorded
    /// (`Ok`) or aborts the pass with it (`Err`).
    fn run<X>(
        &self,
        strategy: InvocationStrategy,
        args: Args,
        mut on_error: impl FnMut(E) -> Result<E, X>,
    ) -> Result<InvocationResult<R, E>, X> {
        let snapshot = self.callables();
        self.emit_event(&RegistryEvent::Invoke {
            strategy,
            callables: snapshot.len(),
        });

        let mut outcomes = Vec::with_capacity(snapshot.len());
        for (index, callable) in snapshot.iter().enumerate() {
            let identity = identify(callable);
            trace!(index, function = %label(&identity), "invoking callable");

            match callable.call(args.clone()) {
                Ok(value) => outcomes.push(InvocationOutcome::new(identity, Ok(value))),
                Err(error) => {
                    self.emit_event(&RegistryEvent::Failure {
                        index,
                        function: identity.as_ref().map(ToString::to_string),
                    });

                    match on_error(error) {
                        Ok(error) => {
                            warn!(index, function = %label(&identity), %strategy, "callable failed");
                            outcomes.push(InvocationOutcome::new(identity, Err(error)));
                        }
                        Err(abort) => {
                            debug!(index, function = %label(&identity), %strategy, "callable failed, aborting invocation");
                            return Err(abort);
                        }
                    }
                }
            }
        }

        Ok(InvocationResult::new(outcomes))
    }
}

/// Resolution failures only cost the label, never the invocation.
fn identify<Args, R, E>(callable: &Callable<Args, R, E>) -> Option<FunctionIdentity> {
    introspect::resolve(callable).unwrap_or_else(|error| {
        debug!(%error, type_name = callable.descriptor().type_name(), "could not resolve callable identity");
        None
    })
}

fn label(identity: &Option<FunctionIdentity>) -> String {
    identity
        .as_ref()
        .map_or_else(|| "<anonymous>".to_string(), ToString::to_string)
}

impl<Args, R, E> Default for MulticastRegistry<Args, R, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args, R, E> fmt::Debug for MulticastRegistry<Args, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MulticastRegistry")
            .field("callables", &*self.entries())
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
