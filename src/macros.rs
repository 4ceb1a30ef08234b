//! Macros for declaring global delegates.
//!
//! This module provides a simple macro-based approach to create process-wide,
//! thread-safe multicast registries, one module per delegate.

/// Creates a global delegate with a single macro invocation.
///
/// `define_delegate!(name, (A, B, ..), R, E)` generates a module `name` containing:
/// - A registry static (hidden) of type `MulticastRegistry<(A, B, ..), R, E>`
/// - `Args`, `Registry` and `Callable` type aliases
/// - Free functions delegating to the registry
///
/// Types are resolved through the enclosing module, so they must be declared at
/// module level rather than inside a function body.
///
/// # Examples
///
/// ```rust
/// use multicast_registry::define_delegate;
///
/// #[derive(Debug, Clone, PartialEq)]
/// pub struct SaveError;
///
/// define_delegate!(on_save, (String, u32), (), SaveError);
///
/// fn main() {
///     let audit = on_save::Callable::new(|_path: String, _size: u32| Ok(()));
///     on_save::add(audit.clone());
///     on_save::add(on_save::Callable::new(|_path: String, _size: u32| Err(SaveError)));
///
///     assert_eq!(on_save::invoke(("notes.txt".to_string(), 12)), Err(SaveError));
///     assert!(on_save::invoke_and_aggregate(("notes.txt".to_string(), 12)).any_failed());
///
///     assert!(on_save::remove(&audit));
///     assert_eq!(on_save::callables().len(), 1);
/// }
/// ```
///
/// # Multiple Delegates
///
/// Each delegate is completely isolated:
///
/// ```rust
/// use multicast_registry::define_delegate;
///
/// define_delegate!(on_open, (), (), ());
/// define_delegate!(on_close, (), (), ());
///
/// on_open::add(on_open::Callable::new(|| Ok(())));
///
/// assert_eq!(on_open::registry().len(), 1);
/// assert!(on_close::registry().is_empty());
/// ```
#[macro_export]
macro_rules! define_delegate {
    ($name:ident, ($($arg:ty),* $(,)?), $ret:ty, $err:ty) => {
        #[allow(dead_code)]
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;
            use std::sync::LazyLock;

            /// Argument tuple passed to every callable.
            pub type Args = ($($arg,)*);

            pub type Registry = $crate::MulticastRegistry<Args, $ret, $err>;

            pub type Callable = $crate::Callable<Args, $ret, $err>;

            // Storage for subscribed callables (module-private)
            static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

            /// The underlying registry, for trait-based or by-reference usage.
            pub fn registry() -> &'static Registry {
                &REGISTRY
            }

            /// Subscribe a callable.
            pub fn add(callable: Callable) {
                REGISTRY.add_one(callable)
            }

            /// Unsubscribe the first entry equal to `callable`.
            pub fn remove(callable: &Callable) -> bool {
                REGISTRY.remove_one(callable)
            }

            /// Invoke every callable, stopping at the first error.
            pub fn invoke(args: Args) -> Result<$crate::InvocationResult<$ret, $err>, $err> {
                REGISTRY.invoke(args)
            }

            /// Invoke every callable, collecting errors.
            pub fn invoke_and_aggregate(args: Args) -> $crate::InvocationResult<$ret, $err> {
                REGISTRY.invoke_and_aggregate(args)
            }

            /// Snapshot of the subscribed callables.
            pub fn callables() -> Vec<Callable> {
                REGISTRY.callables()
            }

            /// Drop every subscribed callable.
            pub fn clear() {
                REGISTRY.clear()
            }

            /// Set a tracing callback for delegate operations.
            pub fn set_trace_callback(callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static) {
                REGISTRY.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }
        }
    };
}
