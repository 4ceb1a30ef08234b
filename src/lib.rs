//! # Multicast Registry
//!
//! Typed multicast delegates: bind an ordered collection of callables under one
//! handle, invoke all of them as a unit, and choose whether an error aborts the
//! pass or is collected alongside the successful results.
//!
//! ## Quick Start
//!
//! ```rust
//! use multicast_registry::{Callable, MulticastRegistry};
//!
//! fn shout(text: String) -> Result<String, String> {
//!     Ok(text.to_uppercase())
//! }
//!
//! let registry: MulticastRegistry<(String,), String, String> = MulticastRegistry::new();
//! registry.add_one(Callable::new(shout));
//! registry.add_one(Callable::new(|text: String| Ok(text.len().to_string())));
//!
//! let result = registry.invoke(("hi".to_string(),)).unwrap();
//! assert_eq!(result.values().collect::<Vec<_>>(), vec!["HI", "2"]);
//! assert_eq!(result.outcome(0).unwrap().identity().unwrap().name(), "shout");
//! ```
//!
//! ## Features
//!
//! - **Any arity**: the argument list is a tuple type, from `()` up to nine elements
//! - **Fail fast or aggregate**: [`MulticastRegistry::invoke`] returns the first error,
//!   [`MulticastRegistry::invoke_and_aggregate`] records every error and keeps going
//! - **Labelled outcomes**: each outcome carries the callable's resolved
//!   [`FunctionIdentity`] when one is available
//! - **Thread-safe**: all operations take `&self`; invocation works on a snapshot
//! - **Tracing support**: `tracing` log lines plus an optional per-registry callback
//!
//! ## Main Types
//!
//! - [`Callable`] - A shared handle to one function; compares by reference
//! - [`MulticastRegistry`] - The ordered collection and its invocation strategies
//! - [`InvocationResult`] / [`InvocationOutcome`] - What one pass produced
//! - [`Event`] - A subscribe-only view of a registry
//! - [`resolve`] - Best-effort identity of a callable
//! - [`define_delegate!`] - A process-wide delegate in its own module

mod event;
mod function;
pub mod introspect;
mod invocation_result;
mod macros;
mod registry;
mod registry_error;
mod registry_event;

// Re-export the main public API
pub use event::Event;
pub use function::{Callable, CallableDescriptor, Function};
pub use introspect::{resolve, FunctionIdentity, TypeDescriptor};
pub use invocation_result::{InvocationOutcome, InvocationResult};
pub use registry::{InvocationStrategy, MulticastRegistry, TraceCallback};
pub use registry_error::ResolutionError;
pub use registry_event::RegistryEvent;
