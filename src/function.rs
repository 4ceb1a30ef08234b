//! Callables held by a [`MulticastRegistry`](crate::MulticastRegistry).
//!
//! A [`Callable`] wraps any function, method or closure whose parameters form the
//! argument tuple `Args` and which returns `Result<R, E>`. Arity is a generic
//! parameter: `()` for no arguments, `(A,)` for one, `(A, B)` for two, and so on
//! up to nine.
//!
//! # Equality
//!
//! Callables compare by reference. Two handles are equal only when one was cloned
//! from the other; wrapping the same function twice produces two unequal handles.
//! Keep the handle you added if you intend to remove it later:
//!
//! ```rust
//! use multicast_registry::Callable;
//!
//! fn greet() -> Result<String, ()> {
//!     Ok("hello".to_string())
//! }
//!
//! let first: Callable<(), String, ()> = Callable::new(greet);
//! let second: Callable<(), String, ()> = Callable::new(greet);
//!
//! assert_eq!(first, first.clone());
//! assert_ne!(first, second);
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// A function that can be called with the argument tuple `Args`.
///
/// Implemented for every `Fn(A1, .., An) -> O + Send + Sync + 'static` with
/// `n <= 9`, which is what lets a single registry type cover every arity.
pub trait Function<Args>: Send + Sync {
    type Output;

    /// Calls the function, spreading `args` over its parameters.
    fn call(&self, args: Args) -> Self::Output;
}

macro_rules! impl_function {
    ($($param:ident),*) => {
        impl<Func, Out, $($param,)*> Function<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> Out + Send + Sync + 'static,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn call(&self, ($($param,)*): ($($param,)*)) -> Out {
                (self)($($param),*)
            }
        }
    };
}

impl_function!();
impl_function!(A1);
impl_function!(A1, A2);
impl_function!(A1, A2, A3);
impl_function!(A1, A2, A3, A4);
impl_function!(A1, A2, A3, A4, A5);
impl_function!(A1, A2, A3, A4, A5, A6);
impl_function!(A1, A2, A3, A4, A5, A6, A7);
impl_function!(A1, A2, A3, A4, A5, A6, A7, A8);
impl_function!(A1, A2, A3, A4, A5, A6, A7, A8, A9);

/// What is known about the value behind a [`Callable`], recorded when it was created.
///
/// The type names come from [`std::any::type_name`] and are only used to label
/// invocation outcomes; see [`resolve`](crate::resolve).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableDescriptor {
    type_name: &'static str,
    params: &'static str,
    returns: &'static str,
    declared: Option<(String, String)>,
}

impl CallableDescriptor {
    fn of<F, Args, R>(declared: Option<(String, String)>) -> Self {
        Self {
            type_name: type_name::<F>(),
            params: type_name::<Args>(),
            returns: type_name::<R>(),
            declared,
        }
    }

    /// Type name of the wrapped value, e.g. `my_crate::text::trim` or
    /// `my_crate::main::{{closure}}`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name of the argument tuple, e.g. `(i32, &str)`.
    pub fn params(&self) -> &'static str {
        self.params
    }

    /// Type name of the success value.
    pub fn returns(&self) -> &'static str {
        self.returns
    }

    /// Owner and name given to [`Callable::named`], if any.
    pub fn declared(&self) -> Option<(&str, &str)> {
        self.declared
            .as_ref()
            .map(|(owner, name)| (owner.as_str(), name.as_str()))
    }
}

/// A shared, reference-counted handle to a function taking `Args` and returning
/// `Result<R, E>`.
pub struct Callable<Args, R, E> {
    func: Arc<dyn Function<Args, Output = Result<R, E>>>,
    descriptor: Arc<CallableDescriptor>,
}

impl<Args, R, E> Callable<Args, R, E> {
    /// Wraps a function, method or closure.
    ///
    /// Named functions are later identified by their path; closures stay anonymous.
    pub fn new<F>(func: F) -> Self
    where
        F: Function<Args, Output = Result<R, E>> + 'static,
    {
        Self {
            descriptor: Arc::new(CallableDescriptor::of::<F, Args, R>(None)),
            func: Arc::new(func),
        }
    }

    /// Wraps a function together with an explicit owner and name.
    ///
    /// Use this for closures that should still be reported by name.
    ///
    /// ```rust
    /// use multicast_registry::{resolve, Callable};
    ///
    /// let limit = 3;
    /// let check: Callable<(u32,), bool, ()> =
    ///     Callable::named("quota", "within_limit", move |n: u32| Ok(n <= limit));
    ///
    /// let identity = resolve(&check).unwrap().unwrap();
    /// assert_eq!(identity.to_string(), "quota::within_limit(u32) -> bool");
    /// ```
    pub fn named<F>(owner: impl Into<String>, name: impl Into<String>, func: F) -> Self
    where
        F: Function<Args, Output = Result<R, E>> + 'static,
    {
        let declared = Some((owner.into(), name.into()));
        Self {
            descriptor: Arc::new(CallableDescriptor::of::<F, Args, R>(declared)),
            func: Arc::new(func),
        }
    }

    /// Calls the wrapped function directly.
    pub fn call(&self, args: Args) -> Result<R, E> {
        self.func.call(args)
    }

    pub fn descriptor(&self) -> &CallableDescriptor {
        &self.descriptor
    }
}

impl<Args, R, E> Clone for Callable<Args, R, E> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            descriptor: Arc::clone(&self.descriptor),
        }
    }
}

impl<Args, R, E> PartialEq for Callable<Args, R, E> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<Args, R, E> Eq for Callable<Args, R, E> {}

impl<Args, R, E> fmt::Debug for Callable<Args, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("type_name", &self.descriptor.type_name)
            .field("params", &self.descriptor.params)
            .field("returns", &self.descriptor.returns)
            .finish()
    }
}
