use crate::InvocationStrategy;

/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via
/// [`MulticastRegistry::set_trace_callback`](crate::MulticastRegistry::set_trace_callback).
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use multicast_registry::RegistryEvent;
///
/// let event = RegistryEvent::Add { added: 2, discarded: 0 };
/// assert_eq!(event.to_string(), "add { added: 2, discarded: 0 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// Callables were added.
    Add {
        /// Number of callables appended
        added: usize,
        /// Number of `None` entries skipped
        discarded: usize,
    },

    /// A removal was requested.
    Remove {
        /// Number of callables asked to be removed
        requested: usize,
        /// Number of stored entries actually removed
        removed: usize,
    },

    /// An invocation pass started.
    Invoke {
        strategy: InvocationStrategy,
        /// Number of callables in the snapshot being invoked
        callables: usize,
    },

    /// A callable returned an error during an invocation pass.
    Failure {
        /// Position of the callable in the pass, counting from zero
        index: usize,
        /// Resolved identity of the callable, if any
        function: Option<String>,
    },

    /// The registry was cleared.
    Clear {
        /// Number of entries dropped
        removed: usize,
    },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Add { added, discarded } => {
                write!(f, "add {{ added: {}, discarded: {} }}", added, discarded)
            }
            RegistryEvent::Remove { requested, removed } => {
                write!(
                    f,
                    "remove {{ requested: {}, removed: {} }}",
                    requested, removed
                )
            }
            RegistryEvent::Invoke {
                strategy,
                callables,
            } => {
                write!(
                    f,
                    "invoke {{ strategy: {}, callables: {} }}",
                    strategy, callables
                )
            }
            RegistryEvent::Failure { index, function } => write!(
                f,
                "failure {{ index: {}, function: {} }}",
                index,
                function.as_deref().unwrap_or("<anonymous>")
            ),
            RegistryEvent::Clear { removed } => write!(f, "clear {{ removed: {} }}", removed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_event_display() {
        let event = RegistryEvent::Add {
            added: 1,
            discarded: 2,
        };
        assert_eq!(event.to_string(), "add { added: 1, discarded: 2 }");

        let event = RegistryEvent::Remove {
            requested: 2,
            removed: 1,
        };
        assert_eq!(event.to_string(), "remove { requested: 2, removed: 1 }");

        let event = RegistryEvent::Invoke {
            strategy: InvocationStrategy::Aggregate,
            callables: 3,
        };
        assert_eq!(
            event.to_string(),
            "invoke { strategy: aggregate, callables: 3 }"
        );

        let event = RegistryEvent::Clear { removed: 4 };
        assert_eq!(event.to_string(), "clear { removed: 4 }");
    }

    #[test]
    fn test_failure_display() {
        let event = RegistryEvent::Failure {
            index: 1,
            function: Some("app::save(u8) -> ()".to_string()),
        };
        assert_eq!(
            event.to_string(),
            "failure { index: 1, function: app::save(u8) -> () }"
        );

        let event = RegistryEvent::Failure {
            index: 0,
            function: None,
        };
        assert_eq!(
            event.to_string(),
            "failure { index: 0, function: <anonymous> }"
        );
    }

    #[test]
    fn test_registry_event_clone() {
        let event = RegistryEvent::Add {
            added: 1,
            discarded: 0,
        };
        let cloned = event.clone();
        assert_eq!(format!("{:?}", event), format!("{:?}", cloned));
        assert_eq!(event, cloned);
    }
}
