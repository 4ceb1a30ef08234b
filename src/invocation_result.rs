//! Results of one invocation pass over a registry.

use crate::FunctionIdentity;

/// What happened when one callable was invoked.
///
/// Holds either the returned value or the returned error, never both, plus the
/// callable's identity when it could be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationOutcome<R, E> {
    identity: Option<FunctionIdentity>,
    result: Result<R, E>,
}

impl<R, E> InvocationOutcome<R, E> {
    pub(crate) fn new(identity: Option<FunctionIdentity>, result: Result<R, E>) -> Self {
        Self { identity, result }
    }

    /// Identity of the callable that produced this outcome, if it could be resolved.
    pub fn identity(&self) -> Option<&FunctionIdentity> {
        self.identity.as_ref()
    }

    pub fn result(&self) -> &Result<R, E> {
        &self.result
    }

    pub fn value(&self) -> Option<&R> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&E> {
        self.result.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_err(&self) -> bool {
        self.result.is_err()
    }

    pub fn into_result(self) -> Result<R, E> {
        self.result
    }
}

/// The outcomes of one invocation pass, in registry order.
///
/// # Examples
///
/// ```rust
/// use multicast_registry::{Callable, MulticastRegistry};
///
/// let registry: MulticastRegistry<(i32,), i32, String> = MulticastRegistry::new();
/// registry.add_one(Callable::new(|x: i32| Ok(x + 1)));
/// registry.add_one(Callable::new(|x: i32| Err(format!("cannot handle {x}"))));
///
/// let result = registry.invoke_and_aggregate((41,));
/// assert!(result.any_failed());
/// assert_eq!(result.outcome(0).and_then(|o| o.value()), Some(&42));
/// assert_eq!(result.errors().collect::<Vec<_>>(), vec!["cannot handle 41"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationResult<R, E> {
    outcomes: Vec<InvocationOutcome<R, E>>,
    any_failed: bool,
}

impl<R, E> InvocationResult<R, E> {
    pub(crate) fn new(outcomes: Vec<InvocationOutcome<R, E>>) -> Self {
        let any_failed = outcomes.iter().any(InvocationOutcome::is_err);
        Self {
            outcomes,
            any_failed,
        }
    }

    pub fn outcomes(&self) -> &[InvocationOutcome<R, E>] {
        &self.outcomes
    }

    /// The outcome of the `index`-th callable, counting from zero.
    pub fn outcome(&self, index: usize) -> Option<&InvocationOutcome<R, E>> {
        self.outcomes.get(index)
    }

    /// `true` if at least one callable returned an error.
    pub fn any_failed(&self) -> bool {
        self.any_failed
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InvocationOutcome<R, E>> {
        self.outcomes.iter()
    }

    /// Successful return values, in order.
    pub fn values(&self) -> impl Iterator<Item = &R> {
        self.outcomes.iter().filter_map(InvocationOutcome::value)
    }

    /// Errors, in order.
    pub fn errors(&self) -> impl Iterator<Item = &E> {
        self.outcomes.iter().filter_map(InvocationOutcome::error)
    }

    pub fn into_outcomes(self) -> Vec<InvocationOutcome<R, E>> {
        self.outcomes
    }
}

impl<R, E> IntoIterator for InvocationResult<R, E> {
    type Item = InvocationOutcome<R, E>;
    type IntoIter = std::vec::IntoIter<InvocationOutcome<R, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a, R, E> IntoIterator for &'a InvocationResult<R, E> {
    type Item = &'a InvocationOutcome<R, E>;
    type IntoIter = std::slice::Iter<'a, InvocationOutcome<R, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeDescriptor;

    fn sample_identity() -> FunctionIdentity {
        FunctionIdentity::new("app", "load", Vec::new(), TypeDescriptor::Unit)
    }

    #[test]
    fn test_outcome_accessors_success() {
        let outcome: InvocationOutcome<i32, String> =
            InvocationOutcome::new(Some(sample_identity()), Ok(7));

        assert!(outcome.is_ok());
        assert!(!outcome.is_err());
        assert_eq!(outcome.value(), Some(&7));
        assert_eq!(outcome.error(), None);
        assert_eq!(outcome.identity().map(|i| i.name()), Some("load"));
        assert_eq!(outcome.into_result(), Ok(7));
    }

    #[test]
    fn test_outcome_accessors_failure() {
        let outcome: InvocationOutcome<i32, String> =
            InvocationOutcome::new(None, Err("boom".to_string()));

        assert!(outcome.is_err());
        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.error().map(String::as_str), Some("boom"));
        assert!(outcome.identity().is_none());
    }

    #[test]
    fn test_result_without_failures() {
        let result: InvocationResult<i32, String> = InvocationResult::new(vec![
            InvocationOutcome::new(None, Ok(1)),
            InvocationOutcome::new(None, Ok(2)),
        ]);

        assert!(!result.any_failed());
        assert_eq!(result.len(), 2);
        assert_eq!(result.values().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(result.errors().count(), 0);
    }

    #[test]
    fn test_result_flags_any_failure() {
        let result: InvocationResult<i32, String> = InvocationResult::new(vec![
            InvocationOutcome::new(None, Ok(1)),
            InvocationOutcome::new(None, Err("bad".to_string())),
            InvocationOutcome::new(None, Ok(3)),
        ]);

        assert!(result.any_failed());
        assert_eq!(result.values().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(result.outcome(1).and_then(|o| o.error()).unwrap(), "bad");
        assert!(result.outcome(3).is_none());
    }

    #[test]
    fn test_empty_result() {
        let result: InvocationResult<(), ()> = InvocationResult::new(Vec::new());
        assert!(result.is_empty());
        assert!(!result.any_failed());
    }

    #[test]
    fn test_into_iterator_preserves_order() {
        let result: InvocationResult<&str, ()> = InvocationResult::new(vec![
            InvocationOutcome::new(None, Ok("a")),
            InvocationOutcome::new(None, Ok("b")),
        ]);

        let borrowed: Vec<_> = (&result).into_iter().filter_map(|o| o.value()).collect();
        assert_eq!(borrowed, vec![&"a", &"b"]);

        let owned: Vec<_> = result
            .into_iter()
            .map(InvocationOutcome::into_result)
            .collect();
        assert_eq!(owned, vec![Ok("a"), Ok("b")]);
    }
}
