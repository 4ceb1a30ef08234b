//! Integration tests for adding and removing callables.
//!
//! Removal matches by reference: only a handle cloned from the one that was added
//! removes anything. A new handle around the same function, or an identical
//! closure, is a different callable.

use multicast_registry::{Callable, MulticastRegistry};

fn trim() -> Result<String, ()> {
    Ok("  hello world  ".trim().to_string())
}

fn shout() -> Result<String, ()> {
    Ok("HELLO".to_string())
}

#[test]
fn test_add_then_remove_same_handle() {
    let kept = Callable::new(trim);
    let registry = MulticastRegistry::with_callables([Callable::new(shout)]);
    let before = registry.len();

    registry.add_one(kept.clone());
    assert_eq!(registry.len(), before + 1);

    assert!(registry.remove_one(&kept));
    assert_eq!(registry.len(), before);
}

#[test]
fn test_remove_new_handle_to_same_function() {
    let registry = MulticastRegistry::with_callables([Callable::new(trim)]);

    assert!(!registry.remove([Callable::new(trim)]));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_remove_identical_closure() {
    let registry: MulticastRegistry<(i32,), i32, ()> = MulticastRegistry::new();
    registry.add_one(Callable::new(|x: i32| Ok(x + 1)));

    assert!(!registry.remove([Callable::new(|x: i32| Ok(x + 1))]));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_remove_takes_first_of_duplicates() {
    let a = Callable::new(trim);
    let b = Callable::new(shout);
    let registry = MulticastRegistry::with_callables([a.clone(), b.clone(), a.clone()]);

    assert!(registry.remove_one(&a));
    assert_eq!(registry.callables(), vec![b.clone(), a.clone()]);

    assert!(registry.remove_one(&a));
    assert_eq!(registry.callables(), vec![b]);

    assert!(!registry.remove_one(&a));
}

#[test]
fn test_remove_several_in_one_call() {
    let a = Callable::new(trim);
    let b = Callable::new(shout);
    let registry = MulticastRegistry::with_callables([a.clone(), b.clone(), a.clone()]);

    // each argument removes at most one entry
    assert!(registry.remove([a.clone(), a.clone()]));
    assert_eq!(registry.callables(), vec![b]);
}

#[test]
fn test_remove_true_when_any_argument_matched() {
    let a = Callable::new(trim);
    let registry = MulticastRegistry::with_callables([a.clone()]);

    assert!(registry.remove([a, Callable::new(trim)]));
    assert!(registry.is_empty());
}

#[test]
fn test_none_entries_are_discarded() {
    let a = Callable::new(trim);
    let registry = MulticastRegistry::with_callables([None, Some(a.clone())]);

    registry.add([None::<Callable<(), String, ()>>, None]);
    assert_eq!(registry.len(), 1);

    assert!(!registry.remove([None::<Callable<(), String, ()>>]));
    assert!(registry.remove([None, Some(a)]));
    assert!(registry.is_empty());
}

#[test]
fn test_remove_from_empty_registry() {
    let registry: MulticastRegistry<(), String, ()> = MulticastRegistry::new();
    assert!(!registry.remove([Callable::new(trim)]));
    assert!(!registry.remove(Vec::<Callable<(), String, ()>>::new()));
}

#[test]
fn test_one_callable_in_many_registries() {
    let shared = Callable::new(trim);
    let first = MulticastRegistry::with_callables([shared.clone()]);
    let second = MulticastRegistry::with_callables([shared.clone()]);

    assert!(first.remove_one(&shared));
    assert!(first.is_empty());
    assert_eq!(second.callables(), vec![shared]);
}

#[test]
fn test_callables_snapshot_is_detached() {
    let registry = MulticastRegistry::with_callables([Callable::new(trim)]);
    let snapshot = registry.callables();

    registry.clear();

    assert_eq!(snapshot.len(), 1);
    assert!(registry.is_empty());
}
