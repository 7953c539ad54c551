#![cfg(all(feature = "memoize", feature = "compose", feature = "retry"))]
//! Integration tests nesting the combinators inside each other.

use async_function::prelude::*;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::time::Duration;

fn flaky_lookup(
    calls: Arc<AtomicUsize>,
    failures: usize,
) -> impl AsyncFunction<u32, Output = String, Error = String> {
    move |id: u32| {
        let call = calls.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        async move {
            if call <= failures {
                Err(format!("lookup {id} unavailable"))
            } else {
                Ok(format!("record-{id}"))
            }
        }
    }
}

// =============================================================================
// Nesting Tests
// =============================================================================

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_retry_of_memoized_function() {
    let calls = Arc::new(AtomicUsize::new(0));
    let retried = backoff_retry(
        memoize(flaky_lookup(Arc::clone(&calls), 1)),
        3,
        Duration::from_millis(10),
    );

    assert_eq!(retried.invoke(7).await, Ok("record-7".to_string()));
    assert_eq!(retried.invoke(7).await, Ok("record-7".to_string()));
    assert_eq!(calls.load(AtomicOrdering::SeqCst), 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_memoized_retrying_function() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cached = flaky_lookup(Arc::clone(&calls), 2)
        .backoff_retry(2, Duration::from_millis(10))
        .memoize();

    assert_eq!(cached.invoke(1).await, Ok("record-1".to_string()));
    assert_eq!(cached.invoke(1).await, Ok("record-1".to_string()));
    assert_eq!(calls.load(AtomicOrdering::SeqCst), 3);
    assert_eq!(cached.store().len(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_composed_pipeline_with_retry_and_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let lookup = backoff_retry(
        flaky_lookup(Arc::clone(&calls), 1),
        1,
        Duration::from_millis(5),
    );
    let length = |record: String| async move { Ok::<_, String>(record.len()) };
    let is_short = |len: usize| async move { Ok::<_, String>(len < 10) };

    let is_long = memoize(compose_right!(lookup, length, negate(is_short)));

    assert_eq!(is_long.invoke(12_345).await, Ok(true));
    assert_eq!(is_long.invoke(1).await, Ok(false));
    assert_eq!(is_long.invoke(12_345).await, Ok(true));
    assert_eq!(calls.load(AtomicOrdering::SeqCst), 3);
}

#[rstest]
#[tokio::test]
async fn test_negated_memoized_predicate() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let is_even = move |n: u64| {
        counter.fetch_add(1, AtomicOrdering::SeqCst);
        async move { Ok::<_, String>(n % 2 == 0) }
    };
    let is_odd = negate(memoize(is_even));

    assert_eq!(is_odd.invoke(3).await, Ok(true));
    assert_eq!(is_odd.invoke(3).await, Ok(true));
    assert_eq!(is_odd.invoke(4).await, Ok(false));
    assert_eq!(calls.load(AtomicOrdering::SeqCst), 2);
}

#[rstest]
#[tokio::test]
async fn test_compare_composed_results() {
    let square = |x: i32| async move { Ok::<_, String>(x * x) };
    let add_two = |x: i32| async move { Ok::<_, String>(x + 2) };
    let forward = compose_right(square, add_two);
    let backward = compose(square, add_two);

    let ordering = compare(
        async { forward.invoke(10).await.unwrap_or_default() },
        async { backward.invoke(10).await.unwrap_or_default() },
    )
    .await;

    assert_eq!(ordering, std::cmp::Ordering::Less);
}
