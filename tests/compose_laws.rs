#![cfg(feature = "compose")]
//! Property-based tests for async composition laws.
//!
//! ## Composition Laws
//! - **Mirror**: `compose!(f, g)(x) == compose_right!(g, f)(x)`
//! - **Associativity**: `compose_right(f, compose_right(g, h)) == compose_right(compose_right(f, g), h)`
//! - **Left Identity**: `compose_right(identity, f) == f`
//! - **Right Identity**: `compose_right(f, identity) == f`
//!
//! ## Pipeline Laws
//! - **Consistency with Macros**: a pipeline of `[f, g, h]` yields
//!   `Some(compose_right!(f, g, h)(x))`
//!
//! ## Failure Laws
//! - **Left Zero**: a failing first stage fails the composition with the
//!   same error, whatever follows

use async_function::compose::{Pipeline, compose, compose_right};
use async_function::{AsyncFunction, identity};
use futures::executor::block_on;
use proptest::prelude::*;

fn increment(x: i32) -> futures::future::Ready<Result<i32, String>> {
    futures::future::ready(Ok(x.wrapping_add(1)))
}

fn double(x: i32) -> futures::future::Ready<Result<i32, String>> {
    futures::future::ready(Ok(x.wrapping_mul(2)))
}

fn negate_value(x: i32) -> futures::future::Ready<Result<i32, String>> {
    futures::future::ready(Ok(x.wrapping_neg()))
}

fn reject_negative(x: i32) -> futures::future::Ready<Result<i32, String>> {
    futures::future::ready(if x < 0 {
        Err(format!("{x} is negative"))
    } else {
        Ok(x)
    })
}

// =============================================================================
// Composition Laws
// =============================================================================

proptest! {
    /// Mirror Law: compose!(f, g)(x) == compose_right!(g, f)(x)
    #[test]
    fn prop_compose_mirrors_compose_right(x in any::<i32>()) {
        let left = compose!(double, increment);
        let right = compose_right!(increment, double);

        prop_assert_eq!(block_on(left.invoke(x)), block_on(right.invoke(x)));
    }

    /// Mirror Law for the compose functions
    #[test]
    fn prop_compose_function_mirrors_compose_right_function(x in any::<i32>()) {
        let left = compose(negate_value, double);
        let right = compose_right(double, negate_value);

        prop_assert_eq!(block_on(left.invoke(x)), block_on(right.invoke(x)));
    }

    /// Associativity Law
    #[test]
    fn prop_compose_right_associativity(x in any::<i32>()) {
        let nested_right = compose_right(increment, compose_right(double, negate_value));
        let nested_left = compose_right(compose_right(increment, double), negate_value);

        prop_assert_eq!(block_on(nested_right.invoke(x)), block_on(nested_left.invoke(x)));
    }

    /// Left Identity Law: compose_right(identity, f)(x) == f(x)
    #[test]
    fn prop_compose_right_left_identity(x in any::<i32>()) {
        let composed = compose_right(identity::<String>(), double);

        prop_assert_eq!(block_on(composed.invoke(x)), block_on(double(x)));
    }

    /// Right Identity Law: compose_right(f, identity)(x) == f(x)
    #[test]
    fn prop_compose_right_right_identity(x in any::<i32>()) {
        let composed = compose_right(double, identity::<String>());

        prop_assert_eq!(block_on(composed.invoke(x)), block_on(double(x)));
    }
}

// =============================================================================
// Pipeline Laws
// =============================================================================

proptest! {
    /// A pipeline agrees with the macro built from the same stages
    #[test]
    fn prop_pipeline_consistent_with_macro(x in any::<i32>()) {
        let pipeline = Pipeline::<i32, String>::new()
            .stage(increment)
            .stage(double)
            .stage(negate_value);
        let composed = compose_right!(increment, double, negate_value);

        prop_assert_eq!(
            block_on(pipeline.invoke(x)),
            block_on(composed.invoke(x)).map(Some)
        );
    }

    /// Reversing twice restores the original order
    #[test]
    fn prop_pipeline_double_reverse(x in any::<i32>()) {
        let original = Pipeline::<i32, String>::new().stage(increment).stage(double);
        let twice = Pipeline::<i32, String>::new()
            .stage(increment)
            .stage(double)
            .reversed()
            .reversed();

        prop_assert_eq!(block_on(original.invoke(x)), block_on(twice.invoke(x)));
    }
}

// =============================================================================
// Failure Laws
// =============================================================================

proptest! {
    /// A failing first stage decides the outcome
    #[test]
    fn prop_failure_is_left_zero(x in i32::MIN..0) {
        let composed = compose_right!(reject_negative, double, increment);

        prop_assert_eq!(
            block_on(composed.invoke(x)),
            Err(format!("{x} is negative"))
        );
    }
}
