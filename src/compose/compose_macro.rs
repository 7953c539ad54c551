//! The [`compose!`] and [`compose_right!`] macros for async function composition.
//!
//! Both expand to nested [`ComposeRight`](crate::compose::ComposeRight) values,
//! so the composed function is typed stage by stage and each stage may change
//! the value type.

/// Composes async functions from right to left.
///
/// `compose!(f, g, h)` invokes `h` with the original arguments, then `g` with
/// the result of `h`, then `f` with the result of `g`. It is
/// [`compose_right!`](crate::compose_right) with the stages reversed.
///
/// # Syntax
///
/// - `compose!()` - A [`Noop`](crate::Noop) resolving to `()`
/// - `compose!(f)` - Returns `f` unchanged
/// - `compose!(f, g)` - Returns `compose(f, g)`
/// - `compose!(f, g, h, ...)` - Composes any number of functions
///
/// # Examples
///
/// ```rust
/// use async_function::{AsyncFunction, compose};
///
/// # futures::executor::block_on(async {
/// let sqrt = |x: f64| async move { Ok::<_, String>(x.sqrt()) };
/// let min = |(x, y): (f64, f64)| async move { Ok::<_, String>(x.min(y)) };
/// let composed = compose!(sqrt, min);
/// assert_eq!(composed.invoke((22.0, 9.0)).await, Ok(3.0));
/// # });
/// ```
#[macro_export]
macro_rules! compose {
    // No stages: resolves to () for any arguments
    () => {
        $crate::Noop::new()
    };

    ($function:expr $(,)?) => {
        $function
    };

    // compose!(f, g, h, ...) = compose(f, compose!(g, h, ...))
    ($outer_function:expr, $($remaining_functions:expr),+ $(,)?) => {
        $crate::compose::compose($outer_function, $crate::compose!($($remaining_functions),+))
    };
}

/// Composes async functions from left to right, piping each result forward.
///
/// `compose_right!(f, g, h)` invokes `f` with the original arguments, then `g`
/// with the result of `f`, then `h` with the result of `g`.
///
/// # Syntax
///
/// - `compose_right!()` - A [`Noop`](crate::Noop) resolving to `()`
/// - `compose_right!(f)` - Returns `f` unchanged
/// - `compose_right!(f, g)` - Returns `compose_right(f, g)`
/// - `compose_right!(f, g, h, ...)` - Composes any number of functions
///
/// # Examples
///
/// ```rust
/// use async_function::{AsyncFunction, compose_right};
///
/// # futures::executor::block_on(async {
/// let abs = |x: i64| async move { Ok::<_, String>(x.abs()) };
/// let half = |x: i64| async move { Ok::<_, String>(x / 2) };
/// let describe = |x: i64| async move { Ok::<_, String>(format!("got {x}")) };
/// let composed = compose_right!(abs, half, describe);
/// assert_eq!(composed.invoke(-64).await, Ok("got 32".to_string()));
/// # });
/// ```
#[macro_export]
macro_rules! compose_right {
    () => {
        $crate::Noop::new()
    };

    ($function:expr $(,)?) => {
        $function
    };

    // compose_right!(f, g, h, ...) = compose_right(f, compose_right!(g, h, ...))
    ($first_function:expr, $($remaining_functions:expr),+ $(,)?) => {
        $crate::compose::compose_right($first_function, $crate::compose_right!($($remaining_functions),+))
    };
}

#[cfg(test)]
mod tests {
    use crate::function::AsyncFunction;

    #[tokio::test]
    async fn test_compose_empty() {
        let composed = compose!();
        let result: Result<(), String> = composed.invoke(5).await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_compose_single() {
        let double = |x: i32| async move { Ok::<_, String>(x * 2) };
        let composed = compose!(double);
        assert_eq!(composed.invoke(5).await, Ok(10));
    }

    #[tokio::test]
    async fn test_compose_three() {
        let add_one = |x: i32| async move { Ok::<_, String>(x + 1) };
        let double = |x: i32| async move { Ok::<_, String>(x * 2) };
        let square = |x: i32| async move { Ok::<_, String>(x * x) };
        let composed = compose!(add_one, double, square);
        assert_eq!(composed.invoke(3).await, Ok(19));
    }

    #[tokio::test]
    async fn test_compose_right_three() {
        let add_one = |x: i32| async move { Ok::<_, String>(x + 1) };
        let double = |x: i32| async move { Ok::<_, String>(x * 2) };
        let square = |x: i32| async move { Ok::<_, String>(x * x) };
        let composed = compose_right!(add_one, double, square);
        assert_eq!(composed.invoke(3).await, Ok(64));
    }
}
