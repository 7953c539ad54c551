//! Sequential composition of async functions.

use std::fmt;

use crate::function::{AsyncFunction, BoxFuture};

/// Two async functions run one after the other. Created by [`compose_right`],
/// [`compose`] and the composition macros.
///
/// `first` receives the original arguments, `second` receives the result of
/// `first` as its only argument.
#[derive(Debug, Clone, Copy)]
pub struct ComposeRight<F, G> {
    first: F,
    second: G,
}

impl<Args, F, G> AsyncFunction<Args> for ComposeRight<F, G>
where
    F: AsyncFunction<Args>,
    F::Output: Send,
    F::Error: Send,
    G: AsyncFunction<F::Output, Error = F::Error>,
    Args: Send,
{
    type Output = G::Output;
    type Error = F::Error;

    fn invoke<'a>(&'a self, arguments: Args) -> BoxFuture<'a, Result<G::Output, F::Error>>
    where
        Args: 'a,
    {
        Box::pin(async move {
            let intermediate = self.first.invoke(arguments).await?;
            self.second.invoke(intermediate).await
        })
    }
}

/// Composes two async functions so the result is piped forward:
/// `compose_right(f, g)(x) == g(f(x).await?).await`.
///
/// `second` never starts before `first` has resolved, and is not called at
/// all when `first` fails.
///
/// # Examples
///
/// ```rust
/// use async_function::AsyncFunction;
/// use async_function::compose::compose_right;
///
/// # futures::executor::block_on(async {
/// let square = |x: i32| async move { Ok::<_, String>(x * x) };
/// let add_two = |x: i32| async move { Ok::<_, String>(x + 2) };
/// assert_eq!(compose_right(square, add_two).invoke(10).await, Ok(102));
/// # });
/// ```
#[inline]
pub const fn compose_right<F, G>(first: F, second: G) -> ComposeRight<F, G> {
    ComposeRight { first, second }
}

/// Composes two async functions in applicative order:
/// `compose(f, g)(x) == f(g(x).await?).await`.
///
/// This is [`compose_right`] with its stages reversed.
///
/// # Examples
///
/// ```rust
/// use async_function::AsyncFunction;
/// use async_function::compose::compose;
///
/// # futures::executor::block_on(async {
/// let sqrt = |x: f64| async move { Ok::<_, String>(x.sqrt()) };
/// let abs = |x: f64| async move { Ok::<_, String>(x.abs()) };
/// assert_eq!(compose(sqrt, abs).invoke(-64.0).await, Ok(8.0));
/// # });
/// ```
#[inline]
pub const fn compose<F, G>(outer: F, inner: G) -> ComposeRight<G, F> {
    compose_right(inner, outer)
}

/// A boxed [`Pipeline`] stage.
pub type Stage<'s, A, E> = Box<dyn AsyncFunction<A, Output = A, Error = E> + 's>;

/// A stage list assembled at runtime, for stages that all map `A` to `A`.
///
/// Stages run in insertion order. Invoking a pipeline without stages resolves
/// to `None` whatever the argument; otherwise the result of the last stage is
/// returned in `Some`.
///
/// # Examples
///
/// ```rust
/// use async_function::AsyncFunction;
/// use async_function::compose::Pipeline;
///
/// # futures::executor::block_on(async {
/// let pipeline = Pipeline::<i32, String>::new()
///     .stage(|x: i32| async move { Ok::<_, String>(x * 2) })
///     .stage(|x: i32| async move { Ok::<_, String>(x + 1) });
/// assert_eq!(pipeline.invoke(5).await, Ok(Some(11)));
///
/// let empty = Pipeline::<i32, String>::new();
/// assert_eq!(empty.invoke(5).await, Ok(None));
/// # });
/// ```
pub struct Pipeline<'s, A, E> {
    stages: Vec<Stage<'s, A, E>>,
}

impl<'s, A, E> Pipeline<'s, A, E> {
    /// Creates a pipeline with no stages.
    #[must_use]
    pub const fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Creates a pipeline from a list of boxed stages, first stage first.
    #[must_use]
    pub const fn from_stages(stages: Vec<Stage<'s, A, E>>) -> Self {
        Self { stages }
    }

    /// Appends a stage that runs after every stage added so far.
    #[must_use]
    pub fn stage<F>(mut self, function: F) -> Self
    where
        F: AsyncFunction<A, Output = A, Error = E> + 's,
    {
        self.stages.push(Box::new(function));
        self
    }

    /// Reverses the stage order, turning a left-to-right list into
    /// applicative (`compose`) order and back.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.stages.reverse();
        self
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<A, E> Default for Pipeline<'_, A, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, E> fmt::Debug for Pipeline<'_, A, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl<A, E> AsyncFunction<A> for Pipeline<'_, A, E>
where
    A: Send,
    E: Send,
{
    type Output = Option<A>;
    type Error = E;

    fn invoke<'a>(&'a self, arguments: A) -> BoxFuture<'a, Result<Option<A>, E>>
    where
        A: 'a,
    {
        Box::pin(async move {
            let mut stages = self.stages.iter();
            let Some(first) = stages.next() else {
                return Ok(None);
            };
            let mut value = first.invoke(arguments).await?;
            for stage in stages {
                value = stage.invoke(value).await?;
            }
            Ok(Some(value))
        })
    }
}
