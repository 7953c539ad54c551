//! Sequential composition of async functions.
//!
//! Composition chains async functions so that the result of one becomes the
//! sole argument of the next. Stages always run one after another: a stage
//! never starts before the previous one has resolved, and the first failure
//! ends the chain.
//!
//! # Overview
//!
//! - [`compose_right`] / [`compose_right!`]: left-to-right, `g(f(x))`
//! - [`compose`] / [`compose!`]: right-to-left (applicative order), `f(g(x))`
//! - [`Pipeline`]: a stage list assembled at runtime
//!
//! Only the first stage receives the original arguments (a tuple for several
//! arguments). Every later stage receives exactly one value; stages that need
//! more than one argument must be adapted by the caller.
//!
//! # Examples
//!
//! ## Pipeline (left-to-right)
//!
//! ```rust
//! use async_function::{AsyncFunction, compose_right};
//!
//! # futures::executor::block_on(async {
//! let square = |x: i32| async move { Ok::<_, String>(x * x) };
//! let add_two = |x: i32| async move { Ok::<_, String>(x + 2) };
//! assert_eq!(compose_right!(square, add_two).invoke(10).await, Ok(102));
//! # });
//! ```
//!
//! ## Function Composition (right-to-left)
//!
//! ```rust
//! use async_function::{AsyncFunction, compose};
//!
//! # futures::executor::block_on(async {
//! let square = |x: i32| async move { Ok::<_, String>(x * x) };
//! let add_two = |x: i32| async move { Ok::<_, String>(x + 2) };
//! assert_eq!(compose!(square, add_two).invoke(10).await, Ok(144));
//! # });
//! ```
//!
//! # Laws
//!
//! - **Associativity**: `compose!(f, compose!(g, h)) == compose!(compose!(f, g), h)`
//! - **Left Identity**: `compose!(identity(), f) == f`
//! - **Right Identity**: `compose!(f, identity()) == f`
//! - **Mirror**: `compose!(f, g) == compose_right!(g, f)`

mod compose_macro;
mod pipeline;

pub use pipeline::{ComposeRight, Pipeline, Stage, compose, compose_right};

// Re-export macros (they are already at crate root via #[macro_export])
pub use crate::compose;
pub use crate::compose_right;
