//! `ransu`: constrained random sampling on top of `rand`.
//!
//! Samplers for distributions that `rand`/`rand_distr` do not ship, where the
//! difficulty is geometric or combinatorial rather than in the random bits:
//!
//! - `spaced`: increasing values in an interval with a minimum gap (order statistics).
//! - `simplex`: uniform points inside one simplex (Dirichlet-weighted vertices).
//! - `triangle`: uniform points inside a triangle embedded in any dimension.
//! - `complex`: uniform points over a union of simplices (volume-weighted multinomial split).
//! - `select`: batched selection with or without replacement, optionally weighted.
//! - `table`: random contingency tables with fixed marginals.
//! - `distr`: Dirichlet(1, …, 1) and multinomial draws with runtime dimensions.
//!
//! Every sampler has a `*_with_rng` entry point taking any `R: Rng + ?Sized`. The
//! shorter name is a convenience wrapper over `rand::rng()`. Samplers hold no state
//! between calls, and invalid input is rejected before any randomness is consumed.
//!
//! Batches are returned as `ndarray` arrays with the batch axis first.

#![forbid(unsafe_code)]

pub mod complex;
pub mod distr;
pub mod error;
mod linalg;
pub mod select;
pub mod simplex;
pub mod spaced;
pub mod table;
pub mod triangle;

pub use complex::{simplex_volume, uniform_simplices, uniform_simplices_with_rng};
pub use distr::{dirichlet_ones, multinomial};
pub use error::{Result, SampleError};
pub use select::{select, select_with_rng, Draw, Selection};
pub use simplex::{
    barycentric, uniform_simplex, uniform_simplex_batch, uniform_simplex_batch_with_rng,
    uniform_simplex_with_rng,
};
pub use spaced::{
    random_spaced, random_spaced_batch, random_spaced_batch_with_rng, random_spaced_with_rng,
    spaced_marginal_mean,
};
pub use table::{
    marginals, random_table, random_table_from_table, random_table_from_table_with_rng,
    random_table_with_rng,
};
pub use triangle::{
    uniform_triangle, uniform_triangle_batch, uniform_triangle_batch_with_rng,
    uniform_triangle_with_rng,
};
