//! Routing model configuration.

/// How river outputs are evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Evaluation {
    /// Each river in the upstream closure is evaluated once, upstream
    /// first, with explicit memoization. Linear in rivers × steps and
    /// bounded in stack depth.
    #[default]
    Memoized,
    /// Plain recursion over upstream rivers. Re-walks shared subtrees on
    /// every call and recurses once per network level.
    Recursive,
}

/// Configuration for a [`RoutingModel`](crate::RoutingModel).
///
/// Fixed for the lifetime of the model. Both evaluation strategies and
/// both the serial and the parallel path produce bit-identical results.
#[derive(Clone, Debug, Default)]
pub struct RoutingConfig {
    /// Evaluation strategy. Default: [`Evaluation::Memoized`].
    pub evaluation: Evaluation,
    /// Evaluate the cells feeding a river on the rayon thread pool.
    /// Contributions are still summed in ascending cell order.
    /// Only effective with the `parallel` feature. Default: `false`.
    pub parallel: bool,
}

impl RoutingConfig {
    /// Whether cell contributions will actually be computed in parallel.
    pub fn parallel_enabled(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }
}
