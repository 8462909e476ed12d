// Suggestion lifecycle: bulk generation against a gap analysis, persistence
// (handlers + store), then section grouping of the user-accepted subset for
// scoped re-optimization.

pub mod generator;
pub mod grouping;
pub mod handlers;
