//! Policy trait and baseline implementations.

pub mod forager;
pub mod random;
pub mod trait_;

pub use forager::ForagerPolicy;
pub use random::RandomPolicy;
pub use trait_::Policy;
