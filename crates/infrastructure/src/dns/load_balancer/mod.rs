pub mod pool;
pub mod weighted;

pub use pool::ResolverPool;
pub use weighted::WeightedSelector;
