pub mod fetch;
pub mod hash;
pub mod index;
pub mod normalize;
pub mod store;

pub use index::Index;
