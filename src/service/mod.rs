pub mod matcher;
pub mod store;

pub use matcher::MatcherService;
pub use store::RequestStore;
