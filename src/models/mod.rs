pub mod credentials;
pub mod job;
pub mod loaders;
pub mod search;

pub use credentials::Credentials;
pub use job::{ApplicationResult, ApplyStatus, JobLink};
pub use loaders::load_credentials;
pub use search::SearchQuery;
