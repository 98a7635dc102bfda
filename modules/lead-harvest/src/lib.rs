pub mod company;
pub mod config;
pub mod jobs;
pub mod output;
pub mod source;

pub use company::{extract_company, NOT_AVAILABLE};
pub use config::Config;
pub use jobs::HarvestSummary;
pub use source::ActorSource;
