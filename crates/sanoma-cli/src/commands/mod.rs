//! Command implementations.

pub mod config;
pub mod domains;
pub mod filter;
pub mod query;
pub mod stats;
pub mod timeline;

pub use self::config::execute_config;
pub use self::domains::execute_domains;
pub use self::filter::execute_filter;
pub use self::query::execute_query;
pub use self::stats::execute_stats;
pub use self::timeline::execute_timeline;
