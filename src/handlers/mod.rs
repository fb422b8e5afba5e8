mod cache;
mod error_page;
mod health;
mod metrics;
mod server_data;
mod stop;

pub use cache::{cache_get_handler, cache_post_handler};
pub use error_page::{error_page, not_found_handler};
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use server_data::{server_data_get_handler, server_data_post_handler};
pub use stop::stop_handler;
