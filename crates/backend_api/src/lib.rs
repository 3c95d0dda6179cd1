pub mod error;
pub mod export;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::{ApiError, Result};
pub use export::sales_to_csv;
pub use router::create_router;
pub use server::run_server;
