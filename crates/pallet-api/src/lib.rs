//! # pallet-api
//!
//! HTTP API layer for pallet-pricer.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/`, `/health` | Static acknowledgment |
//! | HEAD | `/` | Empty 200 |
//! | POST | `/`, `/upload_data` | Price a shipment |
//! | POST | `/webhook` | Signed callback (`X-Webhook-Signature`) |

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::{AppConfig, AppState};
