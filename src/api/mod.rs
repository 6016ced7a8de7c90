//! HTTP surface of the store.
//!
//! Routes live under `/api`: `auth` and the product reads are public, while
//! orders, feedback, catalog writes and the admin console sit behind JWT
//! authentication. Swagger UI is served at `/swagger-ui`.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
