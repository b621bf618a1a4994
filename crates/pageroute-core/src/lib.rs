pub mod config;
pub mod logging;

// Resolution pipeline, leaves first.
pub mod normalize;
pub mod placeholder;
pub mod matcher;
pub mod rank;
pub mod bind;
pub mod redirect;

pub mod context;
pub mod engine;
pub mod error;
pub mod store;

pub use bind::ResolvedPage;
pub use context::ResolveContext;
pub use engine::{resolve, Resolution, RequestPath, Router};
pub use error::RouteError;
