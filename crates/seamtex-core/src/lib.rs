pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod lens;
pub mod pipeline;
pub mod processor;
pub mod raster;
pub mod readiness;
pub mod resource;
pub mod session;
pub mod view;

pub use error::{Result, SeamtexError};
pub use session::Session;
