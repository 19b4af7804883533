#[cfg(feature = "async-tokio")]
mod async_tokio;
mod config;
mod lock;
mod mutex;
mod state;
mod status;
#[cfg(test)]
mod tests;

#[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
#[cfg(feature = "async-tokio")]
pub use async_tokio::*;
pub use config::*;
pub use lock::*;
pub(crate) use mutex::*;
pub use state::*;
pub use status::*;
