pub mod api;
pub mod auction;
pub mod bidding;
pub mod client;
pub mod config;
pub mod drafts;
pub mod error;
pub mod pipeline;
pub mod session;
pub mod transport;

pub use client::AuctionClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
