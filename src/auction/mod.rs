pub mod model;
pub mod state;

pub use model::{Auction, AuctionStatus, Money, ParseMoneyError};
pub use state::TransitionError;
