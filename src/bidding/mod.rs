pub mod ledger;
pub mod model;
pub mod validator;

pub use ledger::BidLedger;
pub use model::{Bid, BidStatus, PlaceBidRequest};
pub use validator::{BidRejection, BidValidator, BidVerdict};
