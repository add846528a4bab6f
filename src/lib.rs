//! Multi-venue Solana transaction encoding engine.
//!
//! Given a trade intent (wallet, mint, amount, slippage, operation) the
//! engine derives the accounts the venue's program instruction references,
//! builds the instruction's 64-byte payload, assembles an unsigned
//! transaction message around the latest blockhash, and estimates the fee.
//! Signing, submission, and confirmation are deliberately out of scope.

pub mod assemble;
pub mod config;
pub mod derive;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fees;
pub mod gateway;
pub mod response;
pub mod telemetry;
pub mod validate;
pub mod venues;

pub use config::{Registry, RpcSettings, VenueConfig};
pub use domain::{EncodedTransaction, Network, Operation, TradeIntent, Venue};
pub use engine::Engine;
pub use error::EncodeError;
pub use gateway::{NetworkGateway, RpcGateway};
pub use response::{EncodeResponse, EncodingResult};
