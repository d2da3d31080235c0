#![no_std]

pub mod types;
pub mod storage;
pub mod validation;
pub mod rounds;
pub mod pricing;
pub mod vesting;
pub mod payments;
pub mod whitelist;
pub mod history;
pub mod sale;
pub mod admin;
pub mod events;
pub mod presale;

// ============================================================================
// CONTRATO PRINCIPAL
// ============================================================================

pub use presale::{PresaleContract, PresaleContractClient};
pub use types::*;
