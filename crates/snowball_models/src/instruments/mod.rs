//! Snowball contract definitions.
//!
//! This module provides:
//! - [`ContractTerms`]: tenure, lock-in and barrier ratios shared by every start date
//! - [`ContractSpec`]: terms bound to one contract start date
//! - [`ContractSpecBuilder`]: builder with the standard defaults
//! - [`ContractError`]: validation failures

mod contract;
mod error;

pub use contract::{ContractSpec, ContractSpecBuilder, ContractTerms};
pub use error::ContractError;
