#![no_std]

//! Shared harvest engine for vault strategies.
//!
//! A strategy contract implements [`Position`] for its external holdings and
//! forwards its public surface to the generic functions in [`base`]. CDP and
//! farming strategies additionally mix in [`CollateralRatioKeeper`] and
//! [`FarmingAdapter`].

pub mod base;
pub mod errors;
pub mod events;
pub mod farming;
pub mod math;
pub mod position;
pub mod ratio_keeper;
pub mod storage;
pub mod swap;

pub use errors::StrategyError;
pub use farming::{FarmingAdapter, FarmingConfig};
pub use position::Position;
pub use ratio_keeper::{CollateralConfig, CollateralRatioKeeper};
