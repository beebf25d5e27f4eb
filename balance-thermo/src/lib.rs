//! Saturation properties of water for condenser calculations.
//!
//! Condenser strategies settle on a saturation temperature and need the
//! matching saturation pressure. That conversion sits behind the
//! [`SteamTableProvider`] trait so callers can choose the correlation:
//!
//! - [`Iapws97`] evaluates the IAPWS-IF97 saturation-pressure equation.
//! - [`AntoineCorrelation`] is a compact exp/log fit used by the Berman method.
//! - `CoolPropWater`, behind the `coolprop` feature, queries CoolProp through
//!   `rfluids`.

mod error;
mod steam_table;

pub mod units;

pub use error::PropertyError;
pub use steam_table::{AntoineCorrelation, Iapws97, SteamTableProvider};
#[cfg(feature = "coolprop")]
pub use steam_table::CoolPropWater;
