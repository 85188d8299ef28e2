//! Numeric types used in game values

pub mod nimber;
