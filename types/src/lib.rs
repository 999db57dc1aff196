//! Common types for the rollsim craps engine.

pub mod craps;
