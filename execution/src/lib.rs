pub mod craps;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use craps::{
    CrapsTable, PayoutTable, PlacementError, RemovalError, ResolutionError, TableState,
};
