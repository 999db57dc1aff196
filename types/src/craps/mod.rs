mod bet;
mod constants;
mod credits;
mod report;
mod roll;
mod table;

pub use bet::*;
pub use constants::*;
pub use credits::*;
pub use report::*;
pub use roll::*;
pub use table::*;

#[cfg(test)]
mod tests;
