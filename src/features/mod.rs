pub mod bills;
pub mod congress;
pub mod votes;
