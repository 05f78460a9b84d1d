pub mod aggregate;
pub mod exec;

pub use aggregate::{contributions, tally_contributions};
pub use exec::exec;
