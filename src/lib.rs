pub mod all;
pub mod avatar;
pub mod cache;
pub mod changes;
pub mod cli;
pub mod contrib;
pub mod error;
pub mod export;
pub mod forge;
pub mod model;
pub mod period;
pub mod session;
pub mod table;
pub mod util;
