pub mod exec;
pub mod fetch;
pub mod layout;
pub mod mosaic;

pub use exec::{exec, render};
pub use fetch::{fetch_avatars, FetchReport};
pub use layout::{resize_value, MosaicLayout};
pub use mosaic::{build_mosaic, load_tile};
