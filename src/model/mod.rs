mod common;
mod match_detail;
mod match_map;
mod result;

pub use common::*;
pub use match_detail::*;
pub use match_map::*;
pub use result::*;
