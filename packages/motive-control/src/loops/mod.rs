//! Control loops.

mod bang_bang;
mod pid;

pub use bang_bang::{BangBang, BangBangConfig};
pub use pid::{PidEngine, PidGains};
