#![forbid(unsafe_code)]

pub mod model;
pub mod samples;
pub mod time;

pub use time::Clock;
