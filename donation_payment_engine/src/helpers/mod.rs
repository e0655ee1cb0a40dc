//! Small helpers shared across the engine.

mod ist;

pub use ist::{format_ist_date, ist, ist_now};
