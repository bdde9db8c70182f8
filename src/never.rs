/// Rust's `!` is unstable.  This empty enum is a locally-defined equivalent which is stable.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Never {}
