//! Library components of the PDCM submission validator.

pub mod logging;
pub mod pipeline;
