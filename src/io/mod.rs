//! Result export to files for external charting and reporting tools.

pub mod export;
