//! Release-note analysis: tag range selection, commit classification, fetch
//! planning and note assembly. Everything here is pure; remote calls live in
//! [`crate::forge`].
pub mod assembler;
pub mod classifier;
pub mod downloads;
pub mod range;
pub mod window;
