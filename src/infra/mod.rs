//! Infrastructure shared by the link and service layers: the frame codec
//! and the text diagnostics.
pub mod codec;
pub mod diag;
