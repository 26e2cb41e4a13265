//! Application features
//!
//! Only the translator lives here; history and saved words are plain list
//! stores in `core::lists`.

pub mod translator;
