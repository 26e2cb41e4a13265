//! Core logic, independent of any front end
//!
//! - `debounce`: trailing-edge timer for input events
//! - `storage`: key-value persistence (redb, in-memory fallback)
//! - `lists`: bounded, deduplicating record lists (history, saved words)
//! - `features`: the translation client and language table
//! - `collab`: OCR and speech collaborator seams
//! - `workflow`: ties the above together behind a `ViewBinder`

pub mod collab;
pub mod debounce;
pub mod features;
pub mod lists;
pub mod storage;
pub mod workflow;
