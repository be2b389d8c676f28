//! Letter composition.
//!
//! The default letter `template`, per-owner `session` step handling, the
//! `machine` that drives a composition from `begin` to `finalize`, the
//! `assembler` that elides empty sections, and the owner `locks` that
//! keep one owner's calls from interleaving.

pub mod assembler;
pub mod locks;
pub mod machine;
pub mod session;
pub mod template;
