//! Output generation for a delivered feed.
//!
//! # Submodules
//!
//! - [`json`]: Writes a [`Feed`](crate::models::Feed) document for other tools
//! - [`text`]: Renders a [`LoadState`](crate::feed::LoadState) for the terminal,
//!   including the empty-state messages

pub mod json;
pub mod text;
