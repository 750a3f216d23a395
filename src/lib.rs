//! Server-rendered UI trees split across two services.
//!
//! The render service resolves a page's component tree and ships it as wire
//! text ([`codec`]); the delivery service turns that text into HTML
//! ([`html`]) with the same text embedded for client hydration.

pub mod codec;
pub mod config;
pub mod content;
pub mod element;
pub mod error;
pub mod html;
pub mod pages;
pub mod resolve;
pub mod service;
