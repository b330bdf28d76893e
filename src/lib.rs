//! Headless core for a TV basketball streaming front-end: scrape a team
//! schedule page into [`schedule::Game`] records, and resolve a team page to
//! a direct HLS manifest URL a player can open.
//!
//! Both entry points are stateless request/response calls; callers own all
//! state and re-fetch rather than mutate.

pub mod config;
pub mod errors;
pub mod resolver;
pub mod schedule;
pub mod teams;
