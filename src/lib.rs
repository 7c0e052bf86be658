// SPDX-License-Identifier: MPL-2.0
//! `iced_slideshow` is the navigation and gesture core of a full-screen image
//! slideshow built with the Iced GUI framework.
//!
//! It keeps a bounded window of loaded images around the active slide,
//! prefetches neighbors with a staggered delay, pages more items in at either
//! end, and recognizes swipe-to-dismiss gestures without fighting the
//! scrolling of nested content.

#![doc(html_root_url = "https://docs.rs/iced_slideshow/0.1.0")]

pub mod animation;
pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod gesture;
pub mod media;
pub mod viewer;
