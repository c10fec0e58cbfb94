//! `folio`: content API and admin editor for a single-page portfolio site.
//!
//! The site's copy, projects, experience and other sections live in one
//! JSON document. This crate serves that document over HTTP, lets a single
//! signed-in admin edit it section by section, and stores uploaded images.

pub mod auth;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod observability;
pub mod uploads;
