//! Content document, persistence and per-section accessors.
//!
//! Layering, leaves first:
//! - [`schema`]: the typed document and its [`Section`] keys
//! - [`store`]: whole-document persistence behind [`DocumentStore`]
//! - [`service`]: read-modify-write accessors per section
//! - [`validation`]: required-field checks for incoming item bodies
//! - [`icons`]: project icon canonicalisation

pub mod icons;
pub mod schema;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

pub use schema::{
    About, ApproachPhase, Document, ExpertiseItem, Experience, Footer, FooterCopyright, FooterCta,
    GridItem, GridItemId, Hero, Project, Section, SkillCategory, SocialMedia, TechStack,
    Testimonial, UnknownSection,
};
pub use seed::seed_document;
pub use service::ContentService;
pub use store::{DocumentStore, JsonFileStore, MemoryStore};
pub use validation::{DraftError, ExperienceDraft, ProjectDraft};
