//! Seed content written by `folio init`.

use super::schema::Document;

const SEED_JSON: &str = include_str!("../../assets/seed/content.json");

/// Parses the embedded seed document.
///
/// # Errors
///
/// Returns a parse error if the embedded asset does not match the schema.
pub fn seed_document() -> serde_json::Result<Document> {
    serde_json::from_str(SEED_JSON)
}
