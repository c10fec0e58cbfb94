//! Request drafts for id-addressed sections.
//!
//! Incoming experience and project bodies are decoded into drafts whose
//! fields all default, so a missing key and an empty value are reported the
//! same way. A draft turns into a stored record only after its required
//! fields are checked.

use serde::Deserialize;
use thiserror::Error;

use super::schema::{Experience, Project};

/// Why a draft could not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// A required field is absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The body carries an id different from the one in the path
    #[error("ID mismatch: path has {path}, body has {body}")]
    IdMismatch {
        /// Id from the request path
        path: u32,
        /// Id from the request body
        body: u32,
    },
}

fn require(fields: &[(&'static str, &str)]) -> Result<(), DraftError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(DraftError::MissingField(*name)),
        None => Ok(()),
    }
}

fn check_id(path: u32, body: Option<u32>) -> Result<(), DraftError> {
    match body {
        Some(body) if body != path => Err(DraftError::IdMismatch { path, body }),
        _ => Ok(()),
    }
}

// ============================================================================
// Experience
// ============================================================================

/// Experience body as submitted by the admin editor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExperienceDraft {
    pub id: Option<u32>,
    pub title: String,
    pub company: String,
    pub period: String,
    pub location: String,
    pub desc: String,
    pub skills: Vec<String>,
    pub thumbnail: String,
}

impl ExperienceDraft {
    /// Required fields, in the order they are reported.
    pub const REQUIRED: [&'static str; 5] = ["title", "company", "period", "location", "desc"];

    fn validate(&self) -> Result<(), DraftError> {
        require(&[
            ("title", self.title.as_str()),
            ("company", self.company.as_str()),
            ("period", self.period.as_str()),
            ("location", self.location.as_str()),
            ("desc", self.desc.as_str()),
        ])
    }

    fn into_record(self, id: u32) -> Experience {
        Experience {
            id,
            title: self.title,
            company: self.company,
            period: self.period,
            location: self.location,
            desc: self.desc,
            skills: self.skills,
            thumbnail: self.thumbnail,
        }
    }

    /// Record to append. An absent id stays `0` so the accessor assigns one.
    ///
    /// # Errors
    ///
    /// [`DraftError::MissingField`] naming the first blank required field.
    pub fn into_new(self) -> Result<Experience, DraftError> {
        self.validate()?;
        let id = self.id.unwrap_or(0);
        Ok(self.into_record(id))
    }

    /// Record replacing the entry at `path_id`. A body without an id takes
    /// the path id.
    ///
    /// # Errors
    ///
    /// [`DraftError::IdMismatch`] before any field check, then
    /// [`DraftError::MissingField`].
    pub fn into_update(self, path_id: u32) -> Result<Experience, DraftError> {
        check_id(path_id, self.id)?;
        self.validate()?;
        Ok(self.into_record(path_id))
    }
}

// ============================================================================
// Projects
// ============================================================================

/// Project body as submitted by the admin editor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectDraft {
    pub id: Option<u32>,
    pub title: String,
    pub des: String,
    pub img: String,
    pub icon_lists: Vec<String>,
    pub link: String,
    pub source_code: String,
}

impl ProjectDraft {
    fn into_record(self, id: u32) -> Project {
        Project {
            id,
            title: self.title,
            des: self.des,
            img: self.img,
            icon_lists: self.icon_lists,
            link: self.link,
            source_code: self.source_code,
        }
    }

    /// # Errors
    ///
    /// [`DraftError::MissingField`] when the title is blank.
    pub fn into_new(self) -> Result<Project, DraftError> {
        require(&[("title", self.title.as_str())])?;
        let id = self.id.unwrap_or(0);
        Ok(self.into_record(id))
    }

    /// # Errors
    ///
    /// [`DraftError::IdMismatch`] or [`DraftError::MissingField`].
    pub fn into_update(self, path_id: u32) -> Result<Project, DraftError> {
        check_id(path_id, self.id)?;
        require(&[("title", self.title.as_str())])?;
        Ok(self.into_record(path_id))
    }
}
