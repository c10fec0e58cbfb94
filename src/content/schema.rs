//! Content document schema.
//!
//! The document is a single aggregate with fixed top-level keys. Each key is
//! owned by exactly one [`Section`]; list sections are addressed either by a
//! numeric id (projects, experience) or by position (everything else).
//! Field names are persisted in camelCase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Sections
// ============================================================================

/// One top-level key of the content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Landing banner.
    Hero,
    /// About-me block.
    About,
    /// Portfolio projects, addressed by id.
    Projects,
    /// Work history, addressed by id.
    Experience,
    /// Quotes, addressed by position.
    Testimonials,
    /// Skill categories and extra skills.
    TechStack,
    /// Working-process phases, addressed by position.
    Approach,
    /// Footer call-to-action and copyright.
    Footer,
    /// Social profile links, addressed by position.
    SocialMedia,
    /// Bento grid tiles.
    GridItems,
}

impl Section {
    /// Every section in document order.
    pub const ALL: [Self; 10] = [
        Self::Hero,
        Self::About,
        Self::Projects,
        Self::Experience,
        Self::Testimonials,
        Self::TechStack,
        Self::Approach,
        Self::Footer,
        Self::SocialMedia,
        Self::GridItems,
    ];

    /// Key of the section inside the persisted document.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Testimonials => "testimonials",
            Self::TechStack => "techStack",
            Self::Approach => "approach",
            Self::Footer => "footer",
            Self::SocialMedia => "socialMedia",
            Self::GridItems => "gridItems",
        }
    }

    /// Path segment of the section under `/content`.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::TechStack => "techstack",
            Self::SocialMedia => "social",
            Self::GridItems => "grid",
            other => other.key(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a section name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection {
    /// The name that was given.
    pub name: String,
    /// Closest known name, if any is similar enough.
    pub suggestion: Option<&'static str>,
}

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section '{}'", self.name)?;
        if let Some(suggestion) = self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for Section {
    type Err = UnknownSection;

    /// Accepts either the document key or the route segment,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if let Some(section) = Self::ALL
            .into_iter()
            .find(|sec| sec.key().eq_ignore_ascii_case(&wanted) || sec.route() == wanted)
        {
            return Ok(section);
        }

        let suggestion = Self::ALL
            .into_iter()
            .map(|sec| sec.route())
            .map(|name| (name, strsim::jaro_winkler(name, &wanted)))
            .filter(|(_, score)| *score >= 0.8)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name);

        Err(UnknownSection {
            name: s.to_string(),
            suggestion,
        })
    }
}

// ============================================================================
// Document
// ============================================================================

/// The whole content document.
///
/// Sections missing from the stored file deserialize to their empty value;
/// a section with the wrong shape fails the whole parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub hero: Hero,
    pub about: About,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub testimonials: Vec<Testimonial>,
    pub tech_stack: TechStack,
    pub approach: Vec<ApproachPhase>,
    pub footer: Footer,
    pub social_media: Vec<SocialMedia>,
    pub grid_items: Vec<GridItem>,
}

impl Document {
    /// Returns one section as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the section cannot be encoded.
    pub fn section_value(&self, section: Section) -> serde_json::Result<serde_json::Value> {
        match section {
            Section::Hero => serde_json::to_value(&self.hero),
            Section::About => serde_json::to_value(&self.about),
            Section::Projects => serde_json::to_value(&self.projects),
            Section::Experience => serde_json::to_value(&self.experience),
            Section::Testimonials => serde_json::to_value(&self.testimonials),
            Section::TechStack => serde_json::to_value(&self.tech_stack),
            Section::Approach => serde_json::to_value(&self.approach),
            Section::Footer => serde_json::to_value(&self.footer),
            Section::SocialMedia => serde_json::to_value(&self.social_media),
            Section::GridItems => serde_json::to_value(&self.grid_items),
        }
    }

    /// Number of items in a list section, `None` for singletons.
    #[must_use]
    pub fn item_count(&self, section: Section) -> Option<usize> {
        match section {
            Section::Projects => Some(self.projects.len()),
            Section::Experience => Some(self.experience.len()),
            Section::Testimonials => Some(self.testimonials.len()),
            Section::Approach => Some(self.approach.len()),
            Section::SocialMedia => Some(self.social_media.len()),
            Section::GridItems => Some(self.grid_items.len()),
            Section::TechStack => Some(self.tech_stack.categories.len()),
            Section::Hero | Section::About | Section::Footer => None,
        }
    }
}

// ============================================================================
// Section records
// ============================================================================

/// Landing banner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub profession_title: String,
    pub heading: String,
    pub description: String,
    pub cta_text: String,
    pub cta_link: String,
    #[serde(default)]
    pub image: String,
}

/// About-me block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub main_text: String,
    #[serde(default)]
    pub profile_image: String,
    pub job_title: String,
    #[serde(default)]
    pub closing_text: String,
    #[serde(default)]
    pub expertise_items: Vec<ExpertiseItem>,
}

/// One highlighted area of expertise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertiseItem {
    #[serde(default)]
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Portfolio project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub des: String,
    #[serde(default)]
    pub img: String,
    /// Icon paths of the technologies used.
    #[serde(default)]
    pub icon_lists: Vec<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub source_code: String,
}

/// Work-history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub period: String,
    pub location: String,
    pub desc: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub thumbnail: String,
}

/// Client or colleague quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
}

/// Skills grouped into categories plus a flat list of extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStack {
    pub categories: Vec<SkillCategory>,
    #[serde(default)]
    pub additional_skills: Vec<String>,
}

/// Named group of skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// One phase of the working process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproachPhase {
    pub title: String,
    pub phase: String,
    pub description: String,
}

/// Footer call-to-action and copyright line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub cta: FooterCta,
    pub copyright: FooterCopyright,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterCta {
    pub heading: String,
    pub subtext: String,
    pub button_text: String,
    pub button_link: String,
}

/// Copyright owner. Older documents carried a `sourceCodeLink` here; it is
/// ignored on read and never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterCopyright {
    pub name: String,
    #[serde(default)]
    pub link: String,
}

/// Social profile link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMedia {
    pub name: String,
    /// Icon path.
    #[serde(default)]
    pub img: String,
    /// Profile URL.
    pub link: String,
}

/// Grid tile identifiers were numbers in early documents and strings later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridItemId {
    Number(u64),
    Text(String),
}

impl Default for GridItemId {
    fn default() -> Self {
        Self::Number(0)
    }
}

/// Bento grid tile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    pub id: GridItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub img_class_name: String,
    #[serde(default)]
    pub title_class_name: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub spare_img: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_parses_key_and_route() {
        assert_eq!("techStack".parse::<Section>().unwrap(), Section::TechStack);
        assert_eq!("techstack".parse::<Section>().unwrap(), Section::TechStack);
        assert_eq!("social".parse::<Section>().unwrap(), Section::SocialMedia);
        assert_eq!("socialMedia".parse::<Section>().unwrap(), Section::SocialMedia);
        assert_eq!(" Hero ".parse::<Section>().unwrap(), Section::Hero);
    }

    #[test]
    fn unknown_section_suggests_closest() {
        let err = "testimonals".parse::<Section>().unwrap_err();
        assert_eq!(err.suggestion, Some("testimonials"));
        assert!(err.to_string().contains("did you mean 'testimonials'"));
    }

    #[test]
    fn unknown_section_without_suggestion() {
        let err = "zzzz".parse::<Section>().unwrap_err();
        assert_eq!(err.suggestion, None);
        assert_eq!(err.to_string(), "unknown section 'zzzz'");
    }

    #[test]
    fn document_uses_camel_case_keys() {
        let value = serde_json::to_value(Document::default()).unwrap();
        for section in Section::ALL {
            assert!(
                value.get(section.key()).is_some(),
                "missing key {}",
                section.key()
            );
        }
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let doc: Document = serde_json::from_value(json!({
            "testimonials": [{"quote": "A", "name": "N", "title": "T"}]
        }))
        .unwrap();
        assert_eq!(doc.testimonials.len(), 1);
        assert!(doc.projects.is_empty());
        assert_eq!(doc.hero, Hero::default());
    }

    #[test]
    fn wrong_section_shape_fails() {
        let result: Result<Document, _> = serde_json::from_value(json!({ "projects": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn legacy_source_code_link_is_dropped() {
        let footer: Footer = serde_json::from_value(json!({
            "cta": {"heading": "h", "subtext": "s", "buttonText": "b", "buttonLink": "l"},
            "copyright": {"name": "Me", "link": "https://x", "sourceCodeLink": "https://src"}
        }))
        .unwrap();
        let back = serde_json::to_value(&footer).unwrap();
        assert!(back["copyright"].get("sourceCodeLink").is_none());
        assert_eq!(back["copyright"]["name"], "Me");
    }

    #[test]
    fn grid_item_accepts_numeric_and_string_ids() {
        let items: Vec<GridItem> = serde_json::from_value(json!([
            {"id": 1, "title": "a"},
            {"id": "b", "title": "b"}
        ]))
        .unwrap();
        assert_eq!(items[0].id, GridItemId::Number(1));
        assert_eq!(items[1].id, GridItemId::Text("b".into()));
    }

    #[test]
    fn item_count_for_singletons_is_none() {
        let doc = Document::default();
        assert_eq!(doc.item_count(Section::Hero), None);
        assert_eq!(doc.item_count(Section::Projects), Some(0));
    }

    #[test]
    fn section_value_matches_document_key() {
        let mut doc = Document::default();
        doc.hero.heading = "Hello".into();
        let whole = serde_json::to_value(&doc).unwrap();
        for section in Section::ALL {
            assert_eq!(doc.section_value(section).unwrap(), whole[section.key()]);
        }
    }
}
