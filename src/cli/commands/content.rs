//! Offline content commands: `init`, `validate` and `show`.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::info;

use crate::cli::args::{InitArgs, OutputFormat, ShowArgs, ValidateArgs};
use crate::content::icons;
use crate::content::{Document, DocumentStore, JsonFileStore, Section, seed_document};
use crate::error::FolioError;

/// Write the seed document.
///
/// # Errors
///
/// Returns a usage error if the document exists and `--force` was not
/// given, or a store error if it cannot be written.
pub async fn init(args: &InitArgs) -> Result<(), FolioError> {
    let store = JsonFileStore::new(&args.content);
    if store.exists().await && !args.force {
        return Err(FolioError::Usage(format!(
            "{} already exists (use --force to overwrite)",
            args.content.display()
        )));
    }

    store.save(&seed_document()?).await?;
    info!(path = %args.content.display(), "seed content written");
    println!("Wrote seed content to {}", args.content.display());
    Ok(())
}

/// Check a document and print what it holds.
///
/// # Errors
///
/// Returns a store error if the document is missing or malformed.
pub async fn validate(args: &ValidateArgs) -> Result<(), FolioError> {
    let store = JsonFileStore::new(&args.content);
    let document = store.load().await?;
    let report = ValidationReport::build(store.location(), &document);

    for warning in &report.warnings {
        tracing::warn!("{warning}");
    }

    match args.format {
        OutputFormat::Human => print!("{}", report.render_human()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Print one section as pretty JSON.
///
/// # Errors
///
/// Returns a usage error for an unknown section name, or a store error if
/// the document cannot be read.
pub async fn show(args: &ShowArgs) -> Result<(), FolioError> {
    let section: Section = args
        .section
        .parse()
        .map_err(|e: crate::content::UnknownSection| FolioError::Usage(e.to_string()))?;

    let document = JsonFileStore::new(&args.content).load().await?;
    let value = document.section_value(section)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

// ============================================================================
// Report
// ============================================================================

/// Summary of a content document.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub location: String,
    pub sections: Vec<SectionSummary>,
    /// Display names of every technology referenced by projects.
    pub technologies: Vec<String>,
    pub warnings: Vec<String>,
}

/// One line of the report.
#[derive(Debug, Serialize)]
pub struct SectionSummary {
    pub section: &'static str,
    /// Item count for list sections; absent for singletons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
}

impl ValidationReport {
    #[must_use]
    pub fn build(location: String, document: &Document) -> Self {
        let sections = Section::ALL
            .into_iter()
            .map(|section| SectionSummary {
                section: section.key(),
                items: document.item_count(section),
            })
            .collect();

        let mut warnings = Vec::new();
        duplicate_ids(
            Section::Projects,
            document.projects.iter().map(|p| p.id),
            &mut warnings,
        );
        duplicate_ids(
            Section::Experience,
            document.experience.iter().map(|e| e.id),
            &mut warnings,
        );

        let mut technologies = BTreeSet::new();
        for project in &document.projects {
            for entry in &project.icon_lists {
                if icons::is_icon_path(entry) {
                    technologies.insert(icons::tech_name(entry));
                } else if let Some(icon) = icons::icon_for(entry) {
                    warnings.push(format!(
                        "project {}: icon '{entry}' will be stored as '{icon}'",
                        project.id
                    ));
                    technologies.insert(icons::tech_name(&icon));
                } else {
                    warnings.push(format!(
                        "project {}: icon '{entry}' has no icon path and is kept as typed",
                        project.id
                    ));
                    technologies.insert(entry.clone());
                }
            }
        }

        Self {
            location,
            sections,
            technologies: technologies.into_iter().collect(),
            warnings,
        }
    }

    /// Plain-text rendering.
    #[must_use]
    pub fn render_human(&self) -> String {
        let mut out = format!("{}\n", self.location);
        for summary in &self.sections {
            match summary.items {
                Some(n) => out.push_str(&format!("  {:<14} {n} item(s)\n", summary.section)),
                None => out.push_str(&format!("  {:<14} present\n", summary.section)),
            }
        }
        if !self.technologies.is_empty() {
            out.push_str(&format!("technologies: {}\n", self.technologies.join(", ")));
        }
        if self.warnings.is_empty() {
            out.push_str("no problems found\n");
        } else {
            out.push_str(&format!("{} warning(s)\n", self.warnings.len()));
        }
        out
    }
}

fn duplicate_ids(section: Section, ids: impl Iterator<Item = u32>, warnings: &mut Vec<String>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if id == 0 {
            warnings.push(format!("{section}: item without an id"));
        } else if !seen.insert(id) && reported.insert(id) {
            warnings.push(format!("{section}: duplicate id {id}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Experience, Project};

    fn project(id: u32, icons: &[&str]) -> Project {
        Project {
            id,
            title: format!("P{id}"),
            icon_lists: icons.iter().map(ToString::to_string).collect(),
            ..Project::default()
        }
    }

    #[test]
    fn seed_document_is_clean() {
        let report = ValidationReport::build("seed".into(), &seed_document().unwrap());
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.sections.len(), Section::ALL.len());
    }

    #[test]
    fn duplicate_ids_reported_once() {
        let mut doc = Document::default();
        doc.experience = vec![
            Experience {
                id: 2,
                ..Experience::default()
            },
            Experience {
                id: 2,
                ..Experience::default()
            },
            Experience {
                id: 2,
                ..Experience::default()
            },
        ];
        let report = ValidationReport::build("x".into(), &doc);
        assert_eq!(report.warnings, vec!["experience: duplicate id 2".to_string()]);
    }

    #[test]
    fn technologies_use_display_names() {
        let mut doc = Document::default();
        doc.projects = vec![project(1, &["/re.svg", "/custom.svg"]), project(2, &["React"])];
        let report = ValidationReport::build("x".into(), &doc);
        assert_eq!(report.technologies, vec!["React".to_string(), "custom".to_string()]);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("'/re.svg'"));
    }

    #[test]
    fn human_rendering_lists_sections() {
        let report = ValidationReport::build("doc.json".into(), &Document::default());
        let text = report.render_human();
        assert!(text.starts_with("doc.json\n"));
        assert!(text.contains("hero"));
        assert!(text.contains("projects       0 item(s)"));
        assert!(text.ends_with("no problems found\n"));
    }
}
