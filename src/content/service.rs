//! Per-section content accessors.
//!
//! Every accessor loads the whole document, reads or replaces one section
//! (or one item inside it) and, for mutations, saves the whole document
//! back. Mutations are serialised through a single writer lock so two
//! concurrent edits of different sections cannot clobber each other within
//! one process; separate processes sharing the same file still race.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::icons;
use super::schema::{
    About, ApproachPhase, Document, Experience, Footer, GridItem, Hero, Project, Section,
    SocialMedia, TechStack, Testimonial,
};
use super::store::DocumentStore;
use crate::error::ContentError;
use crate::observability::metrics;

/// Result type alias for accessor operations.
pub type Result<T> = std::result::Result<T, ContentError>;

// ============================================================================
// Addressing helpers
// ============================================================================

/// Items of an id-addressed section.
pub trait Identified {
    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
}

impl Identified for Project {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

impl Identified for Experience {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// Next free id: one past the largest existing id, `1` for an empty list.
#[must_use]
pub fn next_id<T: Identified>(items: &[T]) -> u32 {
    items.iter().map(Identified::id).max().map_or(1, |max| max.saturating_add(1))
}

/// Appends `item`, assigning [`next_id`] when its id is `0`.
///
/// # Errors
///
/// [`ContentError::DuplicateId`] if an explicit id is already taken.
pub fn append_with_id<T: Identified>(section: Section, items: &mut Vec<T>, mut item: T) -> Result<u32> {
    if item.id() == 0 {
        item.set_id(next_id(items));
    } else if items.iter().any(|existing| existing.id() == item.id()) {
        return Err(ContentError::DuplicateId {
            section,
            id: item.id(),
        });
    }
    let id = item.id();
    items.push(item);
    Ok(id)
}

/// Prepares a whole replacement list: explicit ids must be unique, and
/// items without one are numbered after the largest id.
///
/// # Errors
///
/// [`ContentError::DuplicateId`] for the first repeated explicit id.
pub fn number_items<T: Identified>(section: Section, items: &mut [T]) -> Result<()> {
    let mut seen = HashSet::new();
    for id in items.iter().map(Identified::id).filter(|&id| id != 0) {
        if !seen.insert(id) {
            return Err(ContentError::DuplicateId { section, id });
        }
    }
    let mut next = next_id(items);
    for item in items.iter_mut().filter(|item| item.id() == 0) {
        item.set_id(next);
        next = next.saturating_add(1);
    }
    Ok(())
}

/// Replaces the item whose id is `id`.
///
/// # Errors
///
/// [`ContentError::ItemNotFound`] if no item has that id.
pub fn replace_by_id<T: Identified>(section: Section, items: &mut [T], id: u32, item: T) -> Result<()> {
    let slot = items
        .iter_mut()
        .find(|existing| existing.id() == id)
        .ok_or(ContentError::ItemNotFound { section, id })?;
    *slot = item;
    Ok(())
}

/// Removes and returns the item whose id is `id`.
///
/// # Errors
///
/// [`ContentError::ItemNotFound`] if no item has that id.
pub fn remove_by_id<T: Identified>(section: Section, items: &mut Vec<T>, id: u32) -> Result<T> {
    let position = items
        .iter()
        .position(|existing| existing.id() == id)
        .ok_or(ContentError::ItemNotFound { section, id })?;
    Ok(items.remove(position))
}

/// Replaces the item at `index`.
///
/// # Errors
///
/// [`ContentError::IndexOutOfRange`] if `index >= items.len()`.
pub fn replace_at<T>(section: Section, items: &mut [T], index: usize, item: T) -> Result<()> {
    let len = items.len();
    let slot = items
        .get_mut(index)
        .ok_or(ContentError::IndexOutOfRange { section, index, len })?;
    *slot = item;
    Ok(())
}

/// Removes the item at `index`, shifting later items down so no gap remains.
///
/// # Errors
///
/// [`ContentError::IndexOutOfRange`] if `index >= items.len()`.
pub fn remove_at<T>(section: Section, items: &mut Vec<T>, index: usize) -> Result<T> {
    if index >= items.len() {
        return Err(ContentError::IndexOutOfRange {
            section,
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

fn canonical_project(mut project: Project) -> Project {
    project.icon_lists = icons::canonicalize(&project.icon_lists);
    project
}

// ============================================================================
// Service
// ============================================================================

/// Section accessors over an injected [`DocumentStore`].
pub struct ContentService {
    store: Arc<dyn DocumentStore>,
    writer: Mutex<()>,
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("store", &self.store.location())
            .finish_non_exhaustive()
    }
}

impl ContentService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    /// Loads the whole document.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn document(&self) -> Result<Document> {
        Ok(self.store.load().await?)
    }

    /// Runs one read-modify-write cycle under the writer lock.
    ///
    /// The document is saved only when `edit` succeeds, so a failed lookup
    /// leaves storage untouched.
    async fn mutate<T, F>(&self, section: Section, edit: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.writer.lock().await;
        let mut document = self.store.load().await?;
        let out = edit(&mut document)?;
        self.store.save(&document).await?;
        metrics::record_content_write(section.key());
        info!(%section, "content section saved");
        Ok(out)
    }

    // ------------------------------------------------------------------
    // hero
    // ------------------------------------------------------------------

    pub async fn hero(&self) -> Result<Hero> {
        Ok(self.document().await?.hero)
    }

    pub async fn update_hero(&self, hero: Hero) -> Result<()> {
        self.mutate(Section::Hero, |doc| {
            doc.hero = hero;
            Ok(())
        })
        .await
    }

    // ------------------------------------------------------------------
    // about
    // ------------------------------------------------------------------

    pub async fn about(&self) -> Result<About> {
        Ok(self.document().await?.about)
    }

    pub async fn update_about(&self, about: About) -> Result<()> {
        self.mutate(Section::About, |doc| {
            doc.about = about;
            Ok(())
        })
        .await
    }

    // ------------------------------------------------------------------
    // projects (id-addressed)
    // ------------------------------------------------------------------

    pub async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.document().await?.projects)
    }

    /// Looks up one project.
    ///
    /// # Errors
    ///
    /// [`ContentError::ItemNotFound`] if no project has `id`.
    pub async fn project(&self, id: u32) -> Result<Project> {
        self.projects()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(ContentError::ItemNotFound {
                section: Section::Projects,
                id,
            })
    }

    /// Replaces the whole project list, canonicalising icon entries.
    ///
    /// # Errors
    ///
    /// [`ContentError::DuplicateId`] if two projects share an id; the
    /// stored list is left as it was.
    pub async fn update_projects(&self, projects: Vec<Project>) -> Result<()> {
        let mut projects: Vec<Project> = projects.into_iter().map(canonical_project).collect();
        self.mutate(Section::Projects, |doc| {
            number_items(Section::Projects, &mut projects)?;
            doc.projects = projects;
            Ok(())
        })
        .await
    }

    /// Appends a project, assigning an id when it has none. Returns the
    /// stored record.
    pub async fn add_project(&self, project: Project) -> Result<Project> {
        self.mutate(Section::Projects, |doc| {
            let id = append_with_id(Section::Projects, &mut doc.projects, canonical_project(project))?;
            Ok(doc
                .projects
                .iter()
                .rev()
                .find(|p| p.id == id)
                .cloned()
                .unwrap_or_default())
        })
        .await
    }

    pub async fn update_project(&self, id: u32, project: Project) -> Result<()> {
        self.mutate(Section::Projects, |doc| {
            replace_by_id(Section::Projects, &mut doc.projects, id, canonical_project(project))
        })
        .await
    }

    pub async fn remove_project(&self, id: u32) -> Result<Project> {
        self.mutate(Section::Projects, |doc| {
            remove_by_id(Section::Projects, &mut doc.projects, id)
        })
        .await
    }

    // ------------------------------------------------------------------
    // experience (id-addressed)
    // ------------------------------------------------------------------

    pub async fn experiences(&self) -> Result<Vec<Experience>> {
        Ok(self.document().await?.experience)
    }

    /// Looks up one experience entry.
    ///
    /// # Errors
    ///
    /// [`ContentError::ItemNotFound`] if no entry has `id`.
    pub async fn experience(&self, id: u32) -> Result<Experience> {
        self.experiences()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(ContentError::ItemNotFound {
                section: Section::Experience,
                id,
            })
    }

    /// Appends an experience entry; an id of `0` is replaced by
    /// `max(existing ids) + 1`. Returns the stored record.
    pub async fn add_experience(&self, experience: Experience) -> Result<Experience> {
        self.mutate(Section::Experience, |doc| {
            let id = append_with_id(Section::Experience, &mut doc.experience, experience)?;
            Ok(doc
                .experience
                .iter()
                .rev()
                .find(|e| e.id == id)
                .cloned()
                .unwrap_or_default())
        })
        .await
    }

    pub async fn update_experience(&self, id: u32, experience: Experience) -> Result<()> {
        self.mutate(Section::Experience, |doc| {
            replace_by_id(Section::Experience, &mut doc.experience, id, experience)
        })
        .await
    }

    pub async fn remove_experience(&self, id: u32) -> Result<Experience> {
        self.mutate(Section::Experience, |doc| {
            remove_by_id(Section::Experience, &mut doc.experience, id)
        })
        .await
    }

    // ------------------------------------------------------------------
    // testimonials (position-addressed)
    // ------------------------------------------------------------------

    pub async fn testimonials(&self) -> Result<Vec<Testimonial>> {
        Ok(self.document().await?.testimonials)
    }

    pub async fn update_testimonials(&self, testimonials: Vec<Testimonial>) -> Result<()> {
        self.mutate(Section::Testimonials, |doc| {
            doc.testimonials = testimonials;
            Ok(())
        })
        .await
    }

    pub async fn update_testimonial(&self, index: usize, testimonial: Testimonial) -> Result<()> {
        self.mutate(Section::Testimonials, |doc| {
            replace_at(Section::Testimonials, &mut doc.testimonials, index, testimonial)
        })
        .await
    }

    pub async fn remove_testimonial(&self, index: usize) -> Result<Testimonial> {
        self.mutate(Section::Testimonials, |doc| {
            remove_at(Section::Testimonials, &mut doc.testimonials, index)
        })
        .await
    }

    // ------------------------------------------------------------------
    // techStack
    // ------------------------------------------------------------------

    pub async fn tech_stack(&self) -> Result<TechStack> {
        Ok(self.document().await?.tech_stack)
    }

    pub async fn update_tech_stack(&self, tech_stack: TechStack) -> Result<()> {
        self.mutate(Section::TechStack, |doc| {
            doc.tech_stack = tech_stack;
            Ok(())
        })
        .await
    }

    // ------------------------------------------------------------------
    // approach (position-addressed)
    // ------------------------------------------------------------------

    pub async fn approach(&self) -> Result<Vec<ApproachPhase>> {
        Ok(self.document().await?.approach)
    }

    pub async fn update_approach(&self, phases: Vec<ApproachPhase>) -> Result<()> {
        self.mutate(Section::Approach, |doc| {
            doc.approach = phases;
            Ok(())
        })
        .await
    }

    pub async fn update_approach_phase(&self, index: usize, phase: ApproachPhase) -> Result<()> {
        self.mutate(Section::Approach, |doc| {
            replace_at(Section::Approach, &mut doc.approach, index, phase)
        })
        .await
    }

    pub async fn remove_approach_phase(&self, index: usize) -> Result<ApproachPhase> {
        self.mutate(Section::Approach, |doc| {
            remove_at(Section::Approach, &mut doc.approach, index)
        })
        .await
    }

    // ------------------------------------------------------------------
    // footer
    // ------------------------------------------------------------------

    pub async fn footer(&self) -> Result<Footer> {
        Ok(self.document().await?.footer)
    }

    pub async fn update_footer(&self, footer: Footer) -> Result<()> {
        self.mutate(Section::Footer, |doc| {
            doc.footer = footer;
            Ok(())
        })
        .await
    }

    // ------------------------------------------------------------------
    // socialMedia (position-addressed)
    // ------------------------------------------------------------------

    pub async fn social_media(&self) -> Result<Vec<SocialMedia>> {
        Ok(self.document().await?.social_media)
    }

    pub async fn update_social_media(&self, links: Vec<SocialMedia>) -> Result<()> {
        self.mutate(Section::SocialMedia, |doc| {
            doc.social_media = links;
            Ok(())
        })
        .await
    }

    pub async fn update_social_link(&self, index: usize, link: SocialMedia) -> Result<()> {
        self.mutate(Section::SocialMedia, |doc| {
            replace_at(Section::SocialMedia, &mut doc.social_media, index, link)
        })
        .await
    }

    pub async fn remove_social_link(&self, index: usize) -> Result<SocialMedia> {
        self.mutate(Section::SocialMedia, |doc| {
            remove_at(Section::SocialMedia, &mut doc.social_media, index)
        })
        .await
    }

    // ------------------------------------------------------------------
    // gridItems
    // ------------------------------------------------------------------

    pub async fn grid_items(&self) -> Result<Vec<GridItem>> {
        Ok(self.document().await?.grid_items)
    }

    pub async fn update_grid_items(&self, items: Vec<GridItem>) -> Result<()> {
        self.mutate(Section::GridItems, |doc| {
            doc.grid_items = items;
            Ok(())
        })
        .await
    }
}

// ============================================================================
// Tests
// ============================================================================
