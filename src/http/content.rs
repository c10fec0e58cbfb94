//! `/content` resource handlers.
//!
//! One GET/PUT pair per section plus item routes for the list sections.
//! Section PUTs replace the whole section with the typed body; a body of
//! the wrong shape is rejected before the document is touched.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::Router;
use bytes::Bytes;
use serde_json::{Value, json};

use super::AppState;
use super::response::{ApiError, ApiResult, parse_body, success, success_message};
use crate::content::{
    About, ApproachPhase, Document, Experience, ExperienceDraft, Footer, GridItem, Hero, Project,
    ProjectDraft, Section, SocialMedia, TechStack, Testimonial,
};
use crate::observability::{ItemAction, ItemRef};

/// Routes under `/content`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/content", get(get_document))
        .route("/content/hero", get(get_hero).put(put_hero))
        .route("/content/about", get(get_about).put(put_about))
        .route(
            "/content/projects",
            get(get_projects).put(put_projects).post(post_project),
        )
        .route(
            "/content/projects/{id}",
            get(get_project).put(put_project).delete(delete_project),
        )
        .route(
            "/content/experience",
            get(get_experiences).post(post_experience),
        )
        .route(
            "/content/experience/{id}",
            get(get_experience)
                .put(put_experience)
                .delete(delete_experience),
        )
        .route(
            "/content/testimonials",
            get(get_testimonials).put(put_testimonials),
        )
        .route(
            "/content/testimonials/{index}",
            put(put_testimonial).delete(delete_testimonial),
        )
        .route(
            "/content/techstack",
            get(get_tech_stack).put(put_tech_stack),
        )
        .route("/content/approach", get(get_approach).put(put_approach))
        .route(
            "/content/approach/{index}",
            put(put_approach_phase).delete(delete_approach_phase),
        )
        .route("/content/footer", get(get_footer).put(put_footer))
        .route("/content/social", get(get_social).put(put_social))
        .route(
            "/content/social/{index}",
            put(put_social_link).delete(delete_social_link),
        )
        .route("/content/grid", get(get_grid).put(put_grid))
}

// ============================================================================
// Addressing
// ============================================================================

// Unparseable ids address nothing, so they are 404 like unknown ones.
fn parse_id(section: Section, raw: &str) -> ApiResult<u32> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("{section} item with id {raw} not found")))
}

fn parse_index(section: Section, raw: &str) -> ApiResult<usize> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("{section} index {raw} out of range")))
}

fn replaced(state: &AppState, section: Section) -> Json<Value> {
    state.events.section_replaced(section.key());
    success()
}

fn item_changed(state: &AppState, section: Section, action: ItemAction, item: ItemRef) {
    state.events.item_changed(section.key(), action, item);
}

// ============================================================================
// Whole document
// ============================================================================

async fn get_document(State(state): State<AppState>) -> ApiResult<Json<Document>> {
    state
        .content
        .document()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch content", e))
}

// ============================================================================
// Singletons
// ============================================================================

async fn get_hero(State(state): State<AppState>) -> ApiResult<Json<Hero>> {
    state
        .content
        .hero()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch hero data", e))
}

async fn put_hero(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let hero: Hero = parse_body(&body)?;
    state
        .content
        .update_hero(hero)
        .await
        .map_err(|e| ApiError::content("update hero data", e))?;
    Ok(replaced(&state, Section::Hero))
}

async fn get_about(State(state): State<AppState>) -> ApiResult<Json<About>> {
    state
        .content
        .about()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch about data", e))
}

async fn put_about(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let about: About = parse_body(&body)?;
    state
        .content
        .update_about(about)
        .await
        .map_err(|e| ApiError::content("update about data", e))?;
    Ok(replaced(&state, Section::About))
}

async fn get_tech_stack(State(state): State<AppState>) -> ApiResult<Json<TechStack>> {
    state
        .content
        .tech_stack()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch tech stack", e))
}

async fn put_tech_stack(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let tech_stack: TechStack = parse_body(&body)?;
    state
        .content
        .update_tech_stack(tech_stack)
        .await
        .map_err(|e| ApiError::content("update tech stack", e))?;
    Ok(replaced(&state, Section::TechStack))
}

async fn get_footer(State(state): State<AppState>) -> ApiResult<Json<Footer>> {
    state
        .content
        .footer()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch footer data", e))
}

async fn put_footer(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let footer: Footer = parse_body(&body)?;
    state
        .content
        .update_footer(footer)
        .await
        .map_err(|e| ApiError::content("update footer data", e))?;
    Ok(replaced(&state, Section::Footer))
}

async fn get_grid(State(state): State<AppState>) -> ApiResult<Json<Vec<GridItem>>> {
    state
        .content
        .grid_items()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch grid items", e))
}

async fn put_grid(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let items: Vec<GridItem> = parse_body(&body)?;
    state
        .content
        .update_grid_items(items)
        .await
        .map_err(|e| ApiError::content("update grid items", e))?;
    Ok(replaced(&state, Section::GridItems))
}

// ============================================================================
// Projects (id-addressed)
// ============================================================================

async fn get_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    state
        .content
        .projects()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch projects", e))
}

async fn put_projects(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let projects: Vec<Project> = parse_body(&body)?;
    state
        .content
        .update_projects(projects)
        .await
        .map_err(|e| ApiError::content("update projects", e))?;
    Ok(replaced(&state, Section::Projects))
}

async fn post_project(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let draft: ProjectDraft = parse_body(&body)?;
    let project = state
        .content
        .add_project(draft.into_new()?)
        .await
        .map_err(|e| ApiError::content("add project", e))?;
    item_changed(&state, Section::Projects, ItemAction::Added, ItemRef::Id(project.id));
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Project added successfully", "project": project })),
    ))
}

async fn get_project(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Project>> {
    let id = parse_id(Section::Projects, &raw)?;
    state
        .content
        .project(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch project", e))
}

async fn put_project(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let id = parse_id(Section::Projects, &raw)?;
    let draft: ProjectDraft = parse_body(&body)?;
    state
        .content
        .update_project(id, draft.into_update(id)?)
        .await
        .map_err(|e| ApiError::content("update project", e))?;
    item_changed(&state, Section::Projects, ItemAction::Updated, ItemRef::Id(id));
    Ok(success_message("Project updated successfully"))
}

async fn delete_project(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(Section::Projects, &raw)?;
    state
        .content
        .remove_project(id)
        .await
        .map_err(|e| ApiError::content("delete project", e))?;
    item_changed(&state, Section::Projects, ItemAction::Removed, ItemRef::Id(id));
    Ok(success_message("Project deleted successfully"))
}

// ============================================================================
// Experience (id-addressed)
// ============================================================================

async fn get_experiences(State(state): State<AppState>) -> ApiResult<Json<Vec<Experience>>> {
    state
        .content
        .experiences()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch experiences", e))
}

async fn post_experience(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let draft: ExperienceDraft = parse_body(&body)?;
    let experience = state
        .content
        .add_experience(draft.into_new()?)
        .await
        .map_err(|e| ApiError::content("add experience", e))?;
    item_changed(
        &state,
        Section::Experience,
        ItemAction::Added,
        ItemRef::Id(experience.id),
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Experience added successfully", "experience": experience })),
    ))
}

async fn get_experience(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Experience>> {
    let id = parse_id(Section::Experience, &raw)?;
    state
        .content
        .experience(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch experience", e))
}

async fn put_experience(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let id = parse_id(Section::Experience, &raw)?;
    let draft: ExperienceDraft = parse_body(&body)?;
    state
        .content
        .update_experience(id, draft.into_update(id)?)
        .await
        .map_err(|e| ApiError::content("update experience", e))?;
    item_changed(&state, Section::Experience, ItemAction::Updated, ItemRef::Id(id));
    Ok(success_message("Experience updated successfully"))
}

async fn delete_experience(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(Section::Experience, &raw)?;
    state
        .content
        .remove_experience(id)
        .await
        .map_err(|e| ApiError::content("delete experience", e))?;
    item_changed(&state, Section::Experience, ItemAction::Removed, ItemRef::Id(id));
    Ok(success_message("Experience deleted successfully"))
}

// ============================================================================
// Testimonials (position-addressed)
// ============================================================================

async fn get_testimonials(State(state): State<AppState>) -> ApiResult<Json<Vec<Testimonial>>> {
    state
        .content
        .testimonials()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch testimonials", e))
}

async fn put_testimonials(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let testimonials: Vec<Testimonial> = parse_body(&body)?;
    state
        .content
        .update_testimonials(testimonials)
        .await
        .map_err(|e| ApiError::content("update testimonials", e))?;
    Ok(replaced(&state, Section::Testimonials))
}

async fn put_testimonial(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let index = parse_index(Section::Testimonials, &raw)?;
    let testimonial: Testimonial = parse_body(&body)?;
    state
        .content
        .update_testimonial(index, testimonial)
        .await
        .map_err(|e| ApiError::content("update testimonial", e))?;
    item_changed(
        &state,
        Section::Testimonials,
        ItemAction::Updated,
        ItemRef::Index(index),
    );
    Ok(success())
}

async fn delete_testimonial(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Value>> {
    let index = parse_index(Section::Testimonials, &raw)?;
    state
        .content
        .remove_testimonial(index)
        .await
        .map_err(|e| ApiError::content("delete testimonial", e))?;
    item_changed(
        &state,
        Section::Testimonials,
        ItemAction::Removed,
        ItemRef::Index(index),
    );
    Ok(success())
}

// ============================================================================
// Approach (position-addressed)
// ============================================================================

async fn get_approach(State(state): State<AppState>) -> ApiResult<Json<Vec<ApproachPhase>>> {
    state
        .content
        .approach()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch approach data", e))
}

async fn put_approach(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let phases: Vec<ApproachPhase> = parse_body(&body)?;
    state
        .content
        .update_approach(phases)
        .await
        .map_err(|e| ApiError::content("update approach data", e))?;
    Ok(replaced(&state, Section::Approach))
}

async fn put_approach_phase(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let index = parse_index(Section::Approach, &raw)?;
    let phase: ApproachPhase = parse_body(&body)?;
    state
        .content
        .update_approach_phase(index, phase)
        .await
        .map_err(|e| ApiError::content("update approach phase", e))?;
    item_changed(&state, Section::Approach, ItemAction::Updated, ItemRef::Index(index));
    Ok(success())
}

async fn delete_approach_phase(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Value>> {
    let index = parse_index(Section::Approach, &raw)?;
    state
        .content
        .remove_approach_phase(index)
        .await
        .map_err(|e| ApiError::content("delete approach phase", e))?;
    item_changed(&state, Section::Approach, ItemAction::Removed, ItemRef::Index(index));
    Ok(success())
}

// ============================================================================
// Social media (position-addressed)
// ============================================================================

async fn get_social(State(state): State<AppState>) -> ApiResult<Json<Vec<SocialMedia>>> {
    state
        .content
        .social_media()
        .await
        .map(Json)
        .map_err(|e| ApiError::content("fetch social media links", e))
}

async fn put_social(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let links: Vec<SocialMedia> = parse_body(&body)?;
    state
        .content
        .update_social_media(links)
        .await
        .map_err(|e| ApiError::content("update social media links", e))?;
    Ok(replaced(&state, Section::SocialMedia))
}

async fn put_social_link(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let index = parse_index(Section::SocialMedia, &raw)?;
    let link: SocialMedia = parse_body(&body)?;
    state
        .content
        .update_social_link(index, link)
        .await
        .map_err(|e| ApiError::content("update social media link", e))?;
    item_changed(
        &state,
        Section::SocialMedia,
        ItemAction::Updated,
        ItemRef::Index(index),
    );
    Ok(success())
}

async fn delete_social_link(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Value>> {
    let index = parse_index(Section::SocialMedia, &raw)?;
    state
        .content
        .remove_social_link(index)
        .await
        .map_err(|e| ApiError::content("delete social media link", e))?;
    item_changed(
        &state,
        Section::SocialMedia,
        ItemAction::Removed,
        ItemRef::Index(index),
    );
    Ok(success())
}
