//! HTTP API
//!
//! JSON endpoints for the team editor, the sprite manager and the overlay
//! page. Overlay clients poll the display endpoint; there is no push
//! channel.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path as AxumPath, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use teamdex::{
    available_skins, record_for, resolve, CreatureLookup, Layout, Overlay, OverlaySlot,
    ScanReport, SkinRecord, SlotUpdate, StoreError, Team, TeamError, TeamSlot, Tier,
    DEFAULT_PROFILE, SPRITE_URL_PREFIX,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable};

use crate::sprites::{SpriteError, MAX_SPRITE_SIZE};
use crate::state::{AppState, RescanError};

type ApiError = (StatusCode, String);
type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// OpenAPI Schema
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "teamdex API",
        description = "Team roster editor and broadcast overlay backend",
        version = "0.1.0",
        license(name = "BSD-2-Clause"),
    ),
    paths(
        health,
        get_catalog,
        get_creature_skins,
        list_sprites,
        upload_sprite,
        scan_sprites,
        list_skins,
        get_skins_for_creature,
        resolve_sprite,
        get_default_team,
        save_default_team,
        list_profiles,
        create_profile,
        delete_profile,
        get_team,
        save_team,
        update_slot,
        clear_team,
        get_display,
    ),
    components(schemas(
        HealthResponse,
        CatalogResponse,
        SpriteListResponse,
        UploadResponse,
        ResolveResponse,
        ProfileListResponse,
        CreateProfileRequest,
        ScanReport,
        SkinRecord,
        Team,
        TeamSlot,
        SlotUpdate,
        Tier,
        Layout,
        Overlay,
        OverlaySlot,
    ))
)]
pub struct ApiDoc;

// =============================================================================
// Types
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub creatures: Vec<String>,
    pub skins: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpriteListResponse {
    pub sprites: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResolveQuery {
    pub creature: Option<String>,
    /// Tier code: A, B or C (default A)
    #[param(value_type = Option<String>)]
    pub tier: Option<Tier>,
    /// Skin name (default "None")
    pub skin: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResolveResponse {
    /// Empty when no creature was given
    pub sprite: String,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileListResponse {
    pub profiles: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProfileRequest {
    pub id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DisplayQuery {
    /// row, grid or stack (default grid)
    pub layout: Option<String>,
}

// =============================================================================
// Error mapping
// =============================================================================

fn store_error(e: StoreError) -> ApiError {
    match e {
        StoreError::InvalidProfile(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        _ => {
            tracing::error!("Storage failure: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn sprite_error(e: SpriteError) -> ApiError {
    match e {
        SpriteError::NotGif | SpriteError::InvalidName(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        SpriteError::TooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, e.to_string()),
        SpriteError::Io(_) => {
            tracing::error!("Sprite directory failure: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn team_error(e: TeamError) -> ApiError {
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn load_or_default(state: &AppState, profile: &str) -> ApiResult<Team> {
    Ok(state
        .store
        .load_team(profile)
        .map_err(store_error)?
        .unwrap_or_default())
}

fn store_team(state: &AppState, profile: &str, team: Team) -> ApiResult<Team> {
    team.validate(&state.catalog).map_err(team_error)?;
    let team = team.normalized();
    state.store.save_team(profile, &team).map_err(store_error)?;
    tracing::info!(profile, filled = team.filled_slots().count(), "Team saved");
    Ok(team)
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    responses((status = 200, description = "Creature roster and known skins", body = CatalogResponse)),
    tag = "Catalog"
)]
async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        creatures: state.catalog.creatures().to_vec(),
        skins: state.catalog.skins().to_vec(),
    })
}

#[utoipa::path(
    get,
    path = "/api/creatures/{name}/skins",
    params(("name" = String, Path, description = "Creature name")),
    responses(
        (status = 200, description = "Skins the creature can wear, \"None\" first", body = Vec<String>),
        (status = 404, description = "Unknown creature")
    ),
    tag = "Catalog"
)]
async fn get_creature_skins(
    State(state): State<Arc<AppState>>,
    AxumPath(name): AxumPath<String>,
) -> ApiResult<Json<Vec<String>>> {
    if !state.catalog.is_creature(&name) {
        return Err((StatusCode::NOT_FOUND, format!("Unknown creature: {}", name)));
    }

    let records = state.store.all().map_err(store_error)?;
    Ok(Json(available_skins(Some(&name), &records, &state.catalog)))
}

#[utoipa::path(
    get,
    path = "/api/sprites/list",
    responses((status = 200, description = "Uploaded sprite filenames", body = SpriteListResponse)),
    tag = "Sprites"
)]
async fn list_sprites(State(state): State<Arc<AppState>>) -> ApiResult<Json<SpriteListResponse>> {
    let sprites = state.sprites.list().map_err(sprite_error)?;
    Ok(Json(SpriteListResponse { sprites }))
}

#[utoipa::path(
    post,
    path = "/api/sprites/upload",
    request_body(content_type = "multipart/form-data", description = "GIF file in the `sprite` field"),
    responses(
        (status = 201, description = "Sprite stored", body = UploadResponse),
        (status = 400, description = "Missing file, bad name or not a GIF"),
        (status = 413, description = "File too large")
    ),
    tag = "Sprites"
)]
async fn upload_sprite(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), e.body_text()))?
    {
        if field.name() != Some("sprite") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or((StatusCode::BAD_REQUEST, "Sprite field has no filename".to_string()))?;
        if let Some(mime) = field.content_type() {
            if mime != "image/gif" {
                return Err(sprite_error(SpriteError::NotGif));
            }
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| (e.status(), e.body_text()))?;
        upload = Some((file_name, data.to_vec()));
    }

    let (file_name, data) =
        upload.ok_or((StatusCode::BAD_REQUEST, "No file uploaded".to_string()))?;
    state.sprites.save(&file_name, &data).map_err(sprite_error)?;
    tracing::info!(file = %file_name, bytes = data.len(), "Sprite uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            success: true,
            url: format!("{SPRITE_URL_PREFIX}{file_name}"),
            filename: file_name,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/sprites/scan",
    responses(
        (status = 200, description = "Skin records rebuilt from the sprite directory", body = ScanReport),
        (status = 409, description = "A scan is already running")
    ),
    tag = "Sprites"
)]
async fn scan_sprites(State(state): State<Arc<AppState>>) -> ApiResult<Json<ScanReport>> {
    match state.rescan() {
        Ok(report) => Ok(Json(report)),
        Err(RescanError::InProgress) => Err((
            StatusCode::CONFLICT,
            RescanError::InProgress.to_string(),
        )),
        Err(RescanError::Sprites(e)) => Err(sprite_error(e)),
        Err(RescanError::Store(e)) => Err(store_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/skins",
    responses((status = 200, description = "Every skin record from the last scan", body = Vec<SkinRecord>)),
    tag = "Skins"
)]
async fn list_skins(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SkinRecord>>> {
    let records = state.store.all().map_err(store_error)?;
    Ok(Json(records.into_records()))
}

#[utoipa::path(
    get,
    path = "/api/skins/{creature}",
    params(("creature" = String, Path, description = "Creature name")),
    responses((status = 200, description = "Skin records for one creature", body = Vec<SkinRecord>)),
    tag = "Skins"
)]
async fn get_skins_for_creature(
    State(state): State<Arc<AppState>>,
    AxumPath(creature): AxumPath<String>,
) -> ApiResult<Json<Vec<SkinRecord>>> {
    let records = state.store.by_creature(&creature).map_err(store_error)?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/resolve",
    params(ResolveQuery),
    responses((status = 200, description = "Sprite filename for the selection", body = ResolveResponse)),
    tag = "Skins"
)]
async fn resolve_sprite(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveQuery>,
) -> ApiResult<Json<ResolveResponse>> {
    let tier = query.tier.unwrap_or_default();
    let skin = query.skin.unwrap_or_else(|| teamdex::NO_SKIN.to_string());

    let records = match &query.creature {
        Some(creature) => state.store.by_creature(creature).map_err(store_error)?,
        None => Vec::new(),
    };
    let sprite = resolve(
        query.creature.as_deref(),
        tier,
        &skin,
        record_for(&records, &skin),
    );
    let url = (!sprite.is_empty()).then(|| format!("{SPRITE_URL_PREFIX}{sprite}"));

    Ok(Json(ResolveResponse { sprite, url }))
}

#[utoipa::path(
    get,
    path = "/api/team",
    responses((status = 200, description = "Team of the default profile", body = Team)),
    tag = "Teams"
)]
async fn get_default_team(State(state): State<Arc<AppState>>) -> ApiResult<Json<Team>> {
    load_or_default(&state, DEFAULT_PROFILE).map(Json)
}

#[utoipa::path(
    post,
    path = "/api/team",
    request_body = Team,
    responses(
        (status = 200, description = "Team saved", body = Team),
        (status = 400, description = "Invalid team")
    ),
    tag = "Teams"
)]
async fn save_default_team(
    State(state): State<Arc<AppState>>,
    Json(team): Json<Team>,
) -> ApiResult<Json<Team>> {
    store_team(&state, DEFAULT_PROFILE, team).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/profiles",
    responses((status = 200, description = "Saved profiles", body = ProfileListResponse)),
    tag = "Profiles"
)]
async fn list_profiles(State(state): State<Arc<AppState>>) -> ApiResult<Json<ProfileListResponse>> {
    let profiles = state.store.list_profiles().map_err(store_error)?;
    Ok(Json(ProfileListResponse { profiles }))
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created with an empty team", body = Team),
        (status = 400, description = "Invalid profile id"),
        (status = 409, description = "Profile already exists")
    ),
    tag = "Profiles"
)]
async fn create_profile(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProfileRequest>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    if state.store.load_team(&req.id).map_err(store_error)?.is_some() {
        return Err((
            StatusCode::CONFLICT,
            format!("Profile already exists: {}", req.id),
        ));
    }

    let team = Team::default();
    state.store.save_team(&req.id, &team).map_err(store_error)?;
    tracing::info!(profile = %req.id, "Profile created");
    Ok((StatusCode::CREATED, Json(team)))
}

#[utoipa::path(
    delete,
    path = "/api/profiles/{id}",
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "Profile not found")
    ),
    tag = "Profiles"
)]
async fn delete_profile(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<StatusCode> {
    if state.store.delete_profile(&id).map_err(store_error)? {
        tracing::info!(profile = %id, "Profile deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, format!("Profile not found: {}", id)))
    }
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}/team",
    params(("id" = String, Path, description = "Profile id")),
    responses((status = 200, description = "Saved team, or an empty team if none was saved", body = Team)),
    tag = "Teams"
)]
async fn get_team(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<Team>> {
    load_or_default(&state, &id).map(Json)
}

#[utoipa::path(
    post,
    path = "/api/profiles/{id}/team",
    params(("id" = String, Path, description = "Profile id")),
    request_body = Team,
    responses(
        (status = 200, description = "Team saved", body = Team),
        (status = 400, description = "Invalid team or profile id")
    ),
    tag = "Teams"
)]
async fn save_team(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<String>,
    Json(team): Json<Team>,
) -> ApiResult<Json<Team>> {
    store_team(&state, &id, team).map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/profiles/{id}/team/slots/{slot}",
    params(
        ("id" = String, Path, description = "Profile id"),
        ("slot" = u8, Path, description = "Slot index 1-6")
    ),
    request_body = SlotUpdate,
    responses(
        (status = 200, description = "Slot updated; the whole team is returned", body = Team),
        (status = 400, description = "Invalid update")
    ),
    tag = "Teams"
)]
async fn update_slot(
    State(state): State<Arc<AppState>>,
    AxumPath((id, slot)): AxumPath<(String, u8)>,
    Json(update): Json<SlotUpdate>,
) -> ApiResult<Json<Team>> {
    let mut team = load_or_default(&state, &id)?;
    team.apply(slot, update).map_err(team_error)?;
    store_team(&state, &id, team).map(Json)
}

#[utoipa::path(
    post,
    path = "/api/profiles/{id}/team/clear",
    params(("id" = String, Path, description = "Profile id")),
    responses((status = 200, description = "All slots emptied", body = Team)),
    tag = "Teams"
)]
async fn clear_team(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<Team>> {
    let mut team = load_or_default(&state, &id)?;
    team.clear();
    store_team(&state, &id, team).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}/display",
    params(("id" = String, Path, description = "Profile id"), DisplayQuery),
    responses((status = 200, description = "Resolved overlay for the profile's team", body = Overlay)),
    tag = "Display"
)]
async fn get_display(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<String>,
    Query(query): Query<DisplayQuery>,
) -> ApiResult<Json<Overlay>> {
    let team = load_or_default(&state, &id)?;
    let records = state.store.all().map_err(store_error)?;
    let layout = Layout::parse_or_default(query.layout.as_deref());

    Ok(Json(Overlay::build(&team, layout, |creature, skin| {
        records.get(creature, skin).cloned()
    })))
}

// =============================================================================
// Router
// =============================================================================

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/catalog", get(get_catalog))
        .route("/creatures/{name}/skins", get(get_creature_skins))
        .route("/sprites/list", get(list_sprites))
        .route(
            "/sprites/upload",
            // Leave room for multipart framing around a maximum-size sprite
            post(upload_sprite).layer(DefaultBodyLimit::max(MAX_SPRITE_SIZE + 64 * 1024)),
        )
        .route("/sprites/scan", post(scan_sprites))
        .route("/skins", get(list_skins))
        .route("/skins/{creature}", get(get_skins_for_creature))
        .route("/resolve", get(resolve_sprite))
        .route("/team", get(get_default_team).post(save_default_team))
        .route("/profiles", get(list_profiles).post(create_profile))
        .route("/profiles/{id}", axum::routing::delete(delete_profile))
        .route("/profiles/{id}/team", get(get_team).post(save_team))
        .route("/profiles/{id}/team/slots/{slot}", patch(update_slot))
        .route("/profiles/{id}/team/clear", post(clear_team))
        .route("/profiles/{id}/display", get(get_display));

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/sprites", ServeDir::new(state.sprites.root()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
