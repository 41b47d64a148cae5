//! ============================================================================
//! HIVE - Clubhouse :: Tauri Backend (Async-First)
//! ============================================================================
//! Non-blocking IPC commands using tokio::spawn for all RPC round trips.
//! The holder verification never stalls the UI: connect returns immediately
//! and the gate flips out of "verifying" when the spawned fetch lands.
//!
//! Pattern: Clone Arc -> tokio::spawn -> apply session-tagged verdict
//! ============================================================================

use hive_core::{
    access::{verify_with_retry, FetchVerdict, GateView, HolderChecker, RetryConfig},
    games::{PetMood, PetStage, SpinOutcome, SpinSegment, SpinnerWheel, TokenPet},
    honeycomb::{HoneycombClient, Project, ProjectRegistry},
    is_admin_address, router,
    router::Resolution,
    session::{SessionManager, WalletSession},
    token::TokenConfig,
    types::{HiveError, VerificationReport, WalletInfo},
    AccessGate,
};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;
use tauri::State;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

// ============================================================================
// Application State (Thread-Safe)
// ============================================================================

/// Shared application state - all fields wrapped in Arc<RwLock<T>> for safe
/// concurrent access from multiple tokio tasks
pub struct AppState {
    pub session: Arc<RwLock<SessionManager>>,
    pub gate: Arc<RwLock<AccessGate>>,
    pub checker: Arc<RwLock<Option<HolderChecker>>>,
    pub token_config: Arc<RwLock<TokenConfig>>,
    pub config: Arc<RwLock<AppConfig>>,
    pub projects: Arc<RwLock<ProjectRegistry>>,
    pub pet: Arc<RwLock<Option<TokenPet>>>,
    pub spinner: Arc<RwLock<SpinnerWheel>>,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub rpc_url: String,
    pub network: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_url: std::env::var("HIVE_RPC_URL")
                .unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".to_string()),
            network: std::env::var("HIVE_NETWORK").unwrap_or_else(|_| "mainnet-beta".to_string()),
        }
    }
}

// ============================================================================
// Async Task Result Type
// ============================================================================

/// Wrapper for async task results to handle spawn errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsyncResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> AsyncResult<T> {
    fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(msg.into()) }
    }
}

// ============================================================================
// Holder Verification (Spawned, Session-Tagged)
// ============================================================================

/// Spawn the holder fetch for a session. The verdict carries the session id;
/// the gate drops it if the session is no longer live by the time it lands.
fn spawn_verification(
    gate: Arc<RwLock<AccessGate>>,
    checker: Arc<RwLock<Option<HolderChecker>>>,
    session: WalletSession,
) {
    tokio::spawn(async move {
        let outcome = match session.pubkey() {
            Ok(pubkey) => {
                let guard = checker.read().await;
                match guard.as_ref() {
                    Some(checker) => {
                        verify_with_retry(checker, &pubkey, &RetryConfig::default())
                            .await
                            .map_err(|e| e.to_string())
                    }
                    None => Err("Holder checking unavailable (bad token mint config)".to_string()),
                }
            }
            Err(e) => Err(e.to_string()),
        };

        let verdict = match outcome {
            Ok(snapshot) => FetchVerdict::ok(session.id, snapshot),
            Err(e) => {
                error!("[SPAWN] Verification failed for session {}: {}", session.id, e);
                FetchVerdict::failed(session.id, e)
            }
        };

        let applied = gate.write().await.apply_verdict(verdict);
        debug!("[SPAWN] Verdict for session {} applied={}", session.id, applied);
    });
}

// ============================================================================
// Tauri Commands - Wallet Session
// ============================================================================

/// Connect a wallet. Returns immediately; the gate enters "verifying" and
/// the balance fetch runs in the background.
#[tauri::command]
async fn connect_wallet(
    state: State<'_, AppState>,
    address: String,
) -> Result<AsyncResult<WalletInfo>, String> {
    info!("[IPC] connect_wallet: {}", address);

    let session = {
        let mut mgr = state.session.write().await;
        match mgr.connect(&address) {
            Ok(session) => session,
            Err(e) => {
                warn!("[IPC] connect_wallet rejected: {}", e);
                return Ok(AsyncResult::err(e.to_string()));
            }
        }
    };

    state.gate.write().await.on_connect(session.id);

    spawn_verification(
        Arc::clone(&state.gate),
        Arc::clone(&state.checker),
        session,
    );

    Ok(AsyncResult::ok(state.session.read().await.wallet_info()))
}

/// Disconnect the wallet - back to the landing view
#[tauri::command]
async fn disconnect_wallet(state: State<'_, AppState>) -> Result<AsyncResult<bool>, String> {
    info!("[IPC] disconnect_wallet");

    state.session.write().await.disconnect();
    state.gate.write().await.on_disconnect();

    Ok(AsyncResult::ok(true))
}

/// Get wallet info - fast in-memory read
#[tauri::command]
async fn get_wallet_info(state: State<'_, AppState>) -> Result<WalletInfo, String> {
    Ok(state.session.read().await.wallet_info())
}

// ============================================================================
// Tauri Commands - Access Gate
// ============================================================================

/// Get the current gate view - fast in-memory read
#[tauri::command]
async fn get_gate_view(state: State<'_, AppState>) -> Result<GateView, String> {
    Ok(state.gate.read().await.view())
}

/// Get the last verification report, if one landed for the live session
#[tauri::command]
async fn get_verification_report(
    state: State<'_, AppState>,
) -> Result<Option<VerificationReport>, String> {
    let gate = state.gate.read().await;
    let token_config = state.token_config.read().await;
    Ok(gate.snapshot().map(|s| s.report(&token_config)))
}

/// Get the error from the last failed verification, if any
#[tauri::command]
async fn get_gate_error(state: State<'_, AppState>) -> Result<Option<String>, String> {
    Ok(state.gate.read().await.last_error().map(String::from))
}

/// Re-run holder verification for the connected wallet
#[tauri::command]
async fn refresh_holder_status(state: State<'_, AppState>) -> Result<AsyncResult<bool>, String> {
    info!("[IPC] refresh_holder_status");

    let session = match state.session.read().await.current().cloned() {
        Some(session) => session,
        None => return Ok(AsyncResult::err(HiveError::WalletNotConnected.to_string())),
    };

    state.gate.write().await.on_refresh();

    spawn_verification(
        Arc::clone(&state.gate),
        Arc::clone(&state.checker),
        session,
    );

    Ok(AsyncResult::ok(true))
}

// ============================================================================
// Tauri Commands - Routing & Admin
// ============================================================================

/// Resolve a path against the current gate state - fast in-memory
#[tauri::command]
async fn resolve_route(state: State<'_, AppState>, path: String) -> Result<Resolution, String> {
    let view = state.gate.read().await.view();
    let session = state.session.read().await;
    let admin = is_admin_address(session.current().map(|s| s.address.as_str()));

    let resolution = router::resolve(&path, view, admin);
    debug!("[IPC] resolve_route {} -> {:?}", path, resolution);
    Ok(resolution)
}

/// Is the connected wallet on the admin allow-list?
#[tauri::command]
async fn is_admin(state: State<'_, AppState>) -> Result<bool, String> {
    let session = state.session.read().await;
    Ok(is_admin_address(session.current().map(|s| s.address.as_str())))
}

/// Open an address on the explorer in the system browser
#[tauri::command]
async fn open_explorer(state: State<'_, AppState>, address: String) -> Result<AsyncResult<bool>, String> {
    info!("[IPC] open_explorer: {}", address);

    if Pubkey::from_str(&address).is_err() {
        return Ok(AsyncResult::err(format!("Invalid address: {}", address)));
    }

    let network = state.config.read().await.network.clone();
    let url = if network == "mainnet-beta" {
        format!("https://solscan.io/account/{}", address)
    } else {
        format!("https://solscan.io/account/{}?cluster={}", address, network)
    };

    match open::that(&url) {
        Ok(()) => Ok(AsyncResult::ok(true)),
        Err(e) => Ok(AsyncResult::err(format!("Failed to open browser: {}", e))),
    }
}

// ============================================================================
// Tauri Commands - Honeycomb Projects (Admin Panel)
// ============================================================================

/// Guard shared by the project commands
async fn require_admin(state: &State<'_, AppState>) -> Result<(), String> {
    let session = state.session.read().await;
    if is_admin_address(session.current().map(|s| s.address.as_str())) {
        Ok(())
    } else {
        Err(HiveError::NotAuthorized("admin allow-list".to_string()).to_string())
    }
}

/// Fetch the Honeycomb project list - spawns the network call
#[tauri::command]
async fn list_projects(state: State<'_, AppState>) -> Result<AsyncResult<Vec<Project>>, String> {
    info!("[IPC] list_projects");

    if let Err(e) = require_admin(&state).await {
        return Ok(AsyncResult::err(e));
    }

    let projects = Arc::clone(&state.projects);

    let handle = tokio::spawn(async move {
        let mut registry = projects.write().await;
        registry.refresh().await.map(|p| p.to_vec())
    });

    match handle.await {
        Ok(Ok(projects)) => Ok(AsyncResult::ok(projects)),
        Ok(Err(e)) => Ok(AsyncResult::err(e.to_string())),
        Err(e) => Ok(AsyncResult::err(format!("Task failed: {}", e))),
    }
}

/// Toggle a project's active flag. A failed API call reverts the toggle and
/// surfaces the error to the panel.
#[tauri::command]
async fn toggle_project(
    state: State<'_, AppState>,
    address: String,
) -> Result<AsyncResult<Project>, String> {
    info!("[IPC] toggle_project: {}", address);

    if let Err(e) = require_admin(&state).await {
        return Ok(AsyncResult::err(e));
    }

    let projects = Arc::clone(&state.projects);

    let handle = tokio::spawn(async move {
        let mut registry = projects.write().await;
        registry.toggle(&address).await
    });

    match handle.await {
        Ok(Ok(project)) => Ok(AsyncResult::ok(project)),
        Ok(Err(e)) => Ok(AsyncResult::err(e.to_string())),
        Err(e) => Ok(AsyncResult::err(format!("Task failed: {}", e))),
    }
}

// ============================================================================
// Tauri Commands - Token Pet (Fast, In-Memory)
// ============================================================================

/// Pet snapshot with the derived stage and mood
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetStatus {
    pub name: String,
    pub hunger: u8,
    pub happiness: u8,
    pub energy: u8,
    pub stage: PetStage,
    pub mood: PetMood,
}

fn pet_status_of(pet: &TokenPet, now: i64) -> PetStatus {
    PetStatus {
        name: pet.name.clone(),
        hunger: pet.hunger,
        happiness: pet.happiness,
        energy: pet.energy,
        stage: pet.stage(now),
        mood: pet.mood(),
    }
}

/// Adopt a pet for this session
#[tauri::command]
async fn pet_adopt(state: State<'_, AppState>, name: String) -> Result<AsyncResult<PetStatus>, String> {
    info!("[IPC] pet_adopt: {}", name);

    let mut pet = state.pet.write().await;
    if pet.is_some() {
        return Ok(AsyncResult::err("A pet is already adopted this session"));
    }

    let now = chrono::Utc::now().timestamp();
    let new_pet = TokenPet::new(&name, now);
    let status = pet_status_of(&new_pet, now);
    *pet = Some(new_pet);
    Ok(AsyncResult::ok(status))
}

/// Current pet stats (applies pending time decay)
#[tauri::command]
async fn pet_status(state: State<'_, AppState>) -> Result<AsyncResult<PetStatus>, String> {
    let mut pet = state.pet.write().await;
    let now = chrono::Utc::now().timestamp();

    match pet.as_mut() {
        Some(pet) => {
            pet.tick(now);
            Ok(AsyncResult::ok(pet_status_of(pet, now)))
        }
        None => Ok(AsyncResult::err("No pet adopted yet")),
    }
}

#[tauri::command]
async fn pet_feed(state: State<'_, AppState>) -> Result<AsyncResult<PetStatus>, String> {
    let mut pet = state.pet.write().await;
    let now = chrono::Utc::now().timestamp();

    match pet.as_mut() {
        Some(pet) => {
            pet.feed(now);
            Ok(AsyncResult::ok(pet_status_of(pet, now)))
        }
        None => Ok(AsyncResult::err("No pet adopted yet")),
    }
}

#[tauri::command]
async fn pet_play(state: State<'_, AppState>) -> Result<AsyncResult<PetStatus>, String> {
    let mut pet = state.pet.write().await;
    let now = chrono::Utc::now().timestamp();

    match pet.as_mut() {
        Some(pet) => {
            if pet.play(now) {
                Ok(AsyncResult::ok(pet_status_of(pet, now)))
            } else {
                Ok(AsyncResult::err("Too tired to play - needs rest"))
            }
        }
        None => Ok(AsyncResult::err("No pet adopted yet")),
    }
}

#[tauri::command]
async fn pet_rest(state: State<'_, AppState>) -> Result<AsyncResult<PetStatus>, String> {
    let mut pet = state.pet.write().await;
    let now = chrono::Utc::now().timestamp();

    match pet.as_mut() {
        Some(pet) => {
            pet.rest(now);
            Ok(AsyncResult::ok(pet_status_of(pet, now)))
        }
        None => Ok(AsyncResult::err("No pet adopted yet")),
    }
}

// ============================================================================
// Tauri Commands - Prize Spinner (Fast, In-Memory)
// ============================================================================

/// Spin the wheel. Errors while the cooldown is running.
#[tauri::command]
async fn spin_wheel(state: State<'_, AppState>) -> Result<AsyncResult<SpinOutcome>, String> {
    info!("[IPC] spin_wheel");

    let mut spinner = state.spinner.write().await;
    let now = chrono::Utc::now().timestamp();

    let remaining = spinner.cooldown_remaining(now);
    if remaining > 0 {
        return Ok(AsyncResult::err(format!("Spin again in {}s", remaining)));
    }

    let outcome = {
        let mut rng = rand::thread_rng();
        spinner.spin(&mut rng, now)
    };

    match outcome {
        Some(outcome) => Ok(AsyncResult::ok(outcome)),
        None => Ok(AsyncResult::err("The wheel is not spinnable right now")),
    }
}

/// The wheel layout, for rendering
#[tauri::command]
async fn spinner_segments(state: State<'_, AppState>) -> Result<Vec<SpinSegment>, String> {
    Ok(state.spinner.read().await.segments().to_vec())
}

/// This session's spin history
#[tauri::command]
async fn spin_history(state: State<'_, AppState>) -> Result<Vec<SpinOutcome>, String> {
    Ok(state.spinner.read().await.history().to_vec())
}

// ============================================================================
// Tauri Commands - Configuration (Mixed)
// ============================================================================

/// Update the RPC endpoint - rebuilds the holder checker
#[tauri::command]
async fn set_rpc_url(state: State<'_, AppState>, rpc_url: String) -> Result<(), String> {
    info!("[IPC] set_rpc_url: {}", rpc_url);

    let config = Arc::clone(&state.config);
    let checker = Arc::clone(&state.checker);
    let token_config = Arc::clone(&state.token_config);
    let url = rpc_url.clone();

    let handle = tokio::spawn(async move {
        let mut cfg = config.write().await;
        cfg.rpc_url = url.clone();

        let token_config = token_config.read().await.clone();
        *checker.write().await = match HolderChecker::new(&url, token_config) {
            Ok(new_checker) => Some(new_checker),
            Err(e) => {
                warn!("Holder checker rebuild failed: {}", e);
                None
            }
        };
    });

    handle.await.map_err(|e| format!("Task failed: {}", e))?;
    Ok(())
}

/// Get config - fast in-memory read
#[tauri::command]
async fn get_config(state: State<'_, AppState>) -> Result<AppConfig, String> {
    Ok(state.config.read().await.clone())
}

/// The configured gating token
#[tauri::command]
async fn get_token_config(state: State<'_, AppState>) -> Result<TokenConfig, String> {
    Ok(state.token_config.read().await.clone())
}

// ============================================================================
// Debug
// ============================================================================

/// Route frontend console output into the backend log
#[tauri::command]
async fn frontend_log(
    level: String,
    message: String,
    data: Option<serde_json::Value>,
) -> Result<(), String> {
    let suffix = data.map(|d| format!(" {}", d)).unwrap_or_default();
    match level.as_str() {
        "error" => error!("[FRONTEND] {}{}", message, suffix),
        "warn" => warn!("[FRONTEND] {}{}", message, suffix),
        "debug" => debug!("[FRONTEND] {}{}", message, suffix),
        _ => info!("[FRONTEND] {}{}", message, suffix),
    }
    Ok(())
}

// ============================================================================
// Entry Point
// ============================================================================

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Could not load .env file: {}", e);
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hive_app=debug".parse().unwrap())
                .add_directive("hive_core=debug".parse().unwrap()),
        )
        .init();

    info!("Starting Hive - Token-Gated Clubhouse");

    // Initialize application state
    let config = AppConfig::default();
    let token_config = TokenConfig::from_env();

    let checker = match HolderChecker::new(&config.rpc_url, token_config.clone()) {
        Ok(checker) => {
            info!(
                "Holder checker initialized for {} on {}",
                token_config.symbol, config.network
            );
            Some(checker)
        }
        Err(e) => {
            warn!("Failed to initialize holder checker: {} - gating will fail closed", e);
            None
        }
    };

    let projects = ProjectRegistry::new(Arc::new(HoneycombClient::from_env()));

    let state = AppState {
        session: Arc::new(RwLock::new(SessionManager::new())),
        gate: Arc::new(RwLock::new(AccessGate::new())),
        checker: Arc::new(RwLock::new(checker)),
        token_config: Arc::new(RwLock::new(token_config)),
        config: Arc::new(RwLock::new(config)),
        projects: Arc::new(RwLock::new(projects)),
        pet: Arc::new(RwLock::new(None)),
        spinner: Arc::new(RwLock::new(SpinnerWheel::default())),
    };

    tauri::Builder::default()
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            // Wallet session
            connect_wallet,
            disconnect_wallet,
            get_wallet_info,
            // Access gate
            get_gate_view,
            get_verification_report,
            get_gate_error,
            refresh_holder_status,
            // Routing & admin
            resolve_route,
            is_admin,
            open_explorer,
            // Honeycomb projects
            list_projects,
            toggle_project,
            // Token pet
            pet_adopt,
            pet_status,
            pet_feed,
            pet_play,
            pet_rest,
            // Prize spinner
            spin_wheel,
            spinner_segments,
            spin_history,
            // Config
            set_rpc_url,
            get_config,
            get_token_config,
            // Debug
            frontend_log,
        ])
        .run(tauri::generate_context!())
        .expect("Error running Hive");
}
