use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use openapi_viewer::assets::{self, AssetFs, AssetSource, DiskAssets, ENTRY_DOCUMENT};
use openapi_viewer::config::{AppState, Config, DocsConfig};
use openapi_viewer::error::StartupError;
use openapi_viewer::handler::DocsHandler;
use openapi_viewer::http::cache::CachePolicy;
use openapi_viewer::logger;
use openapi_viewer::server::{
    create_reusable_listener, start_server_loop, start_signal_handler, SignalHandler,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg.logging)?;

    // Tokio runtime, thread count from `server.workers`
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        tracing::info!("Using {workers} worker threads");
    } else {
        tracing::info!("Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let spec = load_spec(&cfg.docs.spec_file)?;
    let source = open_assets(&cfg.docs)?;
    check_entry_document(source.as_ref()).await;

    let assets_desc = source.describe();
    let docs = DocsHandler::with_assets(spec, source)
        .with_cache_policy(CachePolicy::from_max_age(cfg.http.cache_max_age));
    let state = Arc::new(AppState::new(cfg, docs));

    let listener = create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &state.mount_path, &assets_desc);

    let signals = Arc::new(SignalHandler::new());
    start_signal_handler(Arc::clone(&signals))?;

    let active_connections = Arc::new(AtomicUsize::new(0));

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(start_server_loop(listener, state, active_connections, signals))
        .await;

    Ok(())
}

/// Read the specification document; invalid JSON is served anyway
fn load_spec(path: &str) -> Result<Vec<u8>, StartupError> {
    let spec = std::fs::read(path).map_err(|source| StartupError::SpecFile {
        path: path.to_string(),
        source,
    })?;
    let is_json = serde_json::from_slice::<serde_json::Value>(&spec).is_ok();
    logger::log_spec_loaded(path, spec.len(), is_json);
    Ok(spec)
}

fn open_assets(docs: &DocsConfig) -> Result<Arc<dyn AssetSource>, StartupError> {
    let Some(dir) = docs.assets_dir.as_deref() else {
        return Ok(assets::bundled());
    };

    let to_err = |source| StartupError::AssetsDir {
        path: dir.to_string(),
        source,
    };

    if docs.live_reload {
        Ok(Arc::new(DiskAssets::new(dir).map_err(to_err)?))
    } else {
        let fs = AssetFs::load_dir(Path::new(dir)).map_err(to_err)?;
        if fs.is_empty() {
            logger::log_warning(&format!("Assets directory '{dir}' contains no files"));
        }
        Ok(Arc::new(fs))
    }
}

async fn check_entry_document(source: &dyn AssetSource) {
    if let Err(err) = source.open(ENTRY_DOCUMENT).await {
        logger::log_warning(&format!(
            "{} has no usable {ENTRY_DOCUMENT} ({err}); the UI root will not load",
            source.describe()
        ));
    }
}
