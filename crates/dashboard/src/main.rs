//! XRPool yield dashboard
//!
//! Main entry point for the terminal dashboard

use std::env;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use xrpool_core::{DashboardConfig, FeedKind};
use xrpool_dashboard::{render_frame, DashboardView};
use xrpool_feeds::{
    spawn_poller, Fetch, FeedSlot, HttpFetch, PoolAmountSource, UnitPriceSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize logging; frames own stdout, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting XRPool dashboard v{}", env!("CARGO_PKG_VERSION"));

    // Compiled-in defaults with environment overrides
    let mut config = DashboardConfig::default();
    if let Ok(url) = env::var("XRPOOL_SHEET_URL") {
        config.sheet.url = url;
    }
    if let Ok(url) = env::var("XRPOOL_PRICE_URL") {
        config.price.url = url;
    }
    if let Ok(secs) = env::var("XRPOOL_POLL_SECS") {
        if let Ok(secs) = secs.parse::<u64>() {
            let interval = Duration::from_secs(secs);
            config.sheet.poll_interval = interval;
            config.price.poll_interval = interval;
        }
    }

    // Feeds
    let fetcher: Arc<dyn Fetch> = Arc::new(HttpFetch::new(HttpFetch::DEFAULT_TIMEOUT)?);

    let pool_slot = Arc::new(FeedSlot::new(FeedKind::PoolAmount));
    let price_slot = Arc::new(FeedSlot::new(FeedKind::UnitPrice));

    let pool_source = Arc::new(PoolAmountSource::new(
        config.sheet.url.clone(),
        config.sheet_column,
        Arc::clone(&fetcher),
    ));
    let price_source = Arc::new(UnitPriceSource::new(
        config.price.url.clone(),
        config.price_json_path.clone(),
        Arc::clone(&fetcher),
    ));

    let mut pool_poller = spawn_poller(
        pool_source,
        Arc::clone(&pool_slot),
        config.sheet.poll_interval,
    );
    let mut price_poller = spawn_poller(
        price_source,
        Arc::clone(&price_slot),
        config.price.poll_interval,
    );

    // View
    let mut view = DashboardView::new(config.clone(), pool_slot, price_slot);
    let mut frame_tick = tokio::time::interval(config.refresh_tick);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    info!("Dashboard running; [r] reload, [q] quit, Ctrl+C to exit");

    loop {
        tokio::select! {
            _ = frame_tick.tick() => {
                view.update();
                let frame = view.frame();
                let mut stdout = std::io::stdout().lock();
                let _ = write!(stdout, "{}{}", xrpool_dashboard::render::CLEAR, render_frame(&frame));
                let _ = stdout.flush();
            }
            line = input.next_line(), if stdin_open => {
                match line {
                    Ok(Some(command)) => match command.trim() {
                        "r" => {
                            info!("manual reload");
                            pool_poller.refresh_now();
                            price_poller.refresh_now();
                        }
                        "q" => {
                            info!("quit requested");
                            break;
                        }
                        other => {
                            debug!(input = other, "ignoring unknown command");
                        }
                    },
                    // stdin closed; keep rendering until a signal arrives
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        debug!(error = %e, "stdin read failed");
                        stdin_open = false;
                    }
                }
            }
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C");
                break;
            }
        }
    }

    pool_poller.stop();
    price_poller.stop();
    view.teardown();

    info!("Dashboard shutdown complete");
    Ok(())
}
