//! Scrape coordinator: one CLI invocation end to end
//!
//! Ties the pieces together: allocator construction and override, fetcher
//! setup, traversal or single-page fetch, the allocator persist at the
//! batch boundary, the document merge-and-save, and optional asset
//! downloads. Fetching and merging are deliberately decoupled: the document
//! is loaded only when it is time to save, so a long traversal never holds
//! a stale copy of it in memory.

use crate::catalog::{PageLabel, Record};
use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, HttpFetcher, PageFetcher};
use crate::crawler::traversal::Traversal;
use crate::download::download_asset;
use crate::ident::IdAllocator;
use crate::output::RunSummary;
use crate::storage::{merge_page, JsonStore};
use crate::ShelfError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Everything one scrape invocation needs to know
#[derive(Debug, Clone)]
pub struct ScrapeJob {
    /// Category (console/section) to scrape
    pub category: String,

    /// Page selector: a specific page, or `All` for a full traversal
    pub page: PageLabel,

    /// Catalog document to merge into
    pub output: PathBuf,

    /// Optional id-counter override; non-positive values are ignored
    pub start_id: Option<i64>,

    /// Whether to download each record's asset after scraping
    pub download: bool,
}

/// Runs one scrape job to completion
///
/// Per-page and per-record failures are logged and counted, never fatal;
/// the only terminal failures are HTTP client construction and a failed
/// write of the catalog document itself.
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `job` - The category, page selector, and output for this invocation
///
/// # Returns
///
/// * `Ok(RunSummary)` - Counts of what the run accomplished
/// * `Err(ShelfError)` - Setup failed or the document could not be written
///
/// # Example
///
/// ```no_run
/// use shelfwalker::catalog::PageLabel;
/// use shelfwalker::config::Config;
/// use shelfwalker::crawler::{run_scrape, ScrapeJob};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), shelfwalker::ShelfError> {
/// let job = ScrapeJob {
///     category: "ps2".to_string(),
///     page: PageLabel::All,
///     output: PathBuf::from("catalog.json"),
///     start_id: None,
///     download: false,
/// };
/// let summary = run_scrape(Config::default(), job).await?;
/// summary.print();
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config, job: ScrapeJob) -> Result<RunSummary, ShelfError> {
    let config = Arc::new(config);

    let mut allocator = IdAllocator::open(Path::new(&config.output.state_path));
    if let Some(start_id) = job.start_id {
        allocator.set_start(start_id);
    }
    tracing::info!(
        "Scraping '{}' page {} (ids continue from {})",
        job.category,
        job.page,
        allocator.next_id()
    );
    let ids = Arc::new(Mutex::new(allocator));

    let client = build_http_client(&config)?;
    let fetcher = HttpFetcher::new(client.clone(), config.clone(), ids.clone());

    let records = match job.page {
        PageLabel::All => {
            let page_delay = Duration::from_millis(config.crawler.page_delay_ms);
            let mut traversal = Traversal::new(&fetcher, page_delay);
            if let Some(max_pages) = config.crawler.max_pages {
                traversal = traversal.with_max_pages(max_pages);
            }
            traversal.traverse_all(&job.category).await
        }
        PageLabel::Page(page) => fetcher.fetch_page(&job.category, page).await,
    };

    // Batch boundary: one durable counter write per run, however many
    // allocations the traversal performed.
    ids.lock().unwrap().persist();

    let store = JsonStore::new(&job.output);
    let mut doc = store.load();
    merge_page(&mut doc, &job.category, job.page, records.clone());
    store.save(&doc)?;
    tracing::info!(
        "Merged {} records into {}",
        records.len(),
        store.path().display()
    );

    let (downloads_ok, downloads_failed) = if job.download {
        download_assets(&client, &config, &records).await
    } else {
        (0, 0)
    };

    Ok(RunSummary {
        category: job.category,
        page: job.page,
        records: records.len(),
        downloads_ok,
        downloads_failed,
        output: job.output,
    })
}

/// Downloads every record's asset, sequentially and best-effort
async fn download_assets(
    client: &reqwest::Client,
    config: &Config,
    records: &[Record],
) -> (usize, usize) {
    let dir = Path::new(&config.output.download_dir);
    let delay = Duration::from_millis(config.crawler.detail_delay_ms);
    let mut ok = 0;
    let mut failed = 0;

    for record in records {
        tokio::time::sleep(delay).await;
        match download_asset(client, record, dir).await {
            Ok(path) => {
                ok += 1;
                tracing::info!("Downloaded '{}' to {}", record.title, path.display());
            }
            Err(e) => {
                failed += 1;
                tracing::warn!("Download failed for '{}': {}", record.title, e);
            }
        }
    }

    (ok, failed)
}
