//! CLI runner - executes commands

use crate::cache::{MemoryCache, PageCache};
use crate::cli::commands::{Cli, Commands, Intent, OutputFormat};
use crate::config::PagerConfig;
use crate::error::{Result, ResultExt};
use crate::fetch::HttpFetcher;
use crate::pager::{LoadTicket, PageView, Pager};
use crate::render::{render_json, render_text};
use crate::types::PageResult;
use futures::future::BoxFuture;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

/// Pager wired to the remote listing
pub type HttpPager = Pager<MemoryCache<HttpFetcher>>;

type InFlight = Option<(LoadTicket, BoxFuture<'static, Result<Arc<PageResult>>>)>;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.config()?;
        match &self.cli.command {
            Commands::Browse => self.browse(&config).await,
            Commands::Page { index } => self.page(&config, *index).await,
            Commands::Config => self.print_config(&config),
        }
    }

    /// Effective configuration: file (or defaults) plus command-line overrides
    pub fn config(&self) -> Result<PagerConfig> {
        let mut config = match &self.cli.config {
            Some(path) => PagerConfig::from_file(path)
                .with_context(|| format!("Loading {}", path.display()))?,
            None => PagerConfig::default(),
        };
        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if self.cli.no_prefetch {
            config.prefetch = false;
        }
        config.validate()?;
        debug!(?config, "Effective configuration");
        Ok(config)
    }

    async fn browse(&self, config: &PagerConfig) -> Result<()> {
        let mut pager = build_pager(config)?;
        let input = BufReader::new(tokio::io::stdin());
        let mut out = std::io::stdout();
        browse(&mut pager, input, &mut out, self.cli.format).await
    }

    async fn page(&self, config: &PagerConfig, index: u32) -> Result<()> {
        let mut pager = build_pager(config)?.starting_at(index);
        let loaded = pager.load().await;
        let mut out = std::io::stdout();
        write_view(&mut out, &pager.view(), self.cli.format)?;
        loaded
    }

    fn print_config(&self, config: &PagerConfig) -> Result<()> {
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}

/// Build a pager over an in-memory cache and the HTTP fetcher
pub fn build_pager(config: &PagerConfig) -> Result<HttpPager> {
    let fetcher = HttpFetcher::new(config)?;
    let cache = MemoryCache::new(fetcher).stale_after(config.cache.stale_after());
    Ok(Pager::from_config(Arc::new(cache), config))
}

/// Interactive loop: render, then react to whichever comes first of a
/// finished load or a line of input
///
/// Returns on `q` or end of input.
pub async fn browse<C, R, W>(
    pager: &mut Pager<C>,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<()>
where
    C: PageCache + ?Sized + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut in_flight: InFlight = None;

    loop {
        if pager.needs_load() {
            in_flight = pager.begin_load().map(|ticket| {
                let fetch = pager.fetch(&ticket);
                (ticket, fetch)
            });
        }
        write_view(out, &pager.view(), format)?;

        tokio::select! {
            outcome = wait_for(&mut in_flight) => {
                if let Some((ticket, _)) = in_flight.take() {
                    pager.complete_load(&ticket, outcome);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Intent::parse(&line) {
                    Intent::NextPage => {
                        if !pager.go_to_next() {
                            write_notice(out, "No next page", format)?;
                        }
                    }
                    Intent::PreviousPage => {
                        if !pager.go_to_previous() {
                            write_notice(out, "Already on the first page", format)?;
                        }
                    }
                    Intent::Quit => break,
                    Intent::Unknown => {
                        let notice =
                            format!("Unknown command {:?}, use n, p or q", line.trim());
                        write_notice(out, &notice, format)?;
                    }
                }
            }
        }
    }
    Ok(())
}

async fn wait_for(in_flight: &mut InFlight) -> Result<Arc<PageResult>> {
    match in_flight {
        Some((_, fetch)) => fetch.await,
        None => std::future::pending().await,
    }
}

/// Write one view in the requested format
pub fn write_view<W: Write>(out: &mut W, view: &PageView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "----------------------------------------")?;
            write!(out, "{}", render_text(view))?;
        }
        OutputFormat::Json => writeln!(out, "{}", render_json(view)?)?,
    }
    out.flush()?;
    Ok(())
}

/// Write a short message for the user
///
/// In JSON mode the message is an object with a single `notice` field, so
/// every output line stays parseable.
pub fn write_notice<W: Write>(out: &mut W, message: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{message}")?,
        OutputFormat::Json => writeln!(out, "{}", json!({ "notice": message }))?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedFetcher;
    use clap::Parser;

    #[test]
    fn test_config_overrides() {
        let cli = Cli::parse_from([
            "character-pager",
            "--base-url",
            "https://api.example.com/items",
            "--no-prefetch",
            "config",
        ]);
        let config = Runner::new(cli).config().unwrap();
        assert_eq!(config.base_url, "https://api.example.com/items");
        assert!(!config.prefetch);
    }

    #[test]
    fn test_config_rejects_bad_override() {
        let cli = Cli::parse_from(["character-pager", "--base-url", "nope", "config"]);
        assert!(Runner::new(cli).config().is_err());
    }

    #[test]
    fn test_write_view_json_is_one_line() {
        let mut out = Vec::new();
        let view = PageView {
            has_loading: true,
            ..PageView::default()
        };
        write_view(&mut out, &view, OutputFormat::Json).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"has_loading\":true"));
    }

    #[tokio::test]
    async fn test_browse_json_notices_are_json() {
        let cache = Arc::new(MemoryCache::new(ScriptedFetcher::new(1)));
        let mut pager = Pager::new(cache, "characters");
        let input: &[u8] = b"n\np\nx\nq\n";
        let mut out = Vec::new();

        browse(&mut pager, input, &mut out, OutputFormat::Json)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let notices: Vec<&str> = lines
            .iter()
            .filter_map(|line| line["notice"].as_str())
            .collect();
        assert_eq!(notices.len(), 3);
        assert_eq!(notices[0], "No next page");
        assert_eq!(notices[1], "Already on the first page");
        assert!(notices[2].starts_with("Unknown command \"x\""));
    }

    #[test]
    fn test_write_notice_text_is_plain() {
        let mut out = Vec::new();
        write_notice(&mut out, "No next page", OutputFormat::Text).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No next page\n");
    }
}
