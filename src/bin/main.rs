use std::{
    fs,
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use speedread_core::{
    app::{ReaderConfig, TickResult},
    content::{Document, TextExtractor},
    input::CommandProvider,
    session::{CommandOutcome, LoadOutcome, PreviewOutcome, ReaderSession},
    settings::SettingsStore,
    stats::DocumentStats,
};
use speedread_host::{
    extract::DocumentExtractor,
    input::StdinCommands,
    network,
    render::TerminalRenderer,
    storage::JsonSettingsStore,
};

use loading::{LoadMessage, spawn_load};
use settings_sync::SettingsSyncState;

#[path = "main/loading.rs"]
mod loading;
#[path = "main/settings_sync.rs"]
mod settings_sync;

const SETTINGS_SAVE_DEBOUNCE_MS: u64 = 1_500;
const POLL_INTERVAL_MS: u64 = 5;
const WPM_REPORT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Parser)]
#[command(name = "speedread", version, about = "RSVP speed reader for PDF and text files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Accept document uploads over HTTP and answer with their word lists.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "SPEEDREAD_PORT", default_value_t = 5000)]
        port: u16,
    },
    /// Read a document one word at a time; page positions are tracked for text files only.
    Read {
        file: PathBuf,
        /// Words per minute; overrides the saved pace.
        #[arg(long, env = "SPEEDREAD_WPM")]
        wpm: Option<u16>,
        /// 1-based word to start from.
        #[arg(long)]
        start: Option<usize>,
        /// Start playing as soon as the document is loaded.
        #[arg(long)]
        autoplay: bool,
        /// Neither load nor save preferences.
        #[arg(long)]
        no_settings: bool,
    },
    /// Print reading statistics for a document.
    Stats {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Serve { host, port } => {
            let addr = format!("{host}:{port}");
            network::serve(&addr, &DocumentExtractor::new())
                .with_context(|| format!("serving uploads on {addr}"))
        }
        Command::Read {
            file,
            wpm,
            start,
            autoplay,
            no_settings,
        } => run_reader(ReadOptions {
            file,
            wpm,
            start,
            autoplay,
            no_settings,
        }),
        Command::Stats { file, json } => print_stats(&file, json),
    }
}

fn read_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = DocumentExtractor::new()
        .extract(&bytes)
        .with_context(|| format!("extracting text from {}", path.display()))?;
    Document::from_text(text).with_context(|| format!("loading {}", path.display()))
}

fn print_stats(path: &Path, json: bool) -> Result<()> {
    let stats = DocumentStats::for_document(&read_document(path)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        TerminalRenderer::stdout().print_stats(&stats)?;
    }
    Ok(())
}

struct ReadOptions {
    file: PathBuf,
    wpm: Option<u16>,
    start: Option<usize>,
    autoplay: bool,
    no_settings: bool,
}

fn open_settings_store(disabled: bool) -> Option<JsonSettingsStore> {
    if disabled {
        return None;
    }
    match JsonSettingsStore::at_default_path() {
        Ok(store) => {
            info!("settings: file={}", store.path().display());
            Some(store)
        }
        Err(err) => {
            warn!("settings: disabled: {}", err);
            None
        }
    }
}

fn run_reader(options: ReadOptions) -> Result<()> {
    let bytes = fs::read(&options.file)
        .with_context(|| format!("reading {}", options.file.display()))?;

    let mut settings_store = open_settings_store(options.no_settings);
    let saved = match settings_store.as_mut().map(|store| store.load()) {
        Some(Ok(saved)) => saved,
        Some(Err(err)) => {
            warn!("settings: ignoring unreadable file: {}", err);
            None
        }
        None => None,
    };

    let config = ReaderConfig::default();
    let mut session = match saved {
        Some(settings) => ReaderSession::with_settings(config, settings),
        None => ReaderSession::new(config),
    };
    if let Some(wpm) = options.wpm {
        let highlight = session.engine().highlight();
        session.engine_mut().restore_preferences(wpm, highlight);
    }

    let mut settings_sync = SettingsSyncState::new(session.persisted_settings());
    let mut commands = StdinCommands::spawn().context("starting command input")?;
    let mut renderer = TerminalRenderer::stdout();

    let (load_tx, load_rx) = mpsc::channel();
    let ticket = session.begin_load();
    spawn_load(bytes, ticket, load_tx).context("starting document loader")?;

    info!(
        "reader: started file={} wpm={} settings={}",
        options.file.display(),
        session.engine().wpm(),
        settings_store.is_some()
    );

    let loop_start = Instant::now();
    let mut report_words = 0u64;
    let mut report_start = Instant::now();
    let mut dirty = true;

    'ui: loop {
        let now_ms = loop_start.elapsed().as_millis() as u64;

        while let Ok(message) = load_rx.try_recv() {
            match message {
                LoadMessage::Extracted { ticket, result } => {
                    match session.complete_load(ticket, result) {
                        Ok(LoadOutcome::Loaded { word_count, .. }) => {
                            if let Some(stats) = session.stats() {
                                renderer.print_stats(stats)?;
                            }
                            if let Some(start) = options.start
                                && let Err(err) = session.engine_mut().jump_to_word(start)
                            {
                                warn!("reader: {}", err);
                            }
                            if options.autoplay {
                                session.engine_mut().play(now_ms)?;
                            }
                            info!("reader: ready words={}", word_count);
                        }
                        Ok(LoadOutcome::Stale { .. }) => {}
                        Err(err) => {
                            let current = session.persisted_settings();
                            settings_sync.flush_on_exit(current, settings_store.as_mut());
                            renderer.finish()?;
                            return Err(err).context("loading document");
                        }
                    }
                }
                LoadMessage::Preview(delivery) => {
                    if let PreviewOutcome::Accepted {
                        pages,
                        mapped_words,
                    } = session.accept_preview(delivery)
                    {
                        info!("preview: pages={} mapped_words={}", pages, mapped_words);
                    }
                }
                LoadMessage::PreviewUnavailable { session: id, reason } => {
                    info!("preview: unavailable for {}: {}", id, reason);
                }
            }
            dirty = true;
        }

        loop {
            let command = match commands.poll_command() {
                Ok(Some(command)) => command,
                Ok(None) => break,
                Err(never) => match never {},
            };
            match session.apply_command(command, now_ms) {
                Ok(CommandOutcome::Quit) => break 'ui,
                Ok(_) => dirty = true,
                Err(err) => warn!("reader: {}", err),
            }
        }

        if session.tick(now_ms) != TickResult::Idle {
            dirty = true;
        }

        if dirty {
            renderer.draw(&session.view())?;
            dirty = false;
        }

        settings_sync.track_current(session.persisted_settings(), now_ms);
        settings_sync.flush_if_due(settings_store.as_mut(), now_ms);

        let drained = session.engine_mut().drain_word_updates();
        report_words = report_words.saturating_add(u64::from(drained));
        let elapsed = report_start.elapsed();
        if elapsed >= WPM_REPORT_INTERVAL {
            if report_words > 0 {
                let elapsed_ms = (elapsed.as_millis() as u64).max(1);
                let wpm_x100 = report_words * 6_000_000 / elapsed_ms;
                info!(
                    "effective_wpm={}.{:02} words={} elapsed_ms={}",
                    wpm_x100 / 100,
                    wpm_x100 % 100,
                    report_words,
                    elapsed_ms
                );
            }
            report_words = 0;
            report_start = Instant::now();
        }

        thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
    }

    settings_sync.flush_on_exit(session.persisted_settings(), settings_store.as_mut());
    renderer.finish()?;
    info!("reader: quit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn read_help_names_the_page_tracking_limit() {
        let cli = Cli::command();
        let read = cli.find_subcommand("read").unwrap();
        let about = read.get_about().unwrap().to_string();
        assert!(about.contains("text files only"), "{about}");
    }

    #[test]
    fn read_arguments_parse() {
        let args = ["speedread", "read", "book.pdf", "--wpm", "450", "--autoplay"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Read {
            file,
            wpm,
            autoplay,
            ..
        } = cli.command
        else {
            panic!("expected read");
        };
        assert_eq!(file, PathBuf::from("book.pdf"));
        assert_eq!(wpm, Some(450));
        assert!(autoplay);
    }
}
