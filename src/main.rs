#![allow(dead_code)]

mod application;
mod message;
mod shell;
mod task;
mod view;

use carnet::api;
use carnet::config;
use carnet::core;

use application::Carnet;
use config::CarnetConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CarnetConfig::load();

    // Set up logging to the systemd user journal (`journalctl --user -t carnet -f`).
    // Wrapper filters: carnet crate at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("carnet") || target.starts_with("application") || target.starts_with("shell") {
                    let max = if carnet::debug_logging() { log::LevelFilter::Debug } else { log::LevelFilter::Info };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        let journal = systemd_journal_logger::JournalLog::new()
            .unwrap()
            .with_syslog_identifier("carnet".to_string());

        carnet::set_debug_logging(config.debug_logging);

        log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).unwrap();
        // Global max must be Debug so carnet debug logs can pass through when toggled
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Parse CLI flags
    {
        let args: Vec<String> = std::env::args().collect();
        if let Some(pos) = args.iter().position(|a| a == "--server") {
            match args.get(pos + 1) {
                Some(url) => config.server_url = url.clone(),
                None => {
                    eprintln!("--server attend une URL");
                    std::process::exit(2);
                }
            }
        }
    }

    log::info!("Starting carnet against {}", config.server_url);

    let (app, initial) = Carnet::new(config)?;
    shell::run(app, initial).await;

    Ok(())
}
