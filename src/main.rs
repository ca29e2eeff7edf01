//! Zusi 3 Fahrstraßen-Prüfung.
//!
//! Liest ein Streckenmodul und listet Fahrstraßen, Signalbegriffe und Befunde auf.

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use zusi_document::{DataRoots, ENV_DATA_ROOT, ENV_OFFICIAL_ROOT};
use zusi_fahrstrassen::{AnalysisContext, AnalysisMode, AnalysisOptions, CheckMode};

#[derive(Parser)]
#[command(author, version, about = "Prueft Fahrstrassen eines Zusi-3-Streckenmoduls", long_about = None)]
struct Cli {
    /// Streckenmodul (.st3)
    #[arg(value_name = "MODULE")]
    module: PathBuf,

    /// Betriebsart
    #[arg(long, value_enum, default_value_t = AnalysisMode::Routes)]
    mode: AnalysisMode,

    /// Referenznummer des Signals (für signal-combinations)
    #[arg(long, value_name = "REF_NR", required_if_eq("mode", "signal-combinations"))]
    signal: Option<u32>,

    /// Register auflisten
    #[arg(long)]
    registers: bool,

    /// Weichen auflisten
    #[arg(long)]
    switches: bool,

    /// Bahnübergänge prüfen
    #[arg(long)]
    level_crossings: bool,

    /// Prüfung "Hauptsignal außerhalb des Fahrwegs"
    #[arg(long, value_enum, value_name = "MODE")]
    signal_outside_route: Option<CheckMode>,

    /// Prüfung "Vorsignal zeigt zu hohe Geschwindigkeit"
    #[arg(long, value_enum, value_name = "MODE")]
    distant_speed: Option<CheckMode>,

    /// Schrittgrenze der Fahrweg-Rekonstruktion
    #[arg(long, value_name = "N")]
    max_steps: Option<usize>,

    /// Ausgabe ohne Farben
    #[arg(long)]
    plain: bool,

    /// Optionen-Datei (Standard: neben der Binary)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Wirksame Optionen (Datei plus Flags) in die Optionen-Datei schreiben
    #[arg(long)]
    save_config: bool,

    /// Benutzer-Datenverzeichnis (überschreibt ZUSI3_DATAPATH)
    #[arg(long, value_name = "DIR")]
    data_root: Option<PathBuf>,

    /// Offizielles Datenverzeichnis (überschreibt ZUSI3_DATAPATH_OFFICIAL)
    #[arg(long, value_name = "DIR")]
    official_root: Option<PathBuf>,

    /// Ausführliche Log-Ausgabe
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Optionen aus der Datei, überschrieben von den Flags
    fn config_file(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(AnalysisOptions::config_path)
    }

    fn options(&self) -> AnalysisOptions {
        let mut options = AnalysisOptions::load_from_file(&self.config_file());

        options.show_registers |= self.registers;
        options.show_switches |= self.switches;
        options.check_level_crossings |= self.level_crossings;
        if let Some(mode) = self.signal_outside_route {
            options.signal_outside_route = mode;
        }
        if let Some(mode) = self.distant_speed {
            options.distant_speed = mode;
        }
        if let Some(steps) = self.max_steps {
            options.max_path_steps = steps;
        }
        if self.plain {
            options.colored = false;
        }
        options
    }

    fn roots(&self) -> DataRoots {
        let from_env = |name: &str| std::env::var_os(name).map(PathBuf::from);
        match (&self.data_root, &self.official_root) {
            (None, None) => DataRoots::from_env(),
            (user, official) => DataRoots::new(
                user.clone().or_else(|| from_env(ENV_DATA_ROOT)),
                official.clone().or_else(|| from_env(ENV_OFFICIAL_ROOT)),
            ),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    log::info!(
        "Zusi Fahrstrassen-Pruefung v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let options = cli.options();
    if cli.save_config {
        if let Err(e) = options.save_to_file(&cli.config_file()) {
            log::warn!("{:#}", e);
        }
    }

    let context = match AnalysisContext::open(&cli.module, cli.roots(), options) {
        Ok(context) => context,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Fehler: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = context
        .run(cli.mode, cli.signal, &mut out)
        .and_then(|()| out.flush().map_err(anyhow::Error::from));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fehler: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("zusi-fahrstrassen").chain(args.iter().copied()))
    }

    #[test]
    fn test_explicit_roots_bypass_environment() {
        let cli = cli(&["A.st3", "--data-root", "/daten", "--official-root", "/offiziell"]);
        assert_eq!(
            cli.roots().roots(),
            &[PathBuf::from("/daten"), PathBuf::from("/offiziell")]
        );
    }

    #[test]
    fn test_flags_override_options_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("optionen.toml");
        std::fs::write(&path, "max_path_steps = 50\nshow_switches = true\n").expect("write");
        let path_arg = path.to_string_lossy().into_owned();

        let cli = cli(&["A.st3", "--config", &path_arg, "--max-steps", "7", "--plain"]);
        assert_eq!(cli.config_file(), path);
        let options = cli.options();
        assert_eq!(options.max_path_steps, 7);
        assert!(options.show_switches);
        assert!(!options.colored);
    }
}
