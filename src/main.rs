//! Entry point for **casteljau**.
//!
//! With the `frontend-gtk` feature (the default) a GTK4 window is opened and
//! the GLib main loop drives the frames.  `--replay <file>` (or a build
//! without the feature) runs the same loop headless, reading input from a
//! JSON-lines script (`-` for stdin) and recording instead of painting.
//!
//! Flags:
//!
//! * `--config <path>`  load this config instead of the default location
//! * `--replay <path>`  headless run driven by a replay script
//! * `--no-pacing`      headless only: do not wait between frames

use casteljau::app::{self, Pacing};
use casteljau::config::Config;
use casteljau::controller::InteractionController;
use casteljau::frontend::recorder::RecordingSurface;
use casteljau::frontend::replay::ReplaySource;
use casteljau::menu::MenuLayout;
use casteljau::render::Compositor;
use log::{error, info};
use std::io::BufRead;
use std::path::PathBuf;

/// Resolve the config directory (`$XDG_CONFIG_HOME/casteljau`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("casteljau")
}

/// Load an explicitly requested config (fatal on error), or try the default
/// location and fall back to compiled-in defaults.
fn load_config(explicit: Option<&PathBuf>) -> Config {
    if let Some(path) = explicit {
        return match Config::load(path) {
            Ok(cfg) => {
                info!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        };
    }
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no usable config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Arguments

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    replay: Option<String>,
    no_pacing: bool,
}

fn parse_args() -> Args {
    match parse_args_from(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            error!("{}", msg);
            std::process::exit(2);
        }
    }
}

fn parse_args_from(mut it: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                let path = it.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--replay" => {
                let script = it.next().ok_or("--replay needs a script path or `-`")?;
                args.replay = Some(script);
            }
            "--no-pacing" => args.no_pacing = true,
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }
    if args.no_pacing && args.replay.is_none() && cfg!(feature = "frontend-gtk") {
        return Err("--no-pacing only applies to --replay runs".into());
    }
    Ok(args)
}

//  Main

fn main() {
    env_logger::init();

    let args = parse_args();
    let config = load_config(args.config.as_ref());

    let controller = match InteractionController::new(&config, MenuLayout::default()) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    match args.replay.as_deref() {
        Some(script) => run_headless(controller, &config, script, args.no_pacing),
        None => run_windowed(controller, &config, args.no_pacing),
    }
}

#[cfg(feature = "frontend-gtk")]
fn run_windowed(controller: InteractionController, config: &Config, _no_pacing: bool) {
    if let Err(e) = casteljau::frontend::gtk::run_main_loop(controller, config) {
        error!("GTK frontend failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "frontend-gtk"))]
fn run_windowed(controller: InteractionController, config: &Config, no_pacing: bool) {
    info!("built without `frontend-gtk`; reading a replay script from stdin");
    run_headless(controller, config, "-", no_pacing);
}

/// Headless mode: replay script in, recorded frames out.
fn run_headless(mut controller: InteractionController, config: &Config, script: &str, no_pacing: bool) {
    let reader: Box<dyn BufRead> = if script == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        match std::fs::File::open(script) {
            Ok(f) => Box::new(std::io::BufReader::new(f)),
            Err(e) => {
                error!("failed to open replay script {}: {}", script, e);
                std::process::exit(1);
            }
        }
    };
    let mut source = ReplaySource::new(reader);
    let mut surface = RecordingSurface::new();
    let compositor = Compositor::from_config(config);
    let pacing = if no_pacing {
        Pacing::Unpaced
    } else {
        Pacing::Realtime
    };

    match app::run(&mut controller, &compositor, &mut source, &mut surface, pacing) {
        Ok(stats) => {
            let t = controller.clock().t();
            info!(
                "replay done: {} script lines, {} frames, {} draw calls, {} points, t={:.2}, fps={}",
                source.lines_read(),
                stats.frames,
                surface.total_calls(),
                controller.points().len(),
                t,
                controller.clock().fps()
            );
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[&str]) -> Result<Args, String> {
        parse_args_from(raw.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_known_flags() {
        let args = parse(&["--config", "/tmp/c.json", "--replay", "-", "--no-pacing"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.json")));
        assert_eq!(args.replay.as_deref(), Some("-"));
        assert!(args.no_pacing);
    }

    #[test]
    fn flag_without_value_is_an_error() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--replay"]).is_err());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse(&["--fast"]).is_err());
    }

    #[cfg(feature = "frontend-gtk")]
    #[test]
    fn no_pacing_needs_replay_in_windowed_builds() {
        assert!(parse(&["--no-pacing"]).is_err());
    }
}
