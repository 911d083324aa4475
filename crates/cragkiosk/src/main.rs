//! cragkiosk - a GTK4 lobby kiosk for the Cragside climbing gym.

mod config_manager;
mod css;
mod forms;
mod kiosk;
mod modal_host;
mod navbar;
mod pages;
mod styles;
mod surface;
mod toast;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gtk4::Application;
use gtk4::prelude::*;
use tracing::{error, info, warn};

use cragkiosk_core::{Config, Preferences, logging};

use crate::config_manager::ConfigManager;

/// cragkiosk - lobby kiosk for the Cragside climbing gym
#[derive(Parser, Debug)]
#[command(name = "cragkiosk", version, about, long_about = None)]
struct Args {
    /// Configuration file to use instead of the XDG lookup chain
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Raise log verbosity (repeat: -v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the commented default configuration and exit
    #[arg(long)]
    print_example_config: bool,

    /// Validate the configuration and exit (nonzero on errors)
    #[arg(long)]
    check_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    if args.print_example_config {
        print!("{}", cragkiosk_core::config::DEFAULT_CONFIG_TOML);
        return ExitCode::SUCCESS;
    }

    // With --config the file must exist and parse; the XDG chain otherwise,
    // falling back to the embedded defaults when nothing is found.
    let loaded = Config::find_and_load(args.config.as_deref())
        .and_then(|loaded| loaded.config.validate().map(|()| loaded));
    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match loaded.source {
        Some(ref source) => info!("Configuration: {}", source.display()),
        None => warn!("No config file found, using the built-in defaults"),
    }

    if args.check_config {
        match loaded.source {
            Some(ref source) => println!("Configuration valid: {}", source.display()),
            None => println!("Configuration valid (built-in defaults)"),
        }
        println!("\n{}", loaded.config.summary());
        return ExitCode::SUCCESS;
    }

    launch(loaded.config, loaded.source)
}

/// Bring up the GTK application and hand control to its main loop.
fn launch(config: Config, config_source: Option<PathBuf>) -> ExitCode {
    // The manager must exist before activate so the watcher can start.
    ConfigManager::init_global(config.clone(), config_source);

    let app = Application::builder()
        .application_id("io.github.cragkiosk")
        .flags(gtk4::gio::ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(move |app| {
        // Style for the visitor's stored theme mode before the first paint.
        let mode = Preferences::load().theme;
        kiosk::load_css(&config, mode);

        let window = kiosk::build_window(app, &config);
        window.present();

        ConfigManager::global().start_watching();
    });

    app.connect_shutdown(|_| {
        info!("Shutting down");
        ConfigManager::global().stop_watching();
    });

    // clap already consumed the real argv.
    let status = app.run_with_args::<String>(&[]);
    if status == gtk4::glib::ExitCode::SUCCESS {
        ExitCode::SUCCESS
    } else {
        error!("GTK main loop exited with an error");
        ExitCode::FAILURE
    }
}
