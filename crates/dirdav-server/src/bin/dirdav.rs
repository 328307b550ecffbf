//! dirdav: serve a directory over WebDAV.
//!
//! # Usage
//!
//! ```bash
//! # Serve ./share on port 5005
//! dirdav --dir ./share
//!
//! # Read-only with Basic auth over TLS
//! dirdav -dir ./share -port 8443 -https-mode -user alice -password secret -read-only
//! ```

use clap::{CommandFactory, Parser};
use dirdav_server::{webdav, Settings};
use env_logger::Env;
use log::{error, info};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

/// Long options that may also be spelled with a single dash (`-dir`).
const LONG_FLAGS: [&str; 11] = [
    "dir",
    "port",
    "https-mode",
    "https-cert-file",
    "https-key-file",
    "user",
    "password",
    "read-only",
    "show-hidden",
    "config",
    "verbose",
];

/// WebDAV server for a local directory.
///
/// Plain GET requests on directories return a browsable HTML index; every
/// other request is answered by the WebDAV handler.
#[derive(Parser, Debug)]
#[command(name = "dirdav")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WebDAV root directory
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// HTTP or HTTPS port, or host:port (default: 5005)
    #[arg(long)]
    port: Option<String>,

    /// Serve over HTTPS
    #[arg(long)]
    https_mode: bool,

    /// HTTPS certificate file (default: cert.pem)
    #[arg(long, value_name = "FILE")]
    https_cert_file: Option<PathBuf>,

    /// HTTPS private key file (default: key.pem)
    #[arg(long, value_name = "FILE")]
    https_key_file: Option<PathBuf>,

    /// User name for Basic authentication
    #[arg(long)]
    user: Option<String>,

    /// Password for Basic authentication
    #[arg(long)]
    password: Option<String>,

    /// Reject PUT, DELETE, PROPPATCH, MKCOL, COPY and MOVE
    #[arg(long)]
    read_only: bool,

    /// Show hidden files in directory listings
    #[arg(long)]
    show_hidden: bool,

    /// TOML file with default settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            dir: self.dir.clone(),
            port: self.port.clone(),
            https_mode: self.https_mode.then_some(true),
            https_cert_file: self.https_cert_file.clone(),
            https_key_file: self.https_key_file.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            read_only: self.read_only.then_some(true),
            show_hidden: self.show_hidden.then_some(true),
        }
    }
}

/// Rewrite `-flag` and `-flag=value` to their `--` form for known long flags.
fn expand_single_dash_long_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = s.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{}", s))
            } else {
                arg
            }
        })
        .collect()
}

#[tokio::main]
async fn main() {
    let args = Args::parse_from(expand_single_dash_long_flags(std::env::args_os()));

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    let file_settings = match &args.config {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let config = match args.settings().merge(file_settings).resolve() {
        Ok(config) => config,
        Err(e) if e.is_usage() => {
            let _ = Args::command().print_help();
            eprintln!("\nError: {}.", e);
            process::exit(0);
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if config.read_only {
        info!("Read-only mode enabled");
    }
    if config.show_hidden {
        info!("Hidden files are listed");
    }

    if let Err(e) = webdav::serve(config).await {
        error!("Failed to start server: {}", e);
        process::exit(1);
    }
}
