//! Site planner CLI: layout, export, sharing, and sessions.

use std::path::{Path, PathBuf};
use std::process;

use site_planner::config::{ConfigError, SiteFile, validate_selections};
use site_planner::io::export::export_csv;
use site_planner::session::{FileStore, SessionStore};
use site_planner::share;
use site_planner::site::layout::compute_layout;
use site_planner::site::summary::SiteSummary;
use site_planner::site::types::{LayoutResult, SiteConfig};

/// Default location of the local session file.
const DEFAULT_STORE: &str = "sessions.json";

/// Parsed CLI arguments.
struct CliArgs {
    site_path: Option<String>,
    preset: Option<String>,
    token: Option<String>,
    load_id: Option<u64>,
    csv_out: Option<String>,
    share_base: Option<String>,
    store_path: PathBuf,
    save_name: Option<String>,
    list: bool,
    delete_id: Option<u64>,
    #[cfg(feature = "remote")]
    remote_url: Option<String>,
    #[cfg(feature = "tui")]
    tui: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

/// Where the selections came from. Hand-written site files are held to
/// stricter validation than links and saved sessions.
enum Source {
    Site(SiteFile),
    Preset(SiteFile),
    Token(SiteConfig),
    Session(String, SiteConfig),
}

fn print_help() {
    eprintln!("site-planner — Battery energy storage site layout planner");
    eprintln!();
    eprintln!("Usage: site-planner [OPTIONS]");
    eprintln!();
    eprintln!("Site source (pick one):");
    eprintln!("  --site <path>            Load selections from a TOML site file");
    eprintln!(
        "  --preset <name>          Use a built-in site ({})",
        SiteFile::PRESETS.join(", ")
    );
    eprintln!("  --token <token|url>      Decode a share token or share link");
    eprintln!("  --load <id>              Load a saved session");
    eprintln!();
    eprintln!("Output:");
    eprintln!("  --csv <path>             Export placed units to CSV");
    eprintln!("  --share <base-url>       Print a share link for the site");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Edit the site interactively before output");
    eprintln!();
    eprintln!("Sessions:");
    eprintln!("  --store <path>           Local session file (default: {DEFAULT_STORE})");
    #[cfg(feature = "remote")]
    eprintln!("  --remote <url>           Session API base URL, e.g. http://localhost:8001/api");
    eprintln!("  --save <name>            Save the site as a named session");
    eprintln!("  --list                   List saved sessions and exit");
    eprintln!("  --delete <id>            Delete a saved session and exit");
    #[cfg(feature = "api")]
    {
        eprintln!();
        eprintln!("  --serve                  Start the REST API server");
        eprintln!("  --port <u16>             API server port (default: 8001)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no site source is given, the starter preset is used.");
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str, what: &str) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.as_str(),
        None => fail(format!("{flag} requires {what}")),
    }
}

fn parse_id(value: &str, flag: &str) -> u64 {
    value
        .parse::<u64>()
        .unwrap_or_else(|_| fail(format!("{flag} value \"{value}\" is not a valid session id")))
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        site_path: None,
        preset: None,
        token: None,
        load_id: None,
        csv_out: None,
        share_base: None,
        store_path: PathBuf::from(DEFAULT_STORE),
        save_name: None,
        list: false,
        delete_id: None,
        #[cfg(feature = "remote")]
        remote_url: None,
        #[cfg(feature = "tui")]
        tui: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 8001,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--site" => {
                cli.site_path = Some(next_value(&args, &mut i, "--site", "a path argument").into());
            }
            "--preset" => {
                cli.preset = Some(next_value(&args, &mut i, "--preset", "a name argument").into());
            }
            "--token" => {
                cli.token = Some(next_value(&args, &mut i, "--token", "a token argument").into());
            }
            "--load" => {
                let v = next_value(&args, &mut i, "--load", "a session id");
                cli.load_id = Some(parse_id(v, "--load"));
            }
            "--csv" => {
                cli.csv_out = Some(next_value(&args, &mut i, "--csv", "a path argument").into());
            }
            "--share" => {
                cli.share_base = Some(next_value(&args, &mut i, "--share", "a base URL").into());
            }
            "--store" => {
                cli.store_path = next_value(&args, &mut i, "--store", "a path argument").into();
            }
            "--save" => {
                cli.save_name = Some(next_value(&args, &mut i, "--save", "a name argument").into());
            }
            "--list" => cli.list = true,
            "--delete" => {
                let v = next_value(&args, &mut i, "--delete", "a session id");
                cli.delete_id = Some(parse_id(v, "--delete"));
            }
            #[cfg(feature = "remote")]
            "--remote" => {
                cli.remote_url = Some(next_value(&args, &mut i, "--remote", "a URL").into());
            }
            #[cfg(feature = "tui")]
            "--tui" => cli.tui = true,
            #[cfg(feature = "api")]
            "--serve" => cli.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                let v = next_value(&args, &mut i, "--port", "a u16 argument");
                cli.port = v
                    .parse::<u16>()
                    .unwrap_or_else(|_| fail(format!("--port value \"{v}\" is not a valid u16")));
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Picks the remote backend when reachable, otherwise the local file.
fn open_store(cli: &CliArgs) -> Box<dyn SessionStore> {
    #[cfg(feature = "remote")]
    if let Some(ref url) = cli.remote_url {
        match site_planner::session::RemoteStore::new(url) {
            Ok(remote) if remote.is_available() => return Box::new(remote),
            Ok(_) => eprintln!(
                "warning: session backend {url} unavailable, using {}",
                cli.store_path.display()
            ),
            Err(e) => eprintln!("warning: {e}, using {}", cli.store_path.display()),
        }
    }
    Box::new(FileStore::new(cli.store_path.clone()))
}

fn resolve_source(cli: &CliArgs, store: &dyn SessionStore) -> Source {
    let given = [
        cli.site_path.is_some(),
        cli.preset.is_some(),
        cli.token.is_some(),
        cli.load_id.is_some(),
    ];
    if given.iter().filter(|&&g| g).count() > 1 {
        fail("--site, --preset, --token, and --load are mutually exclusive; choose one source");
    }

    if let Some(ref path) = cli.site_path {
        SiteFile::from_toml_file(Path::new(path))
            .map(Source::Site)
            .unwrap_or_else(|e| fail(e))
    } else if let Some(ref token) = cli.token {
        let decoded = if token.contains('#') {
            share::decode_url(token).map(Option::unwrap_or_default)
        } else {
            share::decode_token(token)
        };
        decoded
            .map(|selections| Source::Token(SiteConfig::new(selections)))
            .unwrap_or_else(|e| fail(e))
    } else if let Some(id) = cli.load_id {
        store
            .get(id)
            .map(|s| Source::Session(s.name, s.config))
            .unwrap_or_else(|e| fail(e))
    } else {
        let name = cli.preset.as_deref().unwrap_or("starter");
        SiteFile::from_preset(name)
            .map(Source::Preset)
            .unwrap_or_else(|e| fail(e))
    }
}

fn print_layout(layout: &LayoutResult) {
    println!();
    println!("--- Placed Units ---");
    for (i, unit) in layout.items.iter().enumerate() {
        println!(
            "{i:>3}  {:<12} x={:>3} y={:>3}  {}x{} ft",
            unit.name, unit.x, unit.y, unit.width, unit.depth
        );
    }
}

fn report(errors: &[ConfigError], fatal: bool) {
    for e in errors {
        if fatal {
            eprintln!("{e}");
        } else {
            eprintln!("warning: {e}");
        }
    }
    if fatal && !errors.is_empty() {
        process::exit(1);
    }
}

fn main() {
    let cli = parse_args();
    let mut store = open_store(&cli);

    if cli.list {
        let sessions = store.list().unwrap_or_else(|e| fail(e));
        if sessions.is_empty() {
            eprintln!("No saved sessions.");
        }
        for s in &sessions {
            let created = s.created_at.map_or_else(
                || "-".to_string(),
                |t| t.format("%Y-%m-%d %H:%M").to_string(),
            );
            println!(
                "{:>4}  {:<24} {created:<16}  ({} selections)",
                s.id,
                s.name,
                s.config.selections.len()
            );
        }
        return;
    }

    if let Some(id) = cli.delete_id {
        store.delete(id).unwrap_or_else(|e| fail(e));
        eprintln!("Deleted session {id}");
        return;
    }

    let (site_name, config, fatal) = match resolve_source(&cli, store.as_ref()) {
        Source::Site(file) => {
            let name = file.name.clone().unwrap_or_else(|| "site".to_string());
            (name, file.site_config(), true)
        }
        Source::Preset(file) => {
            let name = file.name.clone().unwrap_or_default();
            (name, file.site_config(), true)
        }
        Source::Token(config) => ("shared link".to_string(), config, false),
        Source::Session(name, config) => (name, config, false),
    };
    report(&validate_selections(&config.selections), fatal);

    #[cfg(feature = "tui")]
    let config = if cli.tui {
        site_planner::tui::run(&site_name, config)
            .unwrap_or_else(|e| fail(format!("TUI crashed: {e}")))
    } else {
        config
    };

    let layout = compute_layout(&config.selections);
    let summary = SiteSummary::new(&config.selections, &layout);

    println!("Site: {site_name}");
    println!("{summary}");
    print_layout(&layout);

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&layout, Path::new(path)) {
            fail(format!("failed to write CSV: {e}"));
        }
        eprintln!("Layout written to {path}");
    }

    if let Some(ref base) = cli.share_base {
        println!();
        println!("Share link: {}", share::share_url(base, &config.selections));
    }

    if let Some(ref name) = cli.save_name {
        let session = store.save(name, config).unwrap_or_else(|e| fail(e));
        eprintln!("Saved session {} \"{}\"", session.id, session.name);
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(site_planner::api::AppState::new());
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(format!("failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(site_planner::api::serve(state, addr)) {
            fail(format!("API server failed: {e}"));
        }
    }
}
