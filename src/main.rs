//! Entry point for statline. Parses args, resolves the connection
//! profile, and runs the App.

use std::env;

use statline::app::App;
use statline::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};
use statline::session::DEFAULT_BAUD;

#[derive(Debug)]
struct ParsedArgs {
    port: Option<String>,
    baud: Option<u32>,
    profile: Option<String>,
    save: bool,
    dry_run: bool,
}

fn usage(prog: &str) -> String {
    format!("Usage: {prog} [--port NAME|-p NAME] [--baud N|-b N] [--profile NAME|-P NAME] [--save] [--dry-run]")
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "statline".into());
    let mut port: Option<String> = None;
    let mut baud: Option<u32> = None;
    let mut profile: Option<String> = None;
    let mut save = false; // --save
    let mut dry_run = false; // --dry-run

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(usage(&prog));
            }
            "--port" | "-p" => {
                port = it.next();
            }
            "--baud" | "-b" => {
                baud = match it.next().and_then(|v| v.parse().ok()) {
                    Some(b) => Some(b),
                    None => return Err(usage(&prog)),
                };
            }
            "--profile" | "-P" => {
                profile = it.next();
            }
            "--save" => {
                save = true;
            }
            "--dry-run" => {
                dry_run = true;
            }
            _ if arg.starts_with("--port=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        port = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--baud=") => {
                baud = match arg.split_once('=').and_then(|(_, v)| v.parse().ok()) {
                    Some(b) => Some(b),
                    None => return Err(usage(&prog)),
                };
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        profile = Some(v.to_string());
                    }
                }
            }
            _ => return Err(usage(&prog)),
        }
    }
    Ok(ParsedArgs {
        port,
        baud,
        profile,
        save,
        dry_run,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is opt-in: stderr output would tear the alternate screen.
    if env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    let mut profiles = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        port: parsed.port.clone(),
        baud: parsed.baud,
    };

    let (preselect, baud) = match req.resolve(&profiles) {
        ResolveProfile::Direct(port, baud) => {
            // Persist under the requested name; overwrite only when asked.
            if let (Some(name), Some(p)) = (parsed.profile.as_ref(), port.as_ref()) {
                let entry = ProfileEntry {
                    port: p.clone(),
                    baud,
                };
                match profiles.profiles.get(name) {
                    None => {
                        // New profile: save immediately
                        profiles.profiles.insert(name.clone(), entry);
                        let _ = save_profiles(&profiles);
                    }
                    Some(existing) => {
                        if *existing != entry && parsed.save {
                            profiles.profiles.insert(name.clone(), entry);
                            let _ = save_profiles(&profiles);
                        }
                    }
                }
            }
            (port, baud)
        }
        ResolveProfile::Loaded(port, baud) => (Some(port), baud),
        ResolveProfile::Unknown(name) => {
            eprintln!("unknown profile '{name}'");
            (None, parsed.baud.unwrap_or(DEFAULT_BAUD))
        }
    };

    // Used by the integration tests to exercise parsing and profile
    // persistence without starting the UI.
    if parsed.dry_run {
        return Ok(());
    }

    let mut app = App::new(baud, preselect);
    app.run().await
}
