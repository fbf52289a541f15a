//! SafeSpot console: drive the core from a terminal.
//!
//! Stands in for the mobile UI: each line is turned into a request, and
//! every state change is printed as JSON.
//!
//! Usage: safespot-console [--db PATH] [--locale en] [--race-policy latest-issued]

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use safespot::provider::{Coordinate, Secret, StaticGeocoder, StaticIdentity};
use safespot::request::*;
use safespot::state::{self, AppRoute, ProfileField};
use safespot::{AppConfig, RacePolicy, SafeSpotBff};
use safespot_flux::Flux;
use safespot_kv::{KVStore, MemoryStore, RedbStore};

#[derive(Parser, Debug)]
#[command(name = "safespot-console", about = "Drive the SafeSpot core from a terminal")]
struct Args {
    /// redb file for profile fields (in-memory when omitted).
    #[arg(long)]
    db: Option<PathBuf>,

    /// Locale for user-facing messages.
    #[arg(long, default_value = "en")]
    locale: String,

    /// How overlapping sign-in attempts resolve.
    #[arg(long, default_value_t = RacePolicy::LatestIssued)]
    race_policy: RacePolicy,
}

const HELP: &str = "\
commands:
  login <identifier> <secret>     submit credentials
  ok                              dismiss the login notice
  logout
  register <identifier> <secret>
  reset <identifier>              send password reset instructions
  go <route>                      /login /register /forgot-password /home /rides /help /account
  search <address>                find an address on the map
  profile                         load profile fields
  set <name|email|phone> <value>  edit a profile field
  save                            persist the profile
  state                           print every state entry
  quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig {
        db_path: args.db,
        locale: args.locale,
        race_policy: args.race_policy,
        ..AppConfig::default()
    };

    let kv: Arc<dyn KVStore> = match &config.db_path {
        Some(path) => {
            info!("Profile database: {}", path.display());
            Arc::new(RedbStore::open(path)?)
        }
        None => Arc::new(MemoryStore::new()),
    };

    let identity = Arc::new(StaticIdentity::new().with_account("testuser", "abc123"));
    let geocoder = Arc::new(
        StaticGeocoder::new()
            .with_place("1 Infinite Loop, Cupertino", Coordinate::new(37.3318, -122.0312))
            .with_place("Ferry Building, San Francisco", Coordinate::new(37.7955, -122.3937))
            .with_place("Union Square, San Francisco", Coordinate::new(37.7880, -122.4075)),
    );

    let flux = Flux::new();
    let bff = SafeSpotBff::new(&flux, config, identity, geocoder, kv);
    bff.register(&flux);

    flux.subscribe("#", |path, value| match state::to_json(value) {
        Some(json) => println!("{path} = {json}"),
        None => println!("{path} changed"),
    });

    flux.request(InitializeReq).await;
    info!("Race policy: {}", bff.config.race_policy);
    info!("Demo account: testuser / abc123");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        match cmd {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "login" => match rest.split_once(' ') {
                Some((identifier, secret)) => {
                    flux.request(LoginReq {
                        identifier: identifier.to_string(),
                        secret: Secret::new(secret.trim()),
                    })
                    .await;
                }
                None => println!("usage: login <identifier> <secret>"),
            },
            "ok" => flux.request(DismissNoticeReq).await,
            "logout" => flux.request(LogoutReq).await,
            "register" => match rest.split_once(' ') {
                Some((identifier, secret)) => {
                    flux.request(RegisterReq {
                        identifier: identifier.to_string(),
                        secret: Secret::new(secret.trim()),
                    })
                    .await;
                }
                None => println!("usage: register <identifier> <secret>"),
            },
            "reset" => {
                flux.request(ResetPasswordReq {
                    identifier: rest.to_string(),
                })
                .await;
            }
            "go" => match AppRoute::parse(rest) {
                Some(route) => flux.request(NavigateReq { route }).await,
                None => println!("unknown route: {rest}"),
            },
            "search" => {
                flux.request(MapSearchReq {
                    address: rest.to_string(),
                })
                .await;
            }
            "profile" => flux.request(LoadProfileReq).await,
            "set" => {
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                match ProfileField::parse(field) {
                    Some(field) => {
                        flux.request(UpdateProfileFieldReq {
                            field,
                            value: value.trim().to_string(),
                        })
                        .await;
                    }
                    None => println!("unknown field: {field}"),
                }
            }
            "save" => flux.request(SaveProfileReq).await,
            "state" => {
                for (path, value) in flux.snapshot() {
                    match state::to_json(&value) {
                        Some(json) => println!("{path} = {json}"),
                        None => println!("{path} = ?"),
                    }
                }
            }
            other => println!("unknown command: {other} (try 'help')"),
        }
    }

    Ok(())
}
