//! Command-line access to a MyCoRe server
//!
//! Usage:
//!   mycore-client translate <key> [<key>...]   # Resolve translation keys
//!   mycore-client bundle <prefix>              # Cache a bundle and list it
//!   mycore-client jwt                          # Fetch an access token
//!   mycore-client oauth-url [<scope>]          # Print the ORCID OAuth init URL
//!   mycore-client orcid-status                 # Linked ORCID iDs of the user

use anyhow::{Context, Result};
use futures::future::join_all;
use mycore_client::config::Config;
use mycore_client::i18n::{LangService, TranslationParams};
use mycore_client::orcid::{self, OrcidUserService};
use mycore_client::jwt;
use tracing::info;

fn print_usage() {
    println!("Usage: mycore-client <command> [args]");
    println!();
    println!("Commands:");
    println!("  translate <key> [<key>...] [name=value...]  Resolve translation keys");
    println!("  bundle <prefix>                             Fetch and cache a translation bundle");
    println!("  jwt                                         Fetch an access token");
    println!("  oauth-url [<scope>]                         Print the ORCID OAuth init URL");
    println!("  orcid-status                                Show linked ORCID iDs");
    println!();
    println!("Environment: MYCORE_BASE_URL (required), MYCORE_LANG, MYCORE_TRANSLATION_TTL_SECS, MYCORE_ACCESS_TOKEN");
}

/// Split `name=value` arguments from plain translation keys.
fn split_params(args: &[String]) -> (Vec<&str>, TranslationParams) {
    let mut keys = Vec::new();
    let mut params = TranslationParams::new();

    for arg in args {
        match arg.split_once('=') {
            Some((name, value)) => {
                params.insert(name.to_string(), serde_json::Value::String(value.to_string()));
            }
            None => keys.push(arg.as_str()),
        }
    }

    (keys, params)
}

async fn translate_command(config: &Config, args: &[String]) -> Result<()> {
    let service = LangService::from_config(config).context("Invalid translation settings")?;
    let (keys, params) = split_params(args);
    let params = (!params.is_empty()).then_some(&params);

    let translations = join_all(keys.iter().map(|key| service.translate(key, params))).await;
    for (key, translation) in keys.iter().zip(translations) {
        println!("{} = {}", key, translation);
    }

    info!("Lookup metrics: {:?}", service.metrics());
    Ok(())
}

async fn bundle_command(config: &Config, prefix: &str) -> Result<()> {
    let service = LangService::from_config(config).context("Invalid translation settings")?;
    service.cache_translations(prefix).await?;

    println!(
        "Cached {} translations for '{}' ({})",
        service.cache().size(),
        prefix,
        service.current_lang()
    );
    Ok(())
}

/// Token from the environment, or a fresh one from the server.
async fn access_token(client: &reqwest::Client, config: &Config) -> Result<String> {
    match &config.access_token {
        Some(token) => Ok(token.clone()),
        None => Ok(jwt::fetch_jwt(client, &config.base_url, None).await?),
    }
}

async fn orcid_status_command(config: &Config) -> Result<()> {
    let client = reqwest::Client::new();
    let token = access_token(&client, config).await?;
    let service = OrcidUserService::new(client, &config.base_url, &token)?;

    let status = service.user_status().await?;
    for orcid in &status.orcids {
        let trusted = status.trusted_orcids.contains(orcid);
        println!("{} (trusted: {})", orcid, trusted);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mycore_client=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = args[1].as_str();
    if matches!(command, "--help" | "-h" | "help") {
        print_usage();
        return Ok(());
    }

    let config = Config::from_env()?;
    let rest = &args[2..];

    match command {
        "translate" => translate_command(&config, rest).await,
        "bundle" => {
            let prefix = rest.first().context("bundle needs a prefix")?;
            bundle_command(&config, prefix).await
        }
        "jwt" => {
            let token = jwt::fetch_jwt(&reqwest::Client::new(), &config.base_url, None).await?;
            println!("{}", token);
            Ok(())
        }
        "oauth-url" => {
            let url = orcid::oauth_init_url(&config.base_url, rest.first().map(String::as_str))?;
            println!("{}", url);
            Ok(())
        }
        "orcid-status" => orcid_status_command(&config).await,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}
