// ABOUTME: CLI for running the staysift extraction pipeline over captured payloads.
// ABOUTME: Reads tagged payload files (or stdin), extracts hotels or reviews, and prints JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, ValueEnum};
use staysift_extract::{EntityKind, Pipeline, RequestContext, ResponseEnvelope};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Entity {
    Hotel,
    Review,
}

impl From<Entity> for EntityKind {
    fn from(e: Entity) -> Self {
        match e {
            Entity::Hotel => EntityKind::Hotel,
            Entity::Review => EntityKind::Review,
        }
    }
}

/// Extract hotel listings or guest reviews from captured payloads.
#[derive(Parser, Debug)]
#[command(name = "staysift")]
#[command(about = "Extract hotels or reviews from scraped payloads and print JSON", long_about = None)]
struct Args {
    /// Payload source(s) as tag=path pairs in priority order, e.g.
    /// google_travel=serp.json google_travel_html=page.html.
    /// Use tag=- to read one payload from stdin.
    #[arg(required = true)]
    sources: Vec<String>,

    /// What to extract.
    #[arg(long, value_enum, default_value_t = Entity::Hotel)]
    entity: Entity,

    /// Comma-separated relevance keywords. Pass an empty string to disable filtering.
    #[arg(long, default_value = "breakfast,clean,service,location,value")]
    keywords: String,

    /// Location the request is about.
    #[arg(long, default_value = "New York")]
    location: String,

    /// Hotel name (required when extracting reviews).
    #[arg(long)]
    hotel_name: Option<String>,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let entity: EntityKind = args.entity.into();

    let mut context = RequestContext::new();
    context.insert("location".to_string(), args.location.clone());
    if let Some(name) = &args.hotel_name {
        context.insert("hotel_name".to_string(), name.clone());
    }

    let keywords: Vec<String> = args
        .keywords
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    let mut envelopes = Vec::new();
    for source in &args.sources {
        let (tag, target) = source
            .split_once('=')
            .ok_or_else(|| anyhow!("source must be tag=path, got: {}", source))?;
        if tag.trim().is_empty() {
            bail!("empty source tag in: {}", source);
        }
        let body = load_body(target)?;
        envelopes.push((tag.to_string(), ResponseEnvelope::from_body(&body)));
    }

    let result = Pipeline::new().extract(entity, &envelopes, &keywords, &context)?;

    if args.compact {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

fn load_body(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read_to_string(path)?)
}
