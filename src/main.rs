//! `manse` - print the Four Pillars profile of a birth instant.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use manse::authority::{OfflineAuthority, resolve_conversion};
use manse::civil::{self, CivilTime};
use manse::config::Config;
use manse::saju::{self, ConversionResult, Element, Gender, SajuProfile};

#[derive(Parser)]
#[command(name = "manse")]
#[command(about = "Compute the Four Pillars (saju) profile of a birth instant", long_about = None)]
#[command(version)]
struct Cli {
    /// Birth instant in RFC 3339, e.g. 2023-01-20T07:30:00+09:00
    #[arg(short, long)]
    birth: String,

    /// male or female
    #[arg(short, long)]
    gender: Gender,

    /// Civil zone offset from UTC in minutes (overrides the config file)
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i32>,

    /// Configuration file path
    #[arg(short, long, env = "MANSE_CONFIG")]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log level (overrides the config file)
    #[arg(long, env = "MANSE_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    conversion: &'a ConversionResult,
    saju: &'a SajuProfile,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(offset) = cli.offset {
        config.civil_offset_minutes = offset;
        config.validate()?;
    }
    init_tracing(&config, cli.log_level.as_deref());

    let instant = civil::parse_instant(&cli.birth)?;
    let offline = OfflineAuthority::new(config.civil_offset_minutes);
    let conversion = resolve_conversion(None, &offline, instant)?;
    let local = CivilTime::from_utc(instant, config.civil_offset_minutes)?;
    info!(local = %local.iso(), offset = config.civil_offset_minutes, "computing profile");
    let profile = saju::build_profile(&conversion, local, cli.gender);

    if cli.json {
        let report = Report {
            conversion: &conversion,
            saju: &profile,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&local, &profile);
    }
    Ok(())
}

fn init_tracing(config: &Config, level: Option<&str>) {
    let level = level.unwrap_or(config.logging.level.as_str()).to_owned();
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_summary(local: &CivilTime, profile: &SajuProfile) {
    println!("local time  {}", local.iso());
    println!();
    println!("        시주  일주  월주  연주");
    let p = &profile.pillars;
    let row = [p.hour, p.day, p.month, p.year];
    println!(
        "간지    {}",
        row.iter().map(|x| x.label()).collect::<Vec<_>>().join("  ")
    );
    println!(
        "干支    {}",
        row.iter().map(|x| x.hanja_label()).collect::<Vec<_>>().join("  ")
    );
    let gods: Vec<_> = profile.ten_gods.values().rev().map(|g| g.label()).collect();
    println!("십신    {}", gods.join("  "));
    let stages: Vec<_> = profile.twelve_stages.values().rev().map(|s| s.label()).collect();
    println!("운성    {}", stages.join("  "));
    println!();

    let counts: Vec<_> = Element::ALL
        .iter()
        .map(|&e| format!("{}{}", e.hanja(), profile.five_elements.get(e)))
        .collect();
    println!("오행    {}", counts.join(" "));
    println!();

    let gf = &profile.great_fortune;
    println!("대운    {}, from age {}", gf.direction, gf.start_age);
    for cycle in &gf.cycles {
        println!("  {:>3}  {}", cycle.start_age, cycle.pillar);
    }
}
