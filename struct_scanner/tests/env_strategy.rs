//! Environment-backed decoding strategy.
//!
//! Reads `env:"NAME"` tags from the process environment under a prefix and
//! recurses into fields tagged `prefix:"..."`. Tests run serially and hold
//! the environment lock for their whole body.

use std::num::ParseIntError;

use anyhow::{Result, anyhow, ensure};
use serial_test::serial;
use struct_scanner::{DecodeResult, Decoded, Field, Kind, Scan, TagDecoder, Value, decode};
use test_helpers::env;
use test_helpers::errors::expect_message;

struct EnvDecoder {
    prefix: String,
}

impl EnvDecoder {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(format!("{}{name}", self.prefix)).ok()
    }
}

impl TagDecoder for EnvDecoder {
    fn decode_field(&self, field: &Field) -> DecodeResult<'_> {
        if let Some(prefix) = field.tag("prefix") {
            return Ok(Decoded::nested(Self::new(&format!("{}{prefix}", self.prefix))));
        }
        let Some(raw) = field.tag("env").and_then(|name| self.lookup(name)) else {
            return Ok(Decoded::Skip);
        };
        let value = match field.ty.deref_type().kind() {
            Kind::Bool => Value::of(raw.parse::<bool>()?),
            Kind::Slice => Value::seq(
                raw.split(',')
                    .map(|item| Value::of(item.trim().to_owned()))
                    .collect(),
            ),
            kind if kind.is_numeric() => Value::of(raw.parse::<i64>()?),
            _ => Value::of(raw),
        };
        Ok(Decoded::Value(value))
    }
}

#[derive(Debug, Default, PartialEq, Scan)]
struct Database {
    #[scan(tag = r#"env:"HOST""#)]
    pub host: String,
    #[scan(tag = r#"env:"PORT""#)]
    pub port: u16,
}

#[derive(Debug, Default, Scan)]
struct AppConfig {
    #[scan(tag = r#"env:"NAME""#)]
    pub name: String,
    #[scan(tag = r#"env:"DEBUG""#)]
    pub debug: bool,
    #[scan(tag = r#"env:"WORKERS""#)]
    pub workers: Option<u32>,
    #[scan(tag = r#"env:"PEERS""#)]
    pub peers: Vec<String>,
    #[scan(tag = r#"prefix:"DB_""#)]
    pub database: Database,
    #[scan(tag = r#"prefix:"CACHE_""#)]
    pub cache: Option<Database>,
}

const KEYS: [&str; 8] = [
    "APP_NAME",
    "APP_DEBUG",
    "APP_WORKERS",
    "APP_PEERS",
    "APP_DB_HOST",
    "APP_DB_PORT",
    "APP_CACHE_HOST",
    "APP_CACHE_PORT",
];

fn with_env(vars: &[(&str, &str)]) -> env::EnvScope {
    env::scope_with(|| {
        KEYS.iter()
            .map(|key| {
                vars.iter()
                    .find(|(name, _)| name == key)
                    .map_or_else(|| env::remove_var(*key), |(name, value)| env::set_var(*name, value))
            })
            .collect()
    })
}

#[test]
#[serial]
fn populates_nested_config_from_the_environment() -> Result<()> {
    let _env = with_env(&[
        ("APP_NAME", "svc"),
        ("APP_DEBUG", "true"),
        ("APP_WORKERS", "4"),
        ("APP_PEERS", "a, b"),
        ("APP_DB_HOST", "db"),
        ("APP_DB_PORT", "5432"),
    ]);
    let mut config = AppConfig::default();
    decode(&mut config, &EnvDecoder::new("APP_"))?;
    ensure!(config.name == "svc" && config.debug, "got {config:?}");
    ensure!(config.workers == Some(4));
    ensure!(config.peers == ["a", "b"]);
    ensure!(
        config.database
            == Database {
                host: String::from("db"),
                port: 5432,
            }
    );
    ensure!(config.cache == Some(Database::default()), "got {config:?}");
    Ok(())
}

#[test]
#[serial]
fn unset_variables_leave_fields_untouched() -> Result<()> {
    let _env = with_env(&[]);
    let mut config = AppConfig {
        name: String::from("default"),
        workers: Some(2),
        ..AppConfig::default()
    };
    decode(&mut config, &EnvDecoder::new("APP_"))?;
    ensure!(config.name == "default");
    ensure!(config.workers == Some(2));
    ensure!(config.peers.is_empty());
    Ok(())
}

#[test]
#[serial]
fn parse_failures_surface_with_their_field_path() -> Result<()> {
    let _env = with_env(&[("APP_DB_PORT", "not-a-port")]);
    let mut config = AppConfig::default();
    let err = decode(&mut config, &EnvDecoder::new("APP_"))
        .err()
        .ok_or_else(|| anyhow!("an invalid port should fail"))?;
    expect_message(&err, &["error decoding nested field database"])?;
    ensure!(err.field_path().as_deref() == Some("database.port"));
    ensure!(err.find_source::<ParseIntError>().is_some());
    Ok(())
}

#[test]
#[serial]
fn out_of_range_values_follow_cast_semantics() -> Result<()> {
    let _env = with_env(&[("APP_DB_PORT", "65537")]);
    let mut config = AppConfig::default();
    decode(&mut config, &EnvDecoder::new("APP_"))?;
    ensure!(config.database.port == 1, "got {}", config.database.port);
    Ok(())
}
