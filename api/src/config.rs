use std::env;

use anyhow::Context;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";
const DEFAULT_BCRYPT_COST: u32 = 10;
/// Work factors bcrypt accepts
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match env::var("PORT") {
            Ok(p) => p.parse().with_context(|| format!("PORT is not a valid port: {}", p))?,
            Err(_) => DEFAULT_PORT,
        };

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(c) => parse_bcrypt_cost(&c)?,
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        Ok(Self {
            database_url,
            port,
            cors_origins,
            bcrypt_cost,
        })
    }
}

fn parse_bcrypt_cost(raw: &str) -> anyhow::Result<u32> {
    let cost: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("BCRYPT_COST is not a number: {}", raw))?;
    anyhow::ensure!(
        BCRYPT_COST_RANGE.contains(&cost),
        "BCRYPT_COST must be between {} and {}, got {}",
        BCRYPT_COST_RANGE.start(),
        BCRYPT_COST_RANGE.end(),
        cost
    );
    Ok(cost)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
