//! Service settings read from the environment at startup.
//!
//! `TENPAI_ADDR` (default `127.0.0.1:3000`) and `TENPAI_DEAL_COUNT`
//! (default 13). Values that do not parse are logged and replaced by the
//! default.

use std::net::SocketAddr;
use tenpai_core::Rules;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub rules: Rules,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("TENPAI_ADDR").ok().as_deref(),
            std::env::var("TENPAI_DEAL_COUNT").ok().as_deref(),
        )
    }

    fn from_vars(addr: Option<&str>, deal_count: Option<&str>) -> Self {
        let default_addr = SocketAddr::from(([127, 0, 0, 1], 3000));
        let addr = match addr.map(str::parse::<SocketAddr>) {
            None => default_addr,
            Some(Ok(a)) => a,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "TENPAI_ADDR unusable, using {}", DEFAULT_ADDR);
                default_addr
            }
        };

        let rules = match deal_count.map(parse_rules) {
            None => Rules::default(),
            Some(Ok(r)) => r,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "TENPAI_DEAL_COUNT unusable, using the default");
                Rules::default()
            }
        };

        Config { addr, rules }
    }
}

fn parse_rules(raw: &str) -> Result<Rules, String> {
    let deal_count = raw
        .trim()
        .parse()
        .map_err(|e| format!("{}: {}", raw, e))?;
    let rules = Rules { deal_count };
    rules.validate()?;
    Ok(rules)
}
