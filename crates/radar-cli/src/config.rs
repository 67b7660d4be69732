use anyhow::{bail, Context, Result};
use ml_client::MLConfig;
use std::path::PathBuf;
use technical_analysis::Period;

const DEFAULT_KEYWORDS_PATH: &str = "data/chave.json";
const DEFAULT_SECTOR_KEYWORDS_PATH: &str = "data/chave_setor.json";
const DEFAULT_CATALOG_PATH: &str = "data/ativos.json";

pub const USAGE: &str = "\
Usage:
  radar --ticker TICKER --articles NEWS.json --prices BARS.json [options]

Options:
  --catalog PATH          Asset catalog JSON (env RADAR_CATALOG_PATH, default data/ativos.json)
  --keywords PATH         General keyword dictionary (env RADAR_KEYWORDS_PATH, default data/chave.json)
  --sector-keywords PATH  Sector keyword dictionary (env RADAR_SECTOR_KEYWORDS_PATH, default data/chave_setor.json)
  --period P              5d, 1mo, 3mo, 6mo, 1y, 2y, 5y or max (default 6mo)
  --json                  Print the report as JSON";

#[derive(Debug, Clone)]
pub struct RadarConfig {
    pub ticker: String,
    pub articles_path: PathBuf,
    pub prices_path: PathBuf,
    pub catalog_path: PathBuf,
    pub keywords_path: PathBuf,
    pub sector_keywords_path: PathBuf,
    pub period: Period,
    pub json_output: bool,
    pub ml: MLConfig,
}

impl RadarConfig {
    /// Flags first, then environment, then defaults.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let ml = MLConfig::from_env().context("Invalid ML service configuration")?;
        Self::resolve(args, |key| std::env::var(key).ok(), ml)
    }

    pub fn resolve(
        args: &[String],
        env: impl Fn(&str) -> Option<String>,
        ml: MLConfig,
    ) -> Result<Self> {
        let path_setting = |flag: &str, var: &str, default: &str| -> PathBuf {
            flag_value(args, flag)
                .map(str::to_string)
                .or_else(|| env(var))
                .unwrap_or_else(|| default.to_string())
                .into()
        };

        let Some(ticker) = flag_value(args, "--ticker") else {
            bail!("--ticker is required\n\n{}", USAGE);
        };
        let Some(articles) = flag_value(args, "--articles") else {
            bail!("--articles is required\n\n{}", USAGE);
        };
        let Some(prices) = flag_value(args, "--prices") else {
            bail!("--prices is required\n\n{}", USAGE);
        };

        let period = match flag_value(args, "--period") {
            Some(p) => p.parse::<Period>().map_err(anyhow::Error::msg)?,
            None => Period::default(),
        };

        Ok(Self {
            ticker: ticker.trim().to_uppercase(),
            articles_path: articles.into(),
            prices_path: prices.into(),
            catalog_path: path_setting("--catalog", "RADAR_CATALOG_PATH", DEFAULT_CATALOG_PATH),
            keywords_path: path_setting("--keywords", "RADAR_KEYWORDS_PATH", DEFAULT_KEYWORDS_PATH),
            sector_keywords_path: path_setting(
                "--sector-keywords",
                "RADAR_SECTOR_KEYWORDS_PATH",
                DEFAULT_SECTOR_KEYWORDS_PATH,
            ),
            period,
            json_output: args.iter().any(|a| a == "--json"),
            ml,
        })
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|v| !v.starts_with("--"))
        .map(|s| s.as_str())
}
