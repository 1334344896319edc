use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

#[derive(Debug, Clone)]
pub struct EphemerisSettings {
    pub path: PathBuf,
    pub zodiac: String,
    pub ayanamsa: Option<String>,
    pub house_system: String,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub default_orb: f64,
    pub max_day_steps: usize,
    pub refine_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct UraniaSettings {
    pub ephemeris: EphemerisSettings,
    pub search: SearchSettings,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            path: default_ephemeris_path(),
            zodiac: default_zodiac(),
            ayanamsa: None,
            house_system: default_house_system(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_orb: default_orb(),
            max_day_steps: default_max_day_steps(),
            refine_minutes: default_refine_minutes(),
        }
    }
}

impl Default for UraniaSettings {
    fn default() -> Self {
        Self {
            ephemeris: EphemerisSettings::default(),
            search: SearchSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default = "default_zodiac")]
    zodiac: String,
    #[serde(default)]
    ayanamsa: Option<String>,
    #[serde(default = "default_house_system")]
    house_system: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchToml {
    #[serde(default = "default_orb")]
    default_orb: f64,
    #[serde(default = "default_max_day_steps")]
    max_day_steps: usize,
    #[serde(default = "default_refine_minutes")]
    refine_minutes: u32,
}

fn default_zodiac() -> String {
    "tropical".to_string()
}

fn default_house_system() -> String {
    "placidus".to_string()
}

fn default_orb() -> f64 {
    8.0
}

// Ten years of daily steps.
fn default_max_day_steps() -> usize {
    3660
}

fn default_refine_minutes() -> u32 {
    1
}

/// `SWISS_EPHEMERIS_PATH` wins over the compiled-in default.
fn default_ephemeris_path() -> PathBuf {
    env::var("SWISS_EPHEMERIS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
    #[serde(default)]
    search: Option<SearchToml>,
}

/// Try the common relative paths for `configs/urania.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", paths);
}

/// Parse settings from TOML text. Missing sections and keys use defaults.
pub fn parse_settings(text: &str) -> anyhow::Result<UraniaSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;

    let ephemeris = match root.ephemeris {
        Some(EphemerisToml {
            path,
            zodiac,
            ayanamsa,
            house_system,
        }) => {
            let zodiac = zodiac.to_lowercase();
            if zodiac != "tropical" && zodiac != "sidereal" {
                anyhow::bail!("ephemeris.zodiac must be \"tropical\" or \"sidereal\", got {zodiac:?}");
            }
            EphemerisSettings {
                path: path.unwrap_or_else(default_ephemeris_path),
                zodiac,
                ayanamsa,
                house_system,
            }
        }
        None => EphemerisSettings::default(),
    };

    let search = match root.search {
        Some(SearchToml {
            default_orb,
            max_day_steps,
            refine_minutes,
        }) => {
            if !(default_orb > 0.0) {
                anyhow::bail!("search.default_orb must be positive, got {default_orb}");
            }
            if max_day_steps == 0 {
                anyhow::bail!("search.max_day_steps must be at least 1");
            }
            if refine_minutes == 0 || refine_minutes > 1440 {
                anyhow::bail!("search.refine_minutes must be in 1..=1440, got {refine_minutes}");
            }
            SearchSettings {
                default_orb,
                max_day_steps,
                refine_minutes,
            }
        }
        None => SearchSettings::default(),
    };

    Ok(UraniaSettings { ephemeris, search })
}

pub fn load_settings() -> anyhow::Result<UraniaSettings> {
    let text = read_config_toml_text()?;
    parse_settings(&text)
}
