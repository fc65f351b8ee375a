//! Configuration for Wordscope.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{WordscopeError, WordscopeResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "wordscope.toml";

/// Main configuration for Wordscope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Lexical source settings.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Title search across film, music and book catalogues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitlesConfig {
    /// Enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Titles kept per kind.
    #[serde(default = "default_titles_limit")]
    pub limit: usize,

    /// TMDB API key. Falls back to the `TMDB_API_KEY` environment variable;
    /// without a key, films are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_api_key: Option<String>,

    /// TMDB search base (`/movie` and `/tv` are appended).
    #[serde(default = "default_tmdb")]
    pub films: SourceConfig,

    /// MusicBrainz recording search.
    #[serde(default = "default_musicbrainz")]
    pub music: SourceConfig,

    /// OpenLibrary search.
    #[serde(default = "default_openlibrary")]
    pub books: SourceConfig,
}

impl TitlesConfig {
    /// TMDB key from the config file, then from the environment.
    pub fn tmdb_key(&self) -> Option<String> {
        let non_blank = |key: String| (!key.trim().is_empty()).then_some(key);
        self.tmdb_api_key
            .clone()
            .and_then(non_blank)
            .or_else(|| std::env::var("TMDB_API_KEY").ok().and_then(non_blank))
    }

    /// Providers by name.
    pub fn named(&self) -> [(&'static str, &SourceConfig); 3] {
        [
            ("films", &self.films),
            ("music", &self.music),
            ("books", &self.books),
        ]
    }
}

impl Default for TitlesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            limit: default_titles_limit(),
            tmdb_api_key: None,
            films: default_tmdb(),
            music: default_musicbrainz(),
            books: default_openlibrary(),
        }
    }
}

fn default_titles_limit() -> usize {
    10
}

fn default_tmdb() -> SourceConfig {
    SourceConfig::new("https://api.themoviedb.org/3/search")
}

fn default_musicbrainz() -> SourceConfig {
    SourceConfig::new("https://musicbrainz.org/ws/2/recording")
}

fn default_openlibrary() -> SourceConfig {
    SourceConfig::new("https://openlibrary.org/search.json")
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// User-Agent sent to every provider.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_user_agent() -> String {
    format!("wordscope/{}", env!("CARGO_PKG_VERSION"))
}

/// Word cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum cache capacity (number of words).
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Entry time to live in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// Share one aggregation between concurrent misses for the same word.
    #[serde(default = "default_true")]
    pub coalesce_requests: bool,
}

impl CacheConfig {
    /// Entry time to live.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
            coalesce_requests: true,
        }
    }
}

fn default_cache_capacity() -> usize {
    500
}

fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

fn default_true() -> bool {
    true
}

/// Settings for every lexical source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Default per-request timeout (in seconds).
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u64,

    /// dictionaryapi.dev definitions.
    #[serde(default = "default_definitions")]
    pub definitions: SourceConfig,

    /// Datamuse synonyms and antonyms.
    #[serde(default = "default_datamuse")]
    pub thesaurus: SourceConfig,

    /// Datamuse phrases.
    #[serde(default = "default_datamuse")]
    pub idioms: SourceConfig,

    /// MyMemory translations.
    #[serde(default)]
    pub translations: TranslationsConfig,

    /// Datamuse triggers (related terms).
    #[serde(default = "default_datamuse")]
    pub conjugations: SourceConfig,

    /// Wikipedia search titles.
    #[serde(default = "default_popculture")]
    pub popculture: SourceConfig,

    /// Datamuse rhymes.
    #[serde(default = "default_datamuse")]
    pub rhymes: SourceConfig,

    /// Film, music and book titles (disabled unless turned on).
    #[serde(default)]
    pub titles: TitlesConfig,
}

impl SourcesConfig {
    /// Effective timeout for a source.
    pub fn timeout_for(&self, source: &SourceConfig) -> Duration {
        Duration::from_secs(source.timeout_secs.unwrap_or(self.timeout_secs))
    }

    /// Sources by name, in record order.
    pub fn named(&self) -> [(&'static str, &SourceConfig); 7] {
        [
            ("definitions", &self.definitions),
            ("thesaurus", &self.thesaurus),
            ("idioms", &self.idioms),
            ("translations", &self.translations.source),
            ("conjugations", &self.conjugations),
            ("popculture", &self.popculture),
            ("rhymes", &self.rhymes),
        ]
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_source_timeout(),
            definitions: default_definitions(),
            thesaurus: default_datamuse(),
            idioms: default_datamuse(),
            translations: TranslationsConfig::default(),
            conjugations: default_datamuse(),
            popculture: default_popculture(),
            rhymes: default_datamuse(),
            titles: TitlesConfig::default(),
        }
    }
}

fn default_source_timeout() -> u64 {
    10
}

fn default_definitions() -> SourceConfig {
    SourceConfig::new("https://api.dictionaryapi.dev/api/v2/entries/en")
}

fn default_datamuse() -> SourceConfig {
    SourceConfig::new("https://api.datamuse.com/words")
}

fn default_popculture() -> SourceConfig {
    SourceConfig::new("https://en.wikipedia.org/w/api.php")
}

/// Configuration for a single source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Provider endpoint.
    pub endpoint: String,

    /// Specific timeout (in seconds), overrides `sources.timeout_secs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl SourceConfig {
    /// Creates an enabled source pointing at `endpoint`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            enabled: true,
            endpoint: endpoint.to_string(),
            timeout_secs: None,
        }
    }
}

/// Translation source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationsConfig {
    #[serde(flatten)]
    pub source: SourceConfig,

    /// Source language code for every `langpair`.
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target languages, one request each.
    #[serde(default = "default_languages")]
    pub languages: Vec<TargetLanguage>,
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::new("https://api.mymemory.translated.net/get"),
            source_language: default_source_language(),
            languages: default_languages(),
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_languages() -> Vec<TargetLanguage> {
    vec![
        TargetLanguage::new("es", "Spanish"),
        TargetLanguage::new("fr", "French"),
        TargetLanguage::new("de", "German"),
        TargetLanguage::new("zh", "Chinese"),
    ]
}

/// A translation target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetLanguage {
    /// Provider language code (e.g. "es").
    pub code: String,

    /// Display name returned in the record (e.g. "Spanish").
    pub name: String,
}

impl TargetLanguage {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5174
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> WordscopeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> WordscopeResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            cache: CacheConfig::default(),
            sources: SourcesConfig::default(),
            server: ServerConfig::default(),
        }
    }

    /// Configuration file under the user config directory, if there is one.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wordscope").join(CONFIG_FILE_NAME))
    }

    /// Tries the current directory, then the user config directory, then defaults.
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::load(CONFIG_FILE_NAME) {
            return config;
        }
        Self::user_config_path()
            .and_then(|path| Self::load(path).ok())
            .unwrap_or_else(Self::default_config)
    }

    /// Checks values that would make the engine unusable.
    pub fn validate(&self) -> WordscopeResult<()> {
        if self.cache.capacity == 0 {
            return Err(WordscopeError::config("cache.capacity must be at least 1"));
        }

        for (name, source) in self.sources.named() {
            if source.enabled && source.endpoint.trim().is_empty() {
                return Err(WordscopeError::config(format!(
                    "sources.{}.endpoint must not be empty",
                    name
                )));
            }
        }

        let titles = &self.sources.titles;
        if titles.enabled {
            if titles.limit == 0 {
                return Err(WordscopeError::config(
                    "sources.titles.limit must be at least 1",
                ));
            }
            for (name, source) in titles.named() {
                if source.enabled && source.endpoint.trim().is_empty() {
                    return Err(WordscopeError::config(format!(
                        "sources.titles.{}.endpoint must not be empty",
                        name
                    )));
                }
            }
        }

        let translations = &self.sources.translations;
        if translations.source.enabled {
            if translations.languages.is_empty() {
                return Err(WordscopeError::config(
                    "sources.translations.languages must not be empty",
                ));
            }
            let mut seen = HashSet::new();
            for lang in &translations.languages {
                if !seen.insert(lang.code.as_str()) {
                    return Err(WordscopeError::config(format!(
                        "duplicated translation language: {}",
                        lang.code
                    )));
                }
            }
        }

        match self.general.log_format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(WordscopeError::config(format!(
                "general.log_format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_configuration() {
        let config = Config::default();

        assert_eq!(config.cache.capacity, 500);
        assert_eq!(config.cache.ttl(), Duration::from_secs(3600));
        assert!(config.cache.coalesce_requests);
        assert_eq!(config.server.port, 5174);
        assert_eq!(config.sources.translations.languages.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [cache]
            capacity = 2

            [sources.rhymes]
            enabled = false
            endpoint = "http://localhost:9999/words"
            "#,
        )
        .unwrap();

        assert_eq!(config.cache.capacity, 2);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert!(!config.sources.rhymes.enabled);
        assert!(config.sources.thesaurus.enabled);
        assert_eq!(
            config.sources.translations.source.endpoint,
            "https://api.mymemory.translated.net/get"
        );
    }

    #[test]
    fn test_translations_table_is_flattened() {
        let config: Config = toml::from_str(
            r#"
            [sources.translations]
            endpoint = "http://localhost:1/get"
            timeout_secs = 3
            languages = [{ code = "it", name = "Italian" }]
            "#,
        )
        .unwrap();

        let translations = &config.sources.translations;
        assert_eq!(translations.source.endpoint, "http://localhost:1/get");
        assert_eq!(
            config.sources.timeout_for(&translations.source),
            Duration::from_secs(3)
        );
        assert_eq!(
            translations.languages,
            vec![TargetLanguage::new("it", "Italian")]
        );
    }

    #[test]
    fn test_timeout_falls_back_to_sources_default() {
        let config = Config::default();
        assert_eq!(
            config.sources.timeout_for(&config.sources.definitions),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = Config::default();
        config.cache.capacity = 0;
        assert!(matches!(config.validate(), Err(WordscopeError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_duplicated_language() {
        let mut config = Config::default();
        config
            .sources
            .translations
            .languages
            .push(TargetLanguage::new("es", "Castellano"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ignores_disabled_empty_endpoint() {
        let mut config = Config::default();
        config.sources.idioms.enabled = false;
        config.sources.idioms.endpoint.clear();
        assert!(config.validate().is_ok());

        config.sources.idioms.enabled = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_titles_disabled_by_default() {
        let config = Config::default();
        assert!(!config.sources.titles.enabled);
        assert_eq!(config.sources.titles.limit, 10);
    }

    #[test]
    fn test_titles_table_parses() {
        let config: Config = toml::from_str(
            r#"
            [sources.titles]
            enabled = true
            limit = 3
            tmdb_api_key = "secret"

            [sources.titles.music]
            enabled = false
            endpoint = "http://localhost:1/recording"
            "#,
        )
        .unwrap();

        let titles = &config.sources.titles;
        assert!(titles.enabled);
        assert_eq!(titles.limit, 3);
        assert_eq!(titles.tmdb_key().as_deref(), Some("secret"));
        assert!(!titles.music.enabled);
        assert_eq!(titles.books.endpoint, "https://openlibrary.org/search.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_checks_titles_only_when_enabled() {
        let mut config = Config::default();
        config.sources.titles.limit = 0;
        config.sources.titles.books.endpoint.clear();
        assert!(config.validate().is_ok());

        config.sources.titles.enabled = true;
        assert!(config.validate().is_err());

        config.sources.titles.limit = 5;
        assert!(config.validate().is_err());

        config.sources.titles.books.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.cache.capacity = 42;
        config.general.log_format = "json".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.cache.capacity, 42);
        assert_eq!(loaded.general.log_format, "json");
        assert_eq!(loaded.sources.translations.languages.len(), 4);
    }
}
