use anyhow::{Context, anyhow};
use colloquy_core::{
    DATE_ASC, DATE_DESC, HasScore, HasUpdatedAt, SCORE_DESC, SortOptions,
    SortingRegistry, StrategyKind,
};
use colloquy_model::Direction;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::validation::SortingConfigError;

pub const CONFIG_PATH_VAR: &str = "COLLOQUY_SORTING_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "COLLOQUY_SORTING_CONFIG_JSON";

/// Source that produced the sorting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortingConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// One user-facing sort option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SorterSpec {
    /// Attribute compared: `created_at`, `updated_at` or `score`.
    pub strategy: StrategyKind,
    /// `ASC` or `DESC`, exactly.
    pub direction: Direction,
    /// Overrides the top-level `max_depth` for this sorter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl SorterSpec {
    pub fn new(strategy: StrategyKind, direction: Direction) -> Self {
        Self {
            strategy,
            direction,
            max_depth: None,
        }
    }
}

/// Sorting settings: which aliases exist and which one is used when a
/// caller does not pick one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortingConfig {
    /// Alias used when no sorter is requested. Must be declared in
    /// `sorters`.
    pub default: String,
    /// Deepest reply chain the tree sorter accepts. Leave unset for no
    /// limit; set it when threads come from untrusted input.
    pub max_depth: Option<usize>,
    /// Alias table. Declaring `[sorters]` replaces the built-in aliases.
    pub sorters: BTreeMap<String, SorterSpec>,
}

impl Default for SortingConfig {
    fn default() -> Self {
        let sorters = BTreeMap::from([
            (
                DATE_ASC.to_string(),
                SorterSpec::new(StrategyKind::CreatedAt, Direction::Ascending),
            ),
            (
                DATE_DESC.to_string(),
                SorterSpec::new(StrategyKind::CreatedAt, Direction::Descending),
            ),
            (
                SCORE_DESC.to_string(),
                SorterSpec::new(StrategyKind::Score, Direction::Descending),
            ),
        ]);

        Self {
            default: DATE_DESC.to_string(),
            max_depth: None,
            sorters,
        }
    }
}

impl SortingConfig {
    /// Load sorting configuration overrides using environment variables.
    /// Evaluation order:
    /// 1) `$COLLOQUY_SORTING_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$COLLOQUY_SORTING_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) defaults if none of the above is present.
    pub fn load_from_env() -> anyhow::Result<(Self, SortingConfigSource)> {
        let cwd = env::current_dir()
            .context("failed to resolve working directory")?;
        Self::load_with(|key| env::var(key).ok(), &cwd)
    }

    /// Same as [`load_from_env`](Self::load_from_env) with an explicit
    /// variable lookup and search directory.
    pub fn load_with(
        lookup: impl Fn(&str) -> Option<String>,
        search_root: &Path,
    ) -> anyhow::Result<(Self, SortingConfigSource)> {
        if let Some(path_str) = lookup(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, SortingConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("{CONFIG_JSON_VAR} does not hold a sorter alias table"))?;
            return Ok((parsed, SortingConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(search_root) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, SortingConfigSource::File(path)));
        }

        debug!("no sorting configuration found, using defaults");
        Ok((Self::default(), SortingConfigSource::Default))
    }

    /// Reads an alias table from disk. `.json` and `.toml`/`.tml` files are
    /// parsed as such; anything else may be either.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("cannot read sorter alias table {}", path.display())
        })?;
        let origin = path.display().to_string();

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents)
                .with_context(|| format!("sorter alias table {origin} was rejected")),
            Some("toml" | "tml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("sorter alias table {origin} is not valid TOML: {err}")
            }),
            _ => Self::parse_from_str(&contents, &origin),
        }
    }

    /// Parses an alias table written in TOML or JSON.
    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        let toml_err = match toml::from_str(contents) {
            Ok(config) => return Ok(config),
            Err(err) => err,
        };
        serde_json::from_str(contents).map_err(|json_err| {
            anyhow!(
                "sorter alias table {origin} is neither TOML ({toml_err}) nor JSON ({json_err})"
            )
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).map_err(|err| {
            anyhow!("sorter alias table is not valid JSON: {err}")
        })
    }

    /// First conventional alias table location under `root`.
    fn find_default_file(root: &Path) -> Option<PathBuf> {
        [root.to_path_buf(), root.join("config")]
            .into_iter()
            .flat_map(|dir| [dir.join("sorting.toml"), dir.join("sorting.json")])
            .find(|path| path.is_file())
    }

    /// Options applied to the sorter registered under `alias`.
    pub fn options_for(&self, spec: &SorterSpec) -> SortOptions {
        SortOptions {
            max_depth: spec.max_depth.or(self.max_depth),
        }
    }

    /// Validates the table and registers every alias.
    pub fn build_registry<C>(&self) -> Result<SortingRegistry<C>, SortingConfigError>
    where
        C: HasUpdatedAt + HasScore + 'static,
    {
        self.validate()?;

        let mut registry = SortingRegistry::new(self.default.clone());
        for (alias, spec) in &self.sorters {
            registry.register_kind(
                alias.clone(),
                spec.strategy,
                spec.direction,
                self.options_for(spec),
            );
        }

        info!(
            default = %self.default,
            sorters = registry.len(),
            "comment sorting configured"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_table() {
        let raw = r#"
            default = "newest"
            max_depth = 32

            [sorters.newest]
            strategy = "created_at"
            direction = "DESC"

            [sorters.active]
            strategy = "updated_at"
            direction = "DESC"
            max_depth = 8
        "#;

        let config = SortingConfig::parse_from_str(raw, "inline").unwrap();
        assert_eq!(config.default, "newest");
        assert_eq!(config.sorters.len(), 2);
        assert_eq!(
            config.options_for(&config.sorters["newest"]).max_depth,
            Some(32)
        );
        assert_eq!(
            config.options_for(&config.sorters["active"]).max_depth,
            Some(8)
        );
    }

    #[test]
    fn parses_json_and_keeps_builtin_aliases_when_omitted() {
        let config =
            SortingConfig::parse_json(r#"{ "default": "date_asc" }"#).unwrap();
        assert_eq!(config.default, DATE_ASC);
        assert!(config.sorters.contains_key(SCORE_DESC));
    }

    #[test]
    fn lowercase_direction_is_rejected() {
        let raw = r#"
            default = "newest"
            [sorters.newest]
            strategy = "created_at"
            direction = "desc"
        "#;
        assert!(SortingConfig::parse_from_str(raw, "inline").is_err());
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let raw = r#"{ "sorters": { "hot": { "strategy": "heat", "direction": "ASC" } } }"#;
        assert!(SortingConfig::parse_json(raw).is_err());
    }

    #[test]
    fn parse_errors_name_the_alias_table() {
        let err = SortingConfig::parse_from_str("default = [", "threads.conf")
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("sorter alias table threads.conf is neither TOML"), "{err}");

        let err = SortingConfig::parse_json("{").unwrap_err().to_string();
        assert!(err.starts_with("sorter alias table is not valid JSON"), "{err}");
    }
}
