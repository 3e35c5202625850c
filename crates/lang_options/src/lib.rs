//! lang_options: `lang.json` parsing and front-end options.
//!
//! Every field is optional in the file; missing fields take their defaults.

use std::path::{Path, PathBuf};

use lang_parser::ParseLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default size of the literal arena's backing buffer.
pub const DEFAULT_LITERAL_ARENA_BYTES: usize = 131_072;

/// Default allocation limit of the node arena.
pub const DEFAULT_NODE_ARENA_BYTES: usize = 131_072 * 8;

/// Name of the configuration file looked up next to the input.
pub const CONFIG_FILE_NAME: &str = "lang.json";

/// Front-end options, matching the `lang.json` schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FrontendOptions {
    /// Bytes in the buffer that holds token literals.
    pub literal_arena_bytes: usize,
    /// Upper bound on bytes allocated for AST nodes.
    pub node_arena_bytes: usize,
    pub max_statements: usize,
    pub max_parameters: usize,
    /// Whether collected diagnostics make the run fail.
    pub deny_errors: bool,
}

impl Default for FrontendOptions {
    fn default() -> Self {
        let limits = ParseLimits::default();
        Self {
            literal_arena_bytes: DEFAULT_LITERAL_ARENA_BYTES,
            node_arena_bytes: DEFAULT_NODE_ARENA_BYTES,
            max_statements: limits.max_statements,
            max_parameters: limits.max_parameters,
            deny_errors: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl FrontendOptions {
    /// Parse options from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse options from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// The `lang.json` next to `input`, if there is one.
    pub fn discover(input: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = input.as_ref().parent()?;
        let candidate = dir.join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }

    pub fn parse_limits(&self) -> ParseLimits {
        ParseLimits {
            max_statements: self.max_statements,
            max_parameters: self.max_parameters,
        }
    }
}
