//! CLI errors and process exit codes.

use std::io;
use std::path::PathBuf;

use dfamap_compiler::{CompileError, SourceError, StoreError};
use dfamap_table::ImageError;

use crate::config::ConfigError;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAIL: i32 = 1;
pub const EXIT_FAIL_OPTION: i32 = 2;
pub const EXIT_FAIL_BPF: i32 = 40;
pub const EXIT_FAIL_RE2DFA: i32 = 50;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("can't convert the automaton to a map: {0}")]
    Compile(#[from] CompileError),

    #[error("failed to open map '{}': {source}", path.display())]
    OpenMap {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid table image '{}': {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("{failed} of {attempted} map updates failed")]
    Incomplete { attempted: usize, failed: usize },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Read { .. } => EXIT_FAIL_OPTION,
            Self::Source(_) => EXIT_FAIL_RE2DFA,
            Self::Compile(CompileError::InvalidStore(_)) => EXIT_FAIL_BPF,
            Self::Compile(_) => EXIT_FAIL_RE2DFA,
            Self::OpenMap { .. } | Self::Write { .. } | Self::Image { .. } => EXIT_FAIL_BPF,
            Self::Incomplete { .. } => EXIT_FAIL,
        }
    }
}
