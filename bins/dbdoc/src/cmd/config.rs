use clap::Args;

use dbdoc_engine::{DbdocConfig, MaterializeOptions};

use super::error::DbdocError;

const DEFAULT_CONFIG: &str = "dbdoc.toml";

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Args, Clone, Debug, Default)]
pub struct DocArgs {
    /// Path to dbdoc.toml
    #[arg(long, default_value = DEFAULT_CONFIG, env = "DBDOC_CONFIG")]
    pub config: String,

    /// Catalog snapshot (JSON) to document
    #[arg(long, short = 's')]
    pub source: Option<String>,

    /// Output file name
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Overwrite the output file if it exists
    #[arg(long, short = 'y')]
    pub overwrite: bool,

    /// Fail when objects nest deeper than this
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Show detailed error messages
    #[arg(long)]
    pub debug: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Effective: merged config
// ═══════════════════════════════════════════════════════════════

/// Final settings: dbdoc.toml < CLI.
#[derive(Debug)]
pub struct Effective {
    pub source: String,
    pub output: String,
    pub overwrite: bool,
    pub options: MaterializeOptions,
    pub debug: bool,
}

impl Effective {
    pub fn new(args: &DocArgs) -> Result<Self, DbdocError> {
        let cfg = match DbdocConfig::load(&args.config) {
            Ok(c) => c,
            Err(e) => {
                if std::path::Path::new(&args.config).exists() {
                    return Err(DbdocError::Config(e.to_string()));
                }
                if args.config != DEFAULT_CONFIG {
                    return Err(DbdocError::Config(format!("config {} not found", args.config)));
                }
                DbdocConfig::default()
            }
        };

        let mut options = cfg.materialize_options();
        if args.max_depth.is_some() {
            options.max_depth = args.max_depth;
        }

        let source = args
            .source
            .clone()
            .or(cfg.source)
            .ok_or_else(|| {
                DbdocError::Config("no source given (--source or `source` in config)".into())
            })?;
        let output = args
            .output
            .clone()
            .or(cfg.output)
            .ok_or_else(|| {
                DbdocError::Config("no output given (--output or `output` in config)".into())
            })?;
        if source.trim().is_empty() || output.trim().is_empty() {
            return Err(DbdocError::Config("source and output must not be empty".into()));
        }

        Ok(Self {
            source,
            output,
            overwrite: args.overwrite || cfg.overwrite,
            options,
            debug: args.debug,
        })
    }
}
