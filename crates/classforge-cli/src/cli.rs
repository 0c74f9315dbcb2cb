//! Command-line interface for the classforge utility
//!
//! Reads a class diagram, runs the generation pipeline and writes the config
//! and metadata artefacts.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use classforge::core::logging::init_logging;
use classforge::{Artefacts, ForgeError, Indent, Pipeline, RenderConfig};

/// Classforge - Derive class metadata and aggregation config from class diagrams
#[derive(Parser)]
#[command(name = "classforge")]
#[command(about = "Generate class metadata and a nested XML config from a class diagram")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the config and metadata artefacts
    Generate {
        /// Input class diagram (use - for stdin)
        #[arg(short, long, default_value = "input/test_input.xml")]
        input: PathBuf,

        /// Output path for the nested XML config (use - for stdout)
        #[arg(long, default_value = "out/config.xml")]
        config: PathBuf,

        /// Output path for the JSON metadata (use - for stdout)
        #[arg(long, default_value = "out/meta.json")]
        meta: PathBuf,

        /// Indent the config with this many spaces instead of tabs
        #[arg(long)]
        indent_spaces: Option<usize>,
    },

    /// Check that a class diagram generates cleanly without writing anything
    Validate {
        /// Input class diagram (use - for stdin)
        #[arg(short, long, default_value = "input/test_input.xml")]
        input: PathBuf,

        /// Print a JSON summary instead of a status line
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
pub struct ClassforgeApp {
    pipeline: Pipeline,
}

impl ClassforgeApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            pipeline: Pipeline::with_config(config),
        }
    }

    fn build_config(indent_spaces: Option<usize>) -> RenderConfig {
        match indent_spaces {
            Some(width) => RenderConfig::new(Indent::Spaces(width)),
            None => RenderConfig::default(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var("CLASSFORGE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("CLASSFORGE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Classforge v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                input,
                config,
                meta,
                indent_spaces,
            } => self.generate_command(input, config, meta, indent_spaces, cli.verbose),
            Commands::Validate { input, json } => self.validate_command(input, json, cli.verbose),
        }
    }

    /// Handle the generate command
    fn generate_command(
        &mut self,
        input: PathBuf,
        config: PathBuf,
        meta: PathBuf,
        indent_spaces: Option<usize>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(&input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        self.pipeline = Pipeline::with_config(Self::build_config(indent_spaces));

        // Both artefacts exist before anything is written
        let artefacts = self.pipeline.run(&content)?;
        let meta_json = artefacts.metadata_json()?;

        self.write_output(&config, &artefacts.config)?;
        self.write_output(&meta, &meta_json)?;
        info!(config = %config.display(), meta = %meta.display(), "Wrote artefacts");

        if verbose {
            eprintln!(
                "Generated {} class records; config written to {}, metadata to {}",
                artefacts.metadata.len(),
                config.display(),
                meta.display()
            );
        }

        Ok(())
    }

    /// Handle the validate command
    fn validate_command(&self, input: PathBuf, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(&input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.pipeline.run(&content) {
            Ok(artefacts) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&Self::summary(&artefacts))?);
                } else {
                    println!(
                        "✓ Valid class diagram: {} classes",
                        artefacts.metadata.len()
                    );
                }
                Ok(())
            }
            Err(e) => {
                if json {
                    let report = serde_json::json!({ "valid": false, "error": e.to_string() });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("✗ Invalid class diagram: {}", e);
                }
                Err(e)
            }
        }
    }

    fn summary(artefacts: &Artefacts) -> serde_json::Value {
        serde_json::json!({
            "valid": true,
            "root": artefacts.metadata.root().map(|record| record.name.clone()),
            "classes": artefacts.metadata.len(),
        })
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: &Path) -> Result<String> {
        if input.to_string_lossy() == "-" {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| ForgeError::io_error("read input from", "stdin", e))?;
            Ok(content)
        } else {
            Ok(fs::read_to_string(input).map_err(|e| {
                ForgeError::io_error("read input file", input.display().to_string(), e)
            })?)
        }
    }

    /// Write an artefact to a file or stdout
    pub fn write_output(&self, output: &Path, content: &str) -> Result<()> {
        if output.to_string_lossy() == "-" {
            // Artefacts are written verbatim, without a trailing newline
            let mut stdout = io::stdout();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| ForgeError::io_error("write artefact to", "stdout", e))?;
            return Ok(());
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ForgeError::io_error("create directory", parent.display().to_string(), e)
            })?;
        }

        debug!(path = %output.display(), bytes = content.len(), "Writing artefact");
        fs::write(output, content).map_err(|e| {
            ForgeError::io_error("write output file", output.display().to_string(), e)
        })?;
        Ok(())
    }

    /// Get a reference to the pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl Default for ClassforgeApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SCHOOL: &str = r#"<Class name="School" isRoot="true"></Class>
<Class name="Student" isRoot="false">
    <Attribute name="name" type="string"/>
</Class>
<Aggregation source="Student" target="School" sourceMultiplicity="1..*" targetMultiplicity="1"/>"#;

    fn generate_args(input: &Path, config: &Path, meta: &Path) -> Cli {
        Cli::try_parse_from([
            "classforge",
            "--log-level",
            "error",
            "generate",
            "-i",
            input.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--meta",
            meta.to_str().unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_app_creation() {
        let _app = ClassforgeApp::new();
        let _default = ClassforgeApp::default();
    }

    #[test]
    fn test_default_paths() {
        let cli = Cli::try_parse_from(["classforge", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                input,
                config,
                meta,
                indent_spaces,
            } => {
                assert_eq!(input, PathBuf::from("input/test_input.xml"));
                assert_eq!(config, PathBuf::from("out/config.xml"));
                assert_eq!(meta, PathBuf::from("out/meta.json"));
                assert_eq!(indent_spaces, None);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["classforge", "--verbose", "validate"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_read_input_from_file() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.xml");
        fs::write(&path, SCHOOL).unwrap();

        assert_eq!(app.read_input(&path).unwrap(), SCHOOL);
    }

    #[test]
    fn test_read_missing_input() {
        let app = ClassforgeApp::new();
        let err = app.read_input(Path::new("/nonexistent/diagram.xml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
        assert!(matches!(
            err.downcast_ref::<ForgeError>(),
            Some(ForgeError::IoError { path, .. }) if path == "/nonexistent/diagram.xml"
        ));
    }

    #[test]
    fn test_write_output_creates_directories() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/config.xml");

        app.write_output(&path, "<A>\n</A>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<A>\n</A>");
    }

    #[test]
    fn test_write_output_reports_io_error() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let err = app
            .write_output(&blocker.join("config.xml"), "<A>\n</A>")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForgeError>(),
            Some(ForgeError::IoError { action: "create directory", .. })
        ));
    }

    #[test]
    fn test_generate_writes_both_artefacts() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.xml");
        let config = dir.path().join("out/config.xml");
        let meta = dir.path().join("out/meta.json");
        fs::write(&input, SCHOOL).unwrap();

        let mut app = ClassforgeApp::new();
        app.run(generate_args(&input, &config, &meta)).unwrap();

        assert_eq!(
            fs::read_to_string(&config).unwrap(),
            "<School>\n\t<Student>\n\t\t<name>string</name>\n\t</Student>\n</School>"
        );
        let records: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&meta).unwrap()).unwrap();
        assert_eq!(records[0]["class"], "School");
        assert_eq!(records[0]["isRoot"], true);
        assert_eq!(records[1]["max"], "*");
    }

    #[test]
    fn test_generate_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.xml");
        let config = dir.path().join("out/config.xml");
        let meta = dir.path().join("out/meta.json");
        fs::write(
            &input,
            format!("{}\n<Class name=\"Orphan\" isRoot=\"false\"></Class>", SCHOOL),
        )
        .unwrap();

        let mut app = ClassforgeApp::new();
        let err = app.run(generate_args(&input, &config, &meta)).unwrap_err();

        assert!(err.to_string().contains("Orphan"));
        assert!(!config.exists());
        assert!(!meta.exists());
    }

    #[test]
    fn test_build_config_spaces() {
        assert_eq!(
            ClassforgeApp::build_config(Some(2)),
            RenderConfig::new(Indent::Spaces(2))
        );
        assert_eq!(ClassforgeApp::build_config(None), RenderConfig::default());
    }

    #[test]
    fn test_validate_reports_summary() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.xml");
        fs::write(&input, SCHOOL).unwrap();

        let app = ClassforgeApp::new();
        assert!(app.validate_command(input, true, false).is_ok());

        let artefacts = app.pipeline().run(SCHOOL).unwrap();
        let summary = ClassforgeApp::summary(&artefacts);
        assert_eq!(summary["root"], "School");
        assert_eq!(summary["classes"], 2);
    }
}
