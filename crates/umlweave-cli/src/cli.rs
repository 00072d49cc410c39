//! Command-line interface for the umlweave utility
//!
//! Provides a CLI to extract class-diagram fragments from sentences,
//! assemble them into models and check the models against ground truth.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::colorizer::{colorize_diff_line, stdout_supports_color, verdict};
use umlweave::core::logging::init_logging;
use umlweave::prelude::*;
use umlweave::plugins::model_from_notation;

/// Umlweave - Extract class diagrams from English requirements
#[derive(Parser)]
#[command(name = "umlweave")]
#[command(about = "Extract, assemble and evaluate class-diagram models from English text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// When to use colors in output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Fail on relationship sentences without a multiplicity phrase
    #[arg(long, global = true)]
    pub strict: bool,
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

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the fragment of a single sentence
    Extract {
        /// Sentence to extract from (reads --input or stdin when omitted)
        #[arg(short, long)]
        sentence: Option<String>,

        /// Input file holding the sentence (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Sentence kind label to extract as (class|rel)
        #[arg(short, long)]
        label: Option<String>,

        /// CoNLL-U file with the dependency parse of the sentence
        #[arg(long)]
        conllu: Option<PathBuf>,
    },

    /// Extract and assemble the model of a whole document
    Process {
        /// Input file containing the document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Document name (defaults to the input file stem)
        #[arg(short, long)]
        document: Option<String>,

        /// CoNLL-U file with the dependency parses of the document
        #[arg(long)]
        conllu: Option<PathBuf>,

        /// Directory to store the keyed fragments in
        #[arg(short, long)]
        fragments: Option<PathBuf>,

        /// Output file for the model JSON (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assemble stored fragments into one model per document
    Assemble {
        /// Directory of stored fragments
        #[arg(short, long)]
        fragments: PathBuf,

        /// Directory to write `<document>.json` models into (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assemble stored fragments and compare them against ground truth
    Evaluate {
        /// Directory of stored fragments
        #[arg(short, long)]
        fragments: PathBuf,

        /// Directory of ground-truth models (`<document>.json` or `.mmd`)
        #[arg(short, long)]
        truth: PathBuf,

        /// Directory to write passed.csv and failed.csv into
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Compare two models for structural equality
    Compare {
        /// Expected model (`.json` or `.mmd`)
        expected: PathBuf,

        /// Actual model (`.json` or `.mmd`)
        actual: PathBuf,
    },

    /// Show the registered extraction patterns
    Patterns {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
#[derive(Default)]
pub struct UmlweaveApp {
    config: PipelineConfig,
}

impl UmlweaveApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new application instance with a pipeline config
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flag defaults
        let log_level_str = std::env::var("UMLWEAVE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("UMLWEAVE_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Umlweave v{}", env!("CARGO_PKG_VERSION"));
        }

        let config = PipelineConfig {
            strict: self.config.strict || cli.strict,
        };
        let colorize = should_colorize(cli.color);

        match cli.command {
            Commands::Extract {
                sentence,
                input,
                label,
                conllu,
            } => self.extract_command(sentence, input, label, conllu, cli.verbose),
            Commands::Process {
                input,
                document,
                conllu,
                fragments,
                output,
            } => self.process_command(
                input,
                document,
                conllu,
                fragments,
                output,
                config,
                cli.verbose,
            ),
            Commands::Assemble { fragments, output } => {
                self.assemble_command(&fragments, output, cli.verbose)
            }
            Commands::Evaluate {
                fragments,
                truth,
                report,
            } => self.evaluate_command(&fragments, &truth, report, colorize, cli.verbose),
            Commands::Compare { expected, actual } => {
                self.compare_command(&expected, &actual, colorize)
            }
            Commands::Patterns { json } => self.patterns_command(json, cli.verbose),
        }
    }

    /// Handle the extract command
    fn extract_command(
        &self,
        sentence: Option<String>,
        input: Option<PathBuf>,
        label: Option<String>,
        conllu: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let sentence = match sentence {
            Some(sentence) => sentence,
            None => self.read_input(input)?.trim().to_string(),
        };

        let extractor = Extractor::with_builtin_patterns(load_parser(conllu.as_deref())?)?;
        if verbose {
            eprintln!("Parsing with {}", extractor.parser_name());
        }

        let fragment = match label {
            Some(label) => extractor.extract_as(&sentence, &label)?,
            None => extractor.extract(&sentence)?,
        };

        match fragment {
            Some(fragment) => self.write_output(None, &serde_json::to_string_pretty(&fragment)?),
            None => {
                eprintln!("No pattern matched: {}", sentence);
                Ok(())
            }
        }
    }

    /// Handle the process command
    #[allow(clippy::too_many_arguments)]
    fn process_command(
        &self,
        input: Option<PathBuf>,
        document: Option<String>,
        conllu: Option<PathBuf>,
        fragments: Option<PathBuf>,
        output: Option<PathBuf>,
        config: PipelineConfig,
        verbose: bool,
    ) -> Result<()> {
        let document = document
            .or_else(|| document_name(input.as_deref()))
            .unwrap_or_else(|| "Document".to_string());
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let pipeline = Pipeline::with_parser(load_parser(conllu.as_deref())?)?.with_config(config);
        let keyed = pipeline.extract_document(&document, &content)?;

        if let Some(dir) = fragments {
            let count = FragmentStore::new(&dir).save_all(&keyed)?;
            if verbose {
                eprintln!("Stored {} fragments in {}", count, dir.display());
            }
        }

        let mut model = assemble(keyed.iter().map(|(_, fragment)| fragment));
        model.set_name(&document);

        if verbose {
            eprintln!(
                "Assembled {} classes and {} associations",
                model.class_count(),
                model.association_count()
            );
        }

        self.write_output(output, &serde_json::to_string_pretty(&model)?)
    }

    /// Handle the assemble command
    fn assemble_command(&self, fragments: &Path, output: Option<PathBuf>, verbose: bool) -> Result<()> {
        let models = load_models(fragments)?;

        if verbose {
            eprintln!("Assembled {} documents", models.len());
        }

        match output {
            Some(dir) => {
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
                for (document, model) in &models {
                    let path = dir.join(format!("{}.json", document));
                    fs::write(&path, serde_json::to_string_pretty(model)?).map_err(|e| {
                        anyhow!("Failed to write output file '{}': {}", path.display(), e)
                    })?;
                }
                Ok(())
            }
            None => self.write_output(None, &serde_json::to_string_pretty(&models)?),
        }
    }

    /// Handle the evaluate command
    fn evaluate_command(
        &self,
        fragments: &Path,
        truth: &Path,
        report_dir: Option<PathBuf>,
        colorize: bool,
        verbose: bool,
    ) -> Result<()> {
        let models = load_models(fragments)?;
        let report = evaluate(&models, &DirectorySource::new(truth));
        info!(
            passed = report.passed.len(),
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            "Evaluation complete"
        );

        for record in &report.passed {
            println!(
                "{} {} ({} classes)",
                verdict(true, colorize),
                record.model,
                record.class_count
            );
        }
        for record in &report.failed {
            println!(
                "{} {} ({} classes, expected {})",
                verdict(false, colorize),
                record.model,
                record.class_count,
                record.original_class_count
            );
            if let Some(comparison) = report.comparisons.get(&record.model) {
                for line in comparison.summary() {
                    let line = if colorize {
                        colorize_diff_line(&line)
                    } else {
                        line
                    };
                    println!("    {}", line);
                }
            }
        }
        for document in &report.skipped {
            println!("SKIP {} (no usable ground truth)", document);
        }

        println!();
        println!("Passed: {}/{}", report.passed.len(), report.evaluated());
        if let Some(accuracy) = report.accuracy() {
            println!("Accuracy: {:.1}%", accuracy * 100.0);
        }

        if let Some(dir) = report_dir {
            report.write_csv(&dir)?;
            if verbose {
                eprintln!("Wrote reports to {}", dir.display());
            }
        }
        Ok(())
    }

    /// Handle the compare command
    fn compare_command(&self, expected: &Path, actual: &Path, colorize: bool) -> Result<()> {
        let expected_model = load_model(expected)?;
        let actual_model = load_model(actual)?;
        let comparison = ModelComparison::between(&expected_model, &actual_model);

        if comparison.is_match() {
            println!("{} models are equal", verdict(true, colorize));
            return Ok(());
        }

        println!("{} models differ", verdict(false, colorize));
        for line in comparison.summary() {
            let line = if colorize {
                colorize_diff_line(&line)
            } else {
                line
            };
            println!("    {}", line);
        }
        Err(anyhow!(
            "{} and {} are not equal",
            expected.display(),
            actual.display()
        ))
    }

    /// Handle the patterns command
    fn patterns_command(&self, json: bool, verbose: bool) -> Result<()> {
        let registry = PatternRegistry::with_builtin_patterns()?;

        if verbose {
            eprintln!("Listing registered patterns");
        }

        if json {
            let patterns: Vec<_> = registry
                .patterns()
                .iter()
                .map(|pattern| {
                    serde_json::json!({
                        "name": pattern.name(),
                        "kind": pattern.kind().label(),
                        "priority": pattern.priority(),
                        "nodes": pattern.nodes().len(),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "patterns": patterns,
                "total": registry.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Registered patterns (in match order):");
            for pattern in registry.patterns() {
                println!(
                    "  {:<4} {:<24} {:<6} {} nodes",
                    pattern.priority(),
                    pattern.name(),
                    pattern.kind().label(),
                    pattern.nodes().len()
                );
            }
            println!();
            println!("Total: {} patterns", registry.len());
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                if content.is_empty() || content.ends_with('\n') {
                    print!("{}", content);
                } else {
                    println!("{}", content);
                }
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

/// Decide whether stdout gets colors
fn should_colorize(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stdout_supports_color(),
    }
}

fn load_parser(conllu: Option<&Path>) -> Result<Box<dyn DependencyParser>> {
    let parser: Box<dyn DependencyParser> = match conllu {
        Some(path) => Box::new(ConlluParser::from_path(path)?),
        None => Box::new(LexicalParser::new()),
    };
    Ok(parser)
}

fn document_name(input: Option<&Path>) -> Option<String> {
    let path = input.filter(|p| p.to_string_lossy() != "-")?;
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

fn load_models(fragments: &Path) -> Result<BTreeMap<String, Model>> {
    let groups = FragmentStore::new(fragments).load_grouped()?;
    debug!(documents = groups.len(), dir = %fragments.display(), "Loaded fragment groups");
    Ok(assemble_documents(&groups))
}

/// Load a model from `.mmd` notation or JSON
fn load_model(path: &Path) -> Result<Model> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read model file '{}': {}", path.display(), e))?;
    let name = document_name(Some(path)).unwrap_or_default();

    if path.extension().is_some_and(|ext| ext == "mmd") {
        Ok(model_from_notation(&name, &content)?)
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse model file {}", path.display()))
    }
}
