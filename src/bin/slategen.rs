//! slategen CLI - Swift binding generation from Core Data schemas
//!
//! Reads a YAML schema and writes immutable Swift bindings (and optionally the
//! managed object classes) for every entity.

use clap::{Args, Parser, Subcommand};
use slategen::codegen::SymbolTable;
use slategen::{generate, load_schema, GeneratorConfig};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slategen")]
#[command(version, about = "Generate immutable Swift bindings for Core Data schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Swift bindings from a schema
    Generate(GenerateArgs),

    /// Validate a schema without writing any files
    Validate {
        /// Schema file, or a directory of entity files
        #[arg(short, long)]
        schema: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Schema file, or a directory of entity files
    #[arg(short, long)]
    schema: PathBuf,

    /// YAML file with generation options; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for binding files
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Binding type name pattern, `{}` is the entity name
    #[arg(long)]
    class_pattern: Option<String>,

    /// Managed object class pattern, `{}` is the entity's class
    #[arg(long)]
    backing_pattern: Option<String>,

    /// Output file name pattern; with `{}` each entity gets its own file
    #[arg(short, long)]
    file_pattern: Option<String>,

    /// Also write managed object classes to this directory
    #[arg(long)]
    entity_output: Option<PathBuf>,

    /// Extra module imported by every binding file
    #[arg(long)]
    import_module: Option<String>,

    /// Emit final classes instead of structs
    #[arg(long)]
    use_class: bool,

    /// Bind integer attributes as Int
    #[arg(long)]
    use_int: bool,

    /// Record this command line in each file header
    #[arg(long)]
    embed_command: bool,

    /// Fail on forced substruct members without a default
    #[arg(long)]
    deny_missing_defaults: bool,

    /// Fail on template placeholders left unbound
    #[arg(long)]
    strict_templates: bool,
}

impl GenerateArgs {
    /// Layer command-line flags over the config file (or the defaults)
    fn to_config(&self) -> Result<GeneratorConfig, String> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(pattern) = &self.class_pattern {
            config.class_pattern = pattern.clone();
        }
        if let Some(pattern) = &self.backing_pattern {
            config.backing_pattern = pattern.clone();
        }
        if let Some(pattern) = &self.file_pattern {
            config.file_pattern = pattern.clone();
        }
        if let Some(dir) = &self.entity_output {
            config.entity_output_dir = Some(dir.clone());
        }
        if let Some(module) = &self.import_module {
            config.import_module = Some(module.clone());
        }
        config.use_class |= self.use_class;
        config.use_int |= self.use_int;
        config.embed_command |= self.embed_command;
        config.deny_missing_defaults |= self.deny_missing_defaults;
        config.strict_templates |= self.strict_templates;
        config.command_line = Some(std::env::args().collect::<Vec<_>>().join(" "));

        config.validate()?;
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(args) => generate_bindings(args),
        Commands::Validate { schema } => validate_schema(schema),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Generate Swift bindings from a schema
fn generate_bindings(args: GenerateArgs) -> Result<(), String> {
    println!("🔧 Generating bindings from {}...", args.schema.display());

    let config = args.to_config()?;
    let entities = load_schema(&args.schema)
        .map_err(|e| format!("Failed to load schema: {}", e))?;
    println!("  ✓ Loaded {} entities", entities.len());

    let report = generate(&entities, &config).map_err(|e| e.to_string())?;
    for path in &report.files {
        println!("  ✓ Wrote {}", path.display());
    }
    for advisory in &report.advisories {
        println!("  ⚠ {}", advisory);
    }

    println!("✨ Generated {} files", report.files.len());
    Ok(())
}

/// Validate a schema, including relationship destinations
fn validate_schema(schema: PathBuf) -> Result<(), String> {
    println!("🔍 Validating {}...", schema.display());

    let entities = load_schema(&schema)
        .map_err(|e| format!("Failed to load schema: {}", e))?;
    println!("  ✓ Loaded {} entities", entities.len());

    let defaults = GeneratorConfig::default();
    SymbolTable::resolve(&entities, &defaults.class_pattern, &defaults.backing_pattern)
        .map_err(|e| e.to_string())?;
    println!("  ✓ All relationships resolve");

    println!("✨ Schema is valid");
    Ok(())
}
