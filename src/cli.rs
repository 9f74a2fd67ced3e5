//! Minimal CLI: field tables → JSON Schema, or a single pattern rewrite.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;

use protoc_gen_jsonschema::Context;
use protoc_gen_jsonschema::fields::{FieldTable, translate_fields};
use protoc_gen_jsonschema::pattern::{matches_empty_string, to_ecmascript};
use protoc_gen_jsonschema::scalar::ScalarTranslator;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// translate protobuf field validation rules into JSON Schema
#[derive(Parser, Debug)]
#[command(name = "protoc-gen-jsonschema", version)]
pub struct CommandLineInterface {
    /// log every translation step to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// translate field tables and print the schema of every field
    Fields(FieldsOut),
    /// rewrite a Perl-style regex into its ECMAScript equivalent
    Pattern(PatternOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more field tables (JSON). May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct FieldsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// single-line JSON instead of pretty-printed
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(clap::Parser, Debug)]
struct PatternOut {
    /// source pattern
    pattern: String,

    /// also report whether the pattern matches the empty string
    #[arg(long, default_value_t = false)]
    probe_empty: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_tables(&self) -> Result<Vec<(String, FieldTable)>> {
        let source_paths =
            resolve_file_path_patterns(&self.input).context("failed to resolve input file paths")?;
        let mut tables = Vec::with_capacity(source_paths.len());
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read(&source_path)
                .with_context(|| format!("failed to read source file ({source_path_str})"))?;
            let table = FieldTable::from_json_slice(&source)
                .with_context(|| format!("failed to parse field table ({source_path_str})"))?;
            tables.push((source_path_str, table));
        }
        Ok(tables)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Fields(target) => {
                let translator = ScalarTranslator::new();
                let mut output = IndexMap::new();
                for (source, table) in target.input_settings.load_tables()? {
                    let fields = translate_fields(&translator, &table)
                        .with_context(|| format!("failed to translate field table ({source})"))?;
                    output.insert(source, fields);
                }
                let schema_src = if target.compact {
                    serde_json::to_string(&output)?
                } else {
                    serde_json::to_string_pretty(&output)?
                };
                write_output(target.out.as_deref(), &schema_src)
            }
            Command::Pattern(target) => {
                let ctx = Context::new("<pattern>");
                let rewritten = to_ecmascript(&ctx, &target.pattern)?;
                println!("{rewritten}");
                if target.probe_empty {
                    let matches = matches_empty_string(&ctx, &target.pattern)?;
                    println!("matches empty string: {matches}");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    let Some(out) = out else {
        println!("{src}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
