mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use diffy::PatchFormatter;
use fs_err as fs;
use std::collections::BTreeMap;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use typedrift_domain::{
    Comparator, TypeNameFilter, build_report, find_matching_type_pairs, parse_mode,
    parse_package_description,
};
use typedrift_extract::{ManifestExtractor, NameFilter, TypeExtractor};
use typedrift_render::{
    generate_conversion_report, render_comparison_md, render_pairs_md,
};
use typedrift_types::report::ToolInfo;
use typedrift_types::{PackageDescription, Struct};

#[derive(Debug, Parser)]
#[command(
    name = "typedrift",
    version,
    about = "Detect structural drift between parallel type hierarchies and generate conversions."
)]
struct Cli {
    /// Project root holding typedrift.toml (default: current directory).
    #[arg(long, global = true, default_value = ".")]
    root: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare the types of two or more packages.
    Compare(CompareArgs),
    /// List type names present in both packages.
    Pairs(PairsArgs),
    /// Generate conversion functions for every type present in both packages.
    Convert(ConvertArgs),
}

#[derive(Debug, Parser)]
struct CompareArgs {
    /// Comparison mode: identical or left-inclusive (default: config, then identical).
    #[arg(long)]
    mode: Option<String>,

    /// Package to compare, as NAME=PATH. Repeat for each package; order matters.
    #[arg(long = "package", value_name = "NAME=PATH", required = true)]
    packages: Vec<String>,

    #[command(flatten)]
    types: TypeArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also write report.json and report.md into this directory.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct PairsArgs {
    #[command(flatten)]
    sides: SideArgs,

    #[command(flatten)]
    types: TypeArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ConvertArgs {
    #[command(flatten)]
    sides: SideArgs,

    #[command(flatten)]
    types: TypeArgs,

    /// Write one convert_<a>_to_<b>.go per pair here instead of printing to stdout.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Write nothing; print a diff for files that would change and exit 2 if any would.
    #[arg(long, default_value_t = false)]
    check: bool,

    /// Output format (text, json). JSON lists each conversion with its dropped fields.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, clap::Args)]
struct SideArgs {
    /// Source package, as NAME=PATH.
    #[arg(long, value_name = "NAME=PATH")]
    left: String,

    /// Destination package, as NAME=PATH.
    #[arg(long, value_name = "NAME=PATH")]
    right: String,
}

#[derive(Debug, clap::Args)]
struct TypeArgs {
    /// Only consider type names matching this glob ('*', '?', '[...]').
    #[arg(long = "type", value_name = "GLOB")]
    include: Vec<String>,

    /// Skip type names matching this glob.
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Successful run result, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Clean,
    Drift,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match real_main(cli) {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::Drift) => ExitCode::from(2),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main(cli: Cli) -> anyhow::Result<Outcome> {
    let file_config = config::load_or_default(&cli.root).context("load typedrift.toml config")?;
    let merger = ConfigMerger::new(file_config);

    match cli.cmd {
        Command::Compare(args) => cmd_compare(&cli.root, &merger, args),
        Command::Pairs(args) => cmd_pairs(&cli.root, &merger, args),
        Command::Convert(args) => cmd_convert(&cli.root, &merger, args),
    }
}

fn cmd_compare(root: &Utf8Path, merger: &ConfigMerger, args: CompareArgs) -> anyhow::Result<Outcome> {
    let cli_mode = args
        .mode
        .as_deref()
        .map(parse_mode)
        .transpose()
        .context("parse --mode")?;
    let merged = merger.merge_compare_args(cli_mode, &args.types.include, &args.types.exclude)?;
    let packages = parse_packages(&args.packages)?;

    debug!(
        "merged config: mode={}, include={:?}, exclude={:?}",
        merged.mode, merged.include, merged.exclude
    );

    let extractor = extractor(root, merger)?;
    let filter =
        TypeNameFilter::new(merged.include, merged.exclude).context("parse type filter")?;
    let accepts = |name: &str| filter.matches(name);

    let mut comparator = Comparator::new(&extractor);
    if !filter.is_empty() {
        comparator = comparator.with_filter(&accepts);
    }

    let started_at = Utc::now();
    let comparison = comparator
        .compare(merged.mode, &packages)
        .context("compare packages")?;
    let report = build_report(merged.mode, &packages, &comparison, tool_info(), started_at);

    if let Some(out_dir) = &args.out_dir {
        fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir))?;
        write_json(&out_dir.join("report.json"), &report)?;
        fs::write(out_dir.join("report.md"), render_comparison_md(&report))
            .with_context(|| format!("write {}", out_dir.join("report.md")))?;
        info!("wrote report to {}", out_dir);
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_comparison_md(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if comparison.matched {
        Outcome::Clean
    } else {
        Outcome::Drift
    })
}

fn cmd_pairs(root: &Utf8Path, merger: &ConfigMerger, args: PairsArgs) -> anyhow::Result<Outcome> {
    let sides = Sides::load(root, merger, &args.sides, &args.types)?;
    let pairs = find_matching_type_pairs(&sides.left_types, &sides.right_types);
    let names: Vec<&str> = pairs.iter().map(|p| p.a.name.as_str()).collect();

    match args.format {
        OutputFormat::Text => print!("{}", render_pairs_md(&sides.left, &sides.right, &names)),
        OutputFormat::Json => {
            let out = serde_json::json!({
                "left": sides.left,
                "right": sides.right,
                "pairs": names,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(Outcome::Clean)
}

fn cmd_convert(root: &Utf8Path, merger: &ConfigMerger, args: ConvertArgs) -> anyhow::Result<Outcome> {
    let out_dir = merger.merge_convert_out_dir(args.out_dir);
    if args.check && out_dir.is_none() {
        anyhow::bail!("--check needs an output directory (--out-dir or [convert] out_dir)");
    }

    let sides = Sides::load(root, merger, &args.sides, &args.types)?;
    let pairs = find_matching_type_pairs(&sides.left_types, &sides.right_types);
    if pairs.is_empty() {
        info!(left = %sides.left.name, right = %sides.right.name, "no matching types to convert");
    }

    let mut outcome = Outcome::Clean;
    let mut conversions = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        let conversion = generate_conversion_report(pair.a, pair.b);
        for dropped in &conversion.dropped {
            warn!(
                function = %conversion.function_name,
                field = %dropped.name,
                a_type = %dropped.a_type,
                b_type = %dropped.b_type,
                "field dropped from conversion"
            );
        }

        if let Some(dir) = &out_dir {
            let path = dir.join(&conversion.file_name);
            if args.check {
                let existing = if path.exists() {
                    fs::read_to_string(&path).with_context(|| format!("read {}", path))?
                } else {
                    String::new()
                };
                if existing != conversion.source {
                    if matches!(args.format, OutputFormat::Text) {
                        print!("{}", unified_diff(&path, &existing, &conversion.source));
                    }
                    outcome = Outcome::Drift;
                }
            } else {
                fs::create_dir_all(dir).with_context(|| format!("create {}", dir))?;
                fs::write(&path, &conversion.source).with_context(|| format!("write {}", path))?;
                info!("wrote {}", path);
            }
        } else if matches!(args.format, OutputFormat::Text) {
            println!("{}", conversion.source);
        }

        conversions.push(conversion);
    }

    if matches!(args.format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&conversions)?);
    }

    Ok(outcome)
}

/// Both sides of a pairing command, extracted.
struct Sides {
    left: PackageDescription,
    right: PackageDescription,
    left_types: BTreeMap<String, Struct>,
    right_types: BTreeMap<String, Struct>,
}

impl Sides {
    fn load(
        root: &Utf8Path,
        merger: &ConfigMerger,
        sides: &SideArgs,
        types: &TypeArgs,
    ) -> anyhow::Result<Self> {
        let left = parse_package_description(&sides.left).context("parse --left")?;
        let right = parse_package_description(&sides.right).context("parse --right")?;

        let extractor = extractor(root, merger)?;
        let filter = TypeNameFilter::new(types.include.clone(), types.exclude.clone())
            .context("parse type filter")?;
        let accepts = |name: &str| filter.matches(name);
        let name_filter: Option<NameFilter<'_>> = if filter.is_empty() {
            None
        } else {
            Some(&accepts)
        };

        let left_types = extractor
            .extract_types(&left.path, &left.name, name_filter)
            .with_context(|| format!("extract types for {}", left.name))?;
        let right_types = extractor
            .extract_types(&right.path, &right.name, name_filter)
            .with_context(|| format!("extract types for {}", right.name))?;

        Ok(Self {
            left,
            right,
            left_types,
            right_types,
        })
    }
}

fn parse_packages(raw: &[String]) -> anyhow::Result<Vec<PackageDescription>> {
    raw.iter()
        .map(|s| parse_package_description(s).context("parse --package"))
        .collect()
}

fn extractor(root: &Utf8Path, merger: &ConfigMerger) -> anyhow::Result<ManifestExtractor> {
    let stdlib = merger
        .stdlib()
        .table(root)
        .context("build stdlib table")?;
    Ok(ManifestExtractor::new(stdlib))
}

fn unified_diff(path: &Utf8Path, old: &str, new: &str) -> String {
    let patch = diffy::create_patch(old, new);
    let mut out = format!("diff --git a/{0} b/{0}\n", path);
    out.push_str(&PatchFormatter::new().fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "typedrift".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
