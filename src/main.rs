//! GEDCOM Transform - Main Entry Point
//!
//! Command-line surface over the `gedcom_transform` library: load a GEDCOM
//! file, optionally import and stage transformations, print the listing, and
//! export the edit-set plus the merged dataset.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use gedcom_transform::{GedcomWorkspace, Storage, formatting};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// GEDCOM Transform - stage non-destructive edits against a genealogy file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the GEDCOM file to load
    file: PathBuf,

    /// Transformation file (.gedTransform) to import before staging
    #[arg(long)]
    transforms: Option<PathBuf>,

    /// Stage a deletion for an individual id (repeatable)
    #[arg(long, value_name = "ID")]
    delete: Vec<String>,

    /// Stage a field edit (repeatable)
    #[arg(long, value_name = "ID:FIELD=VALUE")]
    set: Vec<String>,

    /// Case-insensitive keyword filter on id and name
    #[arg(long)]
    filter: Option<String>,

    /// Page of the listing to print (1-based)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long, default_value_t = 20)]
    page_size: usize,

    /// Write the export files after staging
    #[arg(long)]
    export: bool,

    /// Directory for exported files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

/// Split one `--set` argument of the form `id:field=value`
fn parse_set_spec(spec: &str) -> Result<(&str, &str, &str)> {
    let Some((id, edit)) = spec.split_once(':') else {
        bail!("Invalid --set '{}'. Use ID:FIELD=VALUE (e.g., '12:name=Jane Doe')", spec);
    };
    let Some((field, value)) = edit.split_once('=') else {
        bail!("Invalid --set '{}'. Use ID:FIELD=VALUE (e.g., '12:name=Jane Doe')", spec);
    };
    Ok((id, field, value))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let workspace = GedcomWorkspace::new();

    let bytes = Storage::read_source(&args.file)?;
    let summary = workspace
        .load_gedcom(bytes)
        .await
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    println!(
        "Loaded {} individual(s) and {} family(ies) from {}",
        summary.individuals,
        summary.families,
        args.file.display()
    );

    if let Some(path) = &args.transforms {
        let document = Storage::load_transforms(path)?;
        workspace.import_transformations(document);
    }

    for id in &args.delete {
        workspace.stage_delete(id)?;
    }
    for spec in &args.set {
        let (id, field, value) = parse_set_spec(spec)?;
        workspace.stage_field_edit(id, field, value)?;
    }

    let mut individuals = workspace.individuals();
    if let Some(keyword) = &args.filter {
        formatting::apply_keyword_filter(&mut individuals, keyword);
    }
    let total = individuals.len();
    let page = formatting::page_slice(&individuals, args.page, args.page_size);
    println!("\n{}", formatting::format_individuals(page, total));

    let entries = workspace.transformation_entries();
    println!("{}", formatting::format_transformations(&entries));

    if args.export {
        let bundle = workspace.export();
        let (transform_path, data_path) = Storage::new(&args.out_dir).save_exports(&bundle)?;
        println!(
            "Exported {} and {}",
            transform_path.display(),
            data_path.display()
        );
    }

    Ok(())
}
