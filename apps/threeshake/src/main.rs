use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use threeshake_core::{DEFAULT_GLOBAL_NAME, DEFAULT_MODULE_NAME, locate_library};
use threeshake_detect::{DetectOptions, ScanCache, ScanConfig, ScanResult, print_scan_summary};
use threeshake_entry::EntryOptions;

#[derive(Parser)]
#[command(name = "threeshake")]
#[command(about = "Builds a minimal three.js entry module from the names a project uses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the library names used by the given files
    Detect(DetectArgs),
    /// Generate an entry module re-exporting the given names
    Entry(EntryArgs),
    /// Scan a project and generate the entry module for what it uses
    Shake(ShakeArgs),
}

#[derive(Debug, Clone, Args)]
struct DetectArgs {
    /// Files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Look for global `THREE.X` accesses instead of module imports
    #[arg(long)]
    loose: bool,

    #[arg(long, default_value = DEFAULT_MODULE_NAME)]
    module_name: String,

    #[arg(long, default_value = DEFAULT_GLOBAL_NAME)]
    global_name: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Args)]
struct LibraryArgs {
    /// Directory to resolve the library from (defaults to the cwd)
    #[arg(long)]
    basedir: Option<PathBuf>,

    /// Library package directory, skipping resolution
    #[arg(long)]
    three_path: Option<PathBuf>,

    /// Re-export the legacy compatibility module
    #[arg(long)]
    legacy: bool,

    /// Drop the polyfill bootstrap import
    #[arg(long)]
    no_polyfills: bool,

    /// Write the entry module here instead of stdout
    #[arg(long, short)]
    out: Option<PathBuf>,
}

impl LibraryArgs {
    fn entry_options(&self) -> EntryOptions {
        EntryOptions {
            basedir: self.basedir.clone(),
            three_path: self.three_path.clone(),
            legacy: self.legacy,
            polyfills: !self.no_polyfills,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Args)]
struct EntryArgs {
    /// Comma-separated names to re-export
    #[arg(long, value_delimiter = ',')]
    deps: Vec<String>,

    /// JSON file holding an array of names to re-export
    #[arg(long)]
    deps_file: Option<PathBuf>,

    #[command(flatten)]
    library: LibraryArgs,
}

#[derive(Debug, Clone, Args)]
struct ShakeArgs {
    /// Project directory to scan
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Detect global `THREE.X` accesses in project files
    #[arg(long)]
    loose: bool,

    /// Also scan installed packages under node_modules
    #[arg(long)]
    deep: bool,

    /// Skip files under the library's examples/ tree
    #[arg(long)]
    no_examples: bool,

    /// Names to drop from the detected set
    #[arg(long = "ignore-dep", value_delimiter = ',')]
    ignore_dependencies: Vec<String>,

    /// Names to add to the detected set
    #[arg(long = "include-dep", value_delimiter = ',')]
    include_dependencies: Vec<String>,

    /// List every detected name on stderr
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    library: LibraryArgs,
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Detect(args) => {
            let num_threads = rayon::current_num_threads();
            info!("Detecting dependencies in {} files (using {} threads)", args.files.len(), num_threads);

            let cfg = ScanConfig {
                loose: args.loose,
                detect: DetectOptions {
                    module_name: args.module_name.clone(),
                    global_name: args.global_name.clone(),
                    ..Default::default()
                },
                ..Default::default()
            };
            let cache = ScanCache::new();
            let result = threeshake_detect::scan_files(&args.files, &cfg, &cache);

            if args.json {
                serde_json::to_writer_pretty(&mut stdout, &result)?;
                writeln!(stdout)?;
            } else {
                for dep in &result.dependencies {
                    writeln!(stdout, "{}", dep)?;
                }
            }
            stdout.flush()?;

            let mut stderr = std::io::stderr();
            print_scan_summary(&mut stderr, &result, false)?;
            print_finished(&mut stderr, &start, &result, num_threads)?;
            Ok(())
        }
        Commands::Entry(args) => {
            let mut deps = args.deps.clone();
            if let Some(path) = &args.deps_file {
                deps.extend(read_deps_file(path)?);
            }
            if deps.is_empty() {
                bail!("no names given; pass --deps or --deps-file");
            }

            let entry = threeshake_entry::generate_entry(&deps, &args.library.entry_options())?;
            write_entry(&mut stdout, &entry, args.library.out.as_deref())?;

            info!("Generated entry in {}ms", start.elapsed().as_millis());
            Ok(())
        }
        Commands::Shake(args) => {
            let num_threads = rayon::current_num_threads();
            let opts = args.library.entry_options();

            let library_root = match &opts.three_path {
                Some(path) => path.clone(),
                None => {
                    let basedir = opts.basedir.clone().unwrap_or_else(|| args.root.clone());
                    locate_library(&basedir, &opts.module_name)
                        .with_context(|| format!("resolving the library from {}", basedir.display()))?
                }
            };
            let library_root = library_root.canonicalize().unwrap_or(library_root);
            info!("Using library at {}", library_root.display());

            let cfg = ScanConfig {
                root: args.root.clone(),
                library_root: Some(library_root.clone()),
                loose: args.loose,
                deep: args.deep,
                examples: !args.no_examples,
                ignore_dependencies: args.ignore_dependencies.clone(),
                include_dependencies: args.include_dependencies.clone(),
                ..Default::default()
            };
            let result = threeshake_detect::scan_project(&cfg)?;

            let mut stderr = std::io::stderr();
            print_scan_summary(&mut stderr, &result, args.debug)?;

            let opts = EntryOptions { three_path: Some(library_root), ..opts };
            let entry = threeshake_entry::generate_entry(&result.dependencies, &opts)?;
            write_entry(&mut stdout, &entry, args.library.out.as_deref())?;

            print_finished(&mut stderr, &start, &result, num_threads)?;
            Ok(())
        }
    }
}

fn read_deps_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let deps: Vec<String> = serde_json::from_str(&text)
        .with_context(|| format!("{} must hold a JSON array of names", path.display()))?;
    debug!("Read {} names from {}", deps.len(), path.display());
    Ok(deps)
}

fn write_entry<W: Write>(stdout: &mut W, entry: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, format!("{}\n", entry))
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote entry module to {}", path.display());
        }
        None => {
            writeln!(stdout, "{}", entry)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn print_finished<W: Write>(
    writer: &mut W,
    start: &Instant,
    result: &ScanResult,
    num_threads: usize,
) -> Result<()> {
    writeln!(
        writer,
        "\n{} Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        start.elapsed().as_millis().to_string().cyan(),
        result.files_analyzed.to_string().cyan(),
        num_threads.to_string().cyan()
    )?;
    writer.flush()?;
    Ok(())
}
