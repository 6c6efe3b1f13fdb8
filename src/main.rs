use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use layout_guard::cache::{ErrorCache, JsonCacheFile};
use layout_guard::case::transform;
use layout_guard::checker::composition::SyntaxFile;
use layout_guard::checker::{
    FileCompositionChecker, FolderStructureChecker, IndependentModulesChecker, StructureViolation,
};
use layout_guard::cli::{CaseArgs, Cli, Commands, CompositionArgs, ImportsArgs, StructureArgs};
use layout_guard::config::{
    ConfigLoader, FileCompositionConfig, FileConfigLoader, FolderStructureConfig,
    IndependentModulesConfig,
};
use layout_guard::diagnostic::{Diagnostic, DiagnosticSink};
use layout_guard::filesystem::{FileSystem, RealFileSystem};
use layout_guard::output::OutputFormat;
use layout_guard::path_utils::{relative_to, to_slash};
use layout_guard::scanner::{DirectoryScanner, FileScanner};
use layout_guard::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS_FOUND, LayoutGuardError};

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let result = match &cli.command {
        Commands::Structure(args) => run_structure(args, &cli),
        Commands::Imports(args) => run_imports(args, &cli),
        Commands::Composition(args) => run_composition(args, &cli),
        Commands::Case(args) => run_case(args, &cli),
    };

    let exit_code = match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Canonical form of an input path that must exist.
fn resolve_input(path: &Path) -> layout_guard::Result<PathBuf> {
    dunce::canonicalize(path).map_err(|source| LayoutGuardError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

fn display_path(file: &Path, project_root: &Path) -> String {
    if file.starts_with(project_root) {
        relative_to(file, project_root)
    } else {
        to_slash(file)
    }
}

fn emit(cli: &Cli, checked: usize, diagnostics: &[Diagnostic]) -> layout_guard::Result<i32> {
    let output = cli
        .format
        .formatter(cli.color.into())
        .format(checked, diagnostics)?;
    print!("{output}");
    Ok(if diagnostics.is_empty() {
        EXIT_SUCCESS
    } else {
        EXIT_VIOLATIONS_FOUND
    })
}

fn run_structure(args: &StructureArgs, cli: &Cli) -> layout_guard::Result<i32> {
    let config: FolderStructureConfig =
        FileConfigLoader::new().load_from_path(&resolve_input(&args.config)?)?;
    let checker = FolderStructureChecker::new(&config, RealFileSystem)?;

    let roots = if args.paths.is_empty() {
        vec![checker.structure_root().to_path_buf()]
    } else {
        args.paths
            .iter()
            .map(PathBuf::as_path)
            .map(resolve_input)
            .collect::<layout_guard::Result<Vec<_>>>()?
    };
    let scanner = DirectoryScanner::default();
    let mut files = Vec::new();
    for root in &roots {
        files.extend(scanner.scan(root)?);
    }
    files.retain(|file| checker.applies_to(file));
    files.sort();
    files.dedup();
    tracing::debug!(count = files.len(), "validating files");

    let outcomes = files
        .par_iter()
        .map(|file| checker.validate(file).map(|violation| (file.clone(), violation)))
        .collect::<layout_guard::Result<Vec<_>>>()?;

    let diagnostics = apply_cache(&checker, outcomes, !args.no_cache)?;
    emit(cli, files.len(), &diagnostics)
}

/// Sequential pass over parallel results: keeps the error cache current and
/// turns reportable violations into diagnostics.
fn apply_cache<F: FileSystem>(
    checker: &FolderStructureChecker<F>,
    outcomes: Vec<(PathBuf, Option<StructureViolation>)>,
    use_cache: bool,
) -> layout_guard::Result<Vec<Diagnostic>> {
    let fs = RealFileSystem;
    let cache = use_cache
        .then(|| ErrorCache::new(JsonCacheFile::in_project(&fs, checker.project_root()), &fs));

    let outcomes: Vec<(PathBuf, String, Option<String>)> = outcomes
        .into_iter()
        .map(|(file, violation)| {
            let filename = to_slash(&file);
            (file, filename, violation.map(|violation| violation.message()))
        })
        .collect();
    let current: HashMap<&str, Option<&str>> = outcomes
        .iter()
        .map(|(_, filename, message)| (filename.as_str(), message.as_deref()))
        .collect();

    let mut diagnostics = Vec::new();
    for (file, filename, message) in &outcomes {
        let Some(message) = message else {
            if let Some(cache) = &cache {
                cache.record_success(filename)?;
            }
            continue;
        };

        let report = match &cache {
            Some(cache) => cache.record_violation(filename, message, |recorded| {
                still_failing(checker, &current, recorded, message)
            })?,
            None => true,
        };
        if report {
            diagnostics.report(Diagnostic::error(
                display_path(file, checker.project_root()),
                message.clone(),
            ));
        }
    }
    Ok(diagnostics)
}

/// Whether `recorded` still produces `message`: its outcome in this run when
/// it was checked, a fresh validation otherwise.
fn still_failing<F: FileSystem>(
    checker: &FolderStructureChecker<F>,
    current: &HashMap<&str, Option<&str>>,
    recorded: &str,
    message: &str,
) -> layout_guard::Result<bool> {
    if let Some(outcome) = current.get(recorded) {
        return Ok(*outcome == Some(message));
    }
    let path = Path::new(recorded);
    if !checker.applies_to(path) {
        return Ok(false);
    }
    Ok(checker
        .validate(path)?
        .is_some_and(|violation| violation.message() == message))
}

fn run_imports(args: &ImportsArgs, cli: &Cli) -> layout_guard::Result<i32> {
    let config: IndependentModulesConfig =
        FileConfigLoader::new().load_from_path(&resolve_input(&args.config)?)?;
    let checker = IndependentModulesChecker::new(&config, RealFileSystem)?;
    let file = resolve_input(&args.file)?;
    let display = display_path(&file, checker.project_root());

    let mut diagnostics = Vec::new();
    for import in &args.imports {
        if let Some(violation) = checker.check(&file, import)? {
            diagnostics.report(violation.into_diagnostic(display.clone()));
        }
    }
    emit(cli, args.imports.len(), &diagnostics)
}

fn run_composition(args: &CompositionArgs, cli: &Cli) -> layout_guard::Result<i32> {
    let fs = RealFileSystem;
    let config: FileCompositionConfig =
        FileConfigLoader::new().load_from_path(&resolve_input(&args.config)?)?;
    let checker = FileCompositionChecker::new(&config, &fs)?;
    let file = resolve_input(&args.file)?;
    let syntax_path = resolve_input(&args.syntax)?;
    let syntax: SyntaxFile = serde_json::from_str(&read(&fs, &syntax_path)?)?;
    let display = display_path(&file, checker.project_root());

    let diagnostics: Vec<Diagnostic> = checker
        .check(&file, &syntax)?
        .into_iter()
        .map(|diagnostic| diagnostic.into_diagnostic(display.clone()))
        .collect();
    emit(cli, 1, &diagnostics)
}

fn read(fs: &RealFileSystem, path: &Path) -> layout_guard::Result<String> {
    fs.read_to_string(path)
        .map_err(|source| LayoutGuardError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
}

fn run_case(args: &CaseArgs, cli: &Cli) -> layout_guard::Result<i32> {
    let converted: Vec<String> = args
        .inputs
        .iter()
        .map(|input| transform(input, args.convention))
        .collect();
    match cli.format {
        OutputFormat::Text => {
            for name in &converted {
                println!("{name}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&converted)?),
    }
    Ok(EXIT_SUCCESS)
}
