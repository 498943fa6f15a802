//! Subcommand handlers
//!
//! Handlers return a [`CliError`]; `main` prints it and exits with
//! [`CliError::exit_code`]. Artifacts go to stdout or to files, diagnostics to stderr.

use log::{info, warn};
use sheetcheat_babel::{
    publish_with, CompileError, FormatError, FormatRegistry, PublishArtifact, PublishSpec,
};
use sheetcheat_config::{Loader, SheetcheatConfig};
use sheetcheat_core::latex::{
    title_case_filename, ArtifactNames, Document, DocumentLoader, LoaderError, TransformError,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Generic failure, including compiler failures
pub const EXIT_FAILURE: i32 = 1;

/// The payload had nothing left to process
pub const EXIT_EMPTY_INPUT: i32 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] sheetcheat_config::ConfigError),

    #[error("{0}")]
    Load(#[from] LoaderError),

    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Load(LoaderError::TransformError(TransformError::EmptyInput))
            | CliError::Format(FormatError::Transform(TransformError::EmptyInput)) => {
                EXIT_EMPTY_INPUT
            }
            _ => EXIT_FAILURE,
        }
    }
}

/// Everything `sheetcheat build` is driven by
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    /// Payload file; `None` or `-` reads stdin
    pub input: Option<PathBuf>,
    pub topic: String,
    pub format: String,
    pub output: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_math: bool,
}

pub fn load_config(path: Option<&Path>, no_math: bool) -> Result<SheetcheatConfig, CliError> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if no_math {
        loader = loader
            .set_override("math.repair_differentials", false)?
            .set_override("math.isolate_display", false)?;
    }
    Ok(loader.build()?)
}

fn read_payload(input: Option<&Path>) -> Result<DocumentLoader, CliError> {
    let loader = match input {
        None => DocumentLoader::from_reader(io::stdin().lock())?,
        Some(path) if path.as_os_str() == "-" => DocumentLoader::from_reader(io::stdin().lock())?,
        Some(path) => DocumentLoader::from_path(path)?,
    };
    Ok(loader)
}

/// File name of the artifact for `format`
fn artifact_file_name(names: &ArtifactNames, format: &str) -> String {
    match format {
        "latex" => names.source.clone(),
        "pdf" => names.pdf.clone(),
        "markdown" => names.with_extension("md"),
        other => names.with_extension(other),
    }
}

pub fn build(args: &BuildArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref(), args.no_math)?;
    let registry = FormatRegistry::with_compiler(config.compiler_options());
    registry.get(&args.format)?;

    let doc = read_payload(args.input.as_deref())?
        .normalize_with(&args.topic, &config.pipeline_options())?;
    let names = config.artifact_names(&args.topic);
    info!(
        "event=build format={} slug={} bytes={}",
        args.format,
        names.slug,
        doc.as_str().len()
    );

    let destination = match (&args.output, &args.out_dir) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(dir)) => Some(dir.join(artifact_file_name(&names, &args.format))),
        // Binary output cannot go to stdout
        (None, None) if args.format == "pdf" => Some(PathBuf::from(&names.pdf)),
        (None, None) => None,
    };

    let mut spec = PublishSpec::new(&doc, &args.format);
    if let Some(path) = &destination {
        spec = spec.with_output_path(path);
    }
    if args.format == "pdf" {
        spec = spec.with_option("stem", names.source.trim_end_matches(".tex"));
    }

    match publish_with(&registry, spec) {
        Ok(result) => {
            report(result.artifact);
            Ok(())
        }
        Err(FormatError::Compile(CompileError::Unavailable { tried })) => {
            let pdf_path = destination.unwrap_or_else(|| PathBuf::from(&names.pdf));
            degrade_to_source(&registry, &doc, &pdf_path, &tried)
        }
        Err(FormatError::Compile(err @ CompileError::Failed { .. })) => {
            if let CompileError::Failed { log, .. } = &err {
                eprintln!("{log}");
            }
            Err(FormatError::Compile(err).into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Without an engine the LaTeX source is the best artifact there is
fn degrade_to_source(
    registry: &FormatRegistry,
    doc: &Document,
    pdf_path: &Path,
    tried: &[String],
) -> Result<(), CliError> {
    let source_path = pdf_path.with_extension("tex");
    warn!(
        "event=pdf_degraded tried={} source={}",
        tried.join(","),
        source_path.display()
    );
    eprintln!(
        "warning: no LaTeX engine available (tried: {}); writing the LaTeX source instead",
        tried.join(", ")
    );
    let result = publish_with(
        registry,
        PublishSpec::new(doc, "latex").with_output_path(&source_path),
    )?;
    report(result.artifact);
    Ok(())
}

fn report(artifact: PublishArtifact) {
    match artifact {
        PublishArtifact::InMemory(text) => print!("{text}"),
        PublishArtifact::File(path) => println!("{}", path.display()),
    }
}

/// `sheetcheat slug`
pub fn slug(topic: &str, json: bool, config: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config, false)?;
    let names = config.artifact_names(topic);
    if json {
        let value = serde_json::json!({
            "slug": names.slug.as_str(),
            "tex": names.source.as_str(),
            "pdf": names.pdf.as_str(),
            "markdown": names.with_extension("md"),
        });
        let text = serde_json::to_string_pretty(&value)
            .map_err(|err| CliError::Usage(format!("cannot encode JSON: {err}")))?;
        println!("{text}");
    } else {
        println!("slug: {}", names.slug);
        println!("tex: {}", names.source);
        println!("pdf: {}", names.pdf);
    }
    Ok(())
}

/// `sheetcheat formats`
pub fn formats() -> Result<(), CliError> {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let format = registry.get(&name)?;
        let extensions = format
            .file_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {name:<10} {} ({extensions})", format.description());
    }
    Ok(())
}

/// Directories `rename` never descends into
const SKIPPED_DIRS: &[&str] = &[
    ".git",
    ".github",
    ".hg",
    ".svn",
    ".venv",
    ".vscode",
    "__pycache__",
    "node_modules",
    "target",
];

/// What `sheetcheat rename` did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameSummary {
    pub files: usize,
    pub dirs: usize,
    /// Renames left out because the target name was taken
    pub skipped: usize,
}

/// `sheetcheat rename`
pub fn rename(dir: &Path) -> Result<(), CliError> {
    if !dir.is_dir() {
        return Err(CliError::Usage(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }
    let summary = rename_tree(dir)?;
    println!(
        "renamed {} files and {} directories, skipped {}",
        summary.files, summary.dirs, summary.skipped
    );
    Ok(())
}

/// Title-case every name under `root` that contains whitespace
///
/// Entries are renamed deepest first, so a directory is only moved once its content is done.
/// Hidden entries and tooling directories are left alone.
pub fn rename_tree(root: &Path) -> io::Result<RenameSummary> {
    let mut entries = Vec::new();
    collect_entries(root, 1, &mut entries)?;
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    let mut summary = RenameSummary::default();
    for (path, _, is_dir) in entries {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !name.contains(char::is_whitespace) {
            continue;
        }
        let new_name = title_case_filename(name);
        if new_name == name {
            continue;
        }
        let target = path.with_file_name(&new_name);
        if target.exists() {
            warn!("event=rename_skipped from={} to={}", path.display(), target.display());
            summary.skipped += 1;
            continue;
        }
        fs::rename(&path, &target)?;
        info!("event=rename from={} to={}", path.display(), target.display());
        if is_dir {
            summary.dirs += 1;
        } else {
            summary.files += 1;
        }
    }
    Ok(summary)
}

fn collect_entries(
    dir: &Path,
    depth: usize,
    out: &mut Vec<(PathBuf, usize, bool)>,
) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || SKIPPED_DIRS.iter().any(|skipped| *skipped == name) {
            continue;
        }
        let path = entry.path();
        // symlinks are renamed but never followed
        let is_dir = entry.file_type()?.is_dir();
        if is_dir {
            collect_entries(&path, depth + 1, out)?;
        }
        out.push((path, depth, is_dir));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_its_own_exit_code() {
        let err = CliError::from(LoaderError::TransformError(TransformError::EmptyInput));
        assert_eq!(err.exit_code(), EXIT_EMPTY_INPUT);
        assert!(err.to_string().contains("nothing to process"));
        assert_eq!(CliError::Usage("x".to_string()).exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn artifact_names_per_format() {
        let names = ArtifactNames::for_topic("cheat_sheat", "Vectores");
        assert_eq!(artifact_file_name(&names, "latex"), "cheat_sheat_vectores.tex");
        assert_eq!(artifact_file_name(&names, "markdown"), "cheat_sheat_vectores.md");
        assert_eq!(artifact_file_name(&names, "pdf"), "cheat_sheat_vectores.pdf");
    }

    #[test]
    fn no_math_disables_repairs() {
        let config = load_config(None, true).unwrap();
        assert!(!config.math.is_active());
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn rename_tree_title_cases_nested_names() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("sub folder/area bajo la curva.pdf"));
        touch(&root.join("sub folder/otra carpeta/resumen final.pdf"));
        touch(&root.join("ya_bien.pdf"));

        let summary = rename_tree(root).unwrap();

        assert!(root.join("Sub_Folder/Area_Bajo_La_Curva.pdf").is_file());
        assert!(root.join("Sub_Folder/Otra_Carpeta/Resumen_Final.pdf").is_file());
        assert!(root.join("ya_bien.pdf").is_file());
        assert!(!root.join("sub folder").exists());
        assert_eq!(
            summary,
            RenameSummary {
                files: 2,
                dirs: 2,
                skipped: 0
            }
        );
    }

    #[test]
    fn rename_tree_leaves_hidden_and_tooling_entries() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join(".git/mi archivo"));
        touch(&root.join("node_modules/algo raro/x y.js"));
        touch(&root.join(".hidden file"));

        let summary = rename_tree(root).unwrap();

        assert!(root.join(".git/mi archivo").is_file());
        assert!(root.join("node_modules/algo raro/x y.js").is_file());
        assert!(root.join(".hidden file").is_file());
        assert_eq!(summary, RenameSummary::default());
    }

    #[test]
    fn rename_tree_skips_taken_targets() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("resumen final.pdf"), "nuevo").unwrap();
        fs::write(root.join("Resumen_Final.pdf"), "viejo").unwrap();

        let summary = rename_tree(root).unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(fs::read_to_string(root.join("Resumen_Final.pdf")).unwrap(), "viejo");
        assert!(root.join("resumen final.pdf").is_file());
    }

    #[test]
    fn rename_requires_a_directory() {
        let err = rename(Path::new("/nonexistent/sheetcheat")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }
}
