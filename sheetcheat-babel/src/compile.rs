//! External LaTeX compiler
//!
//! PDF output shells out to a TeX engine. The document is written to `<stem>.tex` inside a
//! fresh temporary directory, the first engine of [`CompilerOptions::engines`] found on the
//! `PATH` is run `passes` times over it, and the resulting `<stem>.pdf` is read back. The
//! directory is removed when compilation returns, whatever the outcome.
//!
//! The engine runs non-interactively and halts on the first error, so a broken document
//! fails fast with its log instead of waiting on stdin.

use log::{debug, info, warn};
use serde::Deserialize;
use sheetcheat_core::latex::Document;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;

/// Flags passed to every engine run
const ENGINE_FLAGS: &[&str] = &["-interaction=nonstopmode", "-halt-on-error", "-file-line-error"];

#[derive(Debug, Error)]
pub enum CompileError {
    /// None of the configured engines is installed
    #[error("no LaTeX engine available (tried: {})", .tried.join(", "))]
    Unavailable { tried: Vec<String> },

    /// The engine exited with a failure status
    #[error("{engine} failed on pass {pass}")]
    Failed {
        engine: String,
        pass: u32,
        /// The engine's `.log` file, or its console output when there is none
        log: String,
    },

    /// Every pass succeeded but no PDF was written
    #[error("{engine} finished without producing a PDF")]
    MissingOutput { engine: String },

    #[error("I/O error while compiling: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Engine preference order; names are resolved on the `PATH`
    pub engines: Vec<String>,
    /// Runs per compilation, two so cross references settle
    pub passes: u32,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            engines: vec![
                "pdflatex".to_string(),
                "xelatex".to_string(),
                "lualatex".to_string(),
            ],
            passes: 2,
        }
    }
}

impl CompilerOptions {
    /// Options restricted to a single engine
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engines = vec![engine.into()];
        self
    }

    pub fn with_passes(mut self, passes: u32) -> Self {
        self.passes = passes;
        self
    }
}

/// First configured engine found on the `PATH`, with its name
pub fn resolve_engine(options: &CompilerOptions) -> Result<(String, PathBuf), CompileError> {
    options
        .engines
        .iter()
        .find_map(|name| which::which(name).ok().map(|path| (name.clone(), path)))
        .ok_or_else(|| CompileError::Unavailable {
            tried: options.engines.clone(),
        })
}

/// Compile `doc` and return the PDF bytes
///
/// `stem` names the intermediate files, so engine logs refer to `<stem>.tex`.
pub fn compile(
    doc: &Document,
    stem: &str,
    options: &CompilerOptions,
) -> Result<Vec<u8>, CompileError> {
    let (engine, path) = resolve_engine(options)?;
    let workdir = tempfile::tempdir()?;
    let source = format!("{stem}.tex");
    fs::write(workdir.path().join(&source), doc.as_str())?;

    let passes = options.passes.max(1);
    info!("event=compile engine={engine} passes={passes} stem={stem}");
    for pass in 1..=passes {
        let output = Command::new(&path)
            .args(ENGINE_FLAGS)
            .arg(&source)
            .current_dir(workdir.path())
            .output()?;
        debug!(
            "event=compile_pass engine={engine} pass={pass} status={}",
            output.status
        );
        if !output.status.success() {
            warn!("event=compile_failed engine={engine} pass={pass}");
            return Err(CompileError::Failed {
                log: engine_log(workdir.path(), stem, &output),
                engine,
                pass,
            });
        }
    }

    match fs::read(workdir.path().join(format!("{stem}.pdf"))) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(CompileError::MissingOutput { engine })
        }
        Err(err) => Err(err.into()),
    }
}

fn engine_log(dir: &Path, stem: &str, output: &Output) -> String {
    if let Ok(log) = fs::read_to_string(dir.join(format!("{stem}.log"))) {
        return log;
    }
    let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
    log.push_str(&String::from_utf8_lossy(&output.stderr));
    log
}
