//! XML declaration generator discovery and invocation.

use super::{DeclarationIndex, InspectError};
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Generators in order of preference
const GENERATORS: [&str; 2] = ["castxml", "gccxml"];

/// Supported generator flavours; they differ in command line syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    CastXml,
    GccXml,
}

impl GeneratorKind {
    fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if stem.contains("gccxml") {
            GeneratorKind::GccXml
        } else {
            GeneratorKind::CastXml
        }
    }
}

/// An external XML declaration generator
#[derive(Debug, Clone)]
pub struct XmlGenerator {
    path: PathBuf,
    kind: GeneratorKind,
}

impl XmlGenerator {
    /// Use the generator at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = GeneratorKind::from_path(&path);
        XmlGenerator { path, kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }

    /// Arguments that make the generator write XML for `source` to `output`
    fn arguments(&self, source: &Path, output: &Path) -> Vec<String> {
        let source = source.display().to_string();
        let output = output.display().to_string();
        match self.kind {
            GeneratorKind::CastXml => vec![
                "--castxml-output=1".to_string(),
                "-o".to_string(),
                output,
                source,
            ],
            GeneratorKind::GccXml => vec![source, format!("-fxml={}", output)],
        }
    }

    /// Run the generator over `source`, writing into `output_dir`, and load the result
    pub fn generate(&self, source: &Path, output_dir: &Path) -> Result<DeclarationIndex, InspectError> {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "candidate".to_string());
        let output = output_dir.join(format!("{}.xml", stem));
        let args = self.arguments(source, &output);

        debug!(generator = %self.path.display(), ?args, "running XML generator");
        let result = Command::new(&self.path)
            .args(&args)
            .output()
            .map_err(|e| InspectError::Io {
                context: format!("running {}", self.path.display()),
                source: e,
            })?;

        if !result.status.success() {
            return Err(InspectError::GeneratorFailed {
                generator: self.path.display().to_string(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        if !output.is_file() {
            return Err(InspectError::Io {
                context: format!("reading {}", output.display()),
                source: io::Error::new(io::ErrorKind::NotFound, "generator wrote no output"),
            });
        }
        let xml = fs::read_to_string(&output).map_err(|e| InspectError::Io {
            context: format!("reading {}", output.display()),
            source: e,
        })?;
        Ok(DeclarationIndex::from_xml(&xml))
    }
}

/// Search `PATH` for a supported generator
pub fn find_xml_generator() -> Result<XmlGenerator, InspectError> {
    let path_var = env::var_os("PATH").unwrap_or_default();
    find_in_path(&GENERATORS, &path_var)
        .map(XmlGenerator::at)
        .ok_or_else(|| InspectError::GeneratorNotFound {
            searched: GENERATORS.join(", "),
        })
}

/// First `names` entry found as a file in the directories of `path_var`.
///
/// Names are tried in order, so an earlier name wins over a later one even
/// if the later one appears earlier on the path.
fn find_in_path(names: &[&str], path_var: &OsStr) -> Option<PathBuf> {
    let dirs: Vec<PathBuf> = env::split_paths(path_var).collect();
    names.iter().find_map(|name| {
        let file = executable_name(name);
        dirs.iter().map(|dir| dir.join(&file)).find(|p| p.is_file())
    })
}

fn executable_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}
