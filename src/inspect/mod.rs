//! Candidate source inspection.
//!
//! Supplies the setup hook that prepares a grading session: it locates the
//! candidate source file and, when asked, runs an external XML declaration
//! generator (castxml or gccxml) over it. The resulting [`Inspection`] is
//! shared with test parts through a [`SharedInspection`] slot.

pub mod declarations;
pub mod generator;

pub use declarations::DeclarationIndex;
pub use generator::{find_xml_generator, XmlGenerator};

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while inspecting the candidate source
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Couldn't find '{name}'. Did you delete it from the starter code?")]
    MissingCandidate { name: String, path: PathBuf },

    #[error("no XML generator found on PATH (looked for {searched})")]
    GeneratorNotFound { searched: String },

    #[error("XML generator '{generator}' failed ({status}): {stderr}")]
    GeneratorFailed {
        generator: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("I/O error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result of a successful inspection
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Path of the located candidate source
    pub source: PathBuf,
    /// Generator output, when declaration extraction was requested
    pub declarations: Option<DeclarationIndex>,
}

/// Slot filled by the setup hook and read by test parts
pub type SharedInspection = Rc<RefCell<Option<Inspection>>>;

/// Locate the candidate source under `root`.
///
/// The candidate must exist as a regular file.
pub fn locate_candidate(root: &Path, name: &str) -> Result<PathBuf, InspectError> {
    let path = root.join(name);
    if path.is_file() {
        debug!(path = %path.display(), "located candidate");
        Ok(path)
    } else {
        Err(InspectError::MissingCandidate {
            name: name.to_string(),
            path,
        })
    }
}

/// Setup-time inspection of a candidate source file
#[derive(Debug, Clone)]
pub struct SourceInspector {
    root: PathBuf,
    candidate: String,
    extract_declarations: bool,
    generator: Option<PathBuf>,
}

impl SourceInspector {
    pub fn new(root: impl Into<PathBuf>, candidate: impl Into<String>) -> Self {
        SourceInspector {
            root: root.into(),
            candidate: candidate.into(),
            extract_declarations: false,
            generator: None,
        }
    }

    /// Also extract declarations. `generator` overrides the PATH search.
    pub fn with_declarations(mut self, generator: Option<PathBuf>) -> Self {
        self.extract_declarations = true;
        self.generator = generator;
        self
    }

    /// Locate the candidate and, if configured, extract its declarations
    pub fn inspect(&self) -> Result<Inspection, InspectError> {
        let source = locate_candidate(&self.root, &self.candidate)?;

        let declarations = if self.extract_declarations {
            let generator = match &self.generator {
                Some(path) => XmlGenerator::at(path),
                None => find_xml_generator()?,
            };
            // Fresh per call; removed once the XML has been read
            let scratch = tempfile::Builder::new()
                .prefix("autograder-")
                .tempdir()
                .map_err(|e| InspectError::Io {
                    context: "creating generator output directory".to_string(),
                    source: e,
                })?;
            let index = generator.generate(&source, scratch.path())?;
            info!(
                generator = %generator.path().display(),
                classes = ?index.class_names(),
                "extracted declarations"
            );
            Some(index)
        } else {
            None
        };

        Ok(Inspection {
            source,
            declarations,
        })
    }

    /// Turn this inspector into a setup hook that stores its result in `slot`
    pub fn into_setup(self, slot: SharedInspection) -> impl FnMut() -> Result<(), InspectError> {
        move || {
            let inspection = self.inspect()?;
            *slot.borrow_mut() = Some(inspection);
            Ok(())
        }
    }
}
