use crate::error::{FileError, RunError};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File name suffixes recognised as test case documents (case-sensitive).
pub const TEST_CASE_SUFFIXES: [&str; 2] = [".xml", ".tc"];

/// A test case document found in the folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCaseFile {
    pub name: String,
    pub path: PathBuf,
}

impl TestCaseFile {
    /// Raw bytes exactly as stored on disk.
    pub fn read(&self) -> Result<Vec<u8>, FileError> {
        fs::read(&self.path).map_err(|source| FileError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

/// Whether a file name carries one of [`TEST_CASE_SUFFIXES`].
pub fn is_test_case_name(name: &str) -> bool {
    TEST_CASE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// List the test case files directly inside `folder`, in the order the
/// filesystem enumerates them. Sub-directories are not searched.
pub fn list(folder: &Path) -> Result<Vec<TestCaseFile>, RunError> {
    let discovery_err = |source| RunError::Discovery {
        path: folder.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(folder).map_err(discovery_err)? {
        let entry = entry.map_err(discovery_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_test_case_name(&name) {
            continue;
        }

        let path = entry.path();
        // fs::metadata follows symlinks. Entries it cannot stat are kept so
        // the failure surfaces when that file alone is read.
        match fs::metadata(&path) {
            Ok(meta) if !meta.is_file() => {
                debug!("skipping non-file entry {}", path.display());
                continue;
            }
            Ok(_) => {}
            Err(e) => warn!("cannot stat {}: {}", path.display(), e),
        }

        debug!("discovered test case {}", path.display());
        files.push(TestCaseFile { name, path });
    }
    Ok(files)
}
