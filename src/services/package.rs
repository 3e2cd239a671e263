//! Language pack builder: downloads the .po/.mo exports of one locale and
//! zips them into the downloads directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use regex::Regex;
use sha2::{Digest, Sha256};
use tempfile::{NamedTempFile, TempDir};
use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::BuildError;
use crate::services::glotpress::{ExportFormat, Remote};

pub const ARCHIVE_EXT: &str = "zip";
pub const DOWNLOADS_PREFIX: &str = "/downloads/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPackage {
    /// Public reference, rooted at [`DOWNLOADS_PREFIX`].
    pub reference: String,
    pub path: PathBuf,
    pub sha256: String,
}

pub struct PackageBuilder {
    remote: Arc<dyn Remote>,
    root: String,
    downloads_dir: PathBuf,
    scratch_dir: PathBuf,
}

impl PackageBuilder {
    pub fn new(remote: Arc<dyn Remote>, root: &str, downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            remote,
            root: root.trim_matches('/').to_string(),
            downloads_dir: downloads_dir.into(),
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Where per-build working directories are created.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Builds the language pack of `locale` for the version project at
    /// `path` (`<root>/<extension>/<version>`).
    ///
    /// Either the archive is fully written and its reference returned, or
    /// nothing at the destination changes. The working directory is gone
    /// by the time this returns, whatever the outcome.
    pub fn build(&self, path: &str, locale: &str) -> Result<BuiltPackage, BuildError> {
        let (ext, version) = split_path(&self.root, path)?;
        check_segment("extension slug", ext, slug_re()?)?;
        check_segment("version slug", version, slug_re()?)?;
        check_segment("locale", locale, locale_re()?)?;

        let name = package_name(ext, version, locale);
        info!(package = %name, "building language pack");

        let work = tempfile::Builder::new()
            .prefix(&format!("{ext}-{version}-{locale}-"))
            .tempdir_in(&self.scratch_dir)
            .map_err(|e| BuildError::fs(&self.scratch_dir, e))?;

        let result = self.build_in(&work, path, ext, version, locale, &name);

        let work_path = work.path().to_path_buf();
        if let Err(e) = work.close() {
            warn!(dir = %work_path.display(), error = %e, "failed to remove working directory");
        }

        result
    }

    fn build_in(
        &self,
        work: &TempDir,
        path: &str,
        ext: &str,
        version: &str,
        locale: &str,
        name: &str,
    ) -> Result<BuiltPackage, BuildError> {
        let po = self.fetch_export(work.path(), path, ext, locale, ExportFormat::Po)?;
        let mo = self.fetch_export(work.path(), path, ext, locale, ExportFormat::Mo)?;

        let dest_dir = self.downloads_dir.join(ext).join(version);
        fs::create_dir_all(&dest_dir).map_err(|e| BuildError::fs(&dest_dir, e))?;

        let dest = dest_dir.join(name);
        write_archive(&[po, mo], &dest)?;

        let bytes = fs::read(&dest).map_err(|e| BuildError::fs(&dest, e))?;
        let sha256 = hex::encode(Sha256::digest(&bytes));
        info!(package = %name, %sha256, size = bytes.len(), "language pack built");

        Ok(BuiltPackage {
            reference: package_reference(ext, version, name),
            path: dest,
            sha256,
        })
    }

    fn fetch_export(
        &self,
        dir: &Path,
        path: &str,
        ext: &str,
        locale: &str,
        format: ExportFormat,
    ) -> Result<PathBuf, BuildError> {
        let body = self
            .remote
            .export(path, locale, format)
            .map_err(|source| BuildError::Download {
                format: format.ext(),
                source,
            })?;

        let file = dir.join(format!("{ext}-{locale}.{}", format.ext()));
        fs::write(&file, body).map_err(|e| BuildError::fs(&file, e))?;
        Ok(file)
    }
}

/// Splits `<root>/<extension>/<version>` into its two slugs.
pub fn split_path<'a>(root: &str, path: &'a str) -> Result<(&'a str, &'a str), BuildError> {
    let trimmed = path.trim_matches('/');
    let rel = trimmed
        .strip_prefix(root)
        .and_then(|r| r.strip_prefix('/'))
        .unwrap_or(trimmed);

    let parts: Vec<&str> = rel.split('/').collect();
    match parts.as_slice() {
        [ext, version] if !ext.is_empty() && !version.is_empty() => Ok((*ext, *version)),
        _ => Err(BuildError::MalformedPath {
            path: path.to_string(),
        }),
    }
}

pub fn package_name(ext: &str, version: &str, locale: &str) -> String {
    format!("{ext}-{version}-{locale}.{ARCHIVE_EXT}")
}

pub fn package_reference(ext: &str, version: &str, name: &str) -> String {
    format!("{DOWNLOADS_PREFIX}{ext}/{version}/{name}")
}

const SLUG_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9._-]*$";
const LOCALE_PATTERN: &str = r"^[A-Za-z]{2,3}(?:[_-][A-Za-z0-9]+)*$";

type Compiled = OnceLock<Result<Regex, regex::Error>>;

fn slug_re() -> Result<&'static Regex, BuildError> {
    static RE: Compiled = OnceLock::new();
    compiled(&RE, SLUG_PATTERN)
}

fn locale_re() -> Result<&'static Regex, BuildError> {
    static RE: Compiled = OnceLock::new();
    compiled(&RE, LOCALE_PATTERN)
}

fn compiled(cell: &'static Compiled, pattern: &str) -> Result<&'static Regex, BuildError> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| BuildError::Pattern(e.clone()))
}

fn check_segment(kind: &'static str, value: &str, re: &Regex) -> Result<(), BuildError> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(BuildError::InvalidSegment {
            kind,
            value: value.to_string(),
        })
    }
}

/// Zips `files` into `dest`: a root directory entry, then each file
/// deflated under its base name. The archive is written next to `dest` and
/// renamed into place, so a served file is never half-written.
fn write_archive(files: &[PathBuf], dest: &Path) -> Result<(), BuildError> {
    let dir = dest.parent().unwrap_or(Path::new("."));
    let tmp = NamedTempFile::new_in(dir).map_err(|e| BuildError::fs(dir, e))?;

    let archive_err = |source| BuildError::Archive {
        path: dest.to_path_buf(),
        source,
    };

    let mut zip = ZipWriter::new(tmp);
    zip.add_directory("/", SimpleFileOptions::default())
        .map_err(archive_err)?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for file in files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = fs::read(file).map_err(|e| BuildError::fs(file, e))?;

        zip.start_file(name, options).map_err(archive_err)?;
        zip.write_all(&data).map_err(|e| BuildError::fs(dest, e))?;
    }

    let tmp = zip.finish().map_err(archive_err)?;
    tmp.persist(dest).map_err(|e| BuildError::fs(dest, e.error))?;
    Ok(())
}
