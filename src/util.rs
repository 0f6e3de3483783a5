use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use cloudbridge_lib::StorageKind;

use crate::error::{self, Context};

/// backing stores that have their own endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreArg {
    Mongo,
    Dynamo,
}

impl From<StoreArg> for StorageKind {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Mongo => StorageKind::Mongo,
            StoreArg::Dynamo => StorageKind::Dynamo,
        }
    }
}

pub fn parse_mime(arg: &str) -> Result<mime::Mime, String> {
    arg.parse()
        .map_err(|e| format!("invalid mime type. {e}"))
}

pub fn cwd() -> error::Result<PathBuf> {
    std::env::current_dir()
        .context("failed to retrieve the current working directory")
}

/// joins relative paths onto the given base
pub fn normalize_from(base: &Path, given: PathBuf) -> PathBuf {
    if given.is_absolute() {
        given
    } else {
        base.join(given)
    }
}

pub fn path_basename(fs_path: &Path) -> error::Result<Option<String>> {
    let Some(file_name) = fs_path.file_name() else {
        return Ok(None)
    };

    let rtn = file_name.to_str()
        .context("the provided file contains invalid utf-8 characters in the name")?
        .to_owned();

    Ok(Some(rtn))
}

pub fn ext_mime(ext: &OsStr, fallback: Option<mime::Mime>) -> error::Result<mime::Mime> {
    let ext_str = ext.to_str()
        .context("the provided file extension contains invalid utf-8 characters in the name")?;

    let guess = mime_guess::MimeGuess::from_ext(ext_str);

    if let Some(fb) = fallback {
        Ok(guess.first().unwrap_or(fb))
    } else {
        Ok(guess.first_or_octet_stream())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extension_guessing() {
        assert_eq!(ext_mime(OsStr::new("pdf"), None).unwrap(), mime::APPLICATION_PDF);
        assert_eq!(ext_mime(OsStr::new("png"), None).unwrap(), mime::IMAGE_PNG);
        assert_eq!(
            ext_mime(OsStr::new("zzunknown"), None).unwrap(),
            mime::APPLICATION_OCTET_STREAM
        );
        assert_eq!(
            ext_mime(OsStr::new("zzunknown"), Some(mime::TEXT_PLAIN)).unwrap(),
            mime::TEXT_PLAIN
        );
    }

    #[test]
    fn relative_paths() {
        let base = Path::new("/srv/uploads");

        assert_eq!(
            normalize_from(base, PathBuf::from("a/report.pdf")),
            PathBuf::from("/srv/uploads/a/report.pdf")
        );
        assert_eq!(
            normalize_from(base, PathBuf::from("/tmp/report.pdf")),
            PathBuf::from("/tmp/report.pdf")
        );
        assert_eq!(
            path_basename(Path::new("/tmp/report.pdf")).unwrap().as_deref(),
            Some("report.pdf")
        );
    }
}
