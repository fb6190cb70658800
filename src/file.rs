//! File adapters: read a whole file and decode it, or encode a value and write
//! it out, through any provider.
//!
//! The capability traits expose these as `from_json_file`, `write_plist_file`
//! and friends; this module only composes `std::fs` with a provider.

use crate::error::FileError;
use crate::provider::{Decoder, Encoder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read `path` and decode it with `decoder`.
///
/// A missing file is reported as [`FileError::NotFound`]; a file that exists
/// but does not decode is [`FileError::Decode`].
pub fn read_with<T, D>(path: &Path, decoder: &D) -> Result<T, FileError>
where
    T: DeserializeOwned,
    D: Decoder,
{
    let bytes = read_all(path)?;
    debug!(
        path = %path.display(),
        format = %decoder.format(),
        len = bytes.len(),
        "decoding file"
    );
    decoder.decode(&bytes).map_err(|source| FileError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode `value` with `encoder` and write it to `path`, replacing any
/// existing file.
///
/// Nothing is written when encoding fails.
pub fn write_with<T, E>(path: &Path, value: &T, encoder: &E) -> Result<(), FileError>
where
    T: Serialize + ?Sized,
    E: Encoder,
{
    let bytes = encoder.encode(value).map_err(|source| FileError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        format = %encoder.format(),
        len = bytes.len(),
        "writing file"
    );
    write_all(path, &bytes)
}

pub fn read_all(path: &Path) -> Result<Vec<u8>, FileError> {
    fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            FileError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FileError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

pub fn write_all(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    fs::write(path, bytes).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::json::{JsonDecoder, JsonEncoder};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.json");
        let err = read_with::<BTreeMap<String, i64>, _>(&path, &JsonDecoder::new()).unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn empty_file_is_a_decode_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.json");
        fs::write(&path, b"").unwrap();
        let err = read_with::<BTreeMap<String, i64>, _>(&path, &JsonDecoder::new()).unwrap_err();
        assert!(matches!(
            err,
            FileError::Decode {
                source: DecodeError::Json(_),
                ..
            }
        ));
    }

    #[test]
    fn directory_is_an_io_failure() {
        let temp = TempDir::new().unwrap();
        let err = write_all(temp.path(), b"{}").unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
    }

    #[test]
    fn failed_encode_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), 3u8);
        let err = write_with(&path, &map, &JsonEncoder::new()).unwrap_err();
        assert!(matches!(err, FileError::Encode { .. }));
        assert!(!path.exists());
    }
}
