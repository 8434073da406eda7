//! Streaming SHA-256 of files on disk.

use crate::constants::HASH_BLOCK_SIZE;
use crate::errors::{io_error_with_path, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Computes the lowercase hex SHA-256 digest of the file at `path`.
///
/// The file is read in blocks of `HASH_BLOCK_SIZE` bytes, so memory use does
/// not depend on file size.
///
/// # Returns
/// `Ok(None)` if the file does not exist, `Ok(Some(hex))` otherwise.
///
/// # Errors
/// Returns `Error::Io` if the file exists but cannot be opened or read.
///
/// # Examples
/// ```
/// use repohash::hashing::hash_file;
/// use std::path::Path;
///
/// assert_eq!(hash_file(Path::new("definitely/not/here")).unwrap(), None);
/// ```
pub fn hash_file(path: &Path) -> Result<Option<String>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error_with_path(e, path)),
    };

    let mut hasher = Sha256::new();
    let mut block = [0u8; HASH_BLOCK_SIZE];
    loop {
        let read = match file.read(&mut block) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(io_error_with_path(e, path)),
        };
        hasher.update(&block[..read]);
    }

    Ok(Some(hex::encode(hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const SOME_TEXT_SHA256: &str =
        "b94f6f125c79e3a5ffaa826f584c10d52ada669e6762051b826b55776d05aed2";

    #[test]
    fn test_hash_known_digests() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let empty = temp.path().join("__empty");
        let one = temp.path().join("__one");
        fs::write(&empty, "")?;
        fs::write(&one, "some text")?;

        assert_eq!(hash_file(&empty)?.as_deref(), Some(EMPTY_SHA256));
        assert_eq!(hash_file(&one)?.as_deref(), Some(SOME_TEXT_SHA256));
        Ok(())
    }

    #[test]
    fn test_hash_missing_file_is_absent() -> anyhow::Result<()> {
        let temp = tempdir()?;
        assert_eq!(hash_file(&temp.path().join("-!..!.-&?"))?, None);
        Ok(())
    }

    #[test]
    fn test_hash_is_deterministic_across_block_boundaries() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("big.bin");
        let content: Vec<u8> = (0..(HASH_BLOCK_SIZE * 3 + 17))
            .map(|i| (i % 251) as u8)
            .collect();
        fs::write(&path, &content)?;

        let first = hash_file(&path)?;
        let second = hash_file(&path)?;
        assert_eq!(first, second);
        assert_eq!(first, Some(hex::encode(Sha256::digest(&content))));
        Ok(())
    }
}
