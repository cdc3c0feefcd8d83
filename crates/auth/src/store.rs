//! Token store reader.
//!
//! A store is read fresh on every validation call and never cached. Lines are
//! yielded lazily as raw bytes because the hash field is not guaranteed to be
//! UTF-8.

use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::{Path, PathBuf};

use crate::AuthError;

/// One raw line of the store, 1-based `number` for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLine {
    pub number: usize,
    pub bytes: Vec<u8>,
}

/// Lazy, forward-only sequence of store lines.
///
/// Restarting requires opening the store again.
pub struct TokenLines {
    path: PathBuf,
    inner: Split<BufReader<File>>,
    number: usize,
}

/// Open the token store at `path` for reading.
pub fn open_token_store(path: impl AsRef<Path>) -> Result<TokenLines, AuthError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AuthError::StoreUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(TokenLines {
        path: path.to_path_buf(),
        inner: BufReader::new(file).split(b'\n'),
        number: 0,
    })
}

impl TokenLines {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for TokenLines {
    type Item = Result<StoreLine, AuthError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut bytes = match self.inner.next()? {
                Ok(bytes) => bytes,
                Err(source) => {
                    return Some(Err(AuthError::StoreUnavailable {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };
            self.number += 1;

            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            if bytes.is_empty() {
                continue;
            }

            return Some(Ok(StoreLine {
                number: self.number,
                bytes,
            }));
        }
    }
}
