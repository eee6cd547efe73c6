//! Voting key tree files: discovery and fixed-offset decoding.
//!
//! A `private_key_tree<N>.dat` file embeds its root public key at a fixed
//! byte range and its validity epochs in the first ten bytes. The epoch
//! markers are rebuilt from specific byte offsets (high byte at offset 1
//! resp. 9, low byte at offset 0 resp. 8); that ordering is load-bearing.

use std::cmp::Reverse;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{KeyError, Result};

/// Directories searched for voting key files, in priority order.
pub const VOTING_DIRS: [&str; 2] = ["keys/voting", "node/keys/voting"];

const TREE_FILE_PREFIX: &str = "private_key_tree";
const TREE_FILE_SUFFIX: &str = ".dat";

/// Minimum file length needed to extract both epoch markers.
const EPOCH_REGION_LEN: usize = 10;

/// Byte window and paging configuration for [`read_tree_file`].
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// First byte of the embedded public key region, inclusive.
    pub start_offset: u64,
    /// Last byte of the embedded public key region, inclusive.
    pub end_offset: u64,
    /// 16-byte lines emitted between page-break checkpoints.
    pub lines_per_page: usize,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            start_offset: 0x20,
            end_offset: 0x3f,
            lines_per_page: 24,
        }
    }
}

/// Decoded report for one voting key tree file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotingKeySummary {
    pub file_name: String,
    pub public_key_hex: String,
    pub start_epoch: u16,
    pub end_epoch: u16,
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => KeyError::NotFound(path.to_path_buf()),
        _ => KeyError::Io(err),
    })
}

fn epochs_from(data: &[u8], path: &Path) -> Result<(u16, u16)> {
    if data.len() < EPOCH_REGION_LEN {
        return Err(KeyError::Truncated {
            path: path.to_path_buf(),
            region: "epoch markers",
        });
    }
    let start_epoch = (u16::from(data[1]) << 8) | u16::from(data[0]);
    let end_epoch = (u16::from(data[9]) << 8) | u16::from(data[8]);
    Ok((start_epoch, end_epoch))
}

/// Extract the start and end epoch markers from a voting key tree file.
pub fn read_epoch_range(path: &Path) -> Result<(u16, u16)> {
    let data = read_file(path)?;
    epochs_from(&data, path)
}

/// Decode one voting key tree file: hex of the configured public-key byte
/// range plus both epoch markers.
///
/// `page_break` is invoked after every `lines_per_page` 16-byte lines of
/// the key region, letting the caller insert a pause; it never runs for
/// the default 32-byte window.
pub fn read_tree_file(
    path: &Path,
    options: &DumpOptions,
    page_break: &mut dyn FnMut(),
) -> Result<VotingKeySummary> {
    if options.end_offset < options.start_offset {
        return Err(KeyError::InvalidRange {
            start: options.start_offset,
            end: options.end_offset,
        });
    }

    let data = read_file(path)?;
    let start = options.start_offset as usize;
    let end = options.end_offset as usize;
    if data.len() <= end {
        return Err(KeyError::Truncated {
            path: path.to_path_buf(),
            region: "public key",
        });
    }

    let mut public_key_hex = String::with_capacity((end - start + 1) * 2);
    let mut line_count = 0;
    for chunk in data[start..=end].chunks(16) {
        public_key_hex.push_str(&hex::encode_upper(chunk));
        line_count += 1;
        if options.lines_per_page > 0 && line_count % options.lines_per_page == 0 {
            page_break();
        }
    }

    let (start_epoch, end_epoch) = epochs_from(&data, path)?;

    Ok(VotingKeySummary {
        file_name: file_name_of(path),
        public_key_hex,
        start_epoch,
        end_epoch,
    })
}

/// Sequence number embedded in a tree file name; files with no parseable
/// number sort as sequence 0.
pub fn tree_sequence(file_name: &str) -> u64 {
    file_name
        .strip_prefix(TREE_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(TREE_FILE_SUFFIX))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

fn is_tree_file(file_name: &str) -> bool {
    file_name.len() >= TREE_FILE_PREFIX.len() + TREE_FILE_SUFFIX.len()
        && file_name.starts_with(TREE_FILE_PREFIX)
        && file_name.ends_with(TREE_FILE_SUFFIX)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Locate voting key tree files under the first existing search root,
/// sorted by embedded sequence number, highest first.
///
/// An empty result means no voting keys are installed; that is not an
/// error.
pub fn find_voting_key_files(search_roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let Some(dir) = search_roots.iter().find(|root| root.exists()) else {
        debug!("no voting key directory among {search_roots:?}");
        return Ok(Vec::new());
    };

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| is_tree_file(&file_name_of(path)))
        .collect();

    // read_dir order is platform-dependent; fix the tie order by name
    // before the stable sequence sort.
    files.sort();
    files.sort_by_key(|path| Reverse(tree_sequence(&file_name_of(path))));
    Ok(files)
}
