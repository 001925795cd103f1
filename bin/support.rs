//! Shared setup for `producer_demo` and `consumer_demo`: opens or creates the
//! file-backed mapping both demos bind a [`nlnk_ring::Region`] to.
//!
//! Included via `#[path = "support.rs"] mod support;` from each demo binary
//! rather than factored into the library, since memory-mapping a named file
//! is exactly the platform-specific mechanic the core deliberately leaves to
//! its caller.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use memmap2::{MmapMut, MmapOptions};

/// Default backing file, shared by both demos unless overridden by the first
/// command-line argument.
pub fn default_path() -> PathBuf {
    std::env::temp_dir().join("nlnk-ring-demo.bin")
}

/// Opens (creating if absent) a file-backed mapping at least `total_bytes`
/// long and maps it read-write.
pub fn open_mapping(path: &Path, total_bytes: usize) -> std::io::Result<MmapMut> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)?;

    if file.metadata()?.len() < total_bytes as u64 {
        file.set_len(total_bytes as u64)?;
    }

    // SAFETY: the file is exclusively ours for the lifetime of this mapping
    // as far as this demo is concerned; real deployments would coordinate
    // this through the OS's named shared-memory primitive instead of a file.
    unsafe { MmapOptions::new().map_mut(&file) }
}
