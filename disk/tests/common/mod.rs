#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_DIR: AtomicU32 = AtomicU32::new(0);

/// Scratch directory for file-backed tests, removed on drop.
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(label: &str) -> Self {
        let index = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!(
            "floppyforge-{label}-{}-{index}",
            std::process::id()
        ));
        fs::create_dir_all(&root).expect("failed to create scratch dir");
        Self { root }
    }

    /// Path of `name` inside the scratch dir (not created).
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Creates `name` inside the scratch dir with the given contents.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("failed to write fixture file");
        path
    }

    /// Reads `name` back from the scratch dir.
    pub fn read_file(&self, name: &str) -> Vec<u8> {
        fs::read(self.path(name)).expect("failed to read file")
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
