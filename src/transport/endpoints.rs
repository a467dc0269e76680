//! Round-robin selection among collector replicas.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use parking_lot::Mutex;

/// Fixed set of replica socket addresses derived from one base path.
///
/// With more than one replica, replica `i` listens on the base path with the
/// decimal index appended (`mona.sock0`, `mona.sock1`, ...).
#[derive(Debug)]
pub struct EndpointSet {
    base: PathBuf,
    replicas: usize,
    cursor: Mutex<usize>,
}

impl EndpointSet {
    /// Create a set rotating across `replicas` addresses, starting at index 0.
    pub fn new(base: impl Into<PathBuf>, replicas: usize) -> Self {
        Self {
            base: base.into(),
            replicas,
            cursor: Mutex::new(0),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Return the next address and advance the cursor.
    ///
    /// A single replica (or zero) always yields the base path and leaves the
    /// cursor untouched.
    pub fn select(&self) -> PathBuf {
        if self.replicas <= 1 {
            return self.base.clone();
        }
        let mut cursor = self.cursor.lock();
        let index = *cursor;
        *cursor = (index + 1) % self.replicas;
        drop(cursor);
        self.replica_address(index)
    }

    /// Every address in index order.
    pub fn addresses(&self) -> Vec<PathBuf> {
        if self.replicas <= 1 {
            return vec![self.base.clone()];
        }
        (0..self.replicas).map(|i| self.replica_address(i)).collect()
    }

    fn replica_address(&self, index: usize) -> PathBuf {
        let mut raw = OsString::from(self.base.as_os_str());
        raw.push(index.to_string());
        PathBuf::from(raw)
    }
}
