use std::{
    cmp::Ordering,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{GraphfoldError, GraphfoldResult},
    snapshot::model::{Snapshot, SnapshotFile},
};

/// The ordered list of slice files making up one run.
///
/// Order is temporal order: trajectories connect waypoints in exactly this sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceSet {
    paths: Vec<PathBuf>,
}

impl SliceSet {
    /// Every `*.json` file directly inside `dir`, in [`natural_cmp`] order of file names.
    pub fn from_dir(dir: &Path) -> GraphfoldResult<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("read slice directory '{}'", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("list slice directory '{}'", dir.display()))?;
            let path = entry.path();
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));

        if paths.is_empty() {
            return Err(GraphfoldError::validation(format!(
                "no .json slice files found in '{}'",
                dir.display()
            )));
        }
        Ok(Self { paths })
    }

    /// An explicit, caller-ordered list of slice files.
    pub fn from_paths(paths: Vec<PathBuf>) -> GraphfoldResult<Self> {
        if paths.is_empty() {
            return Err(GraphfoldError::validation("slice list must not be empty"));
        }
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default()
}

/// Compare names with runs of ASCII digits taken by numeric value, so `graph (2).json`
/// sorts before `graph (10).json`. Equal values with more leading zeros sort later.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
        s.split_at(s.iter().take_while(|c| c.is_ascii_digit()).count())
    }
    fn trim_zeros(d: &[u8]) -> &[u8] {
        &d[d.iter().take_while(|&&c| c == b'0').count()..]
    }

    let (mut a, mut b) = (a.as_bytes(), b.as_bytes());
    loop {
        match (a.first(), b.first()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (da, rest_a) = split_digits(a);
                let (db, rest_b) = split_digits(b);
                let (va, vb) = (trim_zeros(da), trim_zeros(db));
                let ord = va
                    .len()
                    .cmp(&vb.len())
                    .then_with(|| va.cmp(vb))
                    .then_with(|| da.len().cmp(&db.len()));
                if ord != Ordering::Equal {
                    return ord;
                }
                (a, b) = (rest_a, rest_b);
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(y);
                }
                (a, b) = (&a[1..], &b[1..]);
            }
        }
    }
}

/// Read and decode one slice file. The handle is closed before returning.
pub fn load_snapshot(path: &Path, index: usize) -> GraphfoldResult<Snapshot> {
    let file: SnapshotFile = {
        let f = File::open(path).with_context(|| format!("open slice '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            GraphfoldError::serde(format!("parse slice '{}': {e}", path.display()))
        })?
    };
    Ok(Snapshot::new(index, path, file.nodes, file.edges))
}

/// Load every slice of `set` in order.
#[tracing::instrument(skip(set), fields(slices = set.len()))]
pub fn load_all(set: &SliceSet) -> GraphfoldResult<Vec<Snapshot>> {
    let mut out = Vec::with_capacity(set.len());
    for (index, path) in set.paths().iter().enumerate() {
        let snapshot = load_snapshot(path, index)?;
        tracing::debug!(
            path = %path.display(),
            nodes = snapshot.nodes.len(),
            edges = snapshot.edges.len(),
            "loaded slice"
        );
        out.push(snapshot);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/load.rs"]
mod tests;
