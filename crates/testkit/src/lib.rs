#![warn(missing_docs)]
//! Deterministic testing surfaces (descriptor snapshots + event log plumbing).

use anyhow::Result;
use flexspace_scene::SceneNode;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Primary event record captured by headless runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Frame index when the event occurred.
    pub frame: u64,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Free-form payload for smoke tests.
    pub payload: &'a str,
}

/// Flat, serializable view of one scene node for snapshot assertions.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DescriptorRecord {
    /// Child-index path from the root, dot-separated ("" for the root).
    pub path: String,
    /// Geometry width.
    pub width: f32,
    /// Geometry height.
    pub height: f32,
    /// Position x.
    pub x: f32,
    /// Position y.
    pub y: f32,
    /// Position z (elevation).
    pub z: f32,
    /// Resolved fill as 0xRRGGBB, if any.
    pub color: Option<u32>,
    /// Material opacity.
    pub opacity: f32,
}

/// Flatten a descriptor tree into records in preorder.
pub fn flatten_descriptors(root: &SceneNode) -> Vec<DescriptorRecord> {
    fn walk(node: &SceneNode, path: &mut Vec<usize>, out: &mut Vec<DescriptorRecord>) {
        out.push(DescriptorRecord {
            path: path
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join("."),
            width: node.geometry.width,
            height: node.geometry.height,
            x: node.position.x,
            y: node.position.y,
            z: node.position.z,
            color: node.material.color.map(|c| c.rgb_number()),
            opacity: node.material.opacity,
        });
        for (index, child) in node.children.iter().enumerate() {
            path.push(index);
            walk(child, path, out);
            path.pop();
        }
    }

    let mut out = Vec::new();
    walk(root, &mut Vec::new(), &mut out);
    out
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append a serializable record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
