//! Correspondence tables: target → nearest source vertex + offset.
//!
//! The table is built once per (source, target) pair and consumed by
//! replay while it is still in scope; it is never persisted. Offsets
//! are captured at f64 so repeated replays do not compound rounding
//! from the f32 storage coordinates.

use sartor_index::SpatialIndex;
use sartor_math::DVec3;
use sartor_mesh::MeshSnapshot;
use sartor_types::{SartorError, SartorResult};

/// One target vertex's mapping: nearest source vertex plus the
/// world-space offset separating them at build time.
#[derive(Debug, Clone, Copy)]
pub struct CorrespondenceEntry {
    /// Index of the nearest source vertex at build time.
    pub source_index: u32,
    /// `target_position − source_position` at build time. The replay
    /// carries this slack (ease, card width) unchanged onto the
    /// deformed source.
    pub offset: DVec3,
}

/// A built correspondence: one entry per target vertex, in target
/// vertex order.
///
/// Many target vertices may map to the same source vertex; every
/// target vertex has exactly one entry.
#[derive(Debug, Clone)]
pub struct CorrespondenceTable {
    entries: Vec<CorrespondenceEntry>,
    source_len: usize,
    /// Largest offset length seen at build time (meters).
    ///
    /// Replay assumes approximate local rigidity between build and
    /// replay; the larger the preserved offsets, the weaker that
    /// assumption. Exposed so callers can flag suspicious fits.
    pub max_offset_len: f64,
}

impl CorrespondenceTable {
    /// Number of target vertices mapped.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table maps no vertices. Never true for a
    /// successfully built table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for target vertex `i`.
    #[inline]
    pub fn entry(&self, i: usize) -> &CorrespondenceEntry {
        &self.entries[i]
    }

    /// All entries in target vertex order.
    pub fn entries(&self) -> &[CorrespondenceEntry] {
        &self.entries
    }

    /// Vertex count of the source snapshot the table was built against.
    /// Replay inputs must match this exactly.
    #[inline]
    pub fn source_len(&self) -> usize {
        self.source_len
    }
}

/// Builds the target → source mapping.
///
/// For each target vertex, the nearest source vertex is found through a
/// [`SpatialIndex`] and the separating offset recorded at f64.
/// Duplicate source points tie deterministically to the lower index.
/// Errors with a correspondence error if either point set is empty.
pub fn build_correspondence(
    source: &MeshSnapshot,
    target: &MeshSnapshot,
) -> SartorResult<CorrespondenceTable> {
    if target.is_empty() {
        return Err(SartorError::Correspondence(
            "Target point set is empty".into(),
        ));
    }
    target.validate()?;

    // SpatialIndex::build rejects an empty source.
    let index = SpatialIndex::build(source)?;

    let n = target.vertex_count();
    let mut entries = Vec::with_capacity(n);
    let mut max_offset_len: f64 = 0.0;

    for i in 0..n {
        let (source_index, _dist) = index.query(target.position_vec3(i));
        let offset = target.position_dvec3(i) - source.position_dvec3(source_index as usize);
        max_offset_len = max_offset_len.max(offset.length());
        entries.push(CorrespondenceEntry {
            source_index,
            offset,
        });
    }

    Ok(CorrespondenceTable {
        entries,
        source_len: source.vertex_count(),
        max_offset_len,
    })
}
