use std::collections::HashSet;

use anyhow::{bail, Context, Result};

use crate::types::{Emotion, EmotionId};

/// Name of the resting expression every catalog must contain.
pub const NEUTRAL: &str = "neutral";
/// Name of the closed-eye shape blinks animate towards.
pub const BLINK: &str = "blink";

/// Fewest vertices an eye outline may have and still be a polygon.
const MIN_VERTICES: usize = 3;

/// The immutable set of expressions the face can show.
///
/// Every shape in the catalog has the same vertex count, so any two entries
/// can be blended vertex by vertex. Entries are addressed by [`EmotionId`]
/// and are never copied by the engine or the directors.
#[derive(Debug, Clone)]
pub struct EmotionCatalog {
    entries: Vec<Emotion>,
    vertex_count: usize,
    neutral: EmotionId,
    blink: Option<EmotionId>,
}

impl EmotionCatalog {
    /// Validate `entries` and build a catalog.
    ///
    /// Fails if the list is empty, names repeat, an outline has fewer than
    /// three vertices, vertex counts disagree, or `"neutral"` is missing.
    /// A missing `"blink"` entry is allowed: blinks then become no-ops.
    pub fn new(entries: Vec<Emotion>) -> Result<Self> {
        let Some(first) = entries.first() else {
            bail!("emotion catalog is empty");
        };
        let vertex_count = first.left_shape.len();
        if vertex_count < MIN_VERTICES {
            bail!(
                "emotion \"{}\" has {vertex_count} vertices, need at least {MIN_VERTICES}",
                first.name
            );
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for emotion in &entries {
            if emotion.name.is_empty() {
                bail!("emotion catalog contains an entry with an empty name");
            }
            if !seen.insert(emotion.name.as_str()) {
                bail!("duplicate emotion \"{}\" in catalog", emotion.name);
            }
            for (side, shape) in [("left", &emotion.left_shape), ("right", &emotion.right_shape)] {
                if shape.len() != vertex_count {
                    bail!(
                        "emotion \"{}\" {side} shape has {} vertices, expected {vertex_count}",
                        emotion.name,
                        shape.len()
                    );
                }
            }
        }

        let position = |name: &str| entries.iter().position(|e| e.name == name).map(EmotionId);
        let neutral = position(NEUTRAL)
            .with_context(|| format!("emotion catalog has no \"{NEUTRAL}\" entry"))?;
        let blink = position(BLINK);
        if blink.is_none() {
            tracing::warn!("emotion catalog has no \"{BLINK}\" entry; blinks are disabled");
        }

        Ok(Self {
            entries,
            vertex_count,
            neutral,
            blink,
        })
    }

    /// The entry behind `id`.
    ///
    /// Ids are only minted by this catalog, so lookups cannot miss.
    pub fn get(&self, id: EmotionId) -> &Emotion {
        &self.entries[id.0]
    }

    /// Look an entry up by name.
    pub fn find(&self, name: &str) -> Option<EmotionId> {
        self.entries.iter().position(|e| e.name == name).map(EmotionId)
    }

    pub fn name(&self, id: EmotionId) -> &str {
        &self.get(id).name
    }

    pub fn neutral(&self) -> EmotionId {
        self.neutral
    }

    pub fn blink(&self) -> Option<EmotionId> {
        self.blink
    }

    /// Shared vertex count of every outline.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = EmotionId> + '_ {
        (0..self.entries.len()).map(EmotionId)
    }

    /// Every id except neutral, in catalog order.
    pub fn non_neutral(&self) -> impl Iterator<Item = EmotionId> + '_ {
        self.ids().filter(move |&id| id != self.neutral)
    }
}
