use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::image::ImageBuffer;
use crate::properties::ParameterSource;

/// Role of a named image slot declared by an effect description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SlotRole {
    /// The incoming video frame the host pushes into the effect.
    Source,
    /// The outgoing frame slot, when the effect composites onto one.
    Target,
    /// A secondary image fed from a separate decoded media source.
    Extra,
}

/// A named image input/output the effect declares it needs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageSlot {
    pub name: String,
    pub role: SlotRole,
}

impl ImageSlot {
    pub fn new(name: impl Into<String>, role: SlotRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Opaque process-unique identity of a render engine instance, used to key
/// the [`EffectRegistry`](crate::registry::EffectRegistry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EngineHandle(u64);

impl EngineHandle {
    /// Mint a fresh handle. Engine implementations call this once at
    /// construction; handles are never reused within a process.
    pub fn allocate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The time-driven effect renderer, consumed as an external collaborator.
///
/// The engine paints a scene given a single scalar time input and owns the
/// buffers behind its named image slots. The rendered surface returned by
/// [`render`](Self::render) is valid until the next `render` call.
pub trait RenderEngine {
    fn handle(&self) -> EngineHandle;

    /// The image slots the loaded effect description declares.
    fn slot_map(&self) -> Vec<ImageSlot>;

    /// Fetch the named slot's buffer sized to `width` x `height`. The engine
    /// owns the buffer and may reallocate it to match the requested size.
    fn image(&mut self, name: &str, width: u32, height: u32)
    -> anyhow::Result<&mut ImageBuffer>;

    /// Paint the scene at normalized `time` and hand back the surface.
    fn render(&mut self, time: f64, width: u32, height: u32)
    -> anyhow::Result<&ImageBuffer>;
}

/// Constructs render engines bound to an effect description and a raster
/// size. Failures surface as
/// [`BridgeError::EffectLoad`](crate::error::BridgeError::EffectLoad) in the
/// bridge.
pub trait EngineFactory: Send + Sync {
    fn create(
        &self,
        description: &Path,
        width: u32,
        height: u32,
        parameters: Arc<dyn ParameterSource>,
    ) -> anyhow::Result<Box<dyn RenderEngine>>;
}
