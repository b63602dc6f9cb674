//! vfxbridge connects a time-driven effect renderer (a browser-style engine
//! that paints a scene for a scalar time in `[0, 1)`) to a frame-pull video
//! pipeline (a host that requests one image per integer timeline position).
//!
//! # Pipeline overview
//!
//! 1. **Initialize**: load the effect description, classify its named image
//!    slots (Source / Target / Extra) and build one [`ImageProducer`] per
//!    configured Extra slot
//! 2. **Render**: map the frame position into normalized time, refresh every
//!    auxiliary slot from its media source, paint the scene, copy the surface
//!    into the host's destination buffer
//! 3. **Close**: release producers and engine, drop the registry entry
//!
//! The render engine, the host's property storage and the auxiliary media
//! decoder are external collaborators consumed through the [`RenderEngine`],
//! [`PropertyStore`] and [`MediaSource`] contracts; this crate owns only the
//! sequencing between them and the pixel handoff.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded per bridge**: the host serializes calls per
//!   [`CompositingBridge`]; distinct bridges are fully independent.
//! - **No partial frames**: an auxiliary decode failure aborts the render
//!   call before anything is written to the destination buffer.
#![forbid(unsafe_code)]

mod bridge;
mod engine;
mod error;
mod image;
mod media;
mod media_still;
mod producer;
mod properties;
mod registry;
mod timeline;

pub use bridge::{CompositingBridge, EFFECT_FILE_PROPERTY, FACTORY_PROPERTY};
pub use engine::{EngineFactory, EngineHandle, ImageSlot, RenderEngine, SlotRole};
pub use error::{BridgeError, BridgeResult};
pub use image::ImageBuffer;
pub use media::{MediaFactory, MediaSource};
pub use media_still::{StillImageFactory, StillImageSource};
pub use producer::ImageProducer;
pub use properties::{MemoryProperties, ParameterSource, PropertyParameters, PropertyStore};
pub use registry::{BridgeId, EffectRegistry};
pub use timeline::{Profile, TimelineWindow};
