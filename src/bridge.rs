use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::engine::{EngineFactory, RenderEngine, SlotRole};
use crate::error::{BridgeError, BridgeResult};
use crate::image::ImageBuffer;
use crate::media::MediaFactory;
use crate::producer::ImageProducer;
use crate::properties::{ParameterSource, PropertyParameters, PropertyStore};
use crate::registry::{BridgeId, EffectRegistry};
use crate::timeline::{Profile, TimelineWindow};

/// Host property naming the effect description file.
pub const EFFECT_FILE_PROPERTY: &str = "EffectFile";

/// Host property naming the producer kind handed to the media factory.
pub const FACTORY_PROPERTY: &str = "factory";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BridgeState {
    Uninitialized,
    Ready,
    Closed,
}

/// Orchestrates one effect: loads the effect description, classifies its
/// image slots, drives auxiliary producers and hands rendered surfaces to
/// the host's destination buffer.
///
/// Lifecycle is `Uninitialized -> Ready -> Closed`: the host calls
/// [`initialize`](Self::initialize) once (idempotent), then
/// [`render`](Self::render) once per output frame, then
/// [`close`](Self::close) (also run on drop). A bridge instance is
/// single-threaded; distinct instances are fully independent.
pub struct CompositingBridge {
    id: BridgeId,
    state: BridgeState,
    properties: Arc<dyn PropertyStore>,
    engine_factory: Arc<dyn EngineFactory>,
    media_factory: Arc<dyn MediaFactory>,
    registry: Arc<EffectRegistry>,
    engine: Option<Box<dyn RenderEngine>>,
    producers: Vec<ImageProducer>,
    source_name: Option<String>,
    target_name: Option<String>,
}

impl CompositingBridge {
    pub fn new(
        properties: Arc<dyn PropertyStore>,
        engine_factory: Arc<dyn EngineFactory>,
        media_factory: Arc<dyn MediaFactory>,
        registry: Arc<EffectRegistry>,
    ) -> Self {
        Self {
            id: BridgeId::allocate(),
            state: BridgeState::Uninitialized,
            properties,
            engine_factory,
            media_factory,
            registry,
            engine: None,
            producers: Vec::new(),
            source_name: None,
            target_name: None,
        }
    }

    pub fn id(&self) -> BridgeId {
        self.id
    }

    pub fn is_ready(&self) -> bool {
        self.state == BridgeState::Ready
    }

    /// Name of the Source slot, when the effect declares one. The host
    /// pushes the incoming video frame into it via
    /// [`copy_image_for_name`](Self::copy_image_for_name) before rendering.
    pub fn source_image_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Name of the Target slot, when the effect declares one.
    pub fn target_image_name(&self) -> Option<&str> {
        self.target_name.as_deref()
    }

    /// Load the effect description and build the render engine and
    /// auxiliary producers. Idempotent from Ready; a failure leaves the
    /// bridge Uninitialized and safely destructible.
    pub fn initialize(&mut self, width: u32, height: u32) -> BridgeResult<()> {
        match self.state {
            BridgeState::Ready => return Ok(()),
            BridgeState::Closed => {
                return Err(BridgeError::validation("initialize called after close"));
            }
            BridgeState::Uninitialized => {}
        }

        let effect_file = self.properties.get(EFFECT_FILE_PROPERTY).ok_or_else(|| {
            error!("no {EFFECT_FILE_PROPERTY} property found");
            BridgeError::config(format!("no {EFFECT_FILE_PROPERTY} property found"))
        })?;

        let parameters: Arc<dyn ParameterSource> =
            Arc::new(PropertyParameters::new(self.properties.clone()));
        let mut engine = self
            .engine_factory
            .create(Path::new(&effect_file), width, height, parameters)
            .map_err(|e| {
                error!("failed to create effect engine for '{effect_file}': {e:#}");
                BridgeError::effect_load(format!(
                    "failed to create effect engine for '{effect_file}': {e:#}"
                ))
            })?;

        let kind = self.properties.get(FACTORY_PROPERTY);
        let profile = Profile { width, height };
        let mut producers = Vec::new();
        let mut source_name = None;
        let mut target_name = None;

        for slot in engine.slot_map() {
            match slot.role {
                SlotRole::Source => source_name = Some(slot.name),
                SlotRole::Target => target_name = Some(slot.name),
                SlotRole::Extra => {
                    let prefix = format!("producer.{}.", slot.name);
                    let Some(resource) = self.properties.get(&format!("{prefix}resource"))
                    else {
                        warn!(
                            "no producer resource property specified for extra image '{}'",
                            slot.name
                        );
                        continue;
                    };
                    let mut source = self
                        .media_factory
                        .create(&profile, kind.as_deref(), &resource)
                        .map_err(|e| {
                            error!(
                                "failed to create extra image producer for '{}': {e:#}",
                                slot.name
                            );
                            BridgeError::producer_create(format!(
                                "failed to create extra image producer for '{}' \
                                 from '{resource}': {e:#}",
                                slot.name
                            ))
                        })?;
                    for (key, value) in self.properties.entries_with_prefix(&prefix) {
                        source.set_property(&key, &value);
                    }
                    producers.push(ImageProducer::new(slot.name, source));
                }
            }
        }

        self.registry.register(engine.handle(), self.id);
        debug!(
            producers = producers.len(),
            source = source_name.as_deref(),
            target = target_name.as_deref(),
            "effect initialized"
        );
        self.engine = Some(engine);
        self.producers = producers;
        self.source_name = source_name;
        self.target_name = target_name;
        self.state = BridgeState::Ready;
        Ok(())
    }

    /// Render the frame at `position` into `output`.
    ///
    /// Refreshes every auxiliary slot first, in declaration order; the first
    /// decode failure aborts the call with `output` untouched. The bridge
    /// stays Ready after a failed render, so the host may retry with
    /// another position.
    pub fn render(&mut self, output: &mut ImageBuffer, position: i64) -> BridgeResult<()> {
        let engine = self.engine.as_mut().ok_or_else(|| {
            BridgeError::validation("render called before initialize")
        })?;

        let window = TimelineWindow::from_properties(self.properties.as_ref())?;
        let time = window.normalized_time(position);

        for producer in &mut self.producers {
            let slot = engine
                .image(producer.name(), output.width(), output.height())
                .map_err(BridgeError::Other)?;
            if let Err(e) = producer.produce_image(position, slot) {
                error!("failed to produce image for name '{}': {e}", producer.name());
                return Err(e);
            }
        }

        let rendered = engine
            .render(time, output.width(), output.height())
            .map_err(BridgeError::Other)?;
        rendered.copy_pixels_to(output);
        Ok(())
    }

    /// Copy a host-supplied image into the named slot, sized to the image's
    /// own dimensions. No-op for an empty name.
    pub fn copy_image_for_name(&mut self, name: &str, from: &ImageBuffer) -> BridgeResult<()> {
        if name.is_empty() {
            return Ok(());
        }
        let engine = self.engine.as_mut().ok_or_else(|| {
            BridgeError::validation("copy_image_for_name called before initialize")
        })?;
        engine
            .image(name, from.width(), from.height())
            .map_err(BridgeError::Other)?
            .copy_pixels_from(from);
        Ok(())
    }

    /// Release producers (reverse creation order), then the engine, and
    /// unregister from the effect registry. Idempotent.
    pub fn close(&mut self) {
        let engine = self.engine.take();
        if let Some(engine) = &engine {
            self.registry.unregister(engine.handle());
        }
        while let Some(producer) = self.producers.pop() {
            drop(producer);
        }
        drop(engine);
        if self.state == BridgeState::Ready {
            debug!("effect closed");
        }
        self.state = BridgeState::Closed;
    }
}

impl Drop for CompositingBridge {
    fn drop(&mut self) {
        self.close();
    }
}
