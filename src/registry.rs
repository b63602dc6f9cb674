use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::engine::EngineHandle;

/// Identity of a bridge instance, handed out by the registry so callback
/// contexts can name the owning bridge without holding a reference to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BridgeId(u64);

impl BridgeId {
    pub(crate) fn allocate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Reverse mapping from a render engine handle to its owning bridge.
///
/// The registry is an explicit object with bounded lifetime: whatever
/// component creates bridge instances owns one and shares it by `Arc`.
/// Map access is lock-protected, but the embedding must still never race
/// register/unregister/lookup for the same handle.
#[derive(Debug, Default)]
pub struct EffectRegistry {
    entries: Mutex<HashMap<EngineHandle, BridgeId>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, handle: EngineHandle, bridge: BridgeId) {
        self.entries
            .lock()
            .expect("effect registry lock poisoned")
            .insert(handle, bridge);
    }

    pub fn unregister(&self, handle: EngineHandle) {
        self.entries
            .lock()
            .expect("effect registry lock poisoned")
            .remove(&handle);
    }

    pub fn lookup(&self, handle: EngineHandle) -> Option<BridgeId> {
        self.entries
            .lock()
            .expect("effect registry lock poisoned")
            .get(&handle)
            .copied()
    }
}
