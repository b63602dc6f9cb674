pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    /// Required host configuration is missing (fatal to initialize).
    #[error("config error: {0}")]
    Config(String),

    /// The render engine or its effect description could not be constructed.
    #[error("effect load error: {0}")]
    EffectLoad(String),

    /// A declared auxiliary slot names a resource the media factory cannot build.
    #[error("producer create error: {0}")]
    ProducerCreate(String),

    /// A per-frame auxiliary decode failure; fatal to that render call only.
    #[error("decode error: {0}")]
    Decode(String),

    /// A caller contract violation (bad dimensions, render before initialize).
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BridgeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn effect_load(msg: impl Into<String>) -> Self {
        Self::EffectLoad(msg.into())
    }

    pub fn producer_create(msg: impl Into<String>) -> Self {
        Self::ProducerCreate(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
