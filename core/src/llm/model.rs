//! Sampling parameters for a completion request.

/// Generation parameters forwarded to the provider.
///
/// Unset fields are omitted from the request so the provider default applies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Parameters {
    /// Sampling temperature. `0.0` asks for the most deterministic output.
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens.
    pub max_tokens: Option<u32>,
}

impl Parameters {
    /// Parameters with temperature pinned to zero.
    #[must_use]
    pub const fn deterministic() -> Self {
        Self {
            temperature: Some(0.0),
            max_tokens: None,
        }
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the generated token limit.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
