//! Builder para `Provenance`.
//!
//! ```ignore
//! let prov = Provenance::builder()
//!     .id_scheme(IdScheme::Reference)
//!     .size_estimator(|v: &serde_json::Value| v.to_string().len())
//!     .build();
//! ```

use crate::config::{IdScheme, TraceConfig};
use crate::engine::Provenance;
use crate::size::{JsonSizeEstimator, SizeEstimator};

#[derive(Default)]
pub struct ProvenanceBuilder {
    config: TraceConfig,
    estimator: Option<Box<dyn SizeEstimator>>,
}

impl ProvenanceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reemplaza la configuración completa.
    pub fn config(mut self, config: TraceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id_scheme(mut self, scheme: IdScheme) -> Self {
        self.config.id_scheme = scheme;
        self
    }

    pub fn capture_parameter_values(mut self, capture: bool) -> Self {
        self.config.capture_parameter_values = capture;
        self
    }

    pub fn size_estimator<S: SizeEstimator + 'static>(mut self, estimator: S) -> Self {
        self.estimator = Some(Box::new(estimator));
        self
    }

    pub fn build(self) -> Provenance {
        let estimator = self.estimator.unwrap_or_else(|| Box::new(JsonSizeEstimator));
        Provenance::from_parts(self.config, estimator)
    }
}
