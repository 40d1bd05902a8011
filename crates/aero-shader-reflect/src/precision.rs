//! Name-keyed precision hints for textures and samplers.

use std::collections::BTreeMap;

use tracing::debug;

use crate::resource::Precision;

/// D3D9-era effect code names samplers `sampler<Texture>`; hints are usually keyed by the bare
/// texture name.
const SAMPLER_NAME_PREFIX: &str = "sampler";

/// Caller supplied precision hints keyed by texture/sampler name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplerPrecisionInfo {
    hints: BTreeMap<String, Precision>,
}

impl SamplerPrecisionInfo {
    pub fn insert(&mut self, name: impl Into<String>, precision: Precision) -> Option<Precision> {
        self.hints.insert(name.into(), precision)
    }

    pub fn with(mut self, name: impl Into<String>, precision: Precision) -> Self {
        self.insert(name, precision);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Finds the hint for a binding name.
    ///
    /// An exact match wins; otherwise a `sampler` prefix is stripped and the lookup retried.
    pub fn lookup(&self, name: &str) -> Option<Precision> {
        if let Some(&precision) = self.hints.get(name) {
            return Some(precision);
        }

        let stripped = name.strip_prefix(SAMPLER_NAME_PREFIX)?;
        let precision = self.hints.get(stripped).copied();
        if precision.is_some() {
            debug!(name, stripped, "matched precision hint after stripping sampler prefix");
        }
        precision
    }
}

impl<S: Into<String>> FromIterator<(S, Precision)> for SamplerPrecisionInfo {
    fn from_iter<I: IntoIterator<Item = (S, Precision)>>(iter: I) -> Self {
        Self {
            hints: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_beats_prefix_fallback() {
        let info: SamplerPrecisionInfo = [
            ("samplerAlbedo", Precision::Low),
            ("Albedo", Precision::High),
        ]
        .into_iter()
        .collect();
        assert_eq!(info.lookup("samplerAlbedo"), Some(Precision::Low));
        assert_eq!(info.lookup("Albedo"), Some(Precision::High));
    }

    #[test]
    fn prefix_is_case_sensitive() {
        let info = SamplerPrecisionInfo::default().with("Albedo", Precision::Medium);
        assert_eq!(info.lookup("samplerAlbedo"), Some(Precision::Medium));
        assert_eq!(info.lookup("SamplerAlbedo"), None);
        assert_eq!(info.lookup("smpAlbedo"), None);
    }

    #[test]
    fn bare_prefix_looks_up_the_empty_name() {
        let info = SamplerPrecisionInfo::default().with("", Precision::Low);
        assert_eq!(info.lookup("sampler"), Some(Precision::Low));
    }
}
