use regis_types::Map;

use crate::error::FormatResult;
use crate::options::FormatOptions;

/// A named codec between a root map and its text form.
///
/// Implementations are stateless; all behavior switches come from
/// [`FormatOptions`]. Encoding must not mutate or retain the data.
pub trait Format: Send + Sync {
    /// Canonical lowercase name the codec is registered under.
    fn name(&self) -> &'static str;

    /// Additional lookup names (e.g. `yml` for YAML).
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// File extensions handled by this codec, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Render the map as text.
    fn encode(&self, data: &Map, options: &FormatOptions) -> FormatResult<String>;

    /// Parse text into a map.
    ///
    /// Returns `Err(FormatError::Malformed)` when the input is not valid for
    /// this format.
    fn decode(&self, text: &str, options: &FormatOptions) -> FormatResult<Map>;
}
