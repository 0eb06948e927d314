use sitesearch_core::config::Preset;

/// Parse preset name from string
pub fn parse_preset(s: &str) -> std::result::Result<Preset, String> {
    s.parse::<Preset>().map_err(|e| e.to_string())
}
