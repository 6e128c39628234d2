#[derive(Debug, Clone)]
pub struct TxListAdapterConfig {
    pub gas_station_base_url: String,
    pub basic_estimates_path: String,
    pub prediction_table_path: String,
    pub gas_station_timeout_ms: u64,
    pub estimates_cache_ttl_ms: u64,
    pub default_locale: String,
    pub fallback_locale: String,
    pub wide_viewport_min_width: f32,
    pub explorer_base_url: String,
}

impl Default for TxListAdapterConfig {
    fn default() -> Self {
        Self {
            gas_station_base_url: "https://ethgasstation.info".to_owned(),
            basic_estimates_path: "/json/ethgasAPI.json".to_owned(),
            prediction_table_path: "/json/predictTable.json".to_owned(),
            gas_station_timeout_ms: 15_000,
            estimates_cache_ttl_ms: 75_000,
            default_locale: "en".to_owned(),
            fallback_locale: "en".to_owned(),
            wide_viewport_min_width: 575.0,
            explorer_base_url: "https://etherscan.io".to_owned(),
        }
    }
}

impl TxListAdapterConfig {
    pub fn basic_estimates_url(&self) -> String {
        format!("{}{}", self.gas_station_base_url, self.basic_estimates_path)
    }

    pub fn prediction_table_url(&self) -> String {
        format!("{}{}", self.gas_station_base_url, self.prediction_table_path)
    }

    pub fn is_wide_viewport(&self, width: f32) -> bool {
        width >= self.wide_viewport_min_width
    }
}
