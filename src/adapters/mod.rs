// Adapters layer: concrete implementations for external systems (backend http, geocoding, local storage).

pub mod geocode;
pub mod http;
pub mod storage;
