pub mod congestions;
pub mod error;
pub mod highways;
pub mod nominatim;
pub mod open_data_feed;
