///! Satellite position tracking
///!
///! Thin client for the public ISS position feed plus the coordinate
///! types shared by the rest of the crate.

mod api_client;
mod types;

pub use api_client::{build_client, fetch_position};
pub use types::{Coordinate, PositionResponse, RawPosition};
