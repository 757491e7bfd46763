//! Core procedural noise animation library.
//!
//! A deterministic coherent-noise field drives three independent
//! consumers every frame: a radially deformed blob mesh, a drifting
//! particle cloud, and a flowing tile-noise raster. A frame scheduler
//! owns the clock and the start/stop/resize lifecycle; the host only
//! delivers frame callbacks and renders the mutated buffers.
//!
//! Main components:
//! - [`field`] — seeded 3-D coherent noise field.
//! - [`mesh`] — base geometry and the noise-displaced live vertex buffer.
//! - [`particles`] — fixed-count particle cloud with bounded drift.
//! - [`tiles`] — tile-noise raster painter over a gradient background.
//! - [`scene`] — all consumers assembled behind one tick.
//! - [`scheduler`] — animation clock, frame pacing, and lifecycle.
//! - [`config`] — construction-time configuration and validation.
//! - [`types`] — shared small value types.

pub mod config;
pub mod field;
pub mod mesh;
pub mod particles;
pub mod scene;
pub mod scheduler;
pub mod tiles;
pub mod types;
