//! jx3d
//!
//! Input layer of a small 3D application framework built on winit: tracked
//! keyboard and mouse state, move/drag classification, and ordered delivery
//! of every input signal to a primary window listener and subscriber nodes.

/// Windowing, configuration, logging, input routing and the module lifecycle
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Contracts implemented by rendering backends
pub mod graphics;

/// Self-checks for configuration, build metadata and the input router
pub mod health;
