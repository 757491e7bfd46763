//! Application entry point for the noise drift viewer.
//!
//! This binary sets up eframe/egui and delegates all interactive
//! logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Logging goes to stderr via `tracing-subscriber`; the core emits
/// lifecycle events (start/stop/resize/release) at debug level.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop,
///   or if the default configuration fails validation.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Noise Drift",
        options,
        Box::new(|_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new()?))
        }),
    )
}
