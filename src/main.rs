// ToolFusion - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Configuration loading and validation
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use toolfusion::app;

pub use toolfusion::core;
pub use toolfusion::platform;
pub use toolfusion::ui;
pub use toolfusion::util;

use clap::Parser;
use std::path::PathBuf;

/// Compile-time-embedded icon PNG bytes (512x512 RGBA).
///
/// Using `include_bytes!` ensures the asset is baked into the binary so the
/// icon is always available regardless of the working directory at runtime.
static ICON_PNG: &[u8] = include_bytes!("../assets/icon.png");

/// Decode the embedded PNG and return an `eframe`-compatible `IconData`.
///
/// Falls back to a transparent 1x1 placeholder if decoding fails so the
/// application always launches rather than panicking on a missing asset.
fn load_icon() -> egui::IconData {
    use image::ImageDecoder;

    match image::codecs::png::PngDecoder::new(std::io::Cursor::new(ICON_PNG)) {
        Ok(decoder) => {
            let (w, h) = decoder.dimensions();
            // Convert to RGBA8 regardless of the source colour space.
            match image::DynamicImage::from_decoder(decoder) {
                Ok(img) => {
                    let rgba = img.into_rgba8();
                    egui::IconData {
                        rgba: rgba.into_raw(),
                        width: w,
                        height: h,
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to decode icon PNG; using placeholder");
                    placeholder_icon()
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to open icon PNG decoder; using placeholder");
            placeholder_icon()
        }
    }
}

/// 1x1 transparent RGBA icon used when the real icon cannot be loaded.
fn placeholder_icon() -> egui::IconData {
    egui::IconData {
        rgba: vec![0u8; 4],
        width: 1,
        height: 1,
    }
}

/// Configure fonts for the egui context.
///
/// On Windows, loads Segoe UI, Segoe UI Emoji, and Segoe UI Symbol from the
/// system font directory and sets them as the primary proportional fonts.
/// These fonts have much broader Unicode coverage than the egui built-ins,
/// preventing square-glyph rendering for the tab icons and other symbols.
/// The built-in egui fonts are kept as final fallbacks so no glyph is ever lost.
///
/// On non-Windows platforms the egui defaults are used unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();

        // Load Windows system fonts in priority order.
        // Segoe UI covers most Latin and common UI symbols.
        // Segoe UI Emoji adds Unicode emoji and many pictographic symbols.
        // Segoe UI Symbol covers Mathematical, Braille, and other specialist blocks.
        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                    tracing::debug!(font = name, "Loaded Windows system font");
                }
                Err(e) => {
                    tracing::warn!(
                        font = name,
                        error = %e,
                        "Failed to load Windows system font; some symbols may render as squares"
                    );
                }
            }
        }

        if !loaded_names.is_empty() {
            // Proportional: place Windows fonts first so they take priority over
            // the egui default (NotoSans), while keeping it as a final fallback.
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }

            // Monospace: append Windows fonts as symbol fallbacks after the
            // primary monospace font so extracted OCR text keeps its column
            // alignment while symbols outside the monospace range still render.
            if let Some(monospace) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
                for name in &loaded_names {
                    monospace.push((*name).to_owned());
                }
            }

            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts configured");
        }
    }

    // On non-Windows platforms the egui built-in fonts are used unchanged.
    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// ToolFusion - a multipurpose desktop utility.
///
/// Bundles an image converter, PDF merge/split, screenshot OCR, a to-do
/// list, and a password generator in a single tabbed window.
#[derive(Parser, Debug)]
#[command(name = "ToolFusion", version, about)]
struct Cli {
    /// Override the to-do list file location.
    #[arg(short = 't', long = "tasks-file")]
    tasks_file: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load configuration before logging so the
    // configured log level can take effect.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    // Initialise logging subsystem
    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "ToolFusion starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    // Create application state
    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let mut state = app::state::AppState::new(&config, &platform_paths, cli.debug);
    state.warnings = config_warnings;

    // CLI override wins over config and platform defaults.
    if let Some(ref path) = cli.tasks_file {
        state.tasks_file = path.clone();
    }

    tracing::info!(
        tasks_file = %state.tasks_file.display(),
        "Ready to launch GUI"
    );

    // Launch the GUI
    //
    // The icon is applied at two levels:
    //   1. OS-level (Windows EXE resource) — embedded by build.rs via winres.
    //      This covers the taskbar, Alt+Tab, title bar, and Explorer.
    //   2. Runtime (eframe viewport) — loaded here from the PNG asset.
    //      This covers the eframe-managed window icon on all platforms and
    //      acts as the canonical source on Linux/macOS.
    let icon_data = load_icon();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([640.0, 480.0])
            .with_icon(icon_data),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            // Scale every text style relative to the default body size.
            if (font_size - util::constants::DEFAULT_FONT_SIZE).abs() > 0.1 {
                let scale = font_size / util::constants::DEFAULT_FONT_SIZE;
                cc.egui_ctx.style_mut(|style| {
                    for font_id in style.text_styles.values_mut() {
                        font_id.size *= scale;
                    }
                });
            }
            Ok(Box::new(gui::ToolFusionApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch ToolFusion GUI: {e}");
        std::process::exit(1);
    }
}
