//! PDFium library loader with platform-specific search paths.
//!
//! Centralizes the logic for locating and loading the PDFium dynamic library
//! across different deployment scenarios.

use pdfium_render::prelude::*;
use std::path::PathBuf;

#[cfg(target_os = "macos")]
const PDFIUM_LIB: &str = "libpdfium.dylib";
#[cfg(target_os = "windows")]
const PDFIUM_LIB: &str = "pdfium.dll";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const PDFIUM_LIB: &str = "libpdfium.so";

pub struct PdfiumLoader;

impl PdfiumLoader {
    /// Load the PDFium library from known search paths or system library.
    ///
    /// Search order:
    /// 1. `lib/` in current working directory (development)
    /// 2. `lib/` relative to executable
    /// 3. `Resources/lib/` in macOS bundle
    /// 4. System library fallback
    pub fn load() -> Result<Pdfium, String> {
        for path in Self::search_paths() {
            if path.exists() {
                if let Ok(bindings) = Pdfium::bind_to_library(&path) {
                    return Ok(Pdfium::new(bindings));
                }
            }
        }
        Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| format!("Failed to load pdfium: {:?}", e))
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current working directory (development)
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join("lib").join(PDFIUM_LIB));
        }

        // Executable-relative path
        if let Ok(exe) = std::env::current_exe() {
            if let Some(parent) = exe.parent() {
                paths.push(parent.join("lib").join(PDFIUM_LIB));

                // macOS bundle path
                if let Some(grandparent) = parent.parent() {
                    paths.push(grandparent.join("Resources").join("lib").join(PDFIUM_LIB));
                }
            }
        }

        paths
    }
}
