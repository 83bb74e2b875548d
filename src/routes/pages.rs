use tower_http::services::{ServeDir, ServeFile};

use crate::config::AppConfig;

/// Page Service
///
/// Serves the compiled front-end: real files (scripts, styles, documents under
/// `/files/...`) straight from the bundle directory, and `index.html` for any other path
/// so client-side routes such as `/dashboard/settings` boot the app.
///
/// Installed as the router fallback, behind the route guard. Requests reaching it are the
/// originals, unmodified.
pub fn page_service(config: &AppConfig) -> ServeDir<ServeFile> {
    ServeDir::new(&config.assets_dir).fallback(ServeFile::new(config.index_file()))
}
