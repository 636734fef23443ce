use crate::endpoint::{Controller, EndpointBinding};
use crate::method::MethodSet;
use crate::static_files::StaticFiles;
use std::path::PathBuf;
use std::sync::Arc;

/// Serves CSS and JS assets from `<web_data>/assets/` via wildcard patterns.
///
/// Filenames are restricted to alphabetic stems with the expected extension.
/// `StaticFiles` already jails paths to the base directory; the stem check
/// additionally rejects subdirectories and dotted names, matching the
/// asset layout this controller serves.
pub struct AssetsController {
    files: Arc<StaticFiles>,
}

impl AssetsController {
    #[must_use]
    pub fn new(web_data: PathBuf) -> Self {
        Self {
            files: Arc::new(StaticFiles::new(web_data)),
        }
    }
}

fn valid_asset_name(name: &str, ext: &str) -> bool {
    match name.strip_suffix(ext) {
        Some(stem) => !stem.is_empty() && stem.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

fn asset_binding(
    name: &str,
    prefix: &'static str,
    ext: &'static str,
    files: Arc<StaticFiles>,
) -> EndpointBinding {
    let pattern = format!("{prefix}*");
    EndpointBinding::new(name, &pattern, MethodSet::ALLOW_ALL, move |ctx| {
        let file_name = ctx.path()[prefix.len()..].to_string();
        if !valid_asset_name(&file_name, ext) {
            ctx.send_text("404", 404);
            return;
        }
        let relative = format!("{}{file_name}", prefix.trim_start_matches('/'));
        match files.load(&relative) {
            Ok((bytes, content_type)) => ctx.send_bytes(bytes, 200, Some(content_type)),
            Err(_) => ctx.send_text("404", 404),
        }
    })
}

impl Controller for AssetsController {
    fn bindings(&self) -> Vec<EndpointBinding> {
        vec![
            asset_binding("css_assets", "/assets/css/", ".css", self.files.clone()),
            asset_binding("js_assets", "/assets/js/", ".js", self.files.clone()),
        ]
    }
}
