use crate::endpoint::{Controller, EndpointBinding};
use crate::method::MethodSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Serves the HTML pages of the sample site from `<web_data>/pages/`.
pub struct PagesController {
    web_data: PathBuf,
}

impl PagesController {
    #[must_use]
    pub fn new(web_data: PathBuf) -> Self {
        Self { web_data }
    }
}

fn page_binding(name: &str, path: &str, web_data: &Path, file: &'static str) -> EndpointBinding {
    let page = Arc::new(web_data.join("pages").join(file));
    EndpointBinding::new(name, path, MethodSet::GET | MethodSet::HEAD, move |ctx| {
        match std::fs::read_to_string(page.as_ref()) {
            Ok(html) => ctx.send_html(&html, 200),
            Err(err) => {
                warn!(page = %page.display(), error = %err, "Page file unreadable");
                ctx.send_text("404", 404);
            }
        }
    })
}

impl Controller for PagesController {
    fn bindings(&self) -> Vec<EndpointBinding> {
        vec![
            EndpointBinding::new("root", "/", MethodSet::ALLOW_ALL, |ctx| {
                ctx.redirect("/index");
            }),
            page_binding("index", "/index", &self.web_data, "index.html"),
            page_binding(
                "random_number_page",
                "/randomnumbergenerator",
                &self.web_data,
                "randomnumbergenerator.html",
            ),
        ]
    }
}
