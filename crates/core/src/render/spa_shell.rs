//! Reference renderer emitting a single-page-app HTML shell.
//!
//! The shell carries the document head, a mount point and the page's
//! hydration payload; the client bundle takes it from there.

use askama::Template;

use crate::error::{CoreError, Result};
use crate::page::Page;
use crate::render::Renderer;

/// Element id of the `<script type="application/json">` hydration payload.
pub const STATE_SCRIPT_ID: &str = "__PAGE__";

const DOCTYPE: &str = "<!DOCTYPE html>";

#[derive(Template)]
#[template(
    source = r#"<html lang="{{ locale }}">
<head>
<meta charset="{{ charset }}">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ title }}</title>
{%- for (name, content) in meta_tags %}
<meta name="{{ name }}" content="{{ content }}">
{%- endfor %}
{%- for tag in seo_tags %}
<meta {{ tag.attr }}="{{ tag.name }}" content="{{ tag.content }}">
{%- endfor %}
{%- for href in stylesheets %}
<link rel="stylesheet" href="{{ href }}">
{%- endfor %}
</head>"#,
    ext = "html"
)]
struct HeadTemplate<'a> {
    locale: &'a str,
    charset: &'a str,
    title: &'a str,
    meta_tags: Vec<(&'a str, &'a str)>,
    seo_tags: Vec<SeoTag<'a>>,
    stylesheets: &'a [String],
}

struct SeoTag<'a> {
    attr: &'static str,
    name: &'a str,
    content: &'a str,
}

impl<'a> SeoTag<'a> {
    /// Open Graph tags use `property`, everything else `name`.
    fn new(name: &'a str, content: &'a str) -> Self {
        let attr = if name.starts_with("og:") {
            "property"
        } else {
            "name"
        };
        Self {
            attr,
            name,
            content,
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"<body>
<div id="{{ mount_id }}" data-template="{{ template }}"></div>
<script id="{{ state_id }}" type="application/json">{{ state|safe }}</script>
{%- if let Some(src) = client_bundle %}
<script type="module" src="{{ src }}"></script>
{%- endif %}
</body>
</html>"#,
    ext = "html"
)]
struct BodyTemplate<'a> {
    mount_id: &'a str,
    template: &'a str,
    state_id: &'a str,
    state: String,
    client_bundle: Option<&'a str>,
}

/// Renders a page as an HTML shell for client-side hydration.
#[derive(Debug, Clone)]
pub struct SpaShellRenderer {
    mount_id: String,
    client_bundle: Option<String>,
    stylesheets: Vec<String>,
}

impl SpaShellRenderer {
    pub fn new() -> Self {
        Self {
            mount_id: "app".to_string(),
            client_bundle: None,
            stylesheets: Vec::new(),
        }
    }

    /// Id of the element the client app mounts into (default `app`).
    pub fn with_mount_id(mut self, mount_id: impl Into<String>) -> Self {
        self.mount_id = mount_id.into();
        self
    }

    /// URL of the client module script.
    pub fn with_client_bundle(mut self, url: impl Into<String>) -> Self {
        self.client_bundle = Some(url.into());
        self
    }

    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheets.push(href.into());
        self
    }
}

impl Default for SpaShellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SpaShellRenderer {
    fn render(&self, page: &Page) -> Result<Vec<String>> {
        let head = HeadTemplate {
            locale: page.locale(),
            charset: page.charset(),
            title: page.title(),
            meta_tags: page
                .meta_tags()
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
            seo_tags: page
                .seo_tags()
                .iter()
                .map(|(k, v)| SeoTag::new(k, v))
                .collect(),
            stylesheets: &self.stylesheets,
        };

        let body = BodyTemplate {
            mount_id: &self.mount_id,
            template: page.canvas().template(),
            state_id: STATE_SCRIPT_ID,
            state: script_safe_json(&page.to_json()?),
            client_bundle: self.client_bundle.as_deref(),
        };

        Ok(vec![
            DOCTYPE.to_string(),
            head.render().map_err(|e| CoreError::Render(e.to_string()))?,
            body.render().map_err(|e| CoreError::Render(e.to_string()))?,
        ])
    }
}

/// Escapes characters that could end the surrounding `<script>` element.
///
/// These only ever occur inside JSON strings, where `\uXXXX` is equivalent.
fn script_safe_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
