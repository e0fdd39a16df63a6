//! Page builders for the server's routes.
//!
//! Pure functions: site config in, fresh [`Page`] out.

use pagekit_core::{csp, Canvas, Node, Page};

use crate::config::SiteConfig;

/// Slug prefix marking unpublished pages.
pub const DRAFT_PREFIX: &str = "draft-";

const FEATURES: [(&str, &str); 3] = [
    ("tree", "Typed node tree with parent tracking"),
    ("csp", "Declarative Content Security Policy"),
    ("gzip", "Negotiated gzip compression"),
];

/// Landing page listing the library's features.
pub fn home_page(site: &SiteConfig) -> Page {
    let mut page = Page::with_canvas(site.site_name.clone(), Canvas::new("page/home"));
    apply_site_defaults(&mut page, site);

    page.set_meta("description", format!("{} home", site.site_name))
        .set_seo("og:title", site.site_name.clone())
        .set_seo("og:type", "website");

    let canvas = page.canvas();
    canvas.add_child(&header(&site.site_name));

    let main = Node::new("main");
    let list = Node::new("feature-list");
    for (id, label) in FEATURES {
        let feature = Node::new("feature");
        feature.set_prop("id", id).set_prop("label", label);
        list.add_child(&feature);
    }
    main.add_child(&list);
    canvas.add_child(&main);
    canvas.add_child(&footer(&site.site_name));

    page
}

/// Content page for `slug`; drafts are kept out of search engines and caches.
pub fn content_page(site: &SiteConfig, slug: &str) -> Page {
    let title = format!("{} | {}", humanize(slug), site.site_name);
    let mut page = Page::with_canvas(title, Canvas::new(format!("page/{slug}")));
    apply_site_defaults(&mut page, site);

    if slug.starts_with(DRAFT_PREFIX) {
        page.no_index(true).no_follow(true).no_cache(true);
    }

    page.set_seo("og:title", humanize(slug));

    let canvas = page.canvas();
    canvas.set_prop("slug", slug);
    canvas.add_child(&header(&site.site_name));

    let article = Node::new("article");
    article.set_prop("slug", slug);
    let heading = Node::new("heading");
    heading.set_prop("level", 1).set_prop("text", humanize(slug));
    article.add_child(&heading);
    canvas.add_child(&article);
    canvas.add_child(&footer(&site.site_name));

    page
}

fn apply_site_defaults(page: &mut Page, site: &SiteConfig) {
    page.set_locale(site.locale.clone())
        .use_strict_policy()
        .allow_script_from([csp::SELF])
        .allow_style_from([csp::SELF])
        .allow_inline_styles()
        .allow_image_from([csp::SELF, "data:"])
        .block_all_mixed()
        .enable_csp(true)
        .force_https(site.force_https);
}

fn header(site_name: &str) -> Node {
    let node = Node::new("header");
    node.set_prop("title", site_name);
    node
}

fn footer(site_name: &str) -> Node {
    let node = Node::new("footer");
    node.set_prop("text", format!("Served by {site_name}"));
    node
}

/// `getting-started` -> `Getting started`.
fn humanize(slug: &str) -> String {
    let text = slug.replace(['-', '_'], " ");
    let mut chars = text.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
