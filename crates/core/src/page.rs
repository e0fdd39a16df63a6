//! Page metadata, security policy and behavior flags around a [`Canvas`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canvas::{Canvas, CanvasSnapshot};
use crate::csp::{self, CspPolicy, CspValue};
use crate::error::Result;
use crate::flags::PageFlags;

pub const DEFAULT_LOCALE: &str = "en-GB";
pub const DEFAULT_CHARSET: &str = "UTF-8";
pub const DEFAULT_TEMPLATE: &str = "page/default";

/// A document: one canvas plus everything needed to emit it.
///
/// Mutators return `&mut Self` so calls can be chained.
#[derive(Debug)]
pub struct Page {
    canvas: Canvas,
    title: String,
    locale: String,
    charset: String,
    meta_tags: IndexMap<String, String>,
    seo_tags: IndexMap<String, String>,
    csp: CspPolicy,
    flags: PageFlags,
}

impl Page {
    /// Creates a page with an empty `page/default` canvas.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_canvas(title, Canvas::new(DEFAULT_TEMPLATE))
    }

    pub fn with_canvas(title: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            canvas,
            title: title.into(),
            locale: DEFAULT_LOCALE.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            meta_tags: IndexMap::new(),
            seo_tags: IndexMap::new(),
            csp: CspPolicy::new(),
            flags: PageFlags::empty(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Replaces the canvas wholesale.
    pub fn set_canvas(&mut self, canvas: Canvas) -> &mut Self {
        self.canvas = canvas;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) -> &mut Self {
        self.locale = locale.into();
        self
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn set_charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.charset = charset.into();
        self
    }

    // Meta and SEO tags

    pub fn set_meta(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.meta_tags.insert(name.into(), content.into());
        self
    }

    pub fn remove_meta(&mut self, name: &str) -> &mut Self {
        self.meta_tags.shift_remove(name);
        self
    }

    pub fn meta_tags(&self) -> &IndexMap<String, String> {
        &self.meta_tags
    }

    /// Sets an SEO/social tag such as `og:title` or `twitter:card`.
    pub fn set_seo(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.seo_tags.insert(name.into(), content.into());
        self
    }

    pub fn seo_tags(&self) -> &IndexMap<String, String> {
        &self.seo_tags
    }

    // Content Security Policy

    pub fn csp(&self) -> &CspPolicy {
        &self.csp
    }

    /// Overwrites one directive.
    pub fn set_csp(&mut self, directive: impl Into<String>, value: impl Into<CspValue>) -> &mut Self {
        self.csp.set(directive, value);
        self
    }

    pub fn allow_script_from<I, S>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.csp.allow(csp::SCRIPT_SRC, sources);
        self
    }

    pub fn allow_style_from<I, S>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.csp.allow(csp::STYLE_SRC, sources);
        self
    }

    pub fn allow_image_from<I, S>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.csp.allow(csp::IMG_SRC, sources);
        self
    }

    pub fn allow_font_from<I, S>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.csp.allow(csp::FONT_SRC, sources);
        self
    }

    pub fn allow_connect_to<I, S>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.csp.allow(csp::CONNECT_SRC, sources);
        self
    }

    pub fn allow_media_from<I, S>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.csp.allow(csp::MEDIA_SRC, sources);
        self
    }

    pub fn allow_frame_from<I, S>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.csp.allow(csp::FRAME_SRC, sources);
        self
    }

    pub fn allow_inline_styles(&mut self) -> &mut Self {
        self.allow_style_from([csp::UNSAFE_INLINE])
    }

    pub fn allow_inline_scripts(&mut self) -> &mut Self {
        self.allow_script_from([csp::UNSAFE_INLINE])
    }

    pub fn block_all_mixed(&mut self) -> &mut Self {
        self.set_csp(csp::BLOCK_ALL_MIXED_CONTENT, CspValue::flag())
    }

    pub fn require_sri(&mut self) -> &mut Self {
        self.set_csp(csp::REQUIRE_SRI_FOR, ["script", "style"])
    }

    /// Sets `default-src 'self'`, leaving other directives alone.
    pub fn use_strict_policy(&mut self) -> &mut Self {
        self.set_csp(csp::DEFAULT_SRC, [csp::SELF])
    }

    // Flags

    pub fn flags(&self) -> PageFlags {
        self.flags
    }

    pub fn enable_csp(&mut self, enabled: bool) -> &mut Self {
        self.flags.set(PageFlags::CSP_ENABLED, enabled);
        self
    }

    pub fn no_index(&mut self, enabled: bool) -> &mut Self {
        self.flags.set(PageFlags::NO_INDEX, enabled);
        self
    }

    pub fn no_follow(&mut self, enabled: bool) -> &mut Self {
        self.flags.set(PageFlags::NO_FOLLOW, enabled);
        self
    }

    pub fn no_cache(&mut self, enabled: bool) -> &mut Self {
        self.flags.set(PageFlags::NO_CACHE, enabled);
        self
    }

    pub fn force_https(&mut self, enabled: bool) -> &mut Self {
        self.flags.set(PageFlags::FORCE_HTTPS, enabled);
        self
    }

    pub fn is_csp_enabled(&self) -> bool {
        self.flags.contains(PageFlags::CSP_ENABLED)
    }

    pub fn is_no_index(&self) -> bool {
        self.flags.contains(PageFlags::NO_INDEX)
    }

    pub fn is_no_follow(&self) -> bool {
        self.flags.contains(PageFlags::NO_FOLLOW)
    }

    pub fn is_no_cache(&self) -> bool {
        self.flags.contains(PageFlags::NO_CACHE)
    }

    pub fn is_https_forced(&self) -> bool {
        self.flags.contains(PageFlags::FORCE_HTTPS)
    }

    // Serialization

    pub fn to_snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            title: self.title.clone(),
            locale: self.locale.clone(),
            charset: self.charset.clone(),
            flags: self.flags.bits(),
            meta: self.meta_tags.clone(),
            seo: self.seo_tags.clone(),
            csp: self.csp.clone(),
            canvas: self.canvas.to_snapshot(),
        }
    }

    /// Hydration payload as a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_snapshot())?)
    }

    /// Hydration payload as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_snapshot())?)
    }

    pub fn from_snapshot(snapshot: PageSnapshot) -> Self {
        Self {
            canvas: Canvas::from_snapshot(snapshot.canvas),
            title: snapshot.title,
            locale: snapshot.locale,
            charset: snapshot.charset,
            meta_tags: snapshot.meta,
            seo_tags: snapshot.seo,
            csp: snapshot.csp,
            flags: PageFlags::from_bits(snapshot.flags),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new("")
    }
}

/// Wire shape of a page, field names and order fixed for client consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub title: String,
    pub locale: String,
    pub charset: String,
    pub flags: u8,
    pub meta: IndexMap<String, String>,
    pub seo: IndexMap<String, String>,
    pub csp: CspPolicy,
    pub canvas: CanvasSnapshot,
}
