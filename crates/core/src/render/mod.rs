//! Renderer contract.
//!
//! A renderer turns a [`Page`] into an ordered list of output fragments. The
//! caller joins them once at the end. Renderers only get `&Page`, so they can
//! read anything reachable from it but cannot change it.

mod spa_shell;

pub use spa_shell::{SpaShellRenderer, STATE_SCRIPT_ID};

use crate::error::Result;
use crate::page::Page;

/// Turns a page into ordered output fragments.
pub trait Renderer {
    fn render(&self, page: &Page) -> Result<Vec<String>>;
}

impl<F> Renderer for F
where
    F: Fn(&Page) -> Result<Vec<String>>,
{
    fn render(&self, page: &Page) -> Result<Vec<String>> {
        self(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_name(page: &Page) -> Result<Vec<String>> {
        Ok(vec![page.canvas().template().to_string()])
    }

    #[test]
    fn test_functions_are_renderers() {
        let page = Page::new("x");
        assert_eq!(template_name.render(&page).unwrap(), vec!["page/default"]);
    }

    #[test]
    fn test_renderer_can_branch_on_template() {
        let renderer = |page: &Page| -> Result<Vec<String>> {
            match page.canvas().template() {
                "page/empty" => Ok(Vec::new()),
                other => Ok(vec![format!("<main data-template=\"{other}\"></main>")]),
            }
        };

        let mut page = Page::new("x");
        assert_eq!(renderer.render(&page).unwrap().len(), 1);

        page.canvas_mut().set_template("page/empty");
        assert!(renderer.render(&page).unwrap().is_empty());
    }
}
