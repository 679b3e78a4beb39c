//! Help page locator

use crate::config::HelpConfig;
use crate::error::Result;
use crate::view::{ViewRecord, ViewRepository};
use crate::xml::Element;
use serde::Serialize;
use tracing::info;

/// Location of the documentation page for a model and view type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpPage {
    /// Page (view) name
    pub name: String,
    /// Public URL of the page
    pub url: String,
    /// Whether a documentation view with that name is stored
    pub exists: bool,
}

impl HelpPage {
    /// URL that creates the page and redirects to it
    pub fn create_url(&self) -> String {
        format!("{}?redirect=true", self.url)
    }
}

/// Resolves help pages from configuration
pub struct HelpLocator {
    config: HelpConfig,
}

impl HelpLocator {
    /// Create a locator
    pub fn new(config: HelpConfig) -> Self {
        Self { config }
    }

    /// Page name for a model and view type
    pub fn page_name(&self, model: &str, view_type: &str) -> String {
        format!(
            "{}{}-{}",
            self.config.page_prefix,
            model.trim().replace('.', "-"),
            view_type.trim()
        )
    }

    /// Whether the view type can have a help page at all
    pub fn is_allowed(&self, view_type: &str) -> bool {
        !self
            .config
            .forbidden_view_types
            .iter()
            .any(|forbidden| forbidden == view_type)
    }

    /// Find the help page; `None` for view types without help
    pub fn locate(
        &self,
        repo: &dyn ViewRepository,
        model: &str,
        view_type: &str,
    ) -> Result<Option<HelpPage>> {
        if !self.is_allowed(view_type) {
            return Ok(None);
        }

        let name = self.page_name(model, view_type);
        let exists = repo
            .find_by_name(&name)?
            .map(|view| view.is_documentation())
            .unwrap_or(false);
        let url = format!("{}/{}", self.config.page_route.trim_end_matches('/'), name);

        Ok(Some(HelpPage { name, url, exists }))
    }

    /// Store an empty documentation view for a page that does not exist yet
    pub fn create_page(&self, repo: &dyn ViewRepository, page: &HelpPage) -> Result<ViewRecord> {
        if let Some(existing) = repo.find_by_name(&page.name)? {
            return Ok(existing);
        }

        let key = format!("help_docs.{}", page.name);
        let mut template = Element::new("t").with_attr("t-name", page.name.as_str());
        template.push_child(Element::new("div").with_attr("class", "oe_structure"));
        let arch = template.to_xml_string()?;
        let view = repo.save(ViewRecord::new(page.name.as_str(), key, arch))?;
        info!("Created help page '{}' as view {}", view.name(), view.id);
        Ok(view)
    }
}

impl Default for HelpLocator {
    fn default() -> Self {
        Self::new(HelpConfig::default())
    }
}
