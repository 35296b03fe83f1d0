//! Submitted page values

use serde_json::Value;
use tracing::debug;

use crate::application::assemble::to_fields;
use crate::domain::entities::PageFields;
use crate::domain::ports::{DescriptorFactory, SessionStore};
use crate::domain::value_objects::Page;
use crate::error::FrontendResult;

use super::{Frontend, PageDefaults};

impl<F, S> Frontend<F, S>
where
    F: DescriptorFactory,
    S: SessionStore,
{
    /// Name the driver stores `page` under.
    pub fn page_name(&self, page: Page) -> &str {
        self.options.page_names.name(page)
    }

    /// Merge submitted fields into the page's values.
    pub fn submit_page(&mut self, page: Page, fields: PageFields) {
        let name = self.options.page_names.name(page);
        self.state.submit(name, fields);
    }

    pub fn set_page_valid(&mut self, page: Page, valid: bool) {
        let name = self.options.page_names.name(page);
        self.state.set_valid(name, valid);
    }

    /// Pages never validated count as invalid.
    pub fn is_page_valid(&self, page: Page) -> bool {
        self.state
            .is_valid(self.page_name(page))
            .unwrap_or(false)
    }

    pub fn set_page_defaults(&mut self, page: Page, fields: PageFields) {
        let name = self.options.page_names.name(page);
        self.state.set_page_defaults(name, fields);
    }

    pub fn page_defaults(&self, page: Page) -> Option<&PageFields> {
        self.state.page_defaults(self.page_name(page))
    }

    pub fn set_page_constants(&mut self, page: Page, fields: PageFields) {
        let name = self.options.page_names.name(page);
        self.state.set_page_constants(name, fields);
    }

    pub fn page_constants(&self, page: Page) -> Option<&PageFields> {
        self.state.page_constants(self.page_name(page))
    }

    /// Submitted value of one page element.
    pub fn export_value(&self, page: Page, element: &str) -> Option<&Value> {
        self.state.value(self.page_name(page), element)
    }

    /// Fill the identity and release pages with their defaults, the way a
    /// driver without interactive pages accepts the proposed values. Fields
    /// already submitted are kept.
    ///
    /// Dependency and file lists already in the session are kept too.
    pub fn accept_defaults(&mut self) -> FrontendResult<()> {
        for page in [Page::Package, Page::Release] {
            let mut fields = match self.defaults(page.id())? {
                Some(PageDefaults::Package(values)) => to_fields(&values),
                Some(PageDefaults::Release(values)) => to_fields(&values),
                _ => continue,
            };
            if let Some(submitted) = self.state.values(self.page_name(page)) {
                fields.retain(|name, _| !submitted.contains_key(name));
            }
            debug!(page = %page, fields = fields.len(), "accepting page defaults");
            self.submit_page(page, fields);
        }
        if self.state.dependencies().is_none() {
            self.defaults(Page::Dependencies.id())?;
        }
        if self.state.files().is_none() {
            self.defaults(Page::Replacements.id())?;
        }
        Ok(())
    }
}
