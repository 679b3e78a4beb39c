//! Import of exported view documents

use crate::error::{HelpDocsError, Result};
use crate::types::VIEW_MODEL;
use crate::view::{ViewRecord, ViewRepository, DEFAULT_VIEW_TYPE};
use crate::xml::Element;
use serde::Serialize;
use tracing::{debug, warn};

/// A view read back from an export document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedView {
    /// Record id attribute
    pub xml_id: String,
    /// View name
    pub name: String,
    /// View key
    pub key: String,
    /// View type
    pub view_type: String,
    /// Template markup, serialized compactly
    pub arch: String,
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Views created
    pub created: usize,
    /// Existing views overwritten
    pub updated: usize,
}

/// Read the view records of an export document
pub fn parse_export(xml: &str) -> Result<Vec<ImportedView>> {
    let root = Element::parse(xml)?;
    if root.name != "odoo" {
        return Err(HelpDocsError::Validation(format!(
            "expected <odoo> root element, found <{}>",
            root.name
        )));
    }

    let mut views = Vec::new();
    for data in root.children_named("data") {
        for record in data.children_named("record") {
            let xml_id = record.attr("id").unwrap_or_default().to_string();
            if record.attr("model") != Some(VIEW_MODEL) {
                warn!(
                    "Skipping record '{}' of model {:?}",
                    xml_id,
                    record.attr("model")
                );
                continue;
            }
            views.push(parse_record(record, xml_id)?);
        }
    }

    debug!("Parsed {} views from export document", views.len());
    Ok(views)
}

fn parse_record(record: &Element, xml_id: String) -> Result<ImportedView> {
    let field = |name: &str| find_field(record, name);
    let missing = |name: &str| {
        HelpDocsError::Validation(format!("record '{}' has no '{}' field", xml_id, name))
    };

    let name = field("name").ok_or_else(|| missing("name"))?.text();
    let key = field("key").ok_or_else(|| missing("key"))?.text();
    let view_type = field("type")
        .map(Element::text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_VIEW_TYPE.to_string());

    let arch_field = field("arch").ok_or_else(|| missing("arch"))?;
    let mut roots = arch_field.child_elements();
    let arch = match (roots.next(), roots.next()) {
        (Some(arch), None) => arch.to_xml_string()?,
        _ => {
            return Err(HelpDocsError::Validation(format!(
                "record '{}' must embed exactly one arch element",
                xml_id
            )))
        }
    };

    Ok(ImportedView {
        xml_id,
        name,
        key,
        view_type,
        arch,
    })
}

fn find_field<'a>(record: &'a Element, name: &str) -> Option<&'a Element> {
    record
        .child_elements()
        .find(|f| f.name == "field" && f.attr("name") == Some(name))
}

/// Store imported views, updating existing views with the same name
pub fn import_views(repo: &dyn ViewRepository, views: Vec<ImportedView>) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for imported in views {
        let record = match repo.find_by_name(&imported.name)? {
            Some(mut existing) => {
                existing.key = imported.key;
                existing.arch = imported.arch;
                existing.view_type = imported.view_type;
                report.updated += 1;
                existing
            }
            None => {
                let mut view = ViewRecord::new(imported.name, imported.key, imported.arch);
                view.view_type = imported.view_type;
                report.created += 1;
                view
            }
        };
        let saved = repo.save(record)?;
        debug!("Imported view '{}' as {}", saved.name(), saved.id);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::{build_document, render_document};
    use crate::types::ViewId;
    use crate::view::{MemoryViewRepository, ViewFilter};

    #[test]
    fn test_parse_exported_document() {
        let views = vec![
            ViewRecord::with_id(ViewId(1), "help-faq", "module.help_faq", "<t>FAQ</t>"),
            ViewRecord::with_id(ViewId(2), "help-a", "m.a", "<div class=\"x\"><p>a</p></div>"),
        ];
        let xml = render_document(&build_document(&views).unwrap(), 2).unwrap();

        let parsed = parse_export(&xml).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].xml_id, "help-faq");
        assert_eq!(parsed[0].name, "help-faq");
        assert_eq!(parsed[0].key, "module.help_faq");
        assert_eq!(parsed[0].view_type, "qweb");
        assert_eq!(parsed[0].arch, "<t>FAQ</t>");
        assert_eq!(parsed[1].arch, "<div class=\"x\"><p>a</p></div>");
    }

    #[test]
    fn test_parse_skips_other_models() {
        let xml = r#"<odoo><data>
            <record id="x" model="res.partner"><field name="name">X</field></record>
            <record id="help-y" model="ir.ui.view">
                <field name="name">help-y</field>
                <field name="key">m.y</field>
                <field name="arch" type="xml"><t>y</t></field>
            </record>
        </data></odoo>"#;
        let parsed = parse_export(xml).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "help-y");
    }

    #[test]
    fn test_parse_rejects_wrong_root() {
        let err = parse_export("<openerp><data/></openerp>").unwrap_err();
        assert!(matches!(err, HelpDocsError::Validation(_)));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let xml = r#"<odoo><data><record id="a" model="ir.ui.view">
            <field name="name">a</field>
            <field name="arch" type="xml"><t/></field>
        </record></data></odoo>"#;
        let err = parse_export(xml).unwrap_err();
        assert!(err.to_string().contains("'key'"));
    }

    #[test]
    fn test_parse_rejects_empty_arch() {
        let xml = r#"<odoo><data><record id="a" model="ir.ui.view">
            <field name="name">a</field><field name="key">k</field>
            <field name="arch" type="xml"></field>
        </record></data></odoo>"#;
        assert!(parse_export(xml).is_err());
    }

    #[test]
    fn test_import_creates_and_updates() {
        let repo = MemoryViewRepository::with_views(vec![ViewRecord::new(
            "help-faq",
            "old.key",
            "<t>old</t>",
        )]);
        let imported = vec![
            ImportedView {
                xml_id: "help-faq".to_string(),
                name: "help-faq".to_string(),
                key: "module.help_faq".to_string(),
                view_type: "qweb".to_string(),
                arch: "<t>new</t>".to_string(),
            },
            ImportedView {
                xml_id: "help-new".to_string(),
                name: "help-new".to_string(),
                key: "module.help_new".to_string(),
                view_type: "qweb".to_string(),
                arch: "<t>n</t>".to_string(),
            },
        ];

        let report = import_views(&repo, imported).unwrap();
        assert_eq!(report, ImportReport { created: 1, updated: 1 });

        let faq = repo.find_by_name("help-faq").unwrap().unwrap();
        assert_eq!(faq.id, ViewId(1));
        assert_eq!(faq.arch, "<t>new</t>");
        assert_eq!(faq.key, "module.help_faq");
        assert_eq!(repo.list(&ViewFilter::documentation()).unwrap().len(), 2);
    }
}
