//! Export document construction

use crate::error::{HelpDocsError, Result};
use crate::types::VIEW_MODEL;
use crate::view::{ViewRecord, DEFAULT_VIEW_TYPE};
use crate::xml::{Document, Element};
use tracing::debug;

/// Build the `<odoo><data>` tree for the given views, in order.
///
/// Every view's markup is parsed before anything is assembled; the first
/// view whose markup is not well-formed aborts the build with
/// [`HelpDocsError::InvalidMarkup`].
pub fn build_document(views: &[ViewRecord]) -> Result<Element> {
    let archs = views
        .iter()
        .map(|view| {
            Element::parse(&view.arch).map_err(|e| HelpDocsError::InvalidMarkup {
                view: view.name().to_string(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut root = Element::new("odoo");
    let data = root.push_child(Element::new("data"));

    for (view, arch) in views.iter().zip(archs) {
        let record = data.push_child(
            Element::new("record")
                .with_attr("id", view.name())
                .with_attr("model", VIEW_MODEL),
        );
        record.push_child(field("name").with_text(view.name()));
        record.push_child(field("type").with_text(DEFAULT_VIEW_TYPE));
        record.push_child(field("key").with_text(view.key.as_str()));

        let arch_field = record.push_child(field("arch").with_attr("type", "xml"));
        arch_field.push_child(arch);
        debug!("Added view '{}' to export document", view.name());
    }

    Ok(root)
}

/// Serialize an export tree with an XML declaration and indentation
pub fn render_document(root: &Element, indent: usize) -> Result<String> {
    Document::new(root.clone()).to_pretty_string(indent)
}

fn field(name: &str) -> Element {
    Element::new("field").with_attr("name", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViewId;
    use pretty_assertions::assert_eq;

    fn view(id: u64, name: &str, key: &str, arch: &str) -> ViewRecord {
        ViewRecord::with_id(ViewId(id), name, key, arch)
    }

    #[test]
    fn test_single_view_document() {
        let root = build_document(&[view(1, "help-faq", "module.help_faq", "<t>FAQ</t>")]).unwrap();
        let xml = render_document(&root, 2).unwrap();

        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<odoo>
  <data>
    <record id="help-faq" model="ir.ui.view">
      <field name="name">help-faq</field>
      <field name="type">qweb</field>
      <field name="key">module.help_faq</field>
      <field name="arch" type="xml">
        <t>FAQ</t>
      </field>
    </record>
  </data>
</odoo>
"#
        );
    }

    #[test]
    fn test_records_follow_selection_order() {
        let views = vec![
            view(3, "help-c", "m.c", "<t/>"),
            view(1, "help-a", "m.a", "<t/>"),
            view(2, "help-b", "m.b", "<t/>"),
        ];
        let root = build_document(&views).unwrap();
        let data = root.children_named("data").next().unwrap();
        let ids: Vec<_> = data
            .children_named("record")
            .map(|r| r.attr("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["help-c", "help-a", "help-b"]);
    }

    #[test]
    fn test_arch_is_embedded_structurally() {
        let root = build_document(&[view(1, "help-x", "m.x", "<div>hi</div>")]).unwrap();
        let record = root
            .children_named("data")
            .next()
            .unwrap()
            .children_named("record")
            .next()
            .unwrap();
        let arch = record
            .children_named("field")
            .find(|f| f.attr("name") == Some("arch"))
            .unwrap();

        assert_eq!(arch.attr("type"), Some("xml"));
        let children: Vec<_> = arch.child_elements().collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].to_xml_string().unwrap(), "<div>hi</div>");
        assert!(!arch.has_text());
    }

    #[test]
    fn test_text_fields_are_escaped() {
        let root = build_document(&[view(1, "help-a&b", "m.<key>", "<t/>")]).unwrap();
        let xml = render_document(&root, 2).unwrap();
        assert!(xml.contains("<field name=\"name\">help-a&amp;b</field>"));
        assert!(xml.contains("<field name=\"key\">m.&lt;key&gt;</field>"));
        assert!(xml.contains("<record id=\"help-a&amp;b\""));
    }

    #[test]
    fn test_inline_markup_survives_export() {
        let arch = "<p><b>Hello</b> <i>world</i></p>";
        let root = build_document(&[view(1, "help-x", "m.x", arch)]).unwrap();
        let xml = render_document(&root, 2).unwrap();
        assert!(xml.contains(arch));
    }

    #[test]
    fn test_formatted_markup_kept_verbatim() {
        let arch = "<t>\n  <div>a</div>\n</t>";
        let root = build_document(&[view(1, "help-x", "m.x", arch)]).unwrap();
        let xml = render_document(&root, 2).unwrap();
        assert!(xml.contains("      <field name=\"arch\" type=\"xml\">\n        <t>\n  <div>a</div>\n</t>\n      </field>"));
    }

    #[test]
    fn test_invalid_markup_names_view() {
        let views = vec![
            view(1, "help-ok", "m.ok", "<t>fine</t>"),
            view(2, "help-broken", "m.broken", "<div>"),
        ];
        let err = build_document(&views).unwrap_err();
        match err {
            HelpDocsError::InvalidMarkup { view, .. } => assert_eq!(view, "help-broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_view_list_builds_empty_data() {
        let root = build_document(&[]).unwrap();
        let xml = render_document(&root, 2).unwrap();
        assert!(xml.contains("<odoo>\n  <data/>\n</odoo>"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let views = vec![view(1, "help-a", "m.a", "<t><p>x</p></t>")];
        let first = render_document(&build_document(&views).unwrap(), 2).unwrap();
        let second = render_document(&build_document(&views).unwrap(), 2).unwrap();
        assert_eq!(first, second);
    }
}
