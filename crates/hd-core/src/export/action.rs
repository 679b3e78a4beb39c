//! Window action returned to the UI layer

use crate::types::{AttachmentId, ATTACHMENT_MODEL};
use serde::{Deserialize, Serialize};

/// Navigation directive opening one record in a form view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowAction {
    /// Window title
    pub name: String,
    /// Action type tag
    #[serde(rename = "type")]
    pub action_type: String,
    /// Target model
    pub res_model: String,
    /// Target record
    pub res_id: AttachmentId,
    /// View used to display the record
    pub view_id: String,
    /// Display mode
    pub view_mode: String,
    /// Where the action opens
    pub target: String,
}

impl WindowAction {
    /// Action opening an attachment in the given form view, in place
    pub fn open_attachment(res_id: AttachmentId, view_id: impl Into<String>) -> Self {
        Self {
            name: "Export Documentation".to_string(),
            action_type: "ir.actions.act_window".to_string(),
            res_model: ATTACHMENT_MODEL.to_string(),
            res_id,
            view_id: view_id.into(),
            view_mode: "form".to_string(),
            target: "self".to_string(),
        }
    }
}
