//! Form body of the family request endpoints.
//!
//! The form posts one field per child, `child-<uuid>`, whose value says
//! whether the child is selected, plus optional `comments` and the
//! `authenticity_token`.

use std::collections::HashMap;

use crate::common::ChildId;
use crate::domains::auth::AUTHENTICITY_TOKEN_FIELD;

const CHILD_FIELD_PREFIX: &str = "child-";

/// Parsed family request form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyRequestForm {
    pub selections: HashMap<ChildId, bool>,
    pub comments: Option<String>,
    pub authenticity_token: Option<String>,
}

impl FamilyRequestForm {
    /// Build from raw form fields
    ///
    /// Unknown fields and `child-` fields with an unparseable id are ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let mut form = Self::default();

        for (key, value) in fields {
            if let Some(raw_id) = key.strip_prefix(CHILD_FIELD_PREFIX) {
                match ChildId::parse(raw_id) {
                    Ok(child_id) => {
                        form.selections.insert(child_id, is_checked(value));
                    }
                    Err(_) => tracing::debug!(field = %key, "Ignoring malformed child field"),
                }
            } else if key == "comments" {
                let comments = value.trim();
                if !comments.is_empty() {
                    form.comments = Some(comments.to_string());
                }
            } else if key == AUTHENTICITY_TOKEN_FIELD {
                form.authenticity_token = Some(value.clone());
            }
        }

        form
    }

    pub fn is_selected(&self, child_id: ChildId) -> bool {
        self.selections.get(&child_id).copied().unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.selections.values().filter(|selected| **selected).count()
    }
}

/// Checkbox semantics: present-and-truthy means selected
fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes"
    )
}
