use serde::{Deserialize, Serialize};

/// Raw field values of the registration form.
///
/// All fields are plain text. A fresh form starts with every field empty;
/// the shell mutates fields one at a time on user input and resets back to
/// `Default` after a successful submission or an explicit reset.
///
/// Serialized with camelCase keys so a draft snapshot on disk reads as
/// `{"firstName": "...", ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub region: String,
}

impl FormValues {
    /// True if every field is empty, i.e. nothing worth drafting.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.username.is_empty()
            && self.email.is_empty()
            && self.password.is_empty()
            && self.region.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_empty() {
        let values = FormValues::default();
        assert!(values.is_empty());
        assert_eq!(values.username, "");
    }

    #[test]
    fn draft_snapshot_uses_camel_case_keys() {
        let values = FormValues {
            first_name: "Jana".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&values).unwrap();
        assert!(json.contains("\"firstName\":\"Jana\""));

        let restored: FormValues = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, values);
    }

    #[test]
    fn partial_snapshot_fills_missing_fields_with_defaults() {
        let restored: FormValues = serde_json::from_str(r#"{"username":"jana_n"}"#).unwrap();
        assert_eq!(restored.username, "jana_n");
        assert_eq!(restored.email, "");
    }
}
