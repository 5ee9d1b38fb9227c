//! Shared helpers for scenario integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// Writes `json` to a temporary scenario file.
pub fn scenario_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write scenario");
    file
}

/// A sign-up form with a unique email, a confirmed password and terms.
pub const SIGNUP: &str = r#"{
    "forms": [{
        "id": "new_user",
        "action": "/users",
        "fields": [
            {"name": "user[email]", "label": "Email", "widget": {"kind": "input", "type": "email"},
             "rules": [{"kind": "presence"}, {"kind": "uniqueness"}]},
            {"name": "user[password]", "label": "Password", "widget": {"kind": "input", "type": "password"},
             "rules": [{"kind": "presence"}, {"kind": "length", "options": {"minimum": 8}}, {"kind": "confirmation"}]},
            {"name": "user[password_confirmation]", "label": "Confirm", "widget": {"kind": "input", "type": "password"}},
            {"name": "user[terms]", "label": "I accept", "widget": {"kind": "checkbox"},
             "rules": [{"kind": "acceptance"}]}
        ]
    }, {
        "id": "search",
        "novalidate": true,
        "fields": [{"name": "q", "rules": [{"kind": "presence"}]}]
    }],
    "taken": {"user[email]": ["judge@example.com"]},
    "steps": []
}"#;

/// Returns `base` with its steps replaced.
pub fn with_steps(base: &str, steps: serde_json::Value) -> String {
    let mut scenario: serde_json::Value = serde_json::from_str(base).expect("valid scenario");
    scenario["steps"] = steps;
    scenario.to_string()
}
