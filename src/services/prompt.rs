//! Prompt Rendering
//!
//! Flow prompts are fixed templates with `{{placeholder}}` slots. Rendering
//! is plain substitution: absent optional values render as empty strings,
//! and list values are joined by the caller before substitution.

use regex::Regex;

/// Replace each `{{key}}` in `template` with its paired value.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
    }
    out
}

/// Extract `{{variable}}` names from a template, in order of appearance.
pub fn extract_variables(template: &str) -> Vec<String> {
    let re = Regex::new(r"\{\{([\w.]+)\}\}").unwrap();
    let mut vars: Vec<String> = re
        .captures_iter(template)
        .map(|c| c[1].to_string())
        .collect();
    vars.dedup();
    vars
}
