//! `{token}` substitution for WhatsApp message templates.
//!
//! Only the four tokens in [`RECOGNIZED_TOKENS`] are replaced. Matching is a
//! single left-to-right pass over the template: substituted values are copied
//! to the output and never scanned again, and any other `{...}` sequence is
//! left exactly as written.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const ITEM_TITLE: &str = "itemTitle";
pub const URL: &str = "url";
pub const UTM_SOURCE: &str = "utmSource";
pub const UTM_CAMPAIGN: &str = "utmCampaign";

pub const RECOGNIZED_TOKENS: [&str; 4] = [ITEM_TITLE, URL, UTM_SOURCE, UTM_CAMPAIGN];

/// What to emit for a recognized token that has no value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingVariable {
    /// Drop the token
    #[default]
    Empty,
    /// Leave `{token}` in the output
    Keep,
}

/// Token name (without braces) -> value
pub type TemplateVars = HashMap<String, String>;

/// Build a variable map, skipping absent values.
pub fn template_vars(
    item_title: Option<&str>,
    url: Option<&str>,
    utm_source: Option<&str>,
    utm_campaign: Option<&str>,
) -> TemplateVars {
    [
        (ITEM_TITLE, item_title),
        (URL, url),
        (UTM_SOURCE, utm_source),
        (UTM_CAMPAIGN, utm_campaign),
    ]
    .into_iter()
    .filter_map(|(token, value)| value.map(|v| (token.to_string(), v.to_string())))
    .collect()
}

pub fn substitute(template: &str, vars: &TemplateVars, policy: MissingVariable) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let token = after_open
            .find('}')
            .map(|close| &after_open[..close])
            .filter(|name| RECOGNIZED_TOKENS.contains(name));

        match token {
            Some(name) => {
                match (vars.get(name), policy) {
                    (Some(value), _) => out.push_str(value),
                    (None, MissingVariable::Empty) => {}
                    (None, MissingVariable::Keep) => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after_open[name.len() + 1..];
            }
            None => {
                // Not a token: keep the brace and resume right after it, so
                // `{{url}` still finds the inner `{url}`.
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Recognized tokens that appear in a template, in order of first use.
pub fn tokens_in(template: &str) -> Vec<&'static str> {
    let mut found: Vec<(usize, &'static str)> = RECOGNIZED_TOKENS
        .iter()
        .filter_map(|token| {
            template
                .find(&format!("{{{}}}", token))
                .map(|pos| (pos, *token))
        })
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, token)| token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vars(pairs: &[(&str, &str)]) -> TemplateVars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn replaces_every_recognized_token() {
        let out = substitute(
            "Hola, me interesa {itemTitle}. {url} ({utmSource}/{utmCampaign})",
            &vars(&[
                (ITEM_TITLE, "Cancún 5 días"),
                (URL, "https://agencia.mx/paquetes/cancun"),
                (UTM_SOURCE, "web"),
                (UTM_CAMPAIGN, "verano"),
            ]),
            MissingVariable::Empty,
        );
        assert_eq!(
            out,
            "Hola, me interesa Cancún 5 días. https://agencia.mx/paquetes/cancun (web/verano)"
        );
    }

    #[test]
    fn missing_tokens_follow_policy() {
        let template = "Info de {itemTitle} {url}";
        let v = vars(&[(ITEM_TITLE, "Europa")]);
        assert_eq!(substitute(template, &v, MissingVariable::Empty), "Info de Europa ");
        assert_eq!(substitute(template, &v, MissingVariable::Keep), "Info de Europa {url}");
    }

    #[test]
    fn unrecognized_sequences_are_untouched() {
        let v = vars(&[(ITEM_TITLE, "Roma")]);
        assert_eq!(
            substitute("{nombre} quiere {itemTitle} {ItemTitle} {} {", &v, MissingVariable::Empty),
            "{nombre} quiere Roma {ItemTitle} {} {"
        );
    }

    #[test]
    fn nested_brace_still_finds_inner_token() {
        let v = vars(&[(URL, "https://a.mx")]);
        assert_eq!(substitute("{{url}}", &v, MissingVariable::Empty), "{https://a.mx}");
    }

    #[test]
    fn values_are_not_rescanned() {
        let v = vars(&[(ITEM_TITLE, "{url}"), (URL, "https://a.mx")]);
        assert_eq!(substitute("{itemTitle}", &v, MissingVariable::Empty), "{url}");
    }

    #[test]
    fn lists_tokens_in_order_of_use() {
        assert_eq!(
            tokens_in("{url} y {itemTitle} y {url}"),
            vec![URL, ITEM_TITLE]
        );
        assert!(tokens_in("sin variables").is_empty());
    }

    #[test]
    fn template_vars_skips_absent_values() {
        let v = template_vars(Some("Roma"), None, Some("ig"), None);
        assert_eq!(v.len(), 2);
        assert_eq!(v.get(UTM_SOURCE).map(String::as_str), Some("ig"));
    }

    fn token() -> impl Strategy<Value = &'static str> {
        prop::sample::select(RECOGNIZED_TOKENS.to_vec())
    }

    proptest! {
        #[test]
        fn substituted_value_present_and_placeholder_gone(
            prefix in "[^{}]{0,20}",
            suffix in "[^{}]{0,20}",
            name in token(),
            value in "[^{}]{1,30}",
        ) {
            let template = format!("{}{{{}}}{}", prefix, name, suffix);
            let out = substitute(&template, &vars(&[(name, value.as_str())]), MissingVariable::Keep);
            let placeholder = format!("{{{}}}", name);
            prop_assert!(out.contains(&value));
            prop_assert!(!out.contains(&placeholder));
        }

        #[test]
        fn text_without_braces_is_unchanged(text in "[^{}]{0,60}") {
            let v = vars(&[(ITEM_TITLE, "x"), (URL, "y")]);
            prop_assert_eq!(substitute(&text, &v, MissingVariable::Empty), text);
        }
    }
}
