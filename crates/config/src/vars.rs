use std::collections::BTreeMap;

const OPEN: &str = "&{";
const CLOSE: char = '}';

/// Replaces `&{name}` placeholders.
///
/// Lookup order: the `[properties]` table, the environment variable `name`,
/// then `NAME` upper-cased with dots turned into underscores. Unresolved
/// placeholders are kept verbatim so a bad value shows up in the logs instead
/// of silently pointing somewhere else.
pub fn substitute_vars(input: &str, properties: &BTreeMap<String, String>) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];

        let Some(end) = after.find(CLOSE) else {
            output.push_str(&rest[start..]);
            return output;
        };

        let name = &after[..end];
        match lookup(name, properties) {
            Some(value) => output.push_str(&value),
            None => {
                tracing::warn!("Unresolved property '{}' left as-is", name);
                output.push_str(&rest[start..start + OPEN.len() + end + 1]);
            }
        }

        rest = &after[end + 1..];
    }

    output.push_str(rest);
    output
}

fn lookup(name: &str, properties: &BTreeMap<String, String>) -> Option<String> {
    properties
        .get(name)
        .cloned()
        .or_else(|| std::env::var(name).ok())
        .or_else(|| std::env::var(name.to_uppercase().replace('.', "_")).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_from_properties() {
        let p = props(&[("install.dir", "/opt/idm")]);
        assert_eq!(
            substitute_vars("&{install.dir}/ui/default", &p),
            "/opt/idm/ui/default"
        );
        assert_eq!(
            substitute_vars("&{install.dir}:&{install.dir}", &p),
            "/opt/idm:/opt/idm"
        );
    }

    #[test]
    fn test_falls_back_to_environment() {
        std::env::set_var("GATEHOUSE_TEST_UI_HOME", "/srv/ui");
        assert_eq!(
            substitute_vars("&{gatehouse.test.ui.home}/extension", &BTreeMap::new()),
            "/srv/ui/extension"
        );
    }

    #[test]
    fn test_unresolved_and_unterminated_kept() {
        let p = BTreeMap::new();
        assert_eq!(
            substitute_vars("&{gatehouse.surely.unset.name}/ui", &p),
            "&{gatehouse.surely.unset.name}/ui"
        );
        assert_eq!(substitute_vars("/ui/&{broken", &p), "/ui/&{broken");
        assert_eq!(substitute_vars("/plain/path", &p), "/plain/path");
    }
}
