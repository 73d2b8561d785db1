use super::errors::ConfigError;
use super::models::Config;
use super::vars::substitute_vars;
use gatehouse_utils::prepend_slash;

/// Everything needed to mount the UI, with placeholders already substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiRegistration {
    pub context_root: String,
    /// Lookup order: extension dir, then default dir
    pub roots: Vec<String>,
    pub allowed_directories: Vec<String>,
    /// Set when `allowed_directories` was empty and the roots were used instead
    pub allow_list_defaulted: bool,
    pub excluded_prefixes: Vec<String>,
    pub default_document: String,
    pub copy_chunk_size: usize,
    /// In bytes
    pub streaming_threshold: u64,
}

impl Config {
    /// Validates the `[ui]` section the same way on startup and on reload.
    /// Any error here means the UI stays unmounted.
    pub fn ui_registration(&self) -> Result<UiRegistration, ConfigError> {
        let ui = &self.ui;

        if !ui.enabled {
            return Err(ConfigError::UiDisabled);
        }

        let context_root = ui
            .url_context_root
            .as_deref()
            .ok_or(ConfigError::MissingField("contextRoot"))?;
        let default_dir = ui
            .default_dir
            .as_deref()
            .ok_or(ConfigError::MissingField("default directory"))?;
        let extension_dir = ui
            .extension_dir
            .as_deref()
            .ok_or(ConfigError::MissingField("extension directory"))?;

        if ui.copy_chunk_size == 0 {
            return Err(ConfigError::InvalidConfig(
                "ui.copy_chunk_size must be greater than 0".to_string(),
            ));
        }

        let roots = vec![self.substitute(extension_dir), self.substitute(default_dir)];

        let (allowed_directories, allow_list_defaulted) = if ui.allowed_directories.is_empty() {
            (roots.clone(), true)
        } else {
            let allowed = ui
                .allowed_directories
                .iter()
                .map(|dir| self.substitute(dir))
                .collect();
            (allowed, false)
        };

        Ok(UiRegistration {
            context_root: normalize_context_root(context_root),
            roots,
            allowed_directories,
            allow_list_defaulted,
            excluded_prefixes: ui
                .excluded_prefixes
                .iter()
                .map(|prefix| prepend_slash(prefix))
                .collect(),
            default_document: ui.default_document.trim_start_matches('/').to_string(),
            copy_chunk_size: ui.copy_chunk_size,
            streaming_threshold: ui.streaming_threshold_kb.saturating_mul(1024),
        })
    }

    pub fn substitute(&self, value: &str) -> String {
        substitute_vars(value, &self.properties)
    }
}

/// `admin/` and `/admin` both mount at `/admin`; an empty root is `/`
fn normalize_context_root(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    prepend_slash(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_CONFIG_TEMPLATE;

    fn template() -> Config {
        toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap()
    }

    #[test]
    fn test_template_registers() {
        let registration = template().ui_registration().unwrap();

        assert_eq!(registration.context_root, "/");
        assert_eq!(
            registration.roots,
            vec!["./ui/extension".to_string(), "./ui/default".to_string()]
        );
        assert_eq!(registration.allowed_directories, vec!["./ui".to_string()]);
        assert!(!registration.allow_list_defaulted);
        assert_eq!(registration.excluded_prefixes, vec!["/system/console".to_string()]);
        assert_eq!(registration.default_document, "index.html");
        assert_eq!(registration.copy_chunk_size, 1024);
        assert_eq!(registration.streaming_threshold, 256 * 1024);
    }

    #[test]
    fn test_disabled_ui() {
        let mut config = template();
        config.ui.enabled = false;
        assert!(matches!(config.ui_registration(), Err(ConfigError::UiDisabled)));
    }

    #[test]
    fn test_missing_fields() {
        let mut config = template();
        config.ui.url_context_root = None;
        assert!(matches!(
            config.ui_registration(),
            Err(ConfigError::MissingField("contextRoot"))
        ));

        let mut config = template();
        config.ui.default_dir = None;
        assert!(matches!(
            config.ui_registration(),
            Err(ConfigError::MissingField("default directory"))
        ));

        let mut config = template();
        config.ui.extension_dir = None;
        assert!(matches!(
            config.ui_registration(),
            Err(ConfigError::MissingField("extension directory"))
        ));
    }

    #[test]
    fn test_empty_allow_list_uses_roots() {
        let mut config = template();
        config.ui.allowed_directories.clear();
        let registration = config.ui_registration().unwrap();

        assert!(registration.allow_list_defaulted);
        assert_eq!(registration.allowed_directories, registration.roots);
    }

    #[test]
    fn test_context_root_normalized() {
        assert_eq!(normalize_context_root("admin/"), "/admin");
        assert_eq!(normalize_context_root("/admin"), "/admin");
        assert_eq!(normalize_context_root("/"), "/");
        assert_eq!(normalize_context_root(""), "/");
    }
}
