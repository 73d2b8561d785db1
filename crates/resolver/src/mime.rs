/// Source of content types supplied by the hosting environment
pub trait MimeRegistry: Send + Sync {
    fn mime_type(&self, resource_name: &str) -> Option<String>;
}

/// Extension based lookup through `mime_guess`
#[derive(Debug, Clone, Copy, Default)]
pub struct GuessRegistry;

impl MimeRegistry for GuessRegistry {
    fn mime_type(&self, resource_name: &str) -> Option<String> {
        mime_guess::from_path(resource_name)
            .first()
            .map(|mime| mime.to_string())
    }
}

/// Built-in table used when the registry has no answer
pub fn fallback_mime_type(resource_name: &str) -> Option<&'static str> {
    const TABLE: [(&str, &str); 4] = [
        (".css", "text/css"),
        (".js", "application/javascript"),
        (".png", "image/png"),
        (".html", "text/html"),
    ];

    TABLE
        .iter()
        .find(|(extension, _)| resource_name.ends_with(extension))
        .map(|(_, mime)| *mime)
}

/// Registry first, then the built-in table, otherwise no content type
pub fn content_type(registry: &dyn MimeRegistry, resource_name: &str) -> Option<String> {
    registry
        .mime_type(resource_name)
        .or_else(|| fallback_mime_type(resource_name).map(str::to_string))
}
