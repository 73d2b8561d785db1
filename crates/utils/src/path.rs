use crate::UtilsError;
use percent_encoding::percent_decode_str;

/// Converts Windows separators to `/`
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

pub fn prepend_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Percent-decodes a raw URI path.
/// Decoded NUL bytes are rejected since no filesystem path can hold them.
pub fn decode_path(raw: &str) -> Result<String, UtilsError> {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| UtilsError::PathConversionError(e.to_string()))?;

    if decoded.contains('\0') {
        return Err(UtilsError::PathError("Path contains null byte".to_string()));
    }

    Ok(decoded.into_owned())
}
