use crate::error::ServerNameError;

/// Decode the server number from a name such as `"United States #1234"`.
///
/// The number is everything after the first `#`: plain ASCII digits only,
/// no sign, fitting in a `u16`.
pub fn parse_server_name(name: &str) -> Result<u16, ServerNameError> {
    let (_, id) = name.split_once('#').ok_or_else(|| ServerNameError::NoId {
        name: name.to_string(),
    })?;

    id.bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| id.parse::<u16>().ok())
        .flatten()
        .ok_or_else(|| ServerNameError::InvalidId {
            name: name.to_string(),
        })
}
