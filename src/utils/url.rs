//! Endpoint URL construction.

/// Join a backend base URL and an endpoint path without producing double
/// slashes, whatever combination of trailing/leading slashes the inputs
/// carry.
///
/// # Examples
///
/// ```
/// use ponte::utils::url::join_url;
///
/// assert_eq!(
///     join_url("https://api.openai.com/v1/", "chat/completions"),
///     "https://api.openai.com/v1/chat/completions"
/// );
/// ```
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
