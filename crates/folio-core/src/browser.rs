//! Browser capability detection for the logout fallback.
//!
//! Nothing outside [`crate::client::NotebookClient::logout`] consults this
//! module. Basic-auth sessions cannot be dropped by the server alone, so the
//! client has to pick a browser-specific trick to forget cached credentials.

/// What the client environment can do to forget cached basic-auth credentials.
pub trait BrowserCapabilities: Send + Sync {
    /// Major version when running on Internet Explorer or legacy Edge.
    fn legacy_ie_version(&self) -> Option<u32>;

    /// Ask the environment to drop its authentication cache. Returns whether
    /// the request was honoured.
    fn clear_authentication_cache(&self) -> bool {
        false
    }
}

/// How the second logout attempt defeats cached credentials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutFallback {
    /// The environment cleared its own authentication cache.
    ClearAuthenticationCache,
    /// A throwaway `HEAD` request with bogus credentials replaced the cache.
    OverwriteCachedCredentials,
    /// The logout URL carried `false:false` userinfo.
    CredentialBusting,
}

/// Capabilities derived from a `User-Agent` string.
#[derive(Debug, Clone, Default)]
pub struct UserAgentCapabilities {
    user_agent: String,
}

impl UserAgentCapabilities {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl BrowserCapabilities for UserAgentCapabilities {
    fn legacy_ie_version(&self) -> Option<u32> {
        detect_legacy_ie(&self.user_agent)
    }
}

/// Detect Internet Explorer (MSIE / Trident) and legacy Edge from a UA string.
///
/// ```
/// use folio_core::browser::detect_legacy_ie;
///
/// let ua = "Mozilla/5.0 (Windows NT 6.1; Trident/7.0; rv:11.0) like Gecko";
/// assert_eq!(detect_legacy_ie(ua), Some(11));
/// ```
#[must_use]
pub fn detect_legacy_ie(user_agent: &str) -> Option<u32> {
    if let Some(index) = user_agent.find("MSIE ") {
        return major_version(&user_agent[index + "MSIE ".len()..]);
    }

    if user_agent.contains("Trident/") {
        let index = user_agent.find("rv:")?;
        return major_version(&user_agent[index + "rv:".len()..]);
    }

    if let Some(index) = user_agent.find("Edge/") {
        return major_version(&user_agent[index + "Edge/".len()..]);
    }

    None
}

fn major_version(rest: &str) -> Option<u32> {
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
