//! Authentication endpoints. Token storage stays in the caller's [`Session`];
//! nothing here touches ambient state.

use reqwest::Method;
use serde_json::{json, Value};

use crate::upstream::types::{LoginResponse, OAuthRedirect};
use crate::upstream::{Session, UpstreamClient, UpstreamError};

impl UpstreamClient {
    /// Logs in and returns a session primed with the issued token pair,
    /// along with the raw user record.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Session, Value), UpstreamError> {
        let response: LoginResponse = self
            .request_json(
                &Session::anonymous(),
                Method::POST,
                "/auth/login/",
                Some(&json!({ "email": email, "password": password })),
            )
            .await?;

        let session = Session::from_tokens(response.tokens.access, Some(response.tokens.refresh));
        Ok((session, response.user))
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<Value, UpstreamError> {
        self.request_json(
            &Session::anonymous(),
            Method::POST,
            "/auth/register/",
            Some(&json!({
                "email": email,
                "password": password,
                "password_confirm": password_confirm,
            })),
        )
        .await
    }

    /// Revokes the refresh token upstream (best effort) and clears the
    /// session either way.
    pub async fn logout(&self, session: &Session) -> Result<(), UpstreamError> {
        let result = match session.refresh_token() {
            Some(refresh) => {
                self.request_empty(
                    session,
                    Method::POST,
                    "/auth/logout/",
                    Some(&json!({ "refresh": refresh })),
                )
                .await
            }
            None => Ok(()),
        };
        session.clear();
        result
    }

    pub async fn current_user(&self, session: &Session) -> Result<Value, UpstreamError> {
        let response: Value = self
            .request_json(session, Method::GET, "/auth/me/", None)
            .await?;
        // Both `{user: {...}}` and a bare user object exist in the wild.
        Ok(response.get("user").cloned().unwrap_or(response))
    }

    pub async fn oauth_redirect_url(
        &self,
        provider: &str,
        redirect_uri: &str,
    ) -> Result<String, UpstreamError> {
        let redirect: OAuthRedirect = self
            .request_json(
                &Session::anonymous(),
                Method::GET,
                &format!(
                    "/auth/oauth/redirect/?provider={provider}&redirect_uri={}",
                    urlencode(redirect_uri)
                ),
                None,
            )
            .await?;
        Ok(redirect.auth_url)
    }
}

/// Minimal percent-encoding for a query component.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode_reserved_characters() {
        assert_eq!(
            urlencode("https://app.example/cb?x=1&y=2"),
            "https%3A%2F%2Fapp.example%2Fcb%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_urlencode_unreserved_passthrough() {
        assert_eq!(urlencode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
    }
}
