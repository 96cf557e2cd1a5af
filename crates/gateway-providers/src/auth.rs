//! Credential placement shared by all adapters.

use gateway_core::{AuthScheme, WireRequest};
use secrecy::{ExposeSecret, SecretString};
use url::form_urlencoded;

/// Attach the credential to a request according to the scheme
pub(crate) fn authorize(
    mut request: WireRequest,
    scheme: &AuthScheme,
    credential: &SecretString,
) -> WireRequest {
    let key = credential.expose_secret();

    match scheme {
        AuthScheme::Bearer => {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {key}")));
        }
        AuthScheme::Header { name } => {
            request.headers.push((name.clone(), key.clone()));
        }
        AuthScheme::QueryParam { name } => {
            let pair = form_urlencoded::Serializer::new(String::new())
                .append_pair(name, key)
                .finish();
            let separator = if request.url.contains('?') { '&' } else { '?' };
            request.url = format!("{}{separator}{pair}", request.url);
        }
    }

    request
}
