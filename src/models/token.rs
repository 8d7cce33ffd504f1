use serde::{Deserialize, Serialize};

/// The credential-exchange response from `POST /auth/login`.
///
/// The token is opaque to the client: it is stored verbatim and attached as
/// a bearer header. Validity is only ever confirmed by a profile fetch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
