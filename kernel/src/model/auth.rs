/// Bearer token issued by the external identity service and stored in the
/// shared key-value store.
pub struct AccessToken(pub String);
