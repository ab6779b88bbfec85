//! Where the publisher's identity comes from.
//!
//! Credentials are resolved once, before the backend accepts any flushes.

use std::fmt;

use tracing::{info, warn};

use super::error::CredentialsError;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new<A, S>(access_key_id: A, secret_access_key: S) -> Credentials
    where
        A: Into<String>,
        S: Into<String>,
    {
        Credentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    pub fn with_session_token<T: Into<String>>(mut self, token: T) -> Credentials {
        self.session_token = Some(token.into());
        self
    }
}

// Keep secrets out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Which instance role to ask the metadata service for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleSelector {
    /// Whatever role the instance has.
    Any,
    Named(String),
}

impl fmt::Display for RoleSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RoleSelector::Any => f.write_str("any"),
            RoleSelector::Named(ref name) => f.write_str(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialSource {
    /// Leave it to the publisher's own provider chain.
    Default,
    Static(Credentials),
    InstanceRole(RoleSelector),
}

/// Looks up instance role credentials, e.g. from the EC2 metadata endpoint.
pub trait MetadataService {
    fn role_credentials(&self, role: &RoleSelector) -> Result<Credentials, CredentialsError>;
}

/// For hosts without an instance metadata endpoint.
pub struct NoMetadataService;

impl MetadataService for NoMetadataService {
    fn role_credentials(&self, _role: &RoleSelector) -> Result<Credentials, CredentialsError> {
        Err(CredentialsError::Unavailable)
    }
}

/// Resolve a credential source. `None` means the publisher should fall back
/// to its default provider chain.
pub fn resolve<M>(
    source: &CredentialSource,
    metadata: &M,
) -> Result<Option<Credentials>, CredentialsError>
where
    M: MetadataService + ?Sized,
{
    match *source {
        CredentialSource::Default => {
            info!("using default credential chain");
            Ok(None)
        }
        CredentialSource::Static(ref credentials) => {
            info!(access_key_id = %credentials.access_key_id, "using static credentials");
            Ok(Some(credentials.clone()))
        }
        CredentialSource::InstanceRole(ref role) => match metadata.role_credentials(role) {
            Ok(credentials) => {
                info!(
                    role = %role,
                    access_key_id = %credentials.access_key_id,
                    "fetched IAM role credentials"
                );
                Ok(Some(credentials))
            }
            Err(err) => {
                warn!(role = %role, error = %err, "failed to fetch IAM role credentials");
                Err(err)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeMetadata;

    impl MetadataService for FakeMetadata {
        fn role_credentials(&self, role: &RoleSelector) -> Result<Credentials, CredentialsError> {
            match *role {
                RoleSelector::Any => {
                    Ok(Credentials::new("AKIDANY", "secret").with_session_token("token"))
                }
                RoleSelector::Named(ref name) if name == "exporter" => {
                    Ok(Credentials::new("AKIDEXPORTER", "secret"))
                }
                RoleSelector::Named(ref name) => Err(CredentialsError::Lookup {
                    role: name.clone(),
                    reason: "no such role".to_string(),
                }),
            }
        }
    }

    #[test]
    fn it_defers_to_the_default_chain() {
        assert_eq!(
            resolve(&CredentialSource::Default, &FakeMetadata).unwrap(),
            None
        );
    }

    #[test]
    fn it_uses_static_credentials_as_is() {
        let credentials = Credentials::new("AKID", "secret");
        let source = CredentialSource::Static(credentials.clone());

        assert_eq!(
            resolve(&source, &NoMetadataService).unwrap(),
            Some(credentials)
        );
    }

    #[test]
    fn it_fetches_instance_role_credentials() {
        let any = CredentialSource::InstanceRole(RoleSelector::Any);
        let resolved = resolve(&any, &FakeMetadata).unwrap().unwrap();
        assert_eq!(resolved.access_key_id, "AKIDANY");
        assert_eq!(resolved.session_token.as_deref(), Some("token"));

        let named =
            CredentialSource::InstanceRole(RoleSelector::Named("exporter".to_string()));
        let resolved = resolve(&named, &FakeMetadata).unwrap().unwrap();
        assert_eq!(resolved.access_key_id, "AKIDEXPORTER");
    }

    #[test]
    fn it_fails_when_the_role_lookup_fails() {
        let named =
            CredentialSource::InstanceRole(RoleSelector::Named("missing".to_string()));
        assert!(matches!(
            resolve(&named, &FakeMetadata),
            Err(CredentialsError::Lookup { .. })
        ));

        let any = CredentialSource::InstanceRole(RoleSelector::Any);
        assert!(matches!(
            resolve(&any, &NoMetadataService),
            Err(CredentialsError::Unavailable)
        ));
    }

    #[test]
    fn it_redacts_secrets_in_debug_output() {
        let credentials =
            Credentials::new("AKID", "hunter2").with_session_token("FwoGZXIvYXdz");
        let debug = format!("{:?}", credentials);

        assert!(debug.contains("AKID"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("FwoGZXIvYXdz"));
    }
}
