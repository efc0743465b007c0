use std::borrow::Cow;

use serde::Serialize;

/// Fixed EIP-712 domain fields shared by every signature of an application.
///
/// The template carries no chain id; [`DomainTemplate::descriptor`] produces a fresh
/// [`DomainDescriptor`] per call instead of patching shared state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainTemplate {
    pub name: Cow<'static, str>,
    pub version: Cow<'static, str>,
    pub verifying_contract: Cow<'static, str>,
    pub salt: Cow<'static, str>,
}

/// Greenfield transaction domain.
pub const GREENFIELD_DOMAIN: DomainTemplate = DomainTemplate {
    name: Cow::Borrowed("Greenfield Tx"),
    version: Cow::Borrowed("1.0.0"),
    verifying_contract: Cow::Borrowed("greenfield"),
    salt: Cow::Borrowed("0"),
};

impl DomainTemplate {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        version: impl Into<Cow<'static, str>>,
        verifying_contract: impl Into<Cow<'static, str>>,
        salt: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            verifying_contract: verifying_contract.into(),
            salt: salt.into(),
        }
    }

    pub fn descriptor(&self, chain_id: u64) -> DomainDescriptor {
        DomainDescriptor {
            name: self.name.to_string(),
            version: self.version.to_string(),
            chain_id,
            verifying_contract: self.verifying_contract.to_string(),
            salt: self.salt.to_string(),
        }
    }
}

impl Default for DomainTemplate {
    fn default() -> Self {
        GREENFIELD_DOMAIN
    }
}

/// The `domain` section of a typed-data document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDescriptor {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: String,
    pub salt: String,
}
