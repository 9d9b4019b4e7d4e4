use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype_string {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[cfg_attr(feature = "openapi", schema(value_type = String))]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance from a string value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Return the inner string as a str slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

newtype_string!(BlobId, "Identifier of a blob stored on Walrus.");
newtype_string!(ObjectId, "Identifier of a Sui ledger object (`0x`-prefixed hex).");
newtype_string!(SuiAddress, "A Sui account address (`0x`-prefixed hex).");
newtype_string!(TransactionDigest, "Digest of an executed Sui transaction.");
newtype_string!(PackageId, "Identifier of a published Move package.");

impl PackageId {
    /// Fully qualified Move target `<package>::<module>::<function>`.
    #[must_use]
    pub fn target(&self, module: &str, function: &str) -> String {
        format!("{}::{module}::{function}", self.0)
    }

    /// Fully qualified struct type `<package>::<module>::<name>`.
    #[must_use]
    pub fn struct_type(&self, module: &str, name: &str) -> String {
        format!("{}::{module}::{name}", self.0)
    }
}
