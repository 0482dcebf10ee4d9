//! Fixed-width byte values and their base64 text form.

use crate::{DecodeError, ParseError, Serial, SerialBuffer};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use core::{fmt, str::FromStr};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// The encoded length in bytes.
            pub const SIZE: usize = $len;

            /// Parse a value from padded, standard-alphabet base64.
            pub fn from_base64(s: &str) -> Result<Self, ParseError> {
                let bytes = STANDARD.decode(s)?;
                let array = <[u8; $len]>::try_from(bytes.as_slice()).map_err(|_| {
                    ParseError::Length {
                        expected: $len,
                        found: bytes.len(),
                    }
                })?;
                Ok(Self(array))
            }

            /// The padded, standard-alphabet base64 form.
            pub fn to_base64(&self) -> String {
                STANDARD.encode(self.0)
            }

            /// The raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_base64())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_base64(s)
            }
        }

        impl Serial for $name {
            fn serialized_size(&self) -> usize {
                Self::SIZE
            }

            fn serialize_into(&self, buf: &mut SerialBuffer) {
                buf.write_bytes(&self.0);
            }

            fn unserialize(buf: &mut SerialBuffer) -> Result<Self, DecodeError> {
                buf.read_array().map(Self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_base64())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// A 32 byte hash, used for block identity and for the commitments in a header.
    Hash,
    32
);

fixed_bytes!(
    /// A 20 byte account address.
    Address,
    20
);

fixed_bytes!(
    /// The uncompressed public key of a transaction sender.
    PublicKey,
    64
);

fixed_bytes!(
    /// A transaction signature.
    Signature,
    64
);

impl Hash {
    /// The all-zero hash, used as the previous-hash of the genesis block.
    pub const ZERO: Self = Self([0; 32]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_round_trip() {
        let s = "AACIm7qoV7ybhlwQMvJrqjzSt5RJtq5++xi8jg91jfU=";
        let hash: Hash = s.parse().unwrap();
        assert_eq!(hash.0[..3], [0x00, 0x00, 0x88]);
        assert_eq!(hash.to_string(), s);
    }

    #[test]
    fn wrong_length_is_rejected() {
        // A valid address is not a valid hash.
        let err = Hash::from_base64("kekkD0FSI5gu3DRVMmMHEOlKf1I=").unwrap_err();
        assert_eq!(
            err,
            ParseError::Length {
                expected: 32,
                found: 20
            }
        );
        assert!(matches!(
            Address::from_base64("not base64!"),
            Err(ParseError::Base64(_))
        ));
    }

    #[test]
    fn serde_uses_base64() {
        let addr = Address::from_base64("kekkD0FSI5gu3DRVMmMHEOlKf1I=").unwrap();
        let yml = serde_yaml::to_string(&addr).unwrap();
        assert!(yml.contains("kekkD0FSI5gu3DRVMmMHEOlKf1I="));
        let parsed: Address = serde_yaml::from_str(&yml).unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn zero_hash() {
        assert_eq!(
            Hash::ZERO.to_base64(),
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="
        );
    }
}
