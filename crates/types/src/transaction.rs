//! The transaction as carried inside a block body.
//!
//! The block core never validates transactions; it only needs to decode them,
//! re-encode them byte-for-byte and hash their content.

use crate::{
    buffer::safe_u64, Address, DecodeError, PublicKey, Serial, SerialBuffer, Signature,
    Uint64OutOfRange,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};


/// A basic value transfer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transaction {
    sender_pub_key: PublicKey,
    recipient: Address,
    value: u64,
    fee: u64,
    nonce: u32,
    signature: Signature,
}

impl Transaction {
    /// The only encoding version understood.
    pub const VERSION: u16 = 1;
    /// The type tag of a basic transaction.
    pub const TYPE_BASIC: u8 = 0;
    /// The encoded size of everything but the signature.
    pub const CONTENT_SIZE: usize = 2 + 1 + PublicKey::SIZE + Address::SIZE + 8 + 8 + 4;
    /// The full encoded size.
    pub const SIZE: usize = Self::CONTENT_SIZE + Signature::SIZE;

    /// Assemble a transaction.
    ///
    /// Fails if `value` or `fee` cannot be carried by the wire encoding.
    pub fn new(
        sender_pub_key: PublicKey,
        recipient: Address,
        value: u64,
        fee: u64,
        nonce: u32,
        signature: Signature,
    ) -> Result<Self, Uint64OutOfRange> {
        Ok(Self {
            sender_pub_key,
            recipient,
            value: safe_u64(value)?,
            fee: safe_u64(fee)?,
            nonce,
            signature,
        })
    }

    /// The public key of the sender.
    pub fn sender_pub_key(&self) -> &PublicKey {
        &self.sender_pub_key
    }

    /// The receiving address.
    pub fn recipient(&self) -> &Address {
        &self.recipient
    }

    /// The transferred amount in the smallest unit.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The fee paid to the miner.
    pub fn fee(&self) -> u64 {
        self.fee
    }

    /// The sender's account nonce.
    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    /// The signature over the transaction content.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Write the signed content, i.e. everything but the signature.
    ///
    /// This is the form a transaction is hashed in.
    pub fn serialize_content(&self, buf: &mut SerialBuffer) {
        buf.write_u16(Self::VERSION);
        buf.write_u8(Self::TYPE_BASIC);
        self.sender_pub_key.serialize_into(buf);
        self.recipient.serialize_into(buf);
        buf.write_u64(self.value);
        buf.write_u64(self.fee);
        buf.write_u32(self.nonce);
    }

    /// The signed content in a buffer of its own.
    pub fn content(&self) -> SerialBuffer {
        let mut buf = SerialBuffer::with_capacity(Self::CONTENT_SIZE);
        self.serialize_content(&mut buf);
        buf
    }
}

impl Serial for Transaction {
    fn serialized_size(&self) -> usize {
        Self::SIZE
    }

    fn serialize_into(&self, buf: &mut SerialBuffer) {
        self.serialize_content(buf);
        self.signature.serialize_into(buf);
    }

    fn unserialize(buf: &mut SerialBuffer) -> Result<Self, DecodeError> {
        let version = buf.read_u16()?;
        if version != Self::VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        let ty = buf.read_u8()?;
        if ty != Self::TYPE_BASIC {
            return Err(DecodeError::UnsupportedTransactionType(ty));
        }
        Ok(Self {
            sender_pub_key: PublicKey::unserialize(buf)?,
            recipient: Address::unserialize(buf)?,
            value: buf.read_u64()?,
            fee: buf.read_u64()?,
            nonce: buf.read_u32()?,
            signature: Signature::unserialize(buf)?,
        })
    }
}

// Configuration files carry transactions as the base64 of their encoding.
impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(Serial::serialize(self)))
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = STANDARD.decode(s).map_err(serde::de::Error::custom)?;
        crate::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
