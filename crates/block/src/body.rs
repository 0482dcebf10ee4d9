//! The block body and its encoding.

use crate::TooManyTransactions;
use lumen_types::{Address, DecodeError, Hash, Serial, SerialBuffer, Transaction};
use serde::{Deserialize, Deserializer, Serialize};

/// The miner address and the ordered transactions of a block.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Body {
    miner_addr: Address,
    #[serde(deserialize_with = "deserialize_transactions")]
    transactions: Vec<Transaction>,
}

impl Body {
    /// Assemble a body.
    ///
    /// Fails if the transactions do not fit the `u16` count prefix.
    pub fn new(
        miner_addr: Address,
        transactions: Vec<Transaction>,
    ) -> Result<Self, TooManyTransactions> {
        check_count(transactions.len())?;
        Ok(Self {
            miner_addr,
            transactions,
        })
    }

    /// The address receiving the block reward.
    pub fn miner_addr(&self) -> &Address {
        &self.miner_addr
    }

    /// The transactions in block order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// The merkle root over the miner address followed by the content of each
    /// transaction. A header commits to its body through this value.
    pub fn hash(&self) -> Hash {
        let leaves: Vec<Hash> = Some(lumen_hash::hash(&self.miner_addr))
            .into_iter()
            .chain(
                self.transactions
                    .iter()
                    .map(|tx| lumen_hash::hash_bytes(tx.content().as_bytes())),
            )
            .collect();
        lumen_hash::merkle_root(&leaves)
    }
}

impl Serial for Body {
    fn serialized_size(&self) -> usize {
        Address::SIZE
            + 2
            + self
                .transactions
                .iter()
                .map(Serial::serialized_size)
                .sum::<usize>()
    }

    fn serialize_into(&self, buf: &mut SerialBuffer) {
        self.miner_addr.serialize_into(buf);
        // Checked on construction.
        buf.write_u16(self.transactions.len() as u16);
        for tx in &self.transactions {
            tx.serialize_into(buf);
        }
    }

    fn unserialize(buf: &mut SerialBuffer) -> Result<Self, DecodeError> {
        let miner_addr = Address::unserialize(buf)?;
        let count = buf.read_u16()?;
        let transactions = (0..count)
            .map(|_| Transaction::unserialize(buf))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            miner_addr,
            transactions,
        })
    }
}

fn check_count(count: usize) -> Result<(), TooManyTransactions> {
    if count > usize::from(u16::MAX) {
        return Err(TooManyTransactions(count));
    }
    Ok(())
}

fn deserialize_transactions<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Transaction>, D::Error> {
    let transactions = Vec::<Transaction>::deserialize(deserializer)?;
    check_count(transactions.len()).map_err(serde::de::Error::custom)?;
    Ok(transactions)
}
