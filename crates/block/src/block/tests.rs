use super::*;
use lumen_types::{DecodeError, PublicKey, Signature};

fn test_transaction(seed: u8) -> Transaction {
    Transaction::new(
        PublicKey([seed; 64]),
        Address([seed.wrapping_add(1); 20]),
        u64::from(seed) * 1_000,
        u64::from(seed),
        u32::from(seed),
        Signature([seed.wrapping_add(2); 64]),
    )
    .unwrap()
}

fn test_block(n_txs: u8) -> Block {
    let body = Body::new(Address([7; 20]), (0..n_txs).map(test_transaction).collect()).unwrap();
    let header = Header::new(
        Hash([1; 32]),
        body.hash(),
        Hash([2; 32]),
        0x1f00_ffff,
        42,
        1_500_000_000,
        123_456,
    )
    .unwrap();
    Block::new(header, body)
}

#[test]
fn round_trip() {
    for n_txs in [0, 1, 3] {
        let block = test_block(n_txs);
        let buf = block.serialize();
        let decoded = Block::from_bytes(buf.as_bytes()).unwrap();
        assert_eq!(decoded, block);
        assert_eq!(decoded.serialized_size(), block.serialized_size());
        assert_eq!(decoded.prev_hash(), block.prev_hash());
        assert_eq!(decoded.body_hash(), block.body_hash());
        assert_eq!(decoded.accounts_hash(), block.accounts_hash());
        assert_eq!(decoded.n_bits(), block.n_bits());
        assert_eq!(decoded.height(), 42);
        assert_eq!(decoded.timestamp(), 1_500_000_000);
        assert_eq!(decoded.nonce(), 123_456);
        assert_eq!(decoded.miner_addr(), block.miner_addr());
        assert_eq!(decoded.transactions(), block.transactions());
        assert_eq!(decoded.transaction_count(), usize::from(n_txs));
    }
}

#[test]
fn encoding_is_deterministic() {
    let block = test_block(2);
    assert_eq!(block.serialize(), block.serialize());
    assert_eq!(block.clone().serialize(), block.serialize());
}

#[test]
fn serialized_size_matches_encoding() {
    for n_txs in [0, 1, 5] {
        let block = test_block(n_txs);
        let expected = Header::SIZE + Address::SIZE + 2 + usize::from(n_txs) * Transaction::SIZE;
        assert_eq!(block.serialized_size(), expected);
        assert_eq!(block.serialize().len(), expected);
    }
}

#[test]
fn serialize_into_appends_after_existing_bytes() {
    let block = test_block(1);
    let mut buf = SerialBuffer::from(vec![0xaa, 0xbb]);
    block.serialize_into(&mut buf);
    assert_eq!(&buf.as_bytes()[..2], &[0xaa, 0xbb]);
    assert_eq!(&buf.as_bytes()[2..], block.serialize().as_bytes());
}

#[test]
fn unserialize_leaves_trailing_bytes() {
    let block = test_block(1);
    let mut bytes = block.serialize().into_bytes();
    bytes.extend([9, 9, 9]);

    let mut buf = SerialBuffer::from(bytes.clone());
    let decoded = Block::unserialize(&mut buf).unwrap();
    assert_eq!(decoded, block);
    assert_eq!(buf.read_pos(), block.serialized_size());
    assert_eq!(buf.remaining(), 3);
    assert_eq!(buf.read_u8().unwrap(), 9);

    assert_eq!(
        Block::from_bytes(&bytes),
        Err(BlockDecodeError::TrailingBytes(3))
    );
}

#[test]
fn malformed_header() {
    let mut bytes = test_block(0).serialize().into_bytes();
    // Version 2.
    bytes[1] = 2;
    assert_eq!(
        Block::from_bytes(&bytes),
        Err(BlockDecodeError::MalformedHeader(
            DecodeError::UnsupportedVersion(2)
        ))
    );

    let bytes = test_block(0).serialize().into_bytes();
    assert_eq!(
        Block::from_bytes(&bytes[..Header::SIZE - 1]),
        Err(BlockDecodeError::MalformedHeader(
            DecodeError::UnexpectedEnd {
                needed: 8,
                remaining: 7
            }
        ))
    );
}

#[test]
fn malformed_body() {
    let block = test_block(2);
    let bytes = block.serialize().into_bytes();
    let truncated = &bytes[..bytes.len() - 1];
    match Block::from_bytes(truncated) {
        Err(BlockDecodeError::MalformedBody(DecodeError::UnexpectedEnd { .. })) => (),
        other => panic!("expected a malformed body, found {other:?}"),
    }

    // A body claiming more transactions than it holds.
    let mut bytes = test_block(1).serialize().into_bytes();
    let count_pos = Header::SIZE + Address::SIZE;
    bytes[count_pos + 1] = 2;
    assert!(matches!(
        Block::from_bytes(&bytes),
        Err(BlockDecodeError::MalformedBody(_))
    ));
}

#[tokio::test]
async fn hash_is_deterministic_and_cached() {
    let block = test_block(2);
    assert_eq!(block.cached_hash(), None);
    let first = block.hash().await.unwrap();
    assert_eq!(block.cached_hash(), Some(first));
    let second = block.hash().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, block.header().compute_hash());

    // A decoded copy computes the same identity.
    let decoded = Block::from_bytes(block.serialize().as_bytes()).unwrap();
    assert_eq!(decoded.hash().await.unwrap(), first);
}

#[tokio::test]
async fn hash_covers_header_only() {
    let block = test_block(1);
    let (header, _body) = block.clone().into_parts();
    // Same header, different body: the body only enters through `body_hash`.
    let other = Block::new(header, Body::new(Address([8; 20]), vec![]).unwrap());
    assert_eq!(block.hash().await.unwrap(), other.hash().await.unwrap());
    assert_ne!(block, other);

    let different = test_block(2);
    assert_ne!(block.hash().await.unwrap(), different.hash().await.unwrap());
}

#[tokio::test]
async fn equality_ignores_cached_hash() {
    let a = test_block(1);
    let b = a.clone();
    a.hash().await.unwrap();
    assert!(a.cached_hash().is_some());
    assert!(b.cached_hash().is_none());
    assert_eq!(a, b);
}

#[test]
fn derived_target_and_difficulty() {
    let block = test_block(0);
    assert_eq!(block.target(), crate::target::BLOCK_TARGET_MAX);
    assert_eq!(block.difficulty(), 1.0);
}

#[test]
fn nonce_out_of_range() {
    let err = Header::new(
        Hash::ZERO,
        Hash::ZERO,
        Hash::ZERO,
        0x1f00_ffff,
        1,
        0,
        lumen_types::MAX_SAFE_U64 + 1,
    )
    .unwrap_err();
    assert_eq!(err.0, lumen_types::MAX_SAFE_U64 + 1);
}

#[test]
fn serde_round_trip() {
    let block = test_block(2);
    let yml = serde_yaml::to_string(&block).unwrap();
    let parsed: Block = serde_yaml::from_str(&yml).unwrap();
    assert_eq!(parsed, block);
}
