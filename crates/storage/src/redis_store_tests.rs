// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

/// RESP encoding of a command given as bulk strings
fn resp(args: &[&str]) -> Vec<u8> {
    let mut out = format!("*{}\r\n", args.len()).into_bytes();
    for arg in args {
        out.extend_from_slice(format!("${}\r\n{}\r\n", arg.len(), arg).as_bytes());
    }
    out
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
}

#[test]
fn push_front_is_lpush() {
    let op = StoreOp::PushFront { key: "job:id".into(), value: "42".into() };
    assert_eq!(op_command(&op).get_packed_command(), resp(&["LPUSH", "job:id", "42"]));
}

#[test]
fn hash_write_is_hset_with_all_pairs() {
    let op = StoreOp::HashWrite {
        key: "job:id:42".into(),
        fields: vec![("id".into(), "42".into()), ("worker".into(), "w1".into())],
    };
    assert_eq!(
        op_command(&op).get_packed_command(),
        resp(&["HSET", "job:id:42", "id", "42", "worker", "w1"])
    );
}

#[test]
fn expire_at_is_pexpireat_in_ms() {
    let op = StoreOp::ExpireAt { key: "job:id:42".into(), at_ms: 1_700_000_000_123 };
    assert_eq!(
        op_command(&op).get_packed_command(),
        resp(&["PEXPIREAT", "job:id:42", "1700000000123"])
    );
}

#[yare::parameterized(
    add  = { StoreOp::SortedSetAdd { key: "job:tag".into(), member: "EmailDigest".into(), score: 0.0 }, "ZADD" },
    incr = { StoreOp::SortedSetIncr { key: "job:tag:counts".into(), member: "EmailDigest".into(), by: 1.0 }, "ZINCRBY" },
)]
fn sorted_set_ops_name_key_and_member(op: StoreOp, verb: &str) {
    let packed = op_command(&op).get_packed_command();
    assert!(packed.starts_with(format!("*4\r\n${}\r\n{}\r\n", verb.len(), verb).as_bytes()));
    assert!(contains(&packed, op.key()));
    assert!(contains(&packed, "EmailDigest"));
}

#[test]
fn reindex_is_sort_nosort_get_store() {
    assert_eq!(
        reindex_command("job:id", "job:id:*", "id").get_packed_command(),
        resp(&["SORT", "job:id", "BY", "nosort", "GET", "job:id:*->id", "STORE", "job:id"])
    );
}

#[test]
fn empty_hash_write_is_skipped() {
    assert!(is_empty_hash_write(&StoreOp::HashWrite { key: "h".into(), fields: vec![] }));
    assert!(!is_empty_hash_write(&StoreOp::PushFront { key: "l".into(), value: "".into() }));
}
