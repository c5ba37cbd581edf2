//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! MD5-chain keystreams for attribute value encryption (C1).
//!
//! Grounded on `holo_isis::packet::auth`/`holo_ospf::packet::auth` for the
//! `md5::Md5` + `Digest` idiom, and on `holo_rip::output`'s
//! `rand::rng().random_range(..)` for the Tunnel-Password salt's CSPRNG
//! bits. The MD5 primitive itself is a consumed collaborator (`spec.md`
//! §6.2); this module never reimplements MD5, only drives it.

use std::sync::atomic::{AtomicU8, Ordering};

use md5::{Digest, Md5};
use rand::Rng;

fn md5_secret_then(secret: &[u8], extra: &[u8]) -> [u8; 16] {
    let mut hasher = Md5::new();
    hasher.update(secret);
    hasher.update(extra);
    hasher.finalize().into()
}

/// C1.1 — RFC 2865 §5.2 User-Password keystream.
///
/// `data` is XORed in place with the MD5 chain `b_i = MD5(secret ||
/// c_{i-1})` (`c_0` = `authenticator`), 16 octets per block. Callers must
/// already have padded `data` to a multiple of 16 octets (`spec.md` §4.9
/// step 5).
pub fn user_password_crypt(
    secret: &[u8],
    authenticator: &[u8; 16],
    data: &mut [u8],
) {
    md5_chain_crypt(secret, authenticator, data);
}

/// C1.2 — RFC 2868 Tunnel-Password keystream.
///
/// Identical recurrence to [`user_password_crypt`], except the first block
/// is computed over `secret || authenticator || salt` instead of just
/// `secret || authenticator`.
///
/// `spec.md` §9 open question: the final block's XOR region is capped at
/// whatever room remains in `data`, which may be short of 16 octets — the
/// keystream is then only partially applied. This is matched exactly rather
/// than "fixed", for interop with the documented source behavior.
pub fn tunnel_password_crypt(
    secret: &[u8],
    authenticator: &[u8; 16],
    salt: &[u8; 2],
    data: &mut [u8],
) {
    if data.is_empty() {
        return;
    }

    let mut hasher = Md5::new();
    hasher.update(secret);
    hasher.update(authenticator);
    hasher.update(salt);
    let b: [u8; 16] = hasher.finalize().into();

    let n = data.len().min(16);
    xor_block(&mut data[..n], &b[..n]);

    if data.len() > 16 {
        // `c_0` for the remaining blocks is the ciphertext just written.
        let mut prev = [0u8; 16];
        prev.copy_from_slice(&data[..16]);
        md5_chain_crypt(secret, &prev, &mut data[16..]);
    }
}

// Shared chain: `b_i = MD5(secret || prev)`, XOR into the next up-to-16
// octets, `prev` becomes the ciphertext just produced, repeat.
fn md5_chain_crypt(secret: &[u8], seed: &[u8; 16], data: &mut [u8]) {
    let mut prev = *seed;
    let mut offset = 0;
    while offset < data.len() {
        let b = md5_secret_then(secret, &prev);
        let end = (offset + 16).min(data.len());
        xor_block(&mut data[offset..end], &b[..end - offset]);

        let mut next_prev = [0u8; 16];
        next_prev[..end - offset].copy_from_slice(&data[offset..end]);
        prev = next_prev;
        offset = end;
    }
}

fn xor_block(data: &mut [u8], keystream: &[u8]) {
    for (byte, k) in data.iter_mut().zip(keystream) {
        *byte ^= k;
    }
}

/// C1.3 — Ascend-Secret: `out = MD5(secret || authenticator) XOR input`,
/// a single 16-octet block (`fr_radius_make_secret`, per the collaborator
/// layout documented in `spec.md` §4.10).
pub fn ascend_secret_crypt(
    secret: &[u8],
    authenticator: &[u8; 16],
    input: &[u8; 16],
) -> [u8; 16] {
    let b = md5_secret_then(secret, authenticator);
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = input[i] ^ b[i];
    }
    out
}

// Process-wide salt counter (`spec.md` §5, §4.10): only the low 4 bits are
// observable in the salt, so wraparound is benign and `Relaxed` ordering
// suffices — the counter only diversifies salts.
static SALT_COUNTER: AtomicU8 = AtomicU8::new(0);

/// Generates a Tunnel-Password salt: byte 0 has its MSB forced, with bits
/// 3..6 taken from the monotonic counter and the low 3 bits from the
/// CSPRNG; byte 1 is fully CSPRNG (`spec.md` §4.10).
pub fn gen_salt() -> [u8; 2] {
    let counter = SALT_COUNTER.fetch_add(1, Ordering::Relaxed) & 0x0f;
    let mut rng = rand::rng();
    let low_bits: u8 = rng.random_range(0..=0x07);
    let byte0 = 0x80 | (counter << 3) | low_bits;
    let byte1: u8 = rng.random_range(0..=u8::MAX);
    [byte0, byte1]
}
