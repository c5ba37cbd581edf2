//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Small helpers for writing network-order values into a caller-owned
//! `&mut [u8]`, plus the thread-local scratch region `spec.md` §6.2's
//! "thread-local bootstrap for the network-order scratch buffer" calls for.
//!
//! Grounded on `holo_utils::bytes`'s `BytesMutExt`, adapted from a growable
//! `BytesMut` target to a bounded caller-owned slice, since the encoder must
//! be able to stop mid-attribute and report what fit (`spec.md` §3.6).

use std::cell::RefCell;
use std::net::{Ipv4Addr, Ipv6Addr};

// Largest single value representation the encoder ever stages: a padded
// User-Password/Tunnel-Password plaintext block (128 octets) plus room for
// the MD5 chaining inputs.
const SCRATCH_LEN: usize = 256;

thread_local!(
    pub static TLS_SCRATCH: RefCell<[u8; SCRATCH_LEN]> =
        const { RefCell::new([0; SCRATCH_LEN]) }
);

// Extension methods for writing big-endian values at the front of a slice.
pub trait BufMutExt {
    /// Writes an unsigned 24-bit integer in big-endian order into the first
    /// 3 octets of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `self.len() < 3`.
    fn put_u24(&mut self, n: u32);

    /// Writes an IPv4 address into the first 4 octets of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `self.len() < 4`.
    fn put_ipv4(&mut self, addr: Ipv4Addr);

    /// Writes an IPv6 address into the first 16 octets of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `self.len() < 16`.
    fn put_ipv6(&mut self, addr: Ipv6Addr);
}

impl BufMutExt for [u8] {
    fn put_u24(&mut self, n: u32) {
        let b = n.to_be_bytes();
        self[..3].copy_from_slice(&b[1..=3]);
    }

    fn put_ipv4(&mut self, addr: Ipv4Addr) {
        self[..4].copy_from_slice(&addr.octets());
    }

    fn put_ipv6(&mut self, addr: Ipv6Addr) {
        self[..16].copy_from_slice(&addr.octets());
    }
}
