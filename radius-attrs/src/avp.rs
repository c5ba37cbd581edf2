//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The attribute-value pair (AVP) input list (`spec.md` §3.3).
//!
//! AVPs are produced externally and are read-only during encoding: the
//! encoder only ever walks the list via `&Avp` references and advances the
//! caller's cursor, it never mutates an AVP.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use derive_new::new;
use ipnetwork::{Ipv4Network, Ipv6Network};

use crate::dictionary::Dict;

// The value carried by one AVP, stored in the natural form for its
// attribute's `ValueKind`.
#[derive(Clone, Debug)]
pub enum Value<'a> {
    String(&'a str),
    Octets(&'a [u8]),
    Ipv4Addr(Ipv4Addr),
    Ipv6Addr(Ipv6Addr),
    Ipv4Prefix(Ipv4Network),
    Ipv6Prefix(Ipv6Network),
    InterfaceId([u8; 8]),
    Ethernet([u8; 6]),
    Abinary(&'a [u8]),
    ComboIp(IpAddr),
    Byte(u8),
    Short(u16),
    Integer(u32),
    Integer64(u64),
    Date(u32),
    Signed(i32),
    Boolean(bool),
}

// One attribute-value pair: a descriptor reference, its value, an optional
// tag, and a link to the next sibling in encoding order.
//
// `new()` (via `derive_new`) takes just `dict`/`value`, defaulting `tag`
// and `next` the same way the teacher's packet types default trailing
// optional fields.
#[derive(Clone, Debug, new)]
pub struct Avp<'a> {
    pub dict: &'static Dict,
    pub value: Value<'a>,
    #[new(default)]
    pub tag: Option<u8>,
    #[new(default)]
    pub next: Option<&'a Avp<'a>>,
}

impl<'a> Avp<'a> {
    /// Constructs a tagged AVP with no successor.
    pub fn tagged(dict: &'static Dict, value: Value<'a>, tag: u8) -> Avp<'a> {
        Avp {
            dict,
            value,
            tag: Some(tag),
            next: None,
        }
    }

    /// Returns this AVP with `next` set, for chaining list construction.
    pub fn followed_by(mut self, next: &'a Avp<'a>) -> Avp<'a> {
        self.next = Some(next);
        self
    }

    /// The tag to encode, if `dict.flags.has_tag` and the carried tag is in
    /// the valid range 1..=31 (`spec.md` §3.3).
    pub fn valid_tag(&self) -> Option<u8> {
        self.tag.filter(|&tag| (1..=31).contains(&tag))
    }
}
