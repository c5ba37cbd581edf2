//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#[macro_export]
macro_rules! assert_eq_hex {
    ($left:expr, $right:expr) => {
        if $left != $right {
            panic!(
                "assertion `left == right` failed\n  left: [{}]\n right: [{}]",
                $left
                    .iter()
                    .map(|b| format!("0x{:02x}", b))
                    .collect::<Vec<_>>()
                    .join(", "),
                $right
                    .iter()
                    .map(|b| format!("0x{:02x}", b))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    };
}

mod extended;
mod rfc;
mod vsa;
mod wimax;

use radius_attrs::dictionary::{AttrFlags, Dict, EncryptKind, Kind, ValueKind};
use radius_attrs::PacketCtx;

//
// Shared dictionary fixtures.
//

pub(crate) static USER_NAME: Dict = Dict::leaf(
    1,
    "User-Name",
    ValueKind::String,
    AttrFlags::empty(),
    EncryptKind::None,
);

pub(crate) static USER_PASSWORD: Dict = Dict::leaf(
    2,
    "User-Password",
    ValueKind::Octets,
    AttrFlags::empty(),
    EncryptKind::UserPassword,
);

pub(crate) static CHARGEABLE_USER_IDENTITY: Dict = Dict::leaf(
    89,
    "Chargeable-User-Identity",
    ValueKind::String,
    AttrFlags::empty(),
    EncryptKind::None,
);

pub(crate) static MESSAGE_AUTHENTICATOR: Dict = Dict::leaf(
    80,
    "Message-Authenticator",
    ValueKind::Octets,
    AttrFlags::empty(),
    EncryptKind::None,
);

pub(crate) static CONCAT_OCTETS: Dict = Dict::leaf(
    25,
    "Concat-Octets",
    ValueKind::Octets,
    AttrFlags::CONCAT,
    EncryptKind::None,
);

pub(crate) static TUNNEL_PASSWORD: Dict = Dict::leaf(
    69,
    "Tunnel-Password",
    ValueKind::Octets,
    AttrFlags::HAS_TAG,
    EncryptKind::TunnelPassword,
);

pub(crate) static ASCEND_SECRET_TEST: Dict = Dict::leaf(
    100,
    "Ascend-Secret-Test",
    ValueKind::Octets,
    AttrFlags::empty(),
    EncryptKind::AscendSecret,
);

//
// Helper functions.
//

pub(crate) fn request_ctx(secret: &str, authenticator: [u8; 16]) -> PacketCtx<'_> {
    PacketCtx::new(radius_attrs::packet::CODE_ACCESS_REQUEST, authenticator, secret)
}

pub(crate) fn accept_ctx(secret: &str, authenticator: [u8; 16]) -> PacketCtx<'_> {
    PacketCtx::new(radius_attrs::packet::CODE_ACCESS_ACCEPT, authenticator, secret)
}

/// A leaf `Dict` one level beneath a TLV/VSA/Extended parent, for tests
/// that only need to exercise the parent's packing logic.
pub(crate) const fn child_leaf(
    parent: &'static Dict,
    attr: u32,
    name: &'static str,
    value_kind: ValueKind,
) -> Dict {
    Dict::child(
        parent,
        attr,
        name,
        Kind::Leaf(value_kind),
        AttrFlags::empty(),
        EncryptKind::None,
    )
}
