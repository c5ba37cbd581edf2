//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use radius_attrs::dictionary::{AttrFlags, Dict, EncryptKind, Kind, ValueKind, VendorTable};
use radius_attrs::{encode_pair, Avp, Value};

use crate::assert_eq_hex;
use crate::request_ctx;

static SHORT_ROOT: Dict = Dict::extended(241, "Short-Extended", false);
static SHORT_VALUE: Dict = Dict::child(
    &SHORT_ROOT,
    7,
    "Short-Extended-Value",
    Kind::Leaf(ValueKind::Byte),
    AttrFlags::empty(),
    EncryptKind::None,
);

static LONG_ROOT: Dict = Dict::extended(245, "Long-Extended", true);
static LONG_VALUE: Dict = Dict::child(
    &LONG_ROOT,
    1,
    "Long-Extended-Value",
    Kind::Leaf(ValueKind::Octets),
    AttrFlags::empty(),
    EncryptKind::None,
);

static EVS_ROOT: Dict = Dict::extended(241, "Vendor-Specific-Extended", false);
static EVS_NODE: Dict = Dict {
    attr: 0,
    vendor: 9,
    kind: Kind::Evs,
    flags: AttrFlags::empty(),
    encrypt: EncryptKind::None,
    parent: Some(&EVS_ROOT),
    depth: 1,
    name: "Evs",
};
static EVS_VALUE: Dict = child_leaf_of_evs();

const fn child_leaf_of_evs() -> Dict {
    Dict::child(
        &EVS_NODE,
        3,
        "Evs-Value",
        Kind::Leaf(ValueKind::Byte),
        AttrFlags::empty(),
        EncryptKind::None,
    )
}

#[test]
fn short_extended_writes_a_three_octet_header() {
    let avp = Avp::new(&SHORT_VALUE, Value::Byte(0x42));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 16];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();

    assert_eq_hex!(&out[..n], [241, 4, 7, 0x42]);
}

#[test]
fn long_extended_fits_in_one_fragment_with_a_clear_m_bit() {
    let avp = Avp::new(&LONG_VALUE, Value::Octets(b"hello"));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 16];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();

    assert_eq_hex!(&out[..n], [245, 9, 1, 0, b'h', b'e', b'l', b'l', b'o']);
}

#[test]
fn long_extended_fragments_a_300_octet_value() {
    let value = vec![0xcdu8; 300];
    let avp = Avp::new(&LONG_VALUE, Value::Octets(&value));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 512];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();
    assert!(cursor.is_none());

    const HDR_LEN: usize = 4;
    let per_frag = 255 - HDR_LEN;

    // First fragment: full 255 octets, M-bit set.
    assert_eq!(out[0], 245);
    assert_eq!(out[1], 255);
    assert_eq!(out[2], 1);
    assert_eq!(out[3] & 0x80, 0x80);

    let second_start = 255;
    let second_value_len = 300 - per_frag;
    assert_eq!(out[second_start], 245);
    assert_eq!(out[second_start + 1] as usize, HDR_LEN + second_value_len);
    assert_eq!(out[second_start + 2], 1);
    assert_eq!(out[second_start + 3] & 0x80, 0);

    assert_eq!(n, HDR_LEN * 2 + 300);

    // Concatenating both fragments' payloads reproduces the original
    // value bytes.
    let mut reassembled = Vec::new();
    reassembled.extend_from_slice(&out[HDR_LEN..255]);
    reassembled.extend_from_slice(
        &out[second_start + HDR_LEN..second_start + HDR_LEN + second_value_len],
    );
    assert_eq!(reassembled, value);
}

#[test]
fn evs_prefix_carries_vendor_and_inner_type() {
    let avp = Avp::new(&EVS_VALUE, Value::Byte(0x9a));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 16];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();

    // [attr, length, ext-type=26, 0, vendor(3 bytes BE), inner-type, value].
    assert_eq_hex!(&out[..n], [241, 9, 26, 0, 0, 0, 9, 3, 0x9a]);
}
