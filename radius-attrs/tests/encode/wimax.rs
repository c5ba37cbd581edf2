//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use radius_attrs::dictionary::{
    AttrFlags, Dict, EncryptKind, Kind, ValueKind, VendorTable, VENDOR_WIMAX,
};
use radius_attrs::{encode_pair, Avp, Value};

use crate::{child_leaf, request_ctx};

static WIMAX_ROOT: Dict = Dict {
    attr: 26,
    vendor: 0,
    kind: Kind::Vsa,
    flags: AttrFlags::WIMAX,
    encrypt: EncryptKind::None,
    parent: None,
    depth: 0,
    name: "WiMAX-VSA",
};
static WIMAX_VENDOR: Dict = Dict::vendor(&WIMAX_ROOT, VENDOR_WIMAX, "WiMAX");
static WIMAX_VALUE: Dict = child_leaf(&WIMAX_VENDOR, 1, "WiMAX-Value", ValueKind::Octets);

#[test]
fn single_attribute_fits_in_one_vsa() {
    let avp = Avp::new(&WIMAX_VALUE, Value::Octets(b"hello"));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 32];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();

    // [26, 14, vendor(4)=24757, inner-type=1, inner-length=8, continuation=0, value].
    let mut expected = vec![26, 14, 0x00, 0x00, 0x60, 0xb5, 1, 8, 0];
    expected.extend_from_slice(b"hello");
    assert_eq!(&out[..n], expected.as_slice());
}

#[test]
fn fragments_a_400_octet_value_with_a_continuation_byte() {
    let value = vec![0xabu8; 400];
    let avp = Avp::new(&WIMAX_VALUE, Value::Octets(&value));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 1024];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();
    assert!(cursor.is_none());

    const HDR_LEN: usize = 9;
    let per_frag = 255 - HDR_LEN;

    // First fragment: full 255-octet VSA, C-bit set, inner length trails
    // the outer length by the fixed 6-octet (type+length+vendor) delta.
    assert_eq!(out[0], 26);
    assert_eq!(out[1], 255);
    assert_eq!(&out[2..6], &VENDOR_WIMAX.to_be_bytes());
    assert_eq!(out[6], 1);
    assert_eq!(out[7], 255 - 6);
    assert_eq!(out[8] & 0x80, 0x80);

    let second_start = 255;
    let second_value_len = 400 - per_frag;
    let second_total = HDR_LEN + second_value_len;
    assert_eq!(out[second_start], 26);
    assert_eq!(out[second_start + 1] as usize, second_total);
    assert_eq!(&out[second_start + 2..second_start + 6], &VENDOR_WIMAX.to_be_bytes());
    assert_eq!(out[second_start + 6], 1);
    assert_eq!(out[second_start + 7] as usize, second_total - 6);
    assert_eq!(out[second_start + 8] & 0x80, 0);

    assert_eq!(n, HDR_LEN * 2 + 400);

    let mut reassembled = Vec::new();
    reassembled.extend_from_slice(&out[HDR_LEN..255]);
    reassembled.extend_from_slice(
        &out[second_start + HDR_LEN..second_start + HDR_LEN + second_value_len],
    );
    assert_eq!(reassembled, value);
}
