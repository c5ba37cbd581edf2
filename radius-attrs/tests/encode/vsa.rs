//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use radius_attrs::dictionary::{Dict, ValueKind, VendorDescriptor, VendorTable};
use radius_attrs::{encode_pair, Avp, Value};

use crate::assert_eq_hex;
use crate::{child_leaf, request_ctx};

static VSA_ROOT: Dict = Dict::vsa("Vendor-Specific");
static CISCO: Dict = Dict::vendor(&VSA_ROOT, 9, "Cisco");
static CISCO_AV_PAIR: Dict = child_leaf(&CISCO, 1, "Cisco-AVPair", ValueKind::String);

static WIDE_VENDOR: Dict = Dict::vendor(&VSA_ROOT, 99, "Wide-Vendor");
static WIDE_ATTR: Dict = child_leaf(&WIDE_VENDOR, 300, "Wide-Attr", ValueKind::Byte);

#[test]
fn cisco_av_pair_matches_rfc2865_default_widths() {
    let avp = Avp::new(&CISCO_AV_PAIR, Value::String("shell:priv-lvl=15"));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 64];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();

    let mut expected = vec![0x1a, 0x19, 0x00, 0x00, 0x00, 0x09, 0x01, 0x13];
    expected.extend_from_slice(b"shell:priv-lvl=15");
    assert_eq_hex!(&out[..n], expected);
}

#[test]
fn two_octet_vendor_widths_are_honored() {
    let mut vendors = VendorTable::new();
    vendors.insert(
        99,
        VendorDescriptor {
            type_width: 2,
            length_width: 2,
        },
    );

    let avp = Avp::new(&WIDE_ATTR, Value::Byte(0x42));
    let packet = request_ctx("shared-secret", [0u8; 16]);

    let mut out = [0u8; 64];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();

    // Outer [26, 6+5, vendor(4)], inner [type(2)=300, length(2)=5, 0x42].
    assert_eq_hex!(
        &out[..n],
        [26, 11, 0, 0, 0, 99, 0x01, 0x2c, 0x00, 0x05, 0x42]
    );
}

#[test]
fn unknown_vendor_falls_back_to_the_rfc2865_default_widths() {
    // No VendorTable entry for 9: the encoder must still produce
    // byte-identical output to the known-vendor case.
    let avp = Avp::new(&CISCO_AV_PAIR, Value::String("shell:priv-lvl=15"));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 64];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();
    assert_eq!(out[6], 1);
    assert_eq!(out[7], 0x13);
}
