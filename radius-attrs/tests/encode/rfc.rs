//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use radius_attrs::dictionary::VendorTable;
use radius_attrs::{encode_pair, Avp, Value};

use crate::assert_eq_hex;
use crate::{request_ctx, CHARGEABLE_USER_IDENTITY, CONCAT_OCTETS, MESSAGE_AUTHENTICATOR, USER_NAME};

#[test]
fn user_name_short_encode() {
    let avp = Avp::new(&USER_NAME, Value::String("bob"));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 64];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor)
        .expect("well-formed AVP");

    assert_eq_hex!(&out[..n], [0x01, 0x05, 0x62, 0x6f, 0x62]);
    assert!(cursor.is_none());
}

#[test]
fn no_room_leaves_cursor_and_buffer_untouched() {
    let avp = Avp::new(&USER_NAME, Value::String("bob"));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0xffu8; 2];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor)
        .expect("NoRoom is reported as Ok(0), not an error");

    assert_eq!(n, 0);
    assert!(cursor.is_some());
    assert_eq!(out, [0xff, 0xff]);
}

#[test]
fn message_authenticator_is_an_eighteen_octet_zero_placeholder() {
    let avp = Avp::new(&MESSAGE_AUTHENTICATOR, Value::Octets(&[]));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0xffu8; 32];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();

    assert_eq!(n, 18);
    assert_eq!(out[0], 80);
    assert_eq!(out[1], 18);
    assert!(out[2..18].iter().all(|&b| b == 0));
}

#[test]
fn empty_chargeable_user_identity_encodes_to_a_bare_two_octet_header() {
    let avp = Avp::new(&CHARGEABLE_USER_IDENTITY, Value::String(""));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 16];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();

    assert_eq_hex!(&out[..n], [89, 2]);
}

#[test]
fn concat_mode_splits_an_oversized_value_across_sibling_attributes() {
    let value = vec![0xabu8; 600];
    let avp = Avp::new(&CONCAT_OCTETS, Value::Octets(&value));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 1024];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();
    assert!(cursor.is_none());

    // Three siblings: 253 + 253 + 94 octets of payload, each with its own
    // two-octet header.
    let mut offset = 0;
    let mut remaining = 600usize;
    let mut seen = 0usize;
    while remaining > 0 {
        assert_eq!(out[offset], 25);
        let chunk = remaining.min(253);
        assert_eq!(out[offset + 1] as usize, 2 + chunk);
        assert!(out[offset + 2..offset + 2 + chunk].iter().all(|&b| b == 0xab));
        offset += 2 + chunk;
        remaining -= chunk;
        seen += 1;
    }
    assert_eq!(seen, 3);
    assert_eq!(offset, n);
}

#[test]
fn concat_mode_empty_value_still_emits_one_bare_header() {
    let avp = Avp::new(&CONCAT_OCTETS, Value::Octets(&[]));
    let packet = request_ctx("shared-secret", [0u8; 16]);
    let vendors = VendorTable::new();

    let mut out = [0u8; 16];
    let mut cursor = Some(&avp);
    let n = encode_pair(&mut out, &packet, None, &vendors, &mut cursor).unwrap();
    assert_eq_hex!(&out[..n], [25, 2]);
}
