//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The WiMAX vendor-specific encoder (C8): a type-26 VSA whose vendor is
//! fixed at [`VENDOR_WIMAX`][crate::dictionary::VENDOR_WIMAX] and whose
//! inner attribute carries its own 1-octet continuation flag, rather than
//! following RFC 6929's long-extended flags octet convention.
//!
//! Grounded on `holo_ldp::packet::tlv::TlvKind::encode`'s reserve-then-
//! patch-length pattern; fragmentation reuses [`crate::fragment`] exactly
//! as the Long-Extended encoder does, but with its own 9-octet header
//! shape (`spec.md` §4.7, §9: "WiMAX fragmentation is not a
//! generalization of RFC 6929 long-extended; keep them as separate
//! encoders sharing only the fragmenter").

use crate::avp::Avp;
use crate::error::EncodeResult;
use crate::fragment;
use crate::packet::PacketCtx;
use crate::stack::Stack;
use crate::value;

const VSA_ATTR: u8 = 26;

// `[vsa-type(1), vsa-length(1), vendor(4), inner-type(1), inner-length(1),
// continuation(1)]`.
const HDR_LEN: usize = 9;
// Offset, within one fragment, of the continuation/M-bit octet.
const FLAG_OFFSET: usize = 8;
// Offset, within one fragment, of the inner (vendor-specific) length octet.
const INNER_LEN_OFFSET: usize = 7;
// The inner length always trails the outer fragment length by the 6
// octets that aren't part of it (vsa-type, vsa-length, vendor).
const INNER_LEN_DELTA: usize = 6;

/// Top-level entry point, called by dispatch (C10) when the root
/// descriptor is a WiMAX VSA (`AttrFlags::WIMAX`).
///
/// As with Long-Extended, `out` must be the full output buffer rather
/// than one capped at 255 octets — a WiMAX value may need several
/// continuation fragments.
pub(crate) fn encode<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    stack: &Stack,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let avp = cursor.expect("dispatch only calls encoders with a live AVP");
    let vendor_node = stack
        .child_of(stack.root().depth)
        .unwrap_or_else(|| stack.root());
    let inner_type = stack.leaf().attr;

    let logical = value::logical_len(&avp.value);
    let needs_fragment = match logical {
        Some(len) => HDR_LEN + len > 255,
        None => false,
    };

    if !needs_fragment {
        if out.len() < HDR_LEN {
            return Ok(0);
        }
        let cap = (out.len() - HDR_LEN).min(255 - HDR_LEN);
        let value_len = value::encode_value(
            &mut out[HDR_LEN..HDR_LEN + cap],
            packet,
            original,
            stack,
            avp,
        )?;
        if value_len == 0 && !matches!(logical, Some(0) | None) {
            return Ok(0);
        }
        write_header(out, vendor_node.vendor, inner_type, 0);
        out[1] = (HDR_LEN + value_len) as u8;
        out[INNER_LEN_OFFSET] = (HDR_LEN + value_len - INNER_LEN_DELTA) as u8;
        *cursor = avp.next;
        return Ok(HDR_LEN + value_len);
    }

    let logical_len = logical.expect("needs_fragment implies a fragmentable value");
    if out.len() < HDR_LEN + logical_len {
        return Ok(0);
    }
    let value_len = value::encode_value(&mut out[HDR_LEN..], packet, original, stack, avp)?;
    if value_len < logical_len {
        return Ok(0);
    }

    write_header(out, vendor_node.vendor, inner_type, 0);
    let Some(total) = fragment::attr_shift(out, HDR_LEN, value_len, FLAG_OFFSET, None) else {
        return Ok(0);
    };

    // `attr_shift` patches each fragment's own outer length (offset 1); the
    // WiMAX inner length isn't a generic TLV length and is patched here
    // from that already-correct value instead.
    let mut off = 0usize;
    while off < total {
        let frag_len = out[off + 1] as usize;
        out[off + INNER_LEN_OFFSET] = (frag_len - INNER_LEN_DELTA) as u8;
        off += frag_len;
    }

    *cursor = avp.next;
    Ok(total)
}

fn write_header(out: &mut [u8], vendor: u32, inner_type: u32, continuation: u8) {
    out[0] = VSA_ATTR;
    out[2..6].copy_from_slice(&vendor.to_be_bytes());
    out[6] = inner_type as u8;
    out[FLAG_OFFSET] = continuation;
}
