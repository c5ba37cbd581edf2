//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The Extended / Long-Extended attribute encoder (C7): RFC 6929's
//! `[type, length, ext-type]` short form, its `[type, length, ext-type,
//! flags]` long form with M-bit continuation, and the optional nested EVS
//! (Extended Vendor-Specific) sub-format.
//!
//! Grounded on `holo_isis::packet::tlv::TlvKind::encode`'s fixed-prefix,
//! variable-payload header shape and on this crate's own [`fragment`]
//! module for the continuation bookkeeping.

use crate::avp::Avp;
use crate::bytes_ext::BufMutExt;
use crate::dictionary::{Dict, Kind};
use crate::error::EncodeResult;
use crate::fragment;
use crate::packet::PacketCtx;
use crate::stack::Stack;
use crate::value;

/// Top-level entry point, called by dispatch (C10) when the root
/// descriptor is `Extended` or `LongExtended`.
///
/// `out` is the caller-capped buffer for a short `Extended` attribute, but
/// the FULL output buffer for `LongExtended` — dispatch must not cap it at
/// 255 octets, since a long-extended value may need to span many
/// fragments (`spec.md` §4.1, §4.7).
pub(crate) fn encode<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    stack: &Stack,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let avp = cursor.expect("dispatch only calls encoders with a live AVP");
    let root = stack.root();
    let long = matches!(root.kind, Kind::LongExtended);
    let evs = stack.at(1).filter(|n| n.kind == Kind::Evs);
    let ext_type = if evs.is_some() {
        // RFC 6929 §2.3: ext-type 26 signals the nested EVS sub-format.
        26
    } else {
        stack.leaf().attr
    };
    // type, length, ext-type, plus the flags octet only in the long form.
    let hdr_len = if long { 4 } else { 3 };

    if !long {
        if out.len() < hdr_len {
            return Ok(0);
        }
        let body_len =
            write_body(&mut out[hdr_len..], packet, original, stack, evs, avp)?;
        if body_len == 0 && !is_empty_body(evs, avp) {
            return Ok(0);
        }
        write_header(out, root.attr, ext_type, None, hdr_len, body_len);
        *cursor = avp.next;
        return Ok(hdr_len + body_len);
    }

    // Long-Extended: decide up front whether the logical value fits in one
    // fragment, or whether C9 must take over.
    let logical = value::logical_len(&avp.value);
    let needs_fragment = match logical {
        Some(len) => hdr_len + evs_prefix_len(evs) + len > 255,
        None => false,
    };

    if !needs_fragment {
        if out.len() < hdr_len {
            return Ok(0);
        }
        let cap = (out.len() - hdr_len).min(255 - hdr_len);
        let body_len = write_body(
            &mut out[hdr_len..hdr_len + cap],
            packet,
            original,
            stack,
            evs,
            avp,
        )?;
        if body_len == 0 && !is_empty_body(evs, avp) {
            return Ok(0);
        }
        write_header(out, root.attr, ext_type, Some(0), hdr_len, body_len);
        *cursor = avp.next;
        return Ok(hdr_len + body_len);
    }

    // Lay the header down once at `out[0..hdr_len]`, the full body right
    // behind it, then let `fragment::attr_shift` replicate the header
    // across as many 255-octet fragments as the value needs — it copies
    // `out[0..hdr_len]` verbatim into every fragment before patching that
    // fragment's own length/M-bit octets, so the header below is written
    // only once regardless of fragment count.
    let logical_len = logical.expect("needs_fragment implies a fragmentable value");
    let evs_len = evs_prefix_len(evs);
    if out.len() < hdr_len + evs_len + logical_len {
        return Ok(0);
    }
    let body_len = write_body(
        &mut out[hdr_len..],
        packet,
        original,
        stack,
        evs,
        avp,
    )?;
    if body_len < evs_len + logical_len {
        // Couldn't stage the whole logical value up front.
        return Ok(0);
    }

    write_header(out, root.attr, ext_type, Some(0), hdr_len, 0);
    let flag_offset = hdr_len - 1;
    let Some(total) = fragment::attr_shift(out, hdr_len, body_len, flag_offset, None) else {
        return Ok(0);
    };

    *cursor = avp.next;
    Ok(total)
}

fn evs_prefix_len(evs: Option<&'static Dict>) -> usize {
    if evs.is_some() { 5 } else { 0 }
}

fn is_empty_body(evs: Option<&'static Dict>, avp: &Avp<'_>) -> bool {
    evs.is_none() && matches!(value::logical_len(&avp.value), Some(0))
}

// Writes the inner value, inserting the 5-octet EVS prefix
// (`[0, vendor(3 bytes BE), inner_inner_type]`) first when the attribute
// nests an Extended Vendor-Specific sub-format.
fn write_body(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    stack: &Stack,
    evs: Option<&'static Dict>,
    avp: &Avp<'_>,
) -> EncodeResult<usize> {
    match evs {
        Some(evs) => {
            if out.len() < 5 {
                return Ok(0);
            }
            out[0] = 0;
            out[1..4].put_u24(evs.vendor);
            out[4] = stack.leaf().attr as u8;
            let value_len = value::encode_value(&mut out[5..], packet, original, stack, avp)?;
            if value_len == 0 && !matches!(value::logical_len(&avp.value), Some(0) | None) {
                return Ok(0);
            }
            Ok(5 + value_len)
        }
        None => value::encode_value(out, packet, original, stack, avp),
    }
}

fn write_header(
    out: &mut [u8],
    root_attr: u32,
    ext_type: u32,
    flags: Option<u8>,
    hdr_len: usize,
    body_len: usize,
) {
    out[0] = root_attr as u8;
    out[1] = (hdr_len + body_len) as u8;
    out[2] = ext_type as u8;
    if let Some(flags) = flags {
        out[3] = flags;
    }
}
