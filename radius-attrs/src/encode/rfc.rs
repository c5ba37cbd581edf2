//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The RFC attribute encoder (C4): a plain 1-octet-type / 1-octet-length
//! attribute, its `concat`-mode sibling splitting, and the two special
//! cases (Message-Authenticator's placeholder, a zero-length
//! Chargeable-User-Identity).
//!
//! Grounded on `holo_ldp::packet::tlv::TlvKind::encode`'s
//! reserve-then-patch-length pattern, adapted from a growable `BytesMut`
//! target to this crate's bounded `&mut [u8]` (`spec.md` §3.6).

use crate::avp::{Avp, Value};
use crate::dictionary::{AttrFlags, Dict};
use crate::error::{EncodeError, EncodeResult};
use crate::packet::PacketCtx;
use crate::stack::Stack;
use crate::value;

const MSG_AUTHENTICATOR_ATTR: u32 = 80;
const CHARGEABLE_USER_IDENTITY_ATTR: u32 = 89;

/// Top-level RFC encoder entry point, called by dispatch (C10) when the
/// root descriptor is a plain leaf.
pub(crate) fn encode<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    stack: &Stack,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let avp = cursor.expect("dispatch only calls encoders with a live AVP");
    let dict = stack.root();

    if dict.flags.contains(AttrFlags::CONCAT) {
        return encode_concat(out, dict, avp, cursor);
    }

    if dict.vendor == 0 && dict.attr == MSG_AUTHENTICATOR_ATTR {
        return encode_message_authenticator(out, avp, cursor);
    }

    if dict.vendor == 0
        && dict.attr == CHARGEABLE_USER_IDENTITY_ATTR
        && is_empty_value(&avp.value)
    {
        if out.len() < 2 {
            return Ok(0);
        }
        out[0] = dict.attr as u8;
        out[1] = 2;
        *cursor = avp.next;
        return Ok(2);
    }

    encode_leaf_hdr(out, packet, original, stack, cursor)
}

/// Writes a single `[attr(1), length(1), value]` attribute for the current
/// leaf, delegating to C2 for the value. Shared by the top-level RFC path,
/// the TLV packing loop (C5), and the VSA default-width fallback (C6).
pub(crate) fn encode_leaf_hdr<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    stack: &Stack,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let avp = cursor.expect("dispatch only calls encoders with a live AVP");
    let dict = stack.leaf();

    if out.len() < 2 {
        return Ok(0);
    }

    let inner_cap = (out.len() - 2).min(253);
    let value_len =
        value::encode_value(&mut out[2..2 + inner_cap], packet, original, stack, avp)?;

    out[0] = dict.attr as u8;
    out[1] = (2 + value_len) as u8;
    *cursor = avp.next;
    Ok(2 + value_len)
}

fn encode_message_authenticator<'a>(
    out: &mut [u8],
    avp: &'a Avp<'a>,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    // The 18-octet placeholder; the HMAC-MD5 itself is finalized by the
    // outer packet builder once the whole packet is assembled (spec.md §1,
    // §4.2, §6.3 — out of scope here).
    if out.len() < 18 {
        return Ok(0);
    }
    out[0] = MSG_AUTHENTICATOR_ATTR as u8;
    out[1] = 18;
    out[2..18].fill(0);
    *cursor = avp.next;
    Ok(18)
}

fn is_empty_value(value: &Value<'_>) -> bool {
    match value {
        Value::Octets(o) => o.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// C4.3 — concat mode: repeatedly emit `[type, length, payload<=253]`
/// sibling attributes of the same type until the octets/string value is
/// exhausted or the buffer is full.
fn encode_concat<'a>(
    out: &mut [u8],
    dict: &'static Dict,
    avp: &'a Avp<'a>,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let mut remaining: &[u8] = match &avp.value {
        Value::Octets(o) => o,
        Value::String(s) => s.as_bytes(),
        _ => {
            return Err(EncodeError::UnsupportedValue(
                "concat mode requires an octets/string value",
            ));
        }
    };

    if remaining.is_empty() {
        if out.len() < 2 {
            return Ok(0);
        }
        out[0] = dict.attr as u8;
        out[1] = 2;
        *cursor = avp.next;
        return Ok(2);
    }

    let mut written = 0usize;
    while !remaining.is_empty() {
        if out.len() - written < 3 {
            // Not enough room for another header plus at least one octet
            // of payload: this whole AVP is a partial-encode, so don't
            // commit the siblings already produced either (spec.md §4.8's
            // "return the bytes already produced" treats the fragmented
            // group atomically).
            return Ok(0);
        }
        let chunk_len = remaining.len().min(253).min(out.len() - written - 2);

        out[written] = dict.attr as u8;
        out[written + 1] = (2 + chunk_len) as u8;
        out[written + 2..written + 2 + chunk_len]
            .copy_from_slice(&remaining[..chunk_len]);

        written += 2 + chunk_len;
        remaining = &remaining[chunk_len..];
    }

    *cursor = avp.next;
    Ok(written)
}
