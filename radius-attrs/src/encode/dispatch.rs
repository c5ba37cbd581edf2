//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The dispatch entry point (C10): `encode_pair`, the single public
//! function that routes one AVP to the right encoder by its root
//! descriptor's kind, plus the `encode_pairs` convenience loop
//! (`SPEC_FULL.md` §10.4) that drives an entire AVP list into one or more
//! fixed-size buffers.

use crate::avp::Avp;
use crate::dictionary::{AttrFlags, Kind, VendorLookup};
use crate::encode::{extended, rfc, tlv, vsa, wimax};
use crate::error::{EncodeError, EncodeResult};
use crate::packet::PacketCtx;
use crate::stack::Stack;

/// Encodes as much of the AVP list starting at `*cursor` as fits in
/// `out`, advancing `*cursor` past every AVP it fully wrote.
///
/// Returns the number of bytes written. `0` with the cursor unchanged
/// means `out` has no room for even the next attribute — the caller
/// should flush the buffer and call again (`spec.md` §3.6, §7 `NoRoom`).
/// An attribute numbered above 255 with no `concat` flag is silently
/// dropped (`ValueIgnored`): the cursor still advances past it, but no
/// bytes are written for it.
pub fn encode_pair<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    vendors: &dyn VendorLookup,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let Some(avp) = *cursor else {
        return Ok(0);
    };
    if out.len() <= 2 {
        return Ok(0);
    }

    let stack = Stack::build(avp.dict)?;
    let root = stack.root();

    if let Kind::Leaf(_) = root.kind {
        if root.attr > 255 && !root.flags.contains(AttrFlags::CONCAT) {
            *cursor = avp.next;
            return Ok(0);
        }
    }

    if matches!(root.kind, Kind::Evs) {
        return Err(EncodeError::InvalidInput(
            "EVS is only valid nested inside an Extended attribute",
        ));
    }

    // A long-extended, concat, or WiMAX value may need the full buffer to
    // plan fragmentation; every other kind is capped at one 255-octet
    // attribute (`spec.md` §4.1).
    let needs_full_buffer = matches!(root.kind, Kind::LongExtended)
        || root.flags.contains(AttrFlags::CONCAT)
        || (root.kind == Kind::Vsa && root.flags.contains(AttrFlags::WIMAX));
    let cap = if needs_full_buffer {
        out.len()
    } else {
        out.len().min(255)
    };
    let out = &mut out[..cap];

    match root.kind {
        Kind::Leaf(_) => rfc::encode(out, packet, original, &stack, cursor),
        Kind::Vsa if root.flags.contains(AttrFlags::WIMAX) => {
            wimax::encode(out, packet, original, &stack, cursor)
        }
        Kind::Vsa => vsa::encode(out, packet, original, vendors, &stack, cursor),
        Kind::Tlv => tlv::encode(out, packet, original, &stack, cursor),
        Kind::Extended | Kind::LongExtended => {
            extended::encode(out, packet, original, &stack, cursor)
        }
        Kind::Vendor | Kind::Evs => Err(EncodeError::InvalidInput(
            "AVP descriptor resolves to an internal dictionary node, not an encodable root",
        )),
    }
}

/// Drives `encode_pair` over the entire AVP list, splitting it into as
/// many `buf_len`-sized chunks as needed (`SPEC_FULL.md` §10.4).
///
/// Each returned `Vec<u8>` is one filled buffer; the caller sends each as
/// the attribute region of its own packet, or concatenates them if the
/// transport has no such limit. Returns an error only if an individual
/// `encode_pair` call does (a malformed descriptor); a value too large to
/// ever fit a fresh `buf_len` buffer is silently dropped the same way
/// `encode_pair` drops an out-of-range attribute number, to avoid looping
/// forever re-offering a buffer no size of chunk can satisfy.
pub fn encode_pairs<'a>(
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    vendors: &dyn VendorLookup,
    mut cursor: Option<&'a Avp<'a>>,
    buf_len: usize,
) -> EncodeResult<Vec<Vec<u8>>> {
    let mut chunks = Vec::new();

    while cursor.is_some() {
        let mut buf = vec![0u8; buf_len];
        let mut written = 0usize;

        loop {
            let before = ptr_of(cursor);
            let n = encode_pair(&mut buf[written..], packet, original, vendors, &mut cursor)?;
            if n == 0 {
                if written == 0 && ptr_of(cursor) == before {
                    // Nothing fit in a fresh buffer and the cursor didn't
                    // even advance past a dropped attribute — this AVP
                    // can never be encoded into a buffer of this size.
                    cursor = cursor.and_then(|avp| avp.next);
                }
                break;
            }
            written += n;
        }

        if written > 0 {
            buf.truncate(written);
            chunks.push(buf);
        }
    }

    Ok(chunks)
}

fn ptr_of<'a>(cursor: Option<&'a Avp<'a>>) -> *const Avp<'a> {
    cursor.map_or(std::ptr::null(), |avp| avp as *const Avp<'a>)
}
