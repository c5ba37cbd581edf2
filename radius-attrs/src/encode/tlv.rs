//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The TLV encoder (C5): emits nested Type-Length-Value sub-attributes
//! inside a parent that has TLV children. Reentrant — a TLV can nest
//! inside another TLV up to `MAX_TLV_STACK` deep.
//!
//! Grounded on `holo_ldp::packet::tlv::TlvKind::encode`'s
//! reserve-then-patch-length pattern and on
//! `holo_isis::packet::tlv::tlv_entries_split`'s technique of packing as
//! many same-parent entries as fit before moving to the next container.

use crate::avp::Avp;
use crate::dictionary::{Dict, Kind};
use crate::encode::rfc;
use crate::error::{EncodeError, EncodeResult};
use crate::packet::PacketCtx;
use crate::stack::Stack;

/// Top-level entry point, called by dispatch (C10) when the root
/// descriptor is a TLV.
pub(crate) fn encode<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    stack: &Stack,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    encode_tlv_hdr(out, packet, original, stack.root(), cursor)
}

/// Writes `parent`'s own `[attr(1), length(1)]` header, then packs as many
/// of `cursor`'s upcoming AVPs as belong to `parent` into the space behind
/// it, recursing into itself for grandchildren that are themselves TLVs.
pub(crate) fn encode_tlv_hdr<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    parent: &'static Dict,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    if out.len() < 2 {
        return Ok(0);
    }
    out[0] = parent.attr as u8;

    let inner_cap = (out.len() - 2).min(253);
    let inner_len =
        encode_children(&mut out[2..2 + inner_cap], packet, original, parent, cursor)?;
    if inner_len == 0 {
        return Ok(0);
    }

    out[1] = (2 + inner_len) as u8;
    Ok(2 + inner_len)
}

// Packs consecutive AVPs belonging to `parent` into `out`, stopping when
// the cursor runs out, the next AVP belongs to a different parent, or room
// is exhausted (spec.md §4.4).
fn encode_children<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    parent: &'static Dict,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let mut written = 0usize;
    let mut saw_child = false;

    loop {
        let Some(avp) = *cursor else {
            break;
        };
        let stack = Stack::build(avp.dict)?;
        if !stack.matches_at(parent.depth, parent) {
            // This AVP isn't (or is no longer) a descendant of `parent`.
            break;
        }
        let Some(child) = stack.child_of(parent.depth) else {
            // The AVP's own descriptor IS `parent` — malformed input, a
            // TLV parent can't itself carry a scalar value.
            return Err(EncodeError::InvalidInput(
                "AVP descriptor is a TLV parent, not one of its children",
            ));
        };
        saw_child = true;

        // spec.md §4.4: "while >= 5 octets remain" before attempting the
        // next child (a nested TLV header alone is 2 octets, but leave
        // room for at least a trivial grandchild too).
        if out.len() - written < 5 {
            break;
        }

        let remaining = &mut out[written..];
        let n = match child.kind {
            Kind::Tlv => encode_tlv_hdr(remaining, packet, original, child, cursor)?,
            _ => rfc::encode_leaf_hdr(remaining, packet, original, &stack, cursor)?,
        };
        if n == 0 {
            break;
        }
        written += n;
    }

    if !saw_child {
        return Err(EncodeError::InvalidInput(
            "TLV parent has no matching children in the AVP list",
        ));
    }
    Ok(written)
}
