//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The VSA / Vendor encoder (C6): emits a Vendor-Specific Attribute
//! (type 26) with a 4-octet vendor id, then as many vendor-specific inner
//! attributes as fit, using the `(type_width, length_width)` the vendor
//! descriptor collaborator reports.
//!
//! Grounded on `holo_ldp::packet::tlv::TlvKind::encode`'s
//! reserve-then-patch-length pattern, generalized to the variable-width
//! inner header `spec.md` §4.5 describes.

use crate::avp::Avp;
use crate::dictionary::{Dict, Kind, VendorDescriptor, VendorLookup};
use crate::encode::tlv;
use crate::error::{EncodeError, EncodeResult};
use crate::packet::PacketCtx;
use crate::stack::Stack;
use crate::value;

const VSA_ATTR: u8 = 26;

/// Top-level entry point, called by dispatch (C10) when the root
/// descriptor is a non-WiMAX VSA.
pub(crate) fn encode<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    vendors: &dyn VendorLookup,
    stack: &Stack,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let vsa = stack.root();
    let vendor_node = stack
        .child_of(vsa.depth)
        .filter(|n| n.kind == Kind::Vendor)
        .ok_or(EncodeError::InvalidInput(
            "VSA descriptor has no Vendor child",
        ))?;

    if out.len() < 6 {
        return Ok(0);
    }
    out[0] = VSA_ATTR;
    out[2..6].copy_from_slice(&vendor_node.vendor.to_be_bytes());

    let descriptor = vendors
        .lookup(vendor_node.vendor)
        .unwrap_or(VendorDescriptor::DEFAULT);

    let inner_cap = (out.len() - 6).min(249);
    let inner_len = encode_children(
        &mut out[6..6 + inner_cap],
        packet,
        original,
        vendor_node,
        descriptor,
        cursor,
    )?;
    if inner_len == 0 {
        return Ok(0);
    }

    out[1] = (6 + inner_len) as u8;
    Ok(6 + inner_len)
}

// Packs consecutive AVPs beneath `vendor_node` using the vendor's
// type/length widths, stopping when the cursor moves to a different
// vendor or the buffer runs out.
fn encode_children<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    vendor_node: &'static Dict,
    descriptor: VendorDescriptor,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let mut written = 0usize;
    loop {
        let Some(avp) = *cursor else {
            break;
        };
        let stack = Stack::build(avp.dict)?;
        if !stack.matches_at(vendor_node.depth, vendor_node) {
            break;
        }
        let hdr_len = descriptor.type_width as usize
            + descriptor.length_width as usize;
        if hdr_len == 0 || out.len() - written < hdr_len + 1 {
            break;
        }

        let n = encode_one(
            &mut out[written..],
            packet,
            original,
            vendor_node,
            descriptor,
            &stack,
            cursor,
        )?;
        if n == 0 {
            break;
        }
        written += n;
    }
    Ok(written)
}

// Writes one vendor-specific inner attribute. When `(type_width,
// length_width) == (1, 1)` this produces byte-identical output to the
// plain RFC header, so no special "unknown vendor" branch is needed
// (spec.md §4.5: "the vendor uses RFC encoding verbatim").
fn encode_one<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    vendor_node: &'static Dict,
    descriptor: VendorDescriptor,
    stack: &Stack,
    cursor: &mut Option<&'a Avp<'a>>,
) -> EncodeResult<usize> {
    let Some(child) = stack.child_of(vendor_node.depth) else {
        return Err(EncodeError::InvalidInput(
            "AVP descriptor is the Vendor node itself, not one of its children",
        ));
    };

    let type_width = descriptor.type_width as usize;
    let length_width = descriptor.length_width as usize;
    let hdr_len = type_width + length_width;
    if out.len() < hdr_len {
        return Ok(0);
    }

    match type_width {
        1 => out[0] = child.attr as u8,
        2 => out[0..2].copy_from_slice(&(child.attr as u16).to_be_bytes()),
        4 => out[0..4].copy_from_slice(&child.attr.to_be_bytes()),
        _ => {
            return Err(EncodeError::UnsupportedValue(
                "unsupported vendor attribute type width",
            ));
        }
    }

    let n = if child.kind == Kind::Tlv {
        let inner = tlv::encode_tlv_hdr(&mut out[hdr_len..], packet, original, child, cursor)?;
        if inner == 0 {
            return Ok(0);
        }
        inner
    } else {
        let inner_cap = out.len() - hdr_len;
        let value_len = value::encode_value(
            &mut out[hdr_len..hdr_len + inner_cap],
            packet,
            original,
            stack,
            cursor.expect("cursor checked live by caller"),
        )?;
        *cursor = cursor.and_then(|avp| avp.next);
        value_len
    };

    match length_width {
        0 => {}
        1 => out[type_width] = (hdr_len + n) as u8,
        2 => out[type_width..type_width + 2]
            .copy_from_slice(&((hdr_len + n) as u16).to_be_bytes()),
        _ => {
            return Err(EncodeError::UnsupportedValue(
                "unsupported vendor attribute length width",
            ));
        }
    }

    Ok(hdr_len + n)
}
