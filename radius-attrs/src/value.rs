//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The value serializer (C2): marshals one leaf attribute's payload into
//! network byte order, applies the tag byte, and invokes the crypto kernels
//! (C1) when the attribute carries an encryption flag.
//!
//! Grounded on the value-kind match arms spread across the teacher's
//! `holo_ldp`/`holo_isis` TLV `encode_value` methods (big-endian integers
//! via `to_be_bytes()`, addresses via the `bytes_ext` `put_*` helpers),
//! generalized into the single dispatch `spec.md` §4.9 describes.

use std::net::IpAddr;

use crate::avp::{Avp, Value};
use crate::bytes_ext::{BufMutExt, TLS_SCRATCH};
use crate::crypto;
use crate::dictionary::{AttrFlags, Dict, EncryptKind, Kind, ValueKind};
use crate::error::{EncodeError, EncodeResult};
use crate::packet::PacketCtx;
use crate::stack::Stack;

/// Marshals the AVP at `stack.leaf()` into `out`, returning the number of
/// octets written (possibly truncated to `out.len()`; never an error for
/// "too big", per `spec.md` §7's `Truncated` non-error).
pub fn encode_value<'a>(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    stack: &Stack,
    avp: &Avp<'a>,
) -> EncodeResult<usize> {
    let dict = stack.leaf();

    // spec.md §4.9 step 1 calls for delegating a TLV-typed descriptor back
    // into the TLV encoder. In this crate's flat-AVP-list model (`spec.md`
    // §3.3/§3.4) a TLV's sub-attributes are always reached by walking the
    // dictionary chain from C5's packing loop, never by C2 encoding a TLV
    // node as if it were a scalar leaf — reaching one here means the AVP's
    // own descriptor doesn't actually terminate in a leaf.
    if matches!(dict.kind, Kind::Tlv) {
        return Err(EncodeError::InvalidInput(
            "AVP descriptor resolves to a TLV container, not a leaf value",
        ));
    }

    if !std::ptr::eq(dict, avp.dict) {
        return Err(EncodeError::InvalidInput(
            "TLV stack leaf does not match the AVP's descriptor",
        ));
    }

    let value_kind = match dict.kind {
        Kind::Leaf(vk) => vk,
        _ => {
            return Err(EncodeError::UnsupportedValue(
                "descriptor is not a leaf attribute",
            ));
        }
    };

    // String/Octets/Abinary borrow the AVP's own storage directly rather
    // than being staged through scratch first (spec.md §9: the spec
    // requires `*out = vp->data.ptr` semantics here, not a double copy)
    // — unless the value also needs in-place encryption, in which case it
    // must be staged (capped at 128 cleartext octets, spec.md §3.3).
    if dict.encrypt == EncryptKind::None {
        if let Some(bytes) = borrowed_bytes(value_kind, &avp.value) {
            return encode_direct(out, dict, avp, bytes);
        }
    }

    TLS_SCRATCH.with(|cell| {
        let scratch = &mut *cell.borrow_mut();
        let raw_len = stage_raw(scratch, value_kind, &avp.value)?;
        encode_staged(out, packet, original, dict, avp, &mut scratch[..raw_len])
    })
}

/// The full logical length of a fragmentable value (String/Octets/Abinary),
/// before any truncation to a destination buffer. Returns `None` for every
/// other value kind, which are fixed-size and never require fragmentation.
/// Used by the Long-Extended (C7) and WiMAX (C8) encoders to decide, before
/// writing anything, whether C9 fragmentation is needed.
pub(crate) fn logical_len(value: &Value<'_>) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.len()),
        Value::Octets(o) | Value::Abinary(o) => Some(o.len()),
        _ => None,
    }
}

// Byte-shaped value kinds that can be written straight from the AVP's own
// storage without staging (the zero-extra-copy path).
fn borrowed_bytes<'a>(
    value_kind: ValueKind,
    value: &Value<'a>,
) -> Option<&'a [u8]> {
    match (value_kind, value) {
        (ValueKind::String, Value::String(s)) => Some(s.as_bytes()),
        (ValueKind::Octets, Value::Octets(o)) => Some(o),
        (ValueKind::Abinary, Value::Abinary(o)) => Some(o),
        _ => None,
    }
}

fn encode_direct(
    out: &mut [u8],
    dict: &'static Dict,
    avp: &Avp<'_>,
    bytes: &[u8],
) -> EncodeResult<usize> {
    if dict.flags.contains(AttrFlags::HAS_TAG)
        && matches!(dict.kind, Kind::Leaf(ValueKind::String))
    {
        if let Some(tag) = avp.valid_tag() {
            if out.is_empty() {
                return Ok(0);
            }
            out[0] = tag;
            let n = bytes.len().min(out.len() - 1);
            out[1..1 + n].copy_from_slice(&bytes[..n]);
            return Ok(1 + n);
        }
    }

    let n = bytes.len().min(out.len());
    out[..n].copy_from_slice(&bytes[..n]);
    Ok(n)
}

// Stages a scalar/address value's natural network-order bytes into
// `scratch`, returning the length written. Used for every value kind that
// isn't already byte-shaped, plus String/Octets when they require
// encryption.
fn stage_raw(
    scratch: &mut [u8],
    value_kind: ValueKind,
    value: &Value<'_>,
) -> EncodeResult<usize> {
    match (value_kind, value) {
        (ValueKind::String, Value::String(s)) => {
            let bytes = s.as_bytes();
            let n = bytes.len().min(scratch.len());
            scratch[..n].copy_from_slice(&bytes[..n]);
            Ok(n)
        }
        (ValueKind::Octets, Value::Octets(o))
        | (ValueKind::Abinary, Value::Abinary(o)) => {
            let n = o.len().min(scratch.len());
            scratch[..n].copy_from_slice(&o[..n]);
            Ok(n)
        }
        (ValueKind::Byte, Value::Byte(b)) => {
            scratch[0] = *b;
            Ok(1)
        }
        (ValueKind::Short, Value::Short(v)) => {
            scratch[..2].copy_from_slice(&v.to_be_bytes());
            Ok(2)
        }
        (ValueKind::Integer, Value::Integer(v)) => {
            scratch[..4].copy_from_slice(&v.to_be_bytes());
            Ok(4)
        }
        (ValueKind::Integer64, Value::Integer64(v)) => {
            scratch[..8].copy_from_slice(&v.to_be_bytes());
            Ok(8)
        }
        (ValueKind::Date, Value::Date(v)) => {
            scratch[..4].copy_from_slice(&v.to_be_bytes());
            Ok(4)
        }
        (ValueKind::Signed, Value::Signed(v)) => {
            scratch[..4].copy_from_slice(&v.to_be_bytes());
            Ok(4)
        }
        (ValueKind::Boolean, Value::Boolean(b)) => {
            scratch[0] = u8::from(*b) & 0x01;
            Ok(1)
        }
        (ValueKind::Ipv4Addr, Value::Ipv4Addr(a)) => {
            scratch.put_ipv4(*a);
            Ok(4)
        }
        (ValueKind::Ipv6Addr, Value::Ipv6Addr(a)) => {
            scratch.put_ipv6(*a);
            Ok(16)
        }
        (ValueKind::Ethernet, Value::Ethernet(e)) => {
            scratch[..6].copy_from_slice(e);
            Ok(6)
        }
        (ValueKind::InterfaceId, Value::InterfaceId(i)) => {
            scratch[..8].copy_from_slice(i);
            Ok(8)
        }
        (ValueKind::Ipv4Prefix, Value::Ipv4Prefix(net)) => {
            scratch[0] = 0;
            scratch[1] = net.prefix();
            scratch[2..6].copy_from_slice(&net.ip().octets());
            Ok(6)
        }
        (ValueKind::Ipv6Prefix, Value::Ipv6Prefix(net)) => {
            scratch[0] = 0;
            scratch[1] = net.prefix();
            scratch[2..18].copy_from_slice(&net.ip().octets());
            Ok(18)
        }
        (ValueKind::ComboIp, Value::ComboIp(IpAddr::V4(a))) => {
            scratch.put_ipv4(*a);
            Ok(4)
        }
        (ValueKind::ComboIp, Value::ComboIp(IpAddr::V6(a))) => {
            scratch.put_ipv6(*a);
            Ok(16)
        }
        _ => Err(EncodeError::UnsupportedValue(
            "AVP value does not match its descriptor's value kind",
        )),
    }
}

fn encode_staged(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    dict: &'static Dict,
    avp: &Avp<'_>,
    raw: &mut [u8],
) -> EncodeResult<usize> {
    match dict.encrypt {
        EncryptKind::None => encode_plain(out, dict, avp, raw),
        EncryptKind::UserPassword => {
            encrypt_user_password(out, packet, original, raw)
        }
        EncryptKind::TunnelPassword => {
            encrypt_tunnel_password(out, packet, original, dict, avp, raw)
        }
        EncryptKind::AscendSecret => {
            encrypt_ascend_secret(out, packet, original, raw)
        }
    }
}

fn encode_plain(
    out: &mut [u8],
    dict: &'static Dict,
    avp: &Avp<'_>,
    raw: &[u8],
) -> EncodeResult<usize> {
    if dict.flags.contains(AttrFlags::HAS_TAG) {
        if let Some(tag) = avp.valid_tag() {
            // Integer: the tag overwrites the value's first octet rather
            // than being prepended (spec.md §4.9 step 6).
            if matches!(dict.kind, Kind::Leaf(ValueKind::Integer))
                && !raw.is_empty()
            {
                let mut tagged = [0u8; 4];
                tagged.copy_from_slice(&raw[..4.min(raw.len())]);
                tagged[0] = tag;
                let n = tagged.len().min(out.len());
                out[..n].copy_from_slice(&tagged[..n]);
                return Ok(n);
            }
            // Other scalar kinds: no tag placement.
        }
    }

    let n = raw.len().min(out.len());
    out[..n].copy_from_slice(&raw[..n]);
    Ok(n)
}

// C1.1 / RFC 2865 §5.2.
fn encrypt_user_password(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    raw: &[u8],
) -> EncodeResult<usize> {
    let clear_len = raw.len().min(128);
    // Zero-length cleartext still pads to a full 16-octet block.
    let padded_len = if clear_len == 0 {
        16
    } else {
        clear_len.div_ceil(16) * 16
    };
    let n = padded_len.min(out.len());
    if n == 0 {
        return Ok(0);
    }

    let mut block = [0u8; 128];
    let copy_n = clear_len.min(n);
    block[..copy_n].copy_from_slice(&raw[..copy_n]);

    let vector = packet.auth_vector(original);
    crypto::user_password_crypt(
        packet.secret.as_bytes(),
        &vector,
        &mut block[..n],
    );
    out[..n].copy_from_slice(&block[..n]);
    Ok(n)
}

// C1.2 / RFC 2868.
fn encrypt_tunnel_password(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    dict: &'static Dict,
    avp: &Avp<'_>,
    raw: &[u8],
) -> EncodeResult<usize> {
    let tag = if dict.flags.contains(AttrFlags::HAS_TAG) {
        avp.valid_tag()
    } else {
        None
    };
    let prefix = usize::from(tag.is_some());
    // At least one full cipher block plus the salt must fit, per spec.md
    // §4.9 step 5 ("ensure >= 18 free octets, 19 if tagged").
    let min_len = prefix + 2 + 16;
    if out.len() < min_len {
        return Ok(0);
    }

    if let Some(tag) = tag {
        out[0] = tag;
    }
    let salt = crypto::gen_salt();
    out[prefix..prefix + 2].copy_from_slice(&salt);

    let cipher_room = out.len() - prefix - 2;
    // The first cleartext octet is the unpadded password length.
    let clear_len = raw.len().min(252).min(127);
    let padded_len = (clear_len + 1).div_ceil(16) * 16;
    let n = padded_len.min(cipher_room);

    let mut block = [0u8; 128];
    block[0] = raw.len().min(253) as u8;
    let copy_n = clear_len.min(n.saturating_sub(1));
    block[1..1 + copy_n].copy_from_slice(&raw[..copy_n]);

    let vector = packet.auth_vector(original);
    crypto::tunnel_password_crypt(
        packet.secret.as_bytes(),
        &vector,
        &salt,
        &mut block[..n],
    );
    out[prefix + 2..prefix + 2 + n].copy_from_slice(&block[..n]);
    Ok(prefix + 2 + n)
}

// C1.3.
fn encrypt_ascend_secret(
    out: &mut [u8],
    packet: &PacketCtx,
    original: Option<&PacketCtx>,
    raw: &[u8],
) -> EncodeResult<usize> {
    if raw.len() != 16 {
        return Err(EncodeError::InvalidInput(
            "Ascend-Secret requires exactly 16 octets of cleartext",
        ));
    }
    let mut input = [0u8; 16];
    input.copy_from_slice(raw);

    let vector = packet.auth_vector(original);
    let cipher =
        crypto::ascend_secret_crypt(packet.secret.as_bytes(), &vector, &input);
    let n = cipher.len().min(out.len());
    out[..n].copy_from_slice(&cipher[..n]);
    Ok(n)
}
