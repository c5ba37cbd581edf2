//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Encoder for the attribute region of a RADIUS packet (RFC 2865, RFC 2868,
//! RFC 6929, and common vendor conventions).
//!
//! This crate does not parse dictionaries, build packet headers, finalize
//! Message-Authenticator, or decode. It consumes a resolved attribute
//! descriptor tree and a linked list of attribute-value pairs and writes
//! their on-wire form into a caller-owned buffer.

pub mod avp;
mod bytes_ext;
pub mod crypto;
pub mod dictionary;
pub mod encode;
pub mod error;
mod fragment;
pub mod packet;
mod stack;
mod value;

pub use avp::{Avp, Value};
pub use dictionary::{
    AttrFlags, Dict, EncryptKind, Kind, VendorDescriptor, VendorLookup,
    VendorTable, ValueKind,
};
pub use encode::dispatch::{encode_pair, encode_pairs};
pub use error::{EncodeError, EncodeResult};
pub use packet::PacketCtx;
