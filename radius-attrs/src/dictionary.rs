//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The resolved attribute descriptor tree (RADIUS dictionary data model).
//!
//! This module does not parse dictionary files — `spec.md` §1 excludes the
//! loader. It only holds the shape a loader would produce: an immutable tree
//! of [`Dict`] nodes, one per attribute or sub-attribute, plus the per-vendor
//! type/length width table consulted by the VSA encoder.

use std::collections::HashMap;

use bitflags::bitflags;

// Maximum descriptor nesting depth (root at 0, leaf at MAX_TLV_STACK).
pub const MAX_TLV_STACK: usize = 16;

// The kind of node a [`Dict`] describes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    // A scalar attribute carrying a value of the given kind.
    Leaf(ValueKind),
    // A parent whose children are nested Type-Length-Value sub-attributes.
    Tlv,
    // Vendor-Specific Attribute (type 26) parent.
    Vsa,
    // A specific vendor's namespace beneath a `Vsa` node.
    Vendor,
    // Extended Vendor-Specific sub-format, valid only beneath `Extended`.
    Evs,
    // RFC 6929 extended attribute.
    Extended,
    // RFC 6929 long-extended attribute (continuation-capable).
    LongExtended,
}

// The wire representation of a leaf attribute's value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    String,
    Octets,
    Ipv4Addr,
    Ipv6Addr,
    Ipv4Prefix,
    Ipv6Prefix,
    InterfaceId,
    Ethernet,
    Abinary,
    ComboIp,
    Byte,
    Short,
    Integer,
    Integer64,
    Date,
    Signed,
    Boolean,
}

// In-place encryption/obfuscation applied by the value serializer (C2).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EncryptKind {
    #[default]
    None,
    UserPassword,
    TunnelPassword,
    AscendSecret,
}

bitflags! {
    // Per-attribute behavioral flags (`spec.md` §3.1).
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct AttrFlags: u8 {
        // The attribute carries a 1-octet tag (values 1..31 are valid tags).
        const HAS_TAG = 0b0000_0001;
        // An octets-valued leaf may be split across sibling attributes of
        // the same type when its value overflows one attribute.
        const CONCAT = 0b0000_0010;
        // The extended attribute supports M-bit continuation fragments.
        const LONG_EXTENDED = 0b0000_0100;
        // The VSA uses the WiMAX continuation-byte convention.
        const WIMAX = 0b0000_1000;
        // The extended attribute nests an EVS (vendor) sub-format.
        const EVS = 0b0001_0000;
    }
}

// An immutable attribute descriptor (dictionary node).
//
// Trees are built once by the caller's dictionary loader and referenced for
// the lifetime of the program, so nodes are addressed by `&'static`
// reference rather than owned/boxed — this keeps the stack walker (C3)
// allocation-free.
#[derive(Debug)]
pub struct Dict {
    pub attr: u32,
    pub vendor: u32,
    pub kind: Kind,
    pub flags: AttrFlags,
    pub encrypt: EncryptKind,
    pub parent: Option<&'static Dict>,
    pub depth: usize,
    pub name: &'static str,
}

// ===== impl Dict =====

impl Dict {
    /// Constructs a top-level RFC-space leaf attribute.
    pub const fn leaf(
        attr: u32,
        name: &'static str,
        value_kind: ValueKind,
        flags: AttrFlags,
        encrypt: EncryptKind,
    ) -> Dict {
        Dict {
            attr,
            vendor: 0,
            kind: Kind::Leaf(value_kind),
            flags,
            encrypt,
            parent: None,
            depth: 0,
            name,
        }
    }

    /// Constructs a top-level TLV parent.
    pub const fn tlv(attr: u32, name: &'static str) -> Dict {
        Dict {
            attr,
            vendor: 0,
            kind: Kind::Tlv,
            flags: AttrFlags::empty(),
            encrypt: EncryptKind::None,
            parent: None,
            depth: 0,
            name,
        }
    }

    /// Constructs a child node beneath `parent`, inheriting its vendor
    /// namespace and incrementing depth.
    pub const fn child(
        parent: &'static Dict,
        attr: u32,
        name: &'static str,
        kind: Kind,
        flags: AttrFlags,
        encrypt: EncryptKind,
    ) -> Dict {
        Dict {
            attr,
            vendor: parent.vendor,
            kind,
            flags,
            encrypt,
            parent: Some(parent),
            depth: parent.depth + 1,
            name,
        }
    }

    /// Constructs the top of a vendor namespace (`Vendor` under a `Vsa`, or
    /// top-level `Vsa` itself with `vendor` set directly).
    pub const fn vendor(
        parent: &'static Dict,
        vendor: u32,
        name: &'static str,
    ) -> Dict {
        Dict {
            attr: 0,
            vendor,
            kind: Kind::Vendor,
            flags: AttrFlags::empty(),
            encrypt: EncryptKind::None,
            parent: Some(parent),
            depth: parent.depth + 1,
            name,
        }
    }

    /// Constructs a top-level `Vsa` root (type 26).
    pub const fn vsa(name: &'static str) -> Dict {
        Dict {
            attr: 26,
            vendor: 0,
            kind: Kind::Vsa,
            flags: AttrFlags::empty(),
            encrypt: EncryptKind::None,
            parent: None,
            depth: 0,
            name,
        }
    }

    /// Constructs a top-level `Extended`/`LongExtended` attribute.
    pub const fn extended(
        attr: u32,
        name: &'static str,
        long: bool,
    ) -> Dict {
        Dict {
            attr,
            vendor: 0,
            kind: if long {
                Kind::LongExtended
            } else {
                Kind::Extended
            },
            flags: if long {
                AttrFlags::LONG_EXTENDED
            } else {
                AttrFlags::empty()
            },
            encrypt: EncryptKind::None,
            parent: None,
            depth: 0,
            name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, Kind::Leaf(_))
    }
}

impl std::fmt::Display for Dict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Leaf(vk) => write!(f, "Leaf({vk})"),
            Kind::Tlv => write!(f, "TLV"),
            Kind::Vsa => write!(f, "VSA"),
            Kind::Vendor => write!(f, "Vendor"),
            Kind::Evs => write!(f, "EVS"),
            Kind::Extended => write!(f, "Extended"),
            Kind::LongExtended => write!(f, "Long-Extended"),
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueKind::String => "string",
            ValueKind::Octets => "octets",
            ValueKind::Ipv4Addr => "ipaddr",
            ValueKind::Ipv6Addr => "ipv6addr",
            ValueKind::Ipv4Prefix => "ipv4prefix",
            ValueKind::Ipv6Prefix => "ipv6prefix",
            ValueKind::InterfaceId => "ifid",
            ValueKind::Ethernet => "ether",
            ValueKind::Abinary => "abinary",
            ValueKind::ComboIp => "combo-ip",
            ValueKind::Byte => "byte",
            ValueKind::Short => "short",
            ValueKind::Integer => "integer",
            ValueKind::Integer64 => "integer64",
            ValueKind::Date => "date",
            ValueKind::Signed => "signed",
            ValueKind::Boolean => "bool",
        };
        write!(f, "{s}")
    }
}

// Per-vendor inner header widths consulted by the VSA encoder (C6).
//
// `type_width` is the number of octets used for the vendor-specific
// attribute number (1, 2 or 4 — 4 always has a zero leading octet).
// `length_width` is the number of octets used for the vendor-specific
// length field (0 means the inner attribute carries no length at all).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VendorDescriptor {
    pub type_width: u8,
    pub length_width: u8,
}

impl VendorDescriptor {
    // The RFC 2865 §5.26 default, used when nothing more specific is known.
    pub const DEFAULT: VendorDescriptor = VendorDescriptor {
        type_width: 1,
        length_width: 1,
    };
}

// Looks up the per-vendor type/length widths by enterprise number.
//
// This is the caller-supplied collaborator from `spec.md` §6.2; the crate
// only consumes it.
pub trait VendorLookup {
    fn lookup(&self, vendor: u32) -> Option<VendorDescriptor>;
}

// A minimal in-memory [`VendorLookup`] for tests and embedding without a
// real dictionary loader (`SPEC_FULL.md` §10.2).
#[derive(Clone, Debug, Default)]
pub struct VendorTable {
    vendors: HashMap<u32, VendorDescriptor>,
}

impl VendorTable {
    pub fn new() -> VendorTable {
        VendorTable::default()
    }

    pub fn insert(&mut self, vendor: u32, descriptor: VendorDescriptor) {
        self.vendors.insert(vendor, descriptor);
    }
}

impl VendorLookup for VendorTable {
    fn lookup(&self, vendor: u32) -> Option<VendorDescriptor> {
        self.vendors.get(&vendor).copied()
    }
}

// The WiMAX enterprise number (used by C8).
pub const VENDOR_WIMAX: u32 = 24757;
