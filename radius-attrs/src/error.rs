//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

// Type aliases.
pub type EncodeResult<T> = Result<T, EncodeError>;

// RADIUS attribute encode errors.
//
// Ordered roughly by severity, matching `spec.md` §7.
#[derive(Debug, Eq, PartialEq)]
pub enum EncodeError {
    // The descriptor stack for the current AVP exceeds the maximum nesting
    // depth (16). Fatal for this AVP; the caller should drop it.
    StackOverflow,
    // NULL/empty data, EVS used outside of an Extended attribute, a TLV
    // parent with no children, or a scalar AVP under a TLV descriptor.
    InvalidInput(&'static str),
    // Unknown vendor type/length width combination, or unknown leaf value
    // kind.
    UnsupportedValue(&'static str),
}

// ===== impl EncodeError =====

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::StackOverflow => {
                write!(f, "attribute descriptor stack exceeds depth bound")
            }
            EncodeError::InvalidInput(msg) => {
                write!(f, "invalid input: {msg}")
            }
            EncodeError::UnsupportedValue(msg) => {
                write!(f, "unsupported value: {msg}")
            }
        }
    }
}

impl std::error::Error for EncodeError {}
