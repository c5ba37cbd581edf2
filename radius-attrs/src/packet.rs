//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The read-only packet context passed into the encoder (`spec.md` §3.5).

use derive_new::new;

// RADIUS codes relevant to password encryption's vector selection
// (`spec.md` §9 — Tunnel-Password vector selection).
pub const CODE_ACCESS_REQUEST: u8 = 1;
pub const CODE_ACCESS_ACCEPT: u8 = 2;
pub const CODE_ACCESS_REJECT: u8 = 3;
pub const CODE_ACCOUNTING_REQUEST: u8 = 4;
pub const CODE_ACCOUNTING_RESPONSE: u8 = 5;
pub const CODE_ACCESS_CHALLENGE: u8 = 11;
pub const CODE_STATUS_SERVER: u8 = 12;
pub const CODE_STATUS_CLIENT: u8 = 13;
pub const CODE_DISCONNECT_REQUEST: u8 = 40;
pub const CODE_DISCONNECT_ACK: u8 = 41;
pub const CODE_DISCONNECT_NAK: u8 = 42;
pub const CODE_COA_REQUEST: u8 = 43;
pub const CODE_COA_ACK: u8 = 44;
pub const CODE_COA_NAK: u8 = 45;

// The packet this AVP list belongs to.
#[derive(Clone, Copy, Debug, new)]
pub struct PacketCtx<'a> {
    pub code: u8,
    pub authenticator: [u8; 16],
    pub secret: &'a str,
}

impl<'a> PacketCtx<'a> {
    /// True for request codes (as opposed to response/reply codes).
    ///
    /// `spec.md` §9: Tunnel-Password encryption uses `packet->vector` for
    /// request codes and `original->vector` for reply codes.
    pub fn is_request(&self) -> bool {
        matches!(
            self.code,
            CODE_ACCESS_REQUEST
                | CODE_ACCOUNTING_REQUEST
                | CODE_STATUS_SERVER
                | CODE_STATUS_CLIENT
                | CODE_DISCONNECT_REQUEST
                | CODE_COA_REQUEST
        )
    }

    /// Selects the authenticator to use as the password-encryption vector,
    /// honoring the request/reply split documented in `spec.md` §9.
    pub fn auth_vector(&self, original: Option<&PacketCtx<'a>>) -> [u8; 16] {
        if self.is_request() {
            self.authenticator
        } else {
            original
                .map(|orig| orig.authenticator)
                .unwrap_or(self.authenticator)
        }
    }
}
