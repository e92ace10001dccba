//! Payment addresses and how they resolve to verkeys.
//!
//! A payment address is normally the base58 verkey of its owner, which
//! makes it self-certifying: nobody needs to be asked which key controls
//! it. Identifiers of any other length are DIDs, and those have to go
//! through the registry.

use std::borrow::Cow;

use super::registry::KeyRegistry;
use crate::config::SELF_CERTIFYING_LENGTHS;

/// `true` if `address` has the text length of a directly encoded verkey.
///
/// Length is counted in characters, not bytes.
pub fn is_self_certifying(address: &str) -> bool {
    SELF_CERTIFYING_LENGTHS.contains(&address.chars().count())
}

/// Resolve the verkey text for an input's address.
///
/// Self-certifying addresses are returned as-is and the registry is never
/// consulted for them. Anything else is looked up.
pub fn resolve_address_verkey<'a, R>(address: &'a str, registry: &R) -> Option<Cow<'a, str>>
where
    R: KeyRegistry + ?Sized,
{
    if is_self_certifying(address) {
        return Some(Cow::Borrowed(address));
    }
    registry.resolve_key(address).map(Cow::Owned)
}
