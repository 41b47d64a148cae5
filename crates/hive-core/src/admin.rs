//! ============================================================================
//! Admin Checker - Hardcoded allow-list for the admin panel
//! ============================================================================
//! Membership is a pure string-set lookup, compiled into the binary and
//! immutable at runtime. An empty or absent address is never an admin.
//! ============================================================================

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Wallets allowed into the admin panels
const ADMIN_ADDRESSES: &[&str] = &[
    "72j257cEWGEaD3379m8w59bceMJDsqe3dCuaivXPF7RL",
    "GfVvK6bRnxhPZu8eWDyc7q9M4tEJwoUAsm2XL3pSkdNQ",
    "Hq4mTsvXeJ7uPynZbE2cWw8RkaG95dDfCML6NUjrBoAt",
];

static ADMIN_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ADMIN_ADDRESSES.iter().copied().collect());

/// Check whether the given wallet address is an admin
pub fn is_admin_address(address: Option<&str>) -> bool {
    match address {
        Some(addr) if !addr.is_empty() => ADMIN_SET.contains(addr),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_address_is_admin() {
        assert!(is_admin_address(Some(
            "72j257cEWGEaD3379m8w59bceMJDsqe3dCuaivXPF7RL"
        )));
    }

    #[test]
    fn test_all_listed_addresses_are_admin() {
        for addr in ADMIN_ADDRESSES {
            assert!(is_admin_address(Some(addr)), "{} should be admin", addr);
        }
    }

    #[test]
    fn test_unlisted_address_is_not_admin() {
        assert!(!is_admin_address(Some("abc")));
        assert!(!is_admin_address(Some(
            "11111111111111111111111111111111"
        )));
    }

    #[test]
    fn test_empty_and_absent_are_not_admin() {
        assert!(!is_admin_address(Some("")));
        assert!(!is_admin_address(None));
    }

    #[test]
    fn test_membership_is_exact() {
        // Case and whitespace variations must not match
        assert!(!is_admin_address(Some(
            "72j257cewgead3379m8w59bcemjdsqe3dcuaivxpf7rl"
        )));
        assert!(!is_admin_address(Some(
            " 72j257cEWGEaD3379m8w59bceMJDsqe3dCuaivXPF7RL"
        )));
    }
}
