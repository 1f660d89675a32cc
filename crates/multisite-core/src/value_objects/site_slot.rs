//! The fixed catalogue of public sites served by this deployment

/// One public page: its route, the domain key it reads, and the values shown
/// when the backend has nothing for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteSlot {
    pub index: u8,
    pub path: &'static str,
    pub domain: &'static str,
    pub placeholder_name: &'static str,
    pub placeholder_number: &'static str,
}

impl SiteSlot {
    const fn new(
        index: u8,
        path: &'static str,
        domain: &'static str,
        placeholder_name: &'static str,
        placeholder_number: &'static str,
    ) -> Self {
        Self {
            index,
            path,
            domain,
            placeholder_name,
            placeholder_number,
        }
    }

    /// Look up a slot by its route path (`/site3`)
    pub fn by_path(path: &str) -> Option<&'static SiteSlot> {
        SITE_SLOTS.iter().find(|slot| slot.path == path)
    }

    /// Look up a slot by its domain key
    pub fn by_domain(domain: &str) -> Option<&'static SiteSlot> {
        SITE_SLOTS
            .iter()
            .find(|slot| slot.domain.eq_ignore_ascii_case(domain))
    }

    /// Check whether a domain belongs to the catalogue
    pub fn is_known_domain(domain: &str) -> bool {
        Self::by_domain(domain).is_some()
    }
}

pub const SITE_SLOTS: [SiteSlot; 10] = [
    SiteSlot::new(1, "/site1", "site1.example.com", "Site One", "+1234567890"),
    SiteSlot::new(2, "/site2", "site2.example.com", "Site Two", "+1234567891"),
    SiteSlot::new(3, "/site3", "site3.example.com", "Site Three", "+1234567892"),
    SiteSlot::new(4, "/site4", "site4.example.com", "Site Four", "+1234567893"),
    SiteSlot::new(5, "/site5", "site5.example.com", "Site Five", "+1234567894"),
    SiteSlot::new(6, "/site6", "site6.example.com", "Site Six", "+1234567895"),
    SiteSlot::new(7, "/site7", "site7.example.com", "Site Seven", "+1234567896"),
    SiteSlot::new(8, "/site8", "site8.example.com", "Site Eight", "+1234567897"),
    SiteSlot::new(9, "/site9", "site9.example.com", "Site Nine", "+1234567898"),
    SiteSlot::new(10, "/site10", "site10.example.com", "Site Ten", "+1234567899"),
];
