use super::layout;

/// Compiled-in canonical layout for one target platform.
///
/// Every profile shares the canonical field offsets up to
/// [`layout::KERNEL_SIZE`]; they differ only in how much trailing structure
/// the canonical record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeProfile {
    /// Stable profile name, used on the command line.
    pub name: &'static str,
    /// `sizeof(struct iw_range)` for this profile.
    pub canonical_size: usize,
    pub description: &'static str,
}

impl RangeProfile {
    /// Size of the reply buffer handed to the driver: twice the canonical
    /// structure, so a driver built against a newer layout still fits.
    pub const fn buffer_len(&self) -> usize {
        self.canonical_size * 2
    }

    /// Whether the canonical record carries the wireless-tools tail.
    pub const fn has_extended_tail(&self) -> bool {
        self.canonical_size >= layout::EXTENDED_SIZE
    }

    /// Look up a profile by name.
    ///
    /// # Examples
    /// ```
    /// use iwrange_core::range::RangeProfile;
    ///
    /// let profile = RangeProfile::by_name("kernel").unwrap();
    /// assert_eq!(profile.canonical_size, 568);
    /// assert!(RangeProfile::by_name("nope").is_none());
    /// ```
    pub fn by_name(name: &str) -> Option<&'static RangeProfile> {
        PROFILES.iter().find(|profile| profile.name == name)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        PROFILES.iter().map(|profile| profile.name)
    }
}

impl Default for RangeProfile {
    fn default() -> Self {
        KERNEL
    }
}

pub const KERNEL: RangeProfile = RangeProfile {
    name: "kernel",
    canonical_size: layout::KERNEL_SIZE,
    description: "Linux UAPI struct iw_range (WE-22), ends at enc_capa",
};

pub const WIRELESS_TOOLS: RangeProfile = RangeProfile {
    name: "wireless-tools",
    canonical_size: layout::EXTENDED_SIZE,
    description: "wireless-tools wireless.h, adds power-saving, modulation and bitrate capabilities",
};

pub static PROFILES: [RangeProfile; 2] = [KERNEL, WIRELESS_TOOLS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_names_are_unique() {
        let mut names: Vec<_> = RangeProfile::names().collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PROFILES.len());
    }

    #[test]
    fn buffers_hold_two_structures() {
        assert_eq!(KERNEL.buffer_len(), 1136);
        assert_eq!(WIRELESS_TOOLS.buffer_len(), 1176);
        for profile in &PROFILES {
            assert!(profile.buffer_len() <= u16::MAX as usize);
            assert!(profile.canonical_size >= layout::KERNEL_SIZE);
        }
    }

    #[test]
    fn only_wireless_tools_has_extended_tail() {
        assert!(!KERNEL.has_extended_tail());
        assert!(WIRELESS_TOOLS.has_extended_tail());
    }

    #[test]
    fn default_is_kernel() {
        assert_eq!(RangeProfile::default(), KERNEL);
        assert_eq!(RangeProfile::by_name("wireless-tools"), Some(&WIRELESS_TOOLS));
    }
}
