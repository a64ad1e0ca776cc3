use warble_core::Region;

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// The device region the classifier should default to, read the way the
/// mobile client reads the OS locale. POSIX locale variables are consulted
/// in precedence order; `fallback` (usually the configured region) covers
/// headless environments.
pub fn detect_region(fallback: Region) -> Region {
    LOCALE_VARS
        .iter()
        .find_map(|var| {
            let value = std::env::var(var).ok()?;
            region_from_locale(&value)
        })
        .unwrap_or(fallback)
}

/// Territory part of a locale string: `en_GB.UTF-8`, `en-GB`, `de_DE@euro`.
fn region_from_locale(locale: &str) -> Option<Region> {
    let base = locale.split(['.', '@']).next()?;
    let territory = base.split(['_', '-']).nth(1)?;
    territory.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_territory_part() {
        assert_eq!(region_from_locale("en_GB.UTF-8"), Some(Region::GB));
        assert_eq!(region_from_locale("en-GB"), Some(Region::GB));
        assert_eq!(region_from_locale("de_DE@euro"), Some(Region::DE));
        assert_eq!(region_from_locale("bn_BD"), Some(Region::BD));
    }

    #[test]
    fn rejects_locales_without_a_territory() {
        assert_eq!(region_from_locale("C"), None);
        assert_eq!(region_from_locale("POSIX"), None);
        assert_eq!(region_from_locale("en"), None);
        assert_eq!(region_from_locale(""), None);
    }

    #[test]
    fn rejects_malformed_territories() {
        assert_eq!(region_from_locale("en_GBR"), None);
        assert_eq!(region_from_locale("en_1"), None);
    }
}
