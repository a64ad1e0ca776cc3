use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// ISO 3166-1 alpha-2 region code, uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region([u8; 2]);

impl Region {
    pub const US: Region = Region(*b"US");
    pub const GB: Region = Region(*b"GB");
    pub const DE: Region = Region(*b"DE");
    pub const FR: Region = Region(*b"FR");
    pub const IN: Region = Region(*b"IN");
    pub const PK: Region = Region(*b"PK");
    pub const NG: Region = Region(*b"NG");
    pub const BD: Region = Region(*b"BD");

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("ZZ")
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("region code must be two ASCII letters")]
pub struct RegionParseError;

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        match bytes {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Ok(Region([a.to_ascii_uppercase(), b.to_ascii_uppercase()]))
            }
            _ => Err(RegionParseError),
        }
    }
}

/// Line type of a number that is valid under some region's plan.
///
/// Plans where mobile and fixed-line ranges overlap (NANP regions) yield
/// `FixedLineOrMobile`, which is deliberately NOT treated as mobile by
/// [`LineType::is_mobile`] - it mirrors the strict `type == MOBILE` check the
/// classifier depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Mobile,
    FixedLine,
    FixedLineOrMobile,
}

impl LineType {
    pub fn is_mobile(self) -> bool {
        matches!(self, LineType::Mobile)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneParseError {
    #[error("input is not a phone number")]
    NotANumber,
    #[error("unrecognized country calling code")]
    UnknownCallingCode,
    #[error("no numbering plan for region {0}")]
    UnsupportedRegion(Region),
    #[error("number is not valid for region {0}")]
    InvalidForRegion(Region),
}

/// A number that validated against a region plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    region: Region,
    calling_code: &'static str,
    national: String,
    line_type: LineType,
}

impl PhoneNumber {
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    pub fn national(&self) -> &str {
        &self.national
    }

    /// E.164 rendering of the number.
    pub fn e164(&self) -> String {
        format!("+{}{}", self.calling_code, self.national)
    }
}

#[derive(Debug, Clone)]
struct RegionPlan {
    region: Region,
    calling_code: &'static str,
    trunk_prefix: Option<&'static str>,
    mobile: Regex,
    fixed_line: Regex,
}

impl RegionPlan {
    fn classify(&self, national: &str) -> Result<PhoneNumber, PhoneParseError> {
        let line_type = match (
            self.mobile.is_match(national),
            self.fixed_line.is_match(national),
        ) {
            (true, true) => LineType::FixedLineOrMobile,
            (true, false) => LineType::Mobile,
            (false, true) => LineType::FixedLine,
            (false, false) => return Err(PhoneParseError::InvalidForRegion(self.region)),
        };

        Ok(PhoneNumber {
            region: self.region,
            calling_code: self.calling_code,
            national: national.to_string(),
            line_type,
        })
    }
}

fn plan(
    region: Region,
    calling_code: &'static str,
    trunk_prefix: Option<&'static str>,
    mobile: &str,
    fixed_line: &str,
) -> RegionPlan {
    RegionPlan {
        region,
        calling_code,
        trunk_prefix,
        mobile: Regex::new(mobile).expect("hard-coded mobile pattern"),
        fixed_line: Regex::new(fixed_line).expect("hard-coded fixed-line pattern"),
    }
}

// National significant number shapes, trimmed to the ranges the app actually
// ships with. NANP mobile and fixed-line ranges are indistinguishable, hence
// the shared pattern for US.
static BUNDLED_PLANS: LazyLock<Vec<RegionPlan>> = LazyLock::new(|| {
    vec![
        plan(
            Region::US,
            "1",
            Some("1"),
            r"^[2-9]\d{2}[2-9]\d{6}$",
            r"^[2-9]\d{2}[2-9]\d{6}$",
        ),
        plan(
            Region::GB,
            "44",
            Some("0"),
            r"^7[1-9]\d{8}$",
            r"^[12]\d{8,9}$",
        ),
        plan(
            Region::DE,
            "49",
            Some("0"),
            r"^1[5-7]\d{8,9}$",
            r"^[2-9]\d{6,10}$",
        ),
        plan(
            Region::FR,
            "33",
            Some("0"),
            r"^[67]\d{8}$",
            r"^[1-5]\d{8}$",
        ),
        plan(
            Region::IN,
            "91",
            Some("0"),
            r"^[6-9]\d{9}$",
            r"^[2-5]\d{9}$",
        ),
        plan(
            Region::PK,
            "92",
            Some("0"),
            r"^3\d{9}$",
            r"^[2-9]1\d{7,8}$",
        ),
        plan(
            Region::NG,
            "234",
            Some("0"),
            r"^[789][01]\d{8}$",
            r"^[1-6]\d{6,7}$",
        ),
        plan(
            Region::BD,
            "880",
            Some("0"),
            r"^1[3-9]\d{8}$",
            r"^2\d{7,9}$",
        ),
    ]
});

/// Region-keyed phone metadata: calling codes, trunk prefixes and the
/// mobile/fixed-line shapes of the national significant number.
#[derive(Debug, Clone)]
pub struct NumberingPlan {
    regions: Vec<RegionPlan>,
}

impl NumberingPlan {
    /// The plan data compiled into the client.
    pub fn bundled() -> Self {
        Self {
            regions: BUNDLED_PLANS.clone(),
        }
    }

    pub fn supports(&self, region: Region) -> bool {
        self.plan_for(region).is_some()
    }

    /// Parse `input` as a phone number, using `default_region` when the input
    /// carries no country calling code.
    ///
    /// Succeeds only for numbers that validate against a known plan; the
    /// returned [`LineType`] tells the caller whether the number is strictly
    /// mobile.
    pub fn parse(
        &self,
        input: &str,
        default_region: Region,
    ) -> Result<PhoneNumber, PhoneParseError> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();

        let (digits, international) = if let Some(rest) = cleaned.strip_prefix('+') {
            (rest.to_string(), true)
        } else if let Some(rest) = cleaned.strip_prefix("00") {
            (rest.to_string(), true)
        } else {
            (cleaned, false)
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneParseError::NotANumber);
        }

        if international {
            self.parse_international(&digits)
        } else {
            let plan = self
                .plan_for(default_region)
                .ok_or(PhoneParseError::UnsupportedRegion(default_region))?;
            plan.classify(strip_trunk_prefix(plan, &digits))
        }
    }

    fn parse_international(&self, digits: &str) -> Result<PhoneNumber, PhoneParseError> {
        // Longest calling-code match wins.
        let mut best: Option<(&RegionPlan, &str)> = None;
        for plan in &self.regions {
            if let Some(national) = digits.strip_prefix(plan.calling_code) {
                let longer = best.is_none_or(|(b, _)| plan.calling_code.len() > b.calling_code.len());
                if longer {
                    best = Some((plan, national));
                }
            }
        }

        let (plan, national) = best.ok_or(PhoneParseError::UnknownCallingCode)?;
        plan.classify(national)
    }

    fn plan_for(&self, region: Region) -> Option<&RegionPlan> {
        self.regions.iter().find(|plan| plan.region == region)
    }
}

fn strip_trunk_prefix<'a>(plan: &RegionPlan, digits: &'a str) -> &'a str {
    match plan.trunk_prefix {
        Some(prefix) => digits.strip_prefix(prefix).unwrap_or(digits),
        None => digits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_parses_case_insensitively() {
        assert_eq!("gb".parse::<Region>().unwrap(), Region::GB);
        assert_eq!("US".parse::<Region>().unwrap(), Region::US);
        assert!("GBR".parse::<Region>().is_err());
        assert!("4A".parse::<Region>().is_err());
    }

    #[test]
    fn parses_national_mobile_number() {
        let plan = NumberingPlan::bundled();
        let number = plan.parse("07911123456", Region::GB).unwrap();
        assert_eq!(number.region(), Region::GB);
        assert_eq!(number.line_type(), LineType::Mobile);
        assert_eq!(number.e164(), "+447911123456");
    }

    #[test]
    fn parses_international_mobile_number() {
        let plan = NumberingPlan::bundled();
        let number = plan.parse("+447911123456", Region::US).unwrap();
        assert_eq!(number.region(), Region::GB);
        assert!(number.line_type().is_mobile());

        let number = plan.parse("00447911123456", Region::US).unwrap();
        assert_eq!(number.region(), Region::GB);
    }

    #[test]
    fn classifies_landline_as_fixed_line() {
        let plan = NumberingPlan::bundled();
        let number = plan.parse("02079460958", Region::GB).unwrap();
        assert_eq!(number.line_type(), LineType::FixedLine);
        assert!(!number.line_type().is_mobile());
    }

    #[test]
    fn nanp_numbers_are_fixed_line_or_mobile() {
        let plan = NumberingPlan::bundled();
        let number = plan.parse("+12125552671", Region::US).unwrap();
        assert_eq!(number.line_type(), LineType::FixedLineOrMobile);
        assert!(!number.line_type().is_mobile());
    }

    #[test]
    fn strips_separators_before_parsing() {
        let plan = NumberingPlan::bundled();
        let number = plan.parse("+44 7911 123-456", Region::GB).unwrap();
        assert_eq!(number.national(), "7911123456");
    }

    #[test]
    fn rejects_numbers_invalid_for_region() {
        let plan = NumberingPlan::bundled();
        assert_eq!(
            plan.parse("0999", Region::GB),
            Err(PhoneParseError::InvalidForRegion(Region::GB))
        );
    }

    #[test]
    fn rejects_non_numeric_input() {
        let plan = NumberingPlan::bundled();
        assert_eq!(
            plan.parse("not a number", Region::GB),
            Err(PhoneParseError::NotANumber)
        );
    }

    #[test]
    fn rejects_unknown_calling_code() {
        let plan = NumberingPlan::bundled();
        assert_eq!(
            plan.parse("+999123456789", Region::GB),
            Err(PhoneParseError::UnknownCallingCode)
        );
    }

    #[test]
    fn rejects_unsupported_default_region() {
        let plan = NumberingPlan::bundled();
        let aq = "AQ".parse::<Region>().unwrap();
        assert_eq!(
            plan.parse("07911123456", aq),
            Err(PhoneParseError::UnsupportedRegion(aq))
        );
    }
}
