//! Region codes used by the tests, so suites stay free of bare string
//! literals.

pub(crate) struct RegionCode {}

#[allow(dead_code)]
impl RegionCode {
    pub fn ar() -> &'static str {
        "AR"
    }

    pub fn au() -> &'static str {
        "AU"
    }

    pub fn bs() -> &'static str {
        "BS"
    }

    /// An officially deprecated region; no metadata exists for it.
    pub fn cs() -> &'static str {
        "CS"
    }

    pub fn de() -> &'static str {
        "DE"
    }

    pub fn gb() -> &'static str {
        "GB"
    }

    pub fn il() -> &'static str {
        "IL"
    }

    pub fn it() -> &'static str {
        "IT"
    }

    pub fn jp() -> &'static str {
        "JP"
    }

    pub fn kr() -> &'static str {
        "KR"
    }

    pub fn nz() -> &'static str {
        "NZ"
    }

    pub fn re() -> &'static str {
        "RE"
    }

    pub fn sg() -> &'static str {
        "SG"
    }

    pub fn us() -> &'static str {
        "US"
    }

    pub fn yt() -> &'static str {
        "YT"
    }

    pub fn un001() -> &'static str {
        "001"
    }

    pub fn zz() -> &'static str {
        "ZZ"
    }
}
