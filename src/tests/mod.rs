mod region_code;

mod aytf_tests;
mod phonenumberutil_tests;

pub(crate) use metadata_for_tests::test_metadata_collection;
pub(crate) use region_code::RegionCode;

use crate::PhoneNumberUtil;

static INIT_LOGGER: std::sync::Once = std::sync::Once::new();

/// One fixture for every suite: a util over the test metadata, with the
/// test logger installed on first use.
pub(crate) fn get_phone_util() -> PhoneNumberUtil {
    INIT_LOGGER.call_once(|| {
        colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .init()
    });
    PhoneNumberUtil::new(test_metadata_collection())
}
