use crate::metadata::{NumberFormat, PhoneMetadata, PhoneNumberDesc};
use crate::{
    CountryCodeSource, MatchType, NumberLengthType, ParseError, PhoneNumber, PhoneNumberFormat,
    PhoneNumberType, ValidationError,
};

use super::{get_phone_util, RegionCode};

fn us_number() -> PhoneNumber {
    let mut number = PhoneNumber::new();
    number.set_country_code(1).set_national_number(6502530000);
    number
}

fn nz_number() -> PhoneNumber {
    let mut number = PhoneNumber::new();
    number.set_country_code(64).set_national_number(33316005);
    number
}

fn it_number() -> PhoneNumber {
    let mut number = PhoneNumber::new();
    number
        .set_country_code(39)
        .set_national_number(236618300)
        .set_italian_leading_zero(true);
    number
}

#[test]
fn interchange_invalid_codepoints() {
    let phone_util = get_phone_util();

    // U+2013, EN DASH, is acceptable punctuation.
    let valid_inputs = vec!["+44\u{2013}2087654321"];
    for input in valid_inputs {
        assert_eq!(input, dec_from_char::normalize_decimals(input));
        assert!(phone_util.is_viable_phone_number(input));
        phone_util.parse(input, RegionCode::gb()).unwrap();
    }

    let invalid_inputs = vec![
        "+44\u{96}2087654321",   // Invalid sequence
        "+44\u{0096}2087654321", // U+0096
        "+44\u{fffe}2087654321", // U+FFFE
    ];
    for input in invalid_inputs {
        assert!(!phone_util.is_viable_phone_number(input));
        assert!(phone_util
            .parse(input, RegionCode::gb())
            .is_err_and(|err| matches!(err, ParseError::NotANumber)));
    }
}

#[test]
fn get_supported_regions() {
    let phone_util = get_phone_util();
    assert!(phone_util.get_supported_regions().count() > 0);
    // The non-geographical entities are not regions.
    assert!(!phone_util
        .get_supported_regions()
        .any(|region| region == RegionCode::un001()));
}

#[test]
fn get_supported_global_network_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util
        .get_supported_global_network_calling_codes()
        .collect::<Vec<_>>();
    assert!(!calling_codes.is_empty());
    for &code in &calling_codes {
        assert!(code > 0);
        let region_code = phone_util.get_region_code_for_country_code(code);
        assert_eq!(RegionCode::un001(), region_code);
    }
}

#[test]
fn get_supported_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util.get_supported_calling_codes().collect::<Vec<_>>();
    assert!(!calling_codes.is_empty());
    for &code in &calling_codes {
        assert!(code > 0);
        let region_code = phone_util.get_region_code_for_country_code(code);
        assert_ne!(RegionCode::zz(), region_code);
    }
    let global_network_calling_codes = phone_util
        .get_supported_global_network_calling_codes()
        .collect::<Vec<_>>();
    assert!(calling_codes.len() > global_network_calling_codes.len());
    assert!(calling_codes.contains(&979));
}

#[test]
fn get_supported_types_for_region() {
    let phone_util = get_phone_util();
    let types = phone_util
        .get_supported_types_for_region(RegionCode::us())
        .expect("region should exist");
    assert!(types.contains(&PhoneNumberType::FixedLine));
    assert!(types.contains(&PhoneNumberType::Mobile));
    assert!(types.contains(&PhoneNumberType::TollFree));
    assert!(!types.contains(&PhoneNumberType::FixedLineOrMobile));
    assert!(!types.contains(&PhoneNumberType::VoIP));
    assert!(!types.contains(&PhoneNumberType::Unknown));

    assert!(phone_util
        .get_supported_types_for_region(RegionCode::zz())
        .is_none());
}

#[test]
fn get_supported_types_for_non_geo_entity() {
    let phone_util = get_phone_util();
    assert!(phone_util.get_supported_types_for_non_geo_entity(999).is_none());

    let types = phone_util
        .get_supported_types_for_non_geo_entity(979)
        .expect("code should exist");
    assert!(types.contains(&PhoneNumberType::PremiumRate));
    assert!(!types.contains(&PhoneNumberType::Mobile));
    assert!(!types.contains(&PhoneNumberType::Unknown));
}

#[test]
fn get_region_codes_for_country_calling_code() {
    let phone_util = get_phone_util();
    let expect_regions = |code| {
        phone_util
            .get_region_codes_for_country_calling_code(code)
            .expect("codes should exist")
            .collect::<Vec<_>>()
    };

    let regions = expect_regions(1);
    assert!(regions.contains(&RegionCode::us()));
    assert!(regions.contains(&RegionCode::bs()));
    // The main country is listed first.
    assert_eq!(Some(&RegionCode::us()), regions.first());

    let regions = expect_regions(44);
    assert!(regions.contains(&RegionCode::gb()));

    let regions = expect_regions(800);
    assert!(regions.contains(&RegionCode::un001()));

    const INVALID_COUNTRY_CODE: i32 = 2;
    assert!(phone_util
        .get_region_codes_for_country_calling_code(INVALID_COUNTRY_CODE)
        .is_none());
}

#[test]
fn get_instance_load_us_metadata() {
    let phone_util = get_phone_util();
    let metadata = phone_util.get_metadata_for_region(RegionCode::us()).unwrap();
    assert_eq!(RegionCode::us(), metadata.id());
    assert_eq!(1, metadata.country_code());
    assert_eq!("011", metadata.international_prefix());
    assert!(metadata.has_national_prefix());
    assert_eq!(2, metadata.number_format().len());
    assert_eq!(
        "(\\d{3})(\\d{3})(\\d{4})",
        metadata.number_format()[1].pattern()
    );
    assert_eq!("$1 $2 $3", metadata.number_format()[1].format());
    assert_eq!(
        "[13-689]\\d{9}|2[0-35-9]\\d{8}",
        metadata.general_desc().national_number_pattern()
    );
    assert_eq!(1, metadata.general_desc().possible_length().len());
    assert_eq!(10, metadata.general_desc().possible_length()[0]);
    assert_eq!("900\\d{7}", metadata.premium_rate().national_number_pattern());
    assert!(!metadata.shared_cost().has_national_number_pattern());
}

#[test]
fn get_instance_load_ar_metadata() {
    let phone_util = get_phone_util();
    let metadata = phone_util.get_metadata_for_region(RegionCode::ar()).unwrap();
    assert_eq!(RegionCode::ar(), metadata.id());
    assert_eq!(54, metadata.country_code());
    assert_eq!("00", metadata.international_prefix());
    assert_eq!("0", metadata.national_prefix());
    assert_eq!("0(?:(11|343|3715)15)?", metadata.national_prefix_for_parsing());
    assert_eq!("9$1", metadata.national_prefix_transform_rule());
    assert_eq!("$2 15 $3-$4", metadata.number_format()[2].format());
    assert_eq!(
        "(9)(\\d{4})(\\d{2})(\\d{4})",
        metadata.number_format()[3].pattern()
    );
    assert_eq!(
        "(9)(\\d{4})(\\d{2})(\\d{4})",
        metadata.intl_number_format()[3].pattern()
    );
    assert_eq!("$1 $2 $3 $4", metadata.intl_number_format()[3].format());
}

#[test]
fn get_national_significant_number() {
    let phone_util = get_phone_util();
    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(6502530000);
    assert_eq!("6502530000", phone_util.get_national_significant_number(&number));

    number.clear();
    number.set_country_code(39);
    number.set_national_number(312345678);
    assert_eq!("312345678", phone_util.get_national_significant_number(&number));

    number.clear();
    number.set_country_code(39);
    number.set_national_number(236618300);
    number.set_italian_leading_zero(true);
    assert_eq!("0236618300", phone_util.get_national_significant_number(&number));

    number.clear();
    number.set_country_code(800);
    number.set_national_number(12345678);
    assert_eq!("12345678", phone_util.get_national_significant_number(&number));
}

#[test]
fn get_national_significant_number_many_leading_zeros() {
    let phone_util = get_phone_util();
    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(650);
    number.set_italian_leading_zero(true);
    number.set_number_of_leading_zeros(2);
    assert_eq!("00650", phone_util.get_national_significant_number(&number));

    // A nonsensical zero count is ignored rather than padded.
    number.set_number_of_leading_zeros(-3);
    assert_eq!("650", phone_util.get_national_significant_number(&number));
}

#[test]
fn get_example_number() {
    let phone_util = get_phone_util();
    let mut de_number = PhoneNumber::new();
    de_number.set_country_code(49);
    de_number.set_national_number(30123456);
    assert_eq!(de_number, phone_util.get_example_number(RegionCode::de()).unwrap());
    assert_eq!(
        de_number,
        phone_util
            .get_example_number_for_type_and_region_code(RegionCode::de(), PhoneNumberType::FixedLine)
            .unwrap()
    );
    assert_eq!(
        de_number,
        phone_util
            .get_example_number_for_type_and_region_code(
                RegionCode::de(),
                PhoneNumberType::FixedLineOrMobile
            )
            .unwrap()
    );
    phone_util
        .get_example_number_for_type_and_region_code(RegionCode::de(), PhoneNumberType::Mobile)
        .unwrap();

    assert!(phone_util
        .get_example_number_for_type_and_region_code(RegionCode::us(), PhoneNumberType::VoiceMail)
        .is_err());
    assert!(phone_util
        .get_example_number_for_type_and_region_code(RegionCode::us(), PhoneNumberType::FixedLine)
        .is_ok());
    assert!(phone_util
        .get_example_number_for_type_and_region_code(RegionCode::us(), PhoneNumberType::Mobile)
        .is_ok());
    assert!(phone_util
        .get_example_number_for_type_and_region_code(RegionCode::cs(), PhoneNumberType::Mobile)
        .is_err());
    assert!(phone_util.get_example_number(RegionCode::un001()).is_err());
}

#[test]
fn get_example_number_without_region() {
    let phone_util = get_phone_util();
    assert_ne!(
        PhoneNumber::new(),
        phone_util
            .get_example_number_for_type(PhoneNumberType::FixedLine)
            .unwrap()
    );
    assert_ne!(
        PhoneNumber::new(),
        phone_util
            .get_example_number_for_type(PhoneNumberType::Mobile)
            .unwrap()
    );
    assert_ne!(
        PhoneNumber::new(),
        phone_util
            .get_example_number_for_type(PhoneNumberType::PremiumRate)
            .unwrap()
    );
}

#[test]
fn get_invalid_example_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.get_invalid_example_number(RegionCode::un001()).is_err());
    assert!(phone_util.get_invalid_example_number(RegionCode::cs()).is_err());

    let invalid_number = phone_util.get_invalid_example_number(RegionCode::us()).unwrap();
    assert_eq!(1, invalid_number.country_code());
    assert_ne!(0, invalid_number.national_number());
    assert!(!phone_util.is_valid_number(&invalid_number));
}

#[test]
fn get_example_number_for_non_geo_entity() {
    let phone_util = get_phone_util();

    let mut toll_free_number = PhoneNumber::new();
    toll_free_number.set_country_code(800).set_national_number(12345678);
    assert_eq!(
        toll_free_number,
        phone_util.get_example_number_for_non_geo_entity(800).unwrap()
    );

    let mut universal_premium_rate = PhoneNumber::new();
    universal_premium_rate.set_country_code(979).set_national_number(123456789);
    assert_eq!(
        universal_premium_rate,
        phone_util.get_example_number_for_non_geo_entity(979).unwrap()
    );
}

#[test]
fn format_us_number() {
    let phone_util = get_phone_util();
    let mut test_number = us_number();
    assert_eq!("650 253 0000", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "+1 650 253 0000",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );

    test_number.set_national_number(9002530000);
    assert_eq!("900 253 0000", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "tel:+1-900-253-0000",
        phone_util.format(&test_number, PhoneNumberFormat::RFC3966)
    );

    test_number.set_national_number(0);
    assert_eq!("0", phone_util.format(&test_number, PhoneNumberFormat::National));

    test_number.set_raw_input("000-000-0000");
    assert_eq!("000-000-0000", phone_util.format(&test_number, PhoneNumberFormat::National));
}

#[test]
fn format_bs_number() {
    let phone_util = get_phone_util();
    let mut test_number = PhoneNumber::new();
    test_number.set_country_code(1).set_national_number(2423651234);
    // NANPA siblings share the main country's formats.
    assert_eq!("242 365 1234", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "+1 242 365 1234",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
}

#[test]
fn format_gb_number() {
    let phone_util = get_phone_util();
    let mut test_number = PhoneNumber::new();
    test_number.set_country_code(44).set_national_number(2087389353);
    assert_eq!("(020) 8738 9353", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "+44 20 8738 9353",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );

    test_number.set_national_number(7912345678);
    assert_eq!("(07912) 345 678", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "+44 7912 345 678",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
}

#[test]
fn format_de_number() {
    let phone_util = get_phone_util();
    let mut test_number = PhoneNumber::new();
    test_number.set_country_code(49);

    test_number.set_national_number(301234);
    assert_eq!("030/1234", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!("+49 30/1234", phone_util.format(&test_number, PhoneNumberFormat::International));
    assert_eq!("tel:+49-30-1234", phone_util.format(&test_number, PhoneNumberFormat::RFC3966));

    test_number.set_national_number(291123);
    assert_eq!("0291 123", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!("+49 291 123", phone_util.format(&test_number, PhoneNumberFormat::International));

    test_number.set_national_number(9123123);
    assert_eq!("09123 123", phone_util.format(&test_number, PhoneNumberFormat::National));

    test_number.set_national_number(80212345);
    assert_eq!("08021 2345", phone_util.format(&test_number, PhoneNumberFormat::National));

    test_number.set_national_number(9001234567);
    assert_eq!("0900 123 4567", phone_util.format(&test_number, PhoneNumberFormat::National));

    // No format matches; the national significant number comes back bare.
    test_number.set_national_number(1234);
    assert_eq!("1234", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!("+49 1234", phone_util.format(&test_number, PhoneNumberFormat::International));
}

#[test]
fn format_it_number() {
    let phone_util = get_phone_util();
    let mut test_number = it_number();
    assert_eq!("02 3661 8300", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "+39 02 3661 8300",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
    assert_eq!("+390236618300", phone_util.format(&test_number, PhoneNumberFormat::E164));

    test_number.set_national_number(345678901);
    test_number.set_italian_leading_zero(false);
    assert_eq!("345 678 901", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "+39 345 678 901",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
    assert_eq!("+39345678901", phone_util.format(&test_number, PhoneNumberFormat::E164));
}

#[test]
fn format_au_number() {
    let phone_util = get_phone_util();
    let mut test_number = PhoneNumber::new();
    test_number.set_country_code(61).set_national_number(236618300);
    assert_eq!("02 3661 8300", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "+61 2 3661 8300",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );

    test_number.set_national_number(1800123456);
    assert_eq!("1800 123 456", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "+61 1800 123 456",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
}

#[test]
fn format_ar_number() {
    let phone_util = get_phone_util();
    let mut test_number = PhoneNumber::new();
    test_number.set_country_code(54).set_national_number(1187654321);
    assert_eq!("011 8765-4321", phone_util.format(&test_number, PhoneNumberFormat::National));
    assert_eq!(
        "+54 11 8765-4321",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
    assert_eq!("+541187654321", phone_util.format(&test_number, PhoneNumberFormat::E164));

    test_number.set_national_number(91187654321);
    assert_eq!(
        "011 15 8765-4321",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+54 9 11 8765 4321",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
    assert_eq!("+5491187654321", phone_util.format(&test_number, PhoneNumberFormat::E164));
}

#[test]
fn format_out_of_country_calling_number() {
    let phone_util = get_phone_util();
    let mut test_number = PhoneNumber::new();

    test_number.set_country_code(1).set_national_number(9002530000);
    assert_eq!(
        "00 1 900 253 0000",
        phone_util.format_out_of_country_calling_number(&test_number, RegionCode::de())
    );

    test_number.set_national_number(6502530000);
    assert_eq!(
        "1 650 253 0000",
        phone_util.format_out_of_country_calling_number(&test_number, RegionCode::bs())
    );
    assert_eq!(
        "00 1 650 253 0000",
        phone_util.format_out_of_country_calling_number(&test_number, RegionCode::gb())
    );

    test_number.set_country_code(44).set_national_number(7912345678);
    assert_eq!(
        "011 44 7912 345 678",
        phone_util.format_out_of_country_calling_number(&test_number, RegionCode::us())
    );

    test_number.set_country_code(49).set_national_number(1234);
    assert_eq!(
        "00 49 1234",
        phone_util.format_out_of_country_calling_number(&test_number, RegionCode::gb())
    );
    // Same region dials nationally.
    assert_eq!(
        "1234",
        phone_util.format_out_of_country_calling_number(&test_number, RegionCode::de())
    );

    let mut italian_number = it_number();
    assert_eq!(
        "011 39 02 3661 8300",
        phone_util.format_out_of_country_calling_number(&italian_number, RegionCode::us())
    );
    assert_eq!(
        "02 3661 8300",
        phone_util.format_out_of_country_calling_number(&italian_number, RegionCode::it())
    );
    // Singapore's IDD is ambiguous and carries no preferred form, so the
    // international format with + is used.
    assert_eq!(
        "+39 02 3661 8300",
        phone_util.format_out_of_country_calling_number(&italian_number, RegionCode::sg())
    );

    let mut sg_number = PhoneNumber::new();
    sg_number.set_country_code(65).set_national_number(94777892);
    assert_eq!(
        "9477 7892",
        phone_util.format_out_of_country_calling_number(&sg_number, RegionCode::sg())
    );

    let mut toll_free = PhoneNumber::new();
    toll_free.set_country_code(800).set_national_number(12345678);
    assert_eq!(
        "011 800 1234 5678",
        phone_util.format_out_of_country_calling_number(&toll_free, RegionCode::us())
    );

    let mut ar_mobile = PhoneNumber::new();
    ar_mobile.set_country_code(54).set_national_number(91187654321);
    assert_eq!(
        "011 54 9 11 8765 4321",
        phone_util.format_out_of_country_calling_number(&ar_mobile, RegionCode::us())
    );
    ar_mobile.set_extension("1234");
    assert_eq!(
        "011 54 9 11 8765 4321 ext. 1234",
        phone_util.format_out_of_country_calling_number(&ar_mobile, RegionCode::us())
    );
    assert_eq!(
        "0011 54 9 11 8765 4321 ext. 1234",
        phone_util.format_out_of_country_calling_number(&ar_mobile, RegionCode::au())
    );
    assert_eq!(
        "011 15 8765-4321 ext. 1234",
        phone_util.format_out_of_country_calling_number(&ar_mobile, RegionCode::ar())
    );

    // An unknown calling-from region falls back to international format.
    italian_number.set_italian_leading_zero(true);
    assert_eq!(
        "+39 02 3661 8300",
        phone_util.format_out_of_country_calling_number(&italian_number, RegionCode::zz())
    );
}

#[test]
fn format_out_of_country_keeping_alpha_chars() {
    let phone_util = get_phone_util();
    let mut alpha_numeric_number = phone_util
        .parse_and_keep_raw_input("1800 six-flag", RegionCode::us())
        .unwrap();

    assert_eq!(
        "0011 1 800 SIX-FLAG",
        phone_util.format_out_of_country_keeping_alpha_chars(&alpha_numeric_number, RegionCode::au())
    );
    // Formatting from within the NANPA region.
    assert_eq!(
        "1 800 SIX-FLAG",
        phone_util.format_out_of_country_keeping_alpha_chars(&alpha_numeric_number, RegionCode::us())
    );

    // Without raw input the ordinary out-of-country rendering applies.
    alpha_numeric_number.clear_raw_input();
    assert_eq!(
        "00 1 800 749 3524",
        phone_util.format_out_of_country_keeping_alpha_chars(&alpha_numeric_number, RegionCode::de())
    );
}

#[test]
fn format_with_carrier_code() {
    let phone_util = get_phone_util();

    let mut ar_number = PhoneNumber::new();
    ar_number.set_country_code(54).set_national_number(1187654321);
    assert_eq!("011 8765-4321", phone_util.format(&ar_number, PhoneNumberFormat::National));
    assert_eq!(
        "011 15 8765-4321",
        phone_util.format_national_number_with_carrier_code(&ar_number, "15")
    );
    // An empty carrier code leaves the plain national format.
    assert_eq!(
        "011 8765-4321",
        phone_util.format_national_number_with_carrier_code(&ar_number, "")
    );

    // The US has no carrier-code formatting rule, so nothing changes.
    assert_eq!(
        "650 253 0000",
        phone_util.format_national_number_with_carrier_code(&us_number(), "15")
    );
}

#[test]
fn format_with_preferred_carrier_code() {
    let phone_util = get_phone_util();
    let mut ar_number = PhoneNumber::new();
    ar_number.set_country_code(54).set_national_number(1187654321);
    // Without a preferred carrier code the fallback is used.
    assert_eq!(
        "011 15 8765-4321",
        phone_util.format_national_number_with_preferred_carrier_code(&ar_number, "15")
    );
    ar_number.set_preferred_domestic_carrier_code("14");
    assert_eq!(
        "011 14 8765-4321",
        phone_util.format_national_number_with_preferred_carrier_code(&ar_number, "15")
    );
}

#[test]
fn format_number_for_mobile_dialing() {
    let phone_util = get_phone_util();

    let test_number = us_number();
    assert_eq!(
        "650 253 0000",
        phone_util.format_number_for_mobile_dialing(&test_number, RegionCode::us(), true)
    );
    assert_eq!(
        "6502530000",
        phone_util.format_number_for_mobile_dialing(&test_number, RegionCode::us(), false)
    );
    assert_eq!(
        "+1 650 253 0000",
        phone_util.format_number_for_mobile_dialing(&test_number, RegionCode::de(), true)
    );
    assert_eq!(
        "+16502530000",
        phone_util.format_number_for_mobile_dialing(&test_number, RegionCode::de(), false)
    );

    // US toll-free numbers are marked as not internationally diallable.
    let mut toll_free = PhoneNumber::new();
    toll_free.set_country_code(1).set_national_number(8002530000);
    assert_eq!(
        "",
        phone_util.format_number_for_mobile_dialing(&toll_free, RegionCode::de(), true)
    );
    assert_eq!(
        "800 253 0000",
        phone_util.format_number_for_mobile_dialing(&toll_free, RegionCode::us(), true)
    );

    // Israeli star numbers are dialled exactly as they were entered.
    let star_number = phone_util
        .parse_and_keep_raw_input("*1234", RegionCode::il())
        .unwrap();
    assert_eq!(
        "*1234",
        phone_util.format_number_for_mobile_dialing(&star_number, RegionCode::il(), true)
    );
    assert_eq!(
        "*1234",
        phone_util.format_number_for_mobile_dialing(&star_number, RegionCode::il(), false)
    );
}

#[test]
fn format_by_pattern() {
    let phone_util = get_phone_util();
    let test_number = us_number();

    let mut user_format = NumberFormat::new();
    user_format
        .set_pattern("(\\d{3})(\\d{3})(\\d{4})")
        .set_format("($1) $2-$3");
    let user_formats = [user_format];
    assert_eq!(
        "(650) 253-0000",
        phone_util.format_by_pattern(&test_number, PhoneNumberFormat::National, &user_formats)
    );
    assert_eq!(
        "+1 (650) 253-0000",
        phone_util.format_by_pattern(&test_number, PhoneNumberFormat::International, &user_formats)
    );

    // $NP is resolved against the region's national prefix, $FG against
    // the first group.
    let mut prefixed_format = NumberFormat::new();
    prefixed_format
        .set_pattern("(\\d{3})(\\d{3})(\\d{4})")
        .set_format("$1 $2-$3")
        .set_national_prefix_formatting_rule("$NP ($FG)");
    let prefixed_formats = [prefixed_format];
    assert_eq!(
        "1 (650) 253-0000",
        phone_util.format_by_pattern(&test_number, PhoneNumberFormat::National, &prefixed_formats)
    );
}

#[test]
fn format_e164_number() {
    let phone_util = get_phone_util();
    let mut test_number = PhoneNumber::new();
    test_number.set_country_code(1).set_national_number(6502530000);
    assert_eq!("+16502530000", phone_util.format(&test_number, PhoneNumberFormat::E164));

    test_number.clear();
    test_number.set_country_code(64).set_national_number(33316005);
    assert_eq!("+6433316005", phone_util.format(&test_number, PhoneNumberFormat::E164));

    test_number.clear();
    test_number.set_country_code(800).set_national_number(12345678);
    assert_eq!("+80012345678", phone_util.format(&test_number, PhoneNumberFormat::E164));
}

#[test]
fn format_number_with_extension() {
    let phone_util = get_phone_util();
    let mut nz_with_extension = nz_number();
    nz_with_extension.set_extension("1234");
    assert_eq!(
        "03-331 6005 ext. 1234",
        phone_util.format(&nz_with_extension, PhoneNumberFormat::National)
    );
    assert_eq!(
        "tel:+64-3-331-6005;ext=1234",
        phone_util.format(&nz_with_extension, PhoneNumberFormat::RFC3966)
    );
}

#[test]
fn format_in_original_format() {
    let phone_util = get_phone_util();

    let number1 = phone_util
        .parse_and_keep_raw_input("+442087654321", RegionCode::gb())
        .unwrap();
    assert_eq!(
        "+44 20 8765 4321",
        phone_util.format_in_original_format(&number1, RegionCode::gb())
    );

    let number2 = phone_util
        .parse_and_keep_raw_input("02087654321", RegionCode::gb())
        .unwrap();
    assert_eq!(
        "(020) 8765 4321",
        phone_util.format_in_original_format(&number2, RegionCode::gb())
    );

    let number3 = phone_util
        .parse_and_keep_raw_input("011442087654321", RegionCode::us())
        .unwrap();
    assert_eq!(
        "011 44 20 8765 4321",
        phone_util.format_in_original_format(&number3, RegionCode::us())
    );

    let number4 = phone_util
        .parse_and_keep_raw_input("442087654321", RegionCode::gb())
        .unwrap();
    assert_eq!(
        "44 20 8765 4321",
        phone_util.format_in_original_format(&number4, RegionCode::gb())
    );

    // A number parsed without keeping raw input formats nationally.
    let number5 = phone_util.parse("+442087654321", RegionCode::gb()).unwrap();
    assert_eq!(
        "(020) 8765 4321",
        phone_util.format_in_original_format(&number5, RegionCode::gb())
    );
}

#[test]
fn parse_national_number() {
    let phone_util = get_phone_util();
    let test_nz_number = nz_number();

    // National prefix attached.
    assert_eq!(test_nz_number, phone_util.parse("033316005", RegionCode::nz()).unwrap());
    // Some fields are not filled in by parse, but only by
    // parse_and_keep_raw_input.
    let parsed = phone_util.parse("033316005", RegionCode::nz()).unwrap();
    assert!(!parsed.has_country_code_source());
    assert_eq!(CountryCodeSource::UNSPECIFIED, parsed.country_code_source());

    // National prefix missing.
    assert_eq!(test_nz_number, phone_util.parse("33316005", RegionCode::nz()).unwrap());
    // National prefix and some formatting.
    assert_eq!(test_nz_number, phone_util.parse("03-331 6005", RegionCode::nz()).unwrap());
    assert_eq!(test_nz_number, phone_util.parse("03 331 6005", RegionCode::nz()).unwrap());

    // Testing RFC 3966 format with a phone context.
    assert_eq!(
        test_nz_number,
        phone_util
            .parse("tel:03-331-6005;phone-context=+64", RegionCode::nz())
            .unwrap()
    );
    assert_eq!(
        test_nz_number,
        phone_util
            .parse("tel:331-6005;phone-context=+64-3", RegionCode::nz())
            .unwrap()
    );
    assert_eq!(
        test_nz_number,
        phone_util
            .parse("tel:331-6005;phone-context=+64-3", RegionCode::us())
            .unwrap()
    );
    assert_eq!(
        test_nz_number,
        phone_util
            .parse("My number is tel:03-331-6005;phone-context=+64", RegionCode::nz())
            .unwrap()
    );
    // Optional params are ignored, as is an ISDN subaddress.
    assert_eq!(
        test_nz_number,
        phone_util
            .parse("tel:03-331-6005;phone-context=+64;a=%A1", RegionCode::nz())
            .unwrap()
    );
    assert_eq!(
        test_nz_number,
        phone_util
            .parse("tel:03-331-6005;isub=12345;phone-context=+64", RegionCode::nz())
            .unwrap()
    );
    assert_eq!(
        test_nz_number,
        phone_util.parse("tel:+64-3-331-6005;isub=12345", RegionCode::us()).unwrap()
    );
    assert_eq!(
        test_nz_number,
        phone_util.parse("03-331-6005;phone-context=+64", RegionCode::nz()).unwrap()
    );

    // International prefixes.
    assert_eq!(
        test_nz_number,
        phone_util.parse("0064 3 331 6005", RegionCode::nz()).unwrap()
    );
    assert_eq!(
        test_nz_number,
        phone_util.parse("01164 3 331 6005", RegionCode::us()).unwrap()
    );
    assert_eq!(test_nz_number, phone_util.parse("+64 3 331 6005", RegionCode::us()).unwrap());
    // A plus followed by the IDD of the default region is tolerated.
    assert_eq!(
        test_nz_number,
        phone_util.parse("+01164 3 331 6005", RegionCode::us()).unwrap()
    );
    assert_eq!(
        test_nz_number,
        phone_util.parse("+0064 3 331 6005", RegionCode::nz()).unwrap()
    );
    assert_eq!(
        test_nz_number,
        phone_util.parse("+ 00 64 3 331 6005", RegionCode::nz()).unwrap()
    );

    // A phone-context domain replaces nothing; the default region rules.
    let mut us_local_number = PhoneNumber::new();
    us_local_number.set_country_code(1).set_national_number(2530000);
    assert_eq!(
        us_local_number,
        phone_util
            .parse("tel:253-0000;phone-context=www.google.com", RegionCode::us())
            .unwrap()
    );
    assert_eq!(
        us_local_number,
        phone_util
            .parse("tel:253-0000;isub=12345;phone-context=www.google.com", RegionCode::us())
            .unwrap()
    );
    assert_eq!(
        us_local_number,
        phone_util
            .parse("tel:2530000;isub=12345;phone-context=1234.com", RegionCode::us())
            .unwrap()
    );

    // Check that a "0" after a recognized country code is not swallowed.
    let mut nz_issue_number = PhoneNumber::new();
    nz_issue_number.set_country_code(64).set_national_number(64123456);
    assert_eq!(
        nz_issue_number,
        phone_util.parse("+64(0)64123456", RegionCode::us()).unwrap()
    );

    // Slashes inside the number are fine.
    let mut de_number = PhoneNumber::new();
    de_number.set_country_code(49).set_national_number(12345678);
    assert_eq!(de_number, phone_util.parse("123/45678", RegionCode::de()).unwrap());

    // '1' is not treated as a country code when the number is already
    // valid without it.
    let mut us_number = PhoneNumber::new();
    us_number.set_country_code(1).set_national_number(1234567890);
    assert_eq!(us_number, phone_util.parse("123-456-7890", RegionCode::us()).unwrap());

    // Star numbers keep their digits; the star lives in the raw input
    // only.
    let mut star_number = PhoneNumber::new();
    star_number.set_country_code(81).set_national_number(2345);
    assert_eq!(star_number, phone_util.parse("+81 *2345", RegionCode::jp()).unwrap());

    let mut short_number = PhoneNumber::new();
    short_number.set_country_code(64).set_national_number(12);
    assert_eq!(short_number, phone_util.parse("12", RegionCode::nz()).unwrap());

    // A short number with a leading zero in a region with a "0" national
    // prefix: the zero must not be stripped when what remains would only
    // be a local number.
    let mut gb_short_number = PhoneNumber::new();
    gb_short_number
        .set_country_code(44)
        .set_national_number(123456)
        .set_italian_leading_zero(true);
    assert_eq!(gb_short_number, phone_util.parse("0123456", RegionCode::gb()).unwrap());
}

#[test]
fn parse_with_phone_context() {
    let phone_util = get_phone_util();
    let assert_throws_for_invalid_phone_context = |number_to_parse: &str| {
        assert!(
            phone_util.parse(number_to_parse, RegionCode::zz()).is_err(),
            "expected an error for: {}",
            number_to_parse
        );
    };

    let mut expected_number = PhoneNumber::new();
    expected_number.set_country_code(64).set_national_number(33316005);

    // Valid global-number-digits.
    assert_eq!(
        expected_number,
        phone_util.parse("tel:033316005;phone-context=+64", RegionCode::zz()).unwrap()
    );
    assert_eq!(
        expected_number,
        phone_util
            .parse(
                "tel:033316005;phone-context=+64;{this isn't part of phone-context anymore!}",
                RegionCode::zz()
            )
            .unwrap()
    );
    expected_number.set_national_number(3033316005);
    assert_eq!(
        expected_number,
        phone_util.parse("tel:033316005;phone-context=+64-3", RegionCode::zz()).unwrap()
    );

    // Valid domainnames.
    expected_number.set_country_code(64).set_national_number(33316005);
    for number in [
        "tel:033316005;phone-context=abc.nz",
        "tel:033316005;phone-context=www.PHONE-numb3r.com",
        "tel:033316005;phone-context=a",
        "tel:033316005;phone-context=3phone.J.",
        "tel:033316005;phone-context=a--z",
    ] {
        assert_eq!(expected_number, phone_util.parse(number, RegionCode::nz()).unwrap());
    }

    // Invalid descriptors.
    assert_throws_for_invalid_phone_context("tel:033316005;phone-context=");
    assert_throws_for_invalid_phone_context("tel:033316005;phone-context=+");
    assert_throws_for_invalid_phone_context("tel:033316005;phone-context=64");
    assert_throws_for_invalid_phone_context("tel:033316005;phone-context=++64");
    assert_throws_for_invalid_phone_context("tel:033316005;phone-context=+abc");
    assert_throws_for_invalid_phone_context("tel:033316005;phone-context=.");
    assert_throws_for_invalid_phone_context("tel:033316005;phone-context=3phone");
    assert_throws_for_invalid_phone_context("tel:033316005;phone-context=a-.nz");
    assert_throws_for_invalid_phone_context("tel:033316005;phone-context=a{b}c");
}

#[test]
fn failed_parse_on_invalid_numbers() {
    let phone_util = get_phone_util();

    assert!(matches!(
        phone_util.parse("This is not a phone number", RegionCode::nz()).unwrap_err(),
        ParseError::NotANumber
    ));
    assert!(matches!(
        phone_util.parse("1 Still not a number", RegionCode::nz()).unwrap_err(),
        ParseError::NotANumber
    ));
    assert!(matches!(
        phone_util.parse("01495 72553301873 810104", RegionCode::gb()).unwrap_err(),
        ParseError::TooLong
    ));
    assert!(matches!(
        phone_util.parse("+---", RegionCode::de()).unwrap_err(),
        ParseError::NotANumber
    ));
    assert!(matches!(
        phone_util.parse("+***", RegionCode::de()).unwrap_err(),
        ParseError::NotANumber
    ));
    // Only a country code with nothing behind it.
    assert!(matches!(
        phone_util.parse("+49 0", RegionCode::de()).unwrap_err(),
        ParseError::TooShortNsn
    ));
    // An unknown country code behind the plus.
    assert!(matches!(
        phone_util.parse("+02366", RegionCode::zz()).unwrap_err(),
        ParseError::InvalidCountryCode
    ));
    // No default region, no plus sign.
    assert!(matches!(
        phone_util.parse("123 456 7890", RegionCode::zz()).unwrap_err(),
        ParseError::InvalidCountryCode
    ));
    assert!(matches!(
        phone_util.parse("123 456 7890", RegionCode::cs()).unwrap_err(),
        ParseError::InvalidCountryCode
    ));
    assert!(matches!(
        phone_util.parse("0044------", RegionCode::gb()).unwrap_err(),
        ParseError::TooShortAfterIdd
    ));
    assert!(matches!(
        phone_util.parse("0044", RegionCode::gb()).unwrap_err(),
        ParseError::TooShortAfterIdd
    ));
    assert!(matches!(
        phone_util.parse("011", RegionCode::us()).unwrap_err(),
        ParseError::TooShortAfterIdd
    ));
}

#[test]
fn parse_numbers_with_plus_with_no_region() {
    let phone_util = get_phone_util();
    // The country code is extracted from the plus form even with no
    // default region.
    assert_eq!(
        nz_number(),
        phone_util.parse("+64 3 331 6005", RegionCode::zz()).unwrap()
    );
    let number = phone_util
        .parse_and_keep_raw_input("+64 3 331 6005", RegionCode::zz())
        .unwrap();
    assert_eq!(
        CountryCodeSource::FROM_NUMBER_WITH_PLUS_SIGN,
        number.country_code_source()
    );
}

#[test]
fn parse_extensions() {
    let phone_util = get_phone_util();
    let mut nz_with_extension = nz_number();
    nz_with_extension.set_extension("3456");

    assert_eq!(
        nz_with_extension,
        phone_util.parse("03 331 6005 ext 3456", RegionCode::nz()).unwrap()
    );
    assert_eq!(
        nz_with_extension,
        phone_util.parse("03-3316005x3456", RegionCode::nz()).unwrap()
    );
    assert_eq!(
        nz_with_extension,
        phone_util.parse("03-3316005 int.3456", RegionCode::nz()).unwrap()
    );
    assert_eq!(
        nz_with_extension,
        phone_util.parse("03 3316005 #3456", RegionCode::nz()).unwrap()
    );
    assert_eq!(
        nz_with_extension,
        phone_util.parse("tel:+64-3-331-6005;ext=3456", RegionCode::nz()).unwrap()
    );

    // Extensions asserted on the parsed field directly.
    let number = phone_util.parse("0~0 1800 7493 5247", RegionCode::de()).unwrap();
    assert!(!number.has_extension());

    let extn_number = phone_util
        .parse("(800) 901-3355 ,ext 7246433", RegionCode::us())
        .unwrap();
    assert_eq!("7246433", extn_number.extension());
}

#[test]
fn parse_handles_long_extensions_with_explicit_labels() {
    let phone_util = get_phone_util();
    let mut nz_with_extension = nz_number();

    // An RFC 3966 or word label takes up to 20 digits.
    nz_with_extension.set_extension("0");
    assert_eq!(
        nz_with_extension,
        phone_util.parse("tel:+6433316005;ext=0", RegionCode::nz()).unwrap()
    );
    nz_with_extension.set_extension("01234567890123456789");
    assert_eq!(
        nz_with_extension,
        phone_util
            .parse("tel:+6433316005;ext=01234567890123456789", RegionCode::nz())
            .unwrap()
    );
    assert_eq!(
        nz_with_extension,
        phone_util
            .parse("03 3316005 ext 01234567890123456789", RegionCode::nz())
            .unwrap()
    );
    // Beyond 20 digits the input no longer parses as number + extension.
    assert!(phone_util
        .parse("tel:+6433316005;ext=012345678901234567890", RegionCode::nz())
        .is_err());
}

#[test]
fn parse_handles_long_extensions_with_auto_dialling_labels() {
    let phone_util = get_phone_util();
    let mut us_with_extension = PhoneNumber::new();
    us_with_extension.set_country_code(1).set_national_number(2679000000);

    // Auto-dialling labels take up to 15 digits.
    us_with_extension.set_extension("123456789012345");
    assert_eq!(
        us_with_extension,
        phone_util
            .parse("+12679000000,,123456789012345#", RegionCode::us())
            .unwrap()
    );
    assert_eq!(
        us_with_extension,
        phone_util
            .parse("+12679000000;123456789012345#", RegionCode::us())
            .unwrap()
    );
    // One more digit and parsing fails.
    assert!(phone_util
        .parse("+12679000000,,1234567890123456#", RegionCode::us())
        .is_err());
}

#[test]
fn parse_handles_short_extensions_with_ambiguous_char() {
    let phone_util = get_phone_util();
    let mut nz_with_extension = nz_number();

    // A bare x/# label takes at most 9 digits.
    nz_with_extension.set_extension("123456789");
    assert_eq!(
        nz_with_extension,
        phone_util.parse("03 3316005 x 123456789", RegionCode::nz()).unwrap()
    );
    assert!(phone_util.parse("03 3316005 x 1234567890", RegionCode::nz()).is_err());
}

#[test]
fn parse_handles_short_extensions_when_not_sure_of_label() {
    let phone_util = get_phone_util();
    let mut us_with_extension = PhoneNumber::new();
    us_with_extension.set_country_code(1).set_national_number(1234567890);

    // Digits in front of a trailing # take at most 6 digits.
    us_with_extension.set_extension("666666");
    assert_eq!(
        us_with_extension,
        phone_util.parse("+1123-456-7890 666666#", RegionCode::us()).unwrap()
    );
    us_with_extension.set_extension("6");
    assert_eq!(
        us_with_extension,
        phone_util.parse("+11234567890-6#", RegionCode::us()).unwrap()
    );
}

#[test]
fn parse_and_keep_raw() {
    let phone_util = get_phone_util();
    let mut alpha_numeric_number = PhoneNumber::new();
    alpha_numeric_number.set_country_code(1).set_national_number(80074935247);

    let test_number = phone_util
        .parse_and_keep_raw_input("800 six-flags", RegionCode::us())
        .unwrap();
    assert_eq!(alpha_numeric_number, test_number);
    assert_eq!("800 six-flags", test_number.raw_input());
    assert_eq!(
        CountryCodeSource::FROM_DEFAULT_COUNTRY,
        test_number.country_code_source()
    );

    alpha_numeric_number.set_national_number(8007493524);
    let test_number = phone_util
        .parse_and_keep_raw_input("1800 six-flag", RegionCode::us())
        .unwrap();
    assert_eq!(alpha_numeric_number, test_number);
    assert_eq!("1800 six-flag", test_number.raw_input());
    assert_eq!(
        CountryCodeSource::FROM_NUMBER_WITHOUT_PLUS_SIGN,
        test_number.country_code_source()
    );

    let test_number = phone_util
        .parse_and_keep_raw_input("+1800 six-flag", RegionCode::zz())
        .unwrap();
    assert_eq!(alpha_numeric_number, test_number);
    assert_eq!(
        CountryCodeSource::FROM_NUMBER_WITH_PLUS_SIGN,
        test_number.country_code_source()
    );

    let test_number = phone_util
        .parse_and_keep_raw_input("001800 six-flag", RegionCode::nz())
        .unwrap();
    assert_eq!(alpha_numeric_number, test_number);
    assert_eq!(
        CountryCodeSource::FROM_NUMBER_WITH_IDD,
        test_number.country_code_source()
    );

    // An invalid region errors out.
    assert!(phone_util.parse("123 456 7890", RegionCode::cs()).is_err());

    // A Korean number with a carrier selection code.
    let mut korean_number = PhoneNumber::new();
    korean_number.set_country_code(82).set_national_number(22123456);
    let test_number = phone_util
        .parse_and_keep_raw_input("08122123456", RegionCode::kr())
        .unwrap();
    assert_eq!(korean_number, test_number);
    assert_eq!("08122123456", test_number.raw_input());
    assert_eq!(
        CountryCodeSource::FROM_DEFAULT_COUNTRY,
        test_number.country_code_source()
    );
    assert_eq!("81", test_number.preferred_domestic_carrier_code());
}

#[test]
fn parse_italian_leading_zeros() {
    let phone_util = get_phone_util();
    let mut zeros_number = PhoneNumber::new();
    zeros_number.set_country_code(61);

    zeros_number.set_national_number(11);
    zeros_number.set_italian_leading_zero(true);
    assert_eq!(zeros_number, phone_util.parse("011", RegionCode::au()).unwrap());

    zeros_number.set_national_number(1);
    zeros_number.set_number_of_leading_zeros(2);
    assert_eq!(zeros_number, phone_util.parse("001", RegionCode::au()).unwrap());

    zeros_number.set_national_number(0);
    zeros_number.set_number_of_leading_zeros(2);
    assert_eq!(zeros_number, phone_util.parse("000", RegionCode::au()).unwrap());

    zeros_number.set_national_number(0);
    zeros_number.set_number_of_leading_zeros(3);
    assert_eq!(zeros_number, phone_util.parse("0000", RegionCode::au()).unwrap());
}

#[test]
fn maybe_strip_national_prefix_and_carrier_code() {
    let phone_util = get_phone_util();
    let mut metadata = PhoneMetadata::new();
    let mut general_desc = PhoneNumberDesc::new();
    general_desc.set_national_number_pattern("\\d{4,8}");
    metadata.set_general_desc(general_desc);
    metadata.set_national_prefix_for_parsing("34");

    let (stripped, carrier) =
        phone_util.maybe_strip_national_prefix_and_carrier_code(&metadata, "34356778");
    assert_eq!("356778", stripped, "should have had national prefix stripped");
    assert_eq!(None, carrier, "should have had no carrier code stripped");

    // A second strip has nothing left to remove.
    let (stripped, _) =
        phone_util.maybe_strip_national_prefix_and_carrier_code(&metadata, "356778");
    assert_eq!("356778", stripped);

    // Some countries have no national prefix.
    metadata.clear_national_prefix_for_parsing();
    let (stripped, carrier) =
        phone_util.maybe_strip_national_prefix_and_carrier_code(&metadata, "34356778");
    assert_eq!("34356778", stripped);
    assert!(carrier.is_none());

    // If the resulting number would stop matching the national rule, the
    // prefix stays.
    metadata.set_national_prefix_for_parsing("3");
    let (stripped, _) = phone_util.maybe_strip_national_prefix_and_carrier_code(&metadata, "3123");
    assert_eq!(
        "3123", stripped,
        "should not strip when the remainder would not match"
    );

    // Carrier code capture.
    metadata.set_national_prefix_for_parsing("0(81)?");
    let (stripped, carrier) =
        phone_util.maybe_strip_national_prefix_and_carrier_code(&metadata, "08122123456");
    assert_eq!(Some("81".to_owned()), carrier, "should have had carrier code stripped");
    assert_eq!("22123456", stripped);

    // Transform rules rewrite the prefix instead of dropping it.
    metadata.set_national_prefix_transform_rule("5${1}5");
    metadata.set_national_prefix_for_parsing("0(\\d{2})");
    let (stripped, _) =
        phone_util.maybe_strip_national_prefix_and_carrier_code(&metadata, "031123");
    assert_eq!("5315123", stripped, "was not successfully transformed");
}

#[test]
fn extract_possible_number() {
    let phone_util = get_phone_util();
    let core = &phone_util.core;

    assert_eq!("0800-345-600", core.extract_possible_number("Tel:0800-345-600").unwrap());
    assert_eq!("0800 FOR PIZZA", core.extract_possible_number("Tel:0800 FOR PIZZA").unwrap());
    // A leading plus survives, preceding junk does not.
    assert_eq!("+800-345-600", core.extract_possible_number("Tel:+800-345-600").unwrap());
    // Leading non-ASCII digits are where the number starts.
    assert_eq!(
        "\u{0660}\u{0661}\u{0662}",
        core.extract_possible_number("\u{0660}\u{0661}\u{0662}").unwrap()
    );
    // Trailing non-alphanumerics are trimmed.
    assert_eq!("650) 253-0000", core.extract_possible_number("(650) 253-0000..- ..").unwrap());
    assert_eq!("650) 253-0000", core.extract_possible_number("(650) 253-0000.").unwrap());
    // The second extension here starts another number.
    assert_eq!(
        "(530) 583-6985 x302",
        core.extract_possible_number("(530) 583-6985 x302/x2303").unwrap()
    );
    assert!(core.extract_possible_number("Num-....").is_err());
}

#[test]
fn normalize_remove_punctuation() {
    let phone_util = get_phone_util();
    let mut number = "034-56&+#2\u{00AD}34".to_owned();
    phone_util.core.normalize(&mut number);
    assert_eq!("03456234", number);
    // Normalizing is idempotent.
    phone_util.core.normalize(&mut number);
    assert_eq!("03456234", number);
}

#[test]
fn normalize_replace_alpha_characters() {
    let phone_util = get_phone_util();
    let mut number = "034-I-am-HUNGRY".to_owned();
    phone_util.core.normalize(&mut number);
    assert_eq!("034426486479", number);
}

#[test]
fn normalize_other_digits() {
    let phone_util = get_phone_util();
    // Fullwidth and Arabic-indic digits fold to ASCII.
    let mut number = "\u{FF12}5\u{0665}".to_owned();
    phone_util.core.normalize(&mut number);
    assert_eq!("255", number);
    let mut number = "\u{06F5}2\u{06F0}".to_owned();
    phone_util.core.normalize(&mut number);
    assert_eq!("520", number);
}

#[test]
fn normalize_strip_alpha_characters() {
    let phone_util = get_phone_util();
    // Fewer than three letters means they are junk, not keypad input.
    assert_eq!(
        "00644123456",
        phone_util.core.normalize_digits_only("00-64 412t3 45a6")
    );
}

#[test]
fn convert_alpha_characters_in_number() {
    let phone_util = get_phone_util();
    assert_eq!(
        "1800-3569377",
        phone_util.convert_alpha_characters_in_number("1800-FLOWERS")
    );
}

#[test]
fn is_alpha_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_alpha_number("1800 six-flags"));
    assert!(phone_util.is_alpha_number("1800 six-flags ext. 1234"));
    assert!(!phone_util.is_alpha_number("1800 123-1234"));
    assert!(!phone_util.is_alpha_number("1 six-flags"));
}

#[test]
fn maybe_strip_extension_from_string() {
    let phone_util = get_phone_util();
    let mut number = "1234576 ext. 1234".to_owned();
    let extension = phone_util.core.maybe_strip_extension(&mut number);
    assert_eq!("1234", extension);
    assert_eq!("1234576", number.trim_end());

    let mut number = "1234-576".to_owned();
    let extension = phone_util.core.maybe_strip_extension(&mut number);
    assert!(extension.is_empty());
    assert_eq!("1234-576", number);
}

#[test]
fn is_valid_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_valid_number(&us_number()));
    assert!(phone_util.is_valid_number(&nz_number()));
    assert!(phone_util.is_valid_number(&it_number()));

    let mut gb_mobile = PhoneNumber::new();
    gb_mobile.set_country_code(44).set_national_number(7912345678);
    assert!(phone_util.is_valid_number(&gb_mobile));

    let mut intl_toll_free = PhoneNumber::new();
    intl_toll_free.set_country_code(800).set_national_number(12345678);
    assert!(phone_util.is_valid_number(&intl_toll_free));

    let mut universal_premium_rate = PhoneNumber::new();
    universal_premium_rate.set_country_code(979).set_national_number(123456789);
    assert!(phone_util.is_valid_number(&universal_premium_rate));
}

#[test]
fn is_not_valid_number() {
    let phone_util = get_phone_util();

    let mut us_local = PhoneNumber::new();
    us_local.set_country_code(1).set_national_number(2530000);
    assert!(!phone_util.is_valid_number(&us_local));

    let mut invalid_country_code = PhoneNumber::new();
    invalid_country_code.set_country_code(3923).set_national_number(2366);
    assert!(!phone_util.is_valid_number(&invalid_country_code));

    let mut de_short = PhoneNumber::new();
    de_short.set_country_code(49).set_national_number(123);
    assert!(!phone_util.is_valid_number(&de_short));

    let mut intl_toll_free_too_long = PhoneNumber::new();
    intl_toll_free_too_long.set_country_code(800).set_national_number(123456789);
    assert!(!phone_util.is_valid_number(&intl_toll_free_too_long));
}

#[test]
fn is_valid_number_for_region() {
    let phone_util = get_phone_util();

    let mut bs_number = PhoneNumber::new();
    bs_number.set_country_code(1).set_national_number(2423651234);
    assert!(phone_util.is_valid_number(&bs_number));
    assert!(phone_util.is_valid_number_for_region(&bs_number, RegionCode::bs()));
    assert!(!phone_util.is_valid_number_for_region(&bs_number, RegionCode::us()));

    // La Mayotte and Réunion share the country calling code 262.
    let mut re_number = PhoneNumber::new();
    re_number.set_country_code(262).set_national_number(262123456);
    assert!(phone_util.is_valid_number(&re_number));
    assert!(phone_util.is_valid_number_for_region(&re_number, RegionCode::re()));
    assert!(!phone_util.is_valid_number_for_region(&re_number, RegionCode::yt()));

    let mut yt_number = PhoneNumber::new();
    yt_number.set_country_code(262).set_national_number(269601234);
    assert!(phone_util.is_valid_number(&yt_number));
    assert!(phone_util.is_valid_number_for_region(&yt_number, RegionCode::yt()));
    assert!(!phone_util.is_valid_number_for_region(&yt_number, RegionCode::re()));

    let mut intl_toll_free = PhoneNumber::new();
    intl_toll_free.set_country_code(800).set_national_number(12345678);
    assert!(phone_util.is_valid_number_for_region(&intl_toll_free, RegionCode::un001()));
    assert!(!phone_util.is_valid_number_for_region(&intl_toll_free, RegionCode::us()));
}

#[test]
fn get_region_code_for_number() {
    let phone_util = get_phone_util();

    let mut bs_number = PhoneNumber::new();
    bs_number.set_country_code(1).set_national_number(2423651234);
    assert_eq!(Some(RegionCode::bs()), phone_util.get_region_code_for_number(&bs_number));

    assert_eq!(Some(RegionCode::us()), phone_util.get_region_code_for_number(&us_number()));

    let mut gb_mobile = PhoneNumber::new();
    gb_mobile.set_country_code(44).set_national_number(7912345678);
    assert_eq!(Some(RegionCode::gb()), phone_util.get_region_code_for_number(&gb_mobile));

    let mut intl_toll_free = PhoneNumber::new();
    intl_toll_free.set_country_code(800).set_national_number(12345678);
    assert_eq!(
        Some(RegionCode::un001()),
        phone_util.get_region_code_for_number(&intl_toll_free)
    );

    let mut yt_number = PhoneNumber::new();
    yt_number.set_country_code(262).set_national_number(269601234);
    assert_eq!(Some(RegionCode::yt()), phone_util.get_region_code_for_number(&yt_number));

    let mut unknown = PhoneNumber::new();
    unknown.set_country_code(2).set_national_number(12345);
    assert_eq!(None, phone_util.get_region_code_for_number(&unknown));
}

#[test]
fn get_number_type() {
    let phone_util = get_phone_util();

    // US numbers cannot be distinguished between fixed line and mobile.
    assert_eq!(PhoneNumberType::FixedLineOrMobile, phone_util.get_number_type(&us_number()));

    let mut us_premium = PhoneNumber::new();
    us_premium.set_country_code(1).set_national_number(9002530000);
    assert_eq!(PhoneNumberType::PremiumRate, phone_util.get_number_type(&us_premium));

    let mut us_toll_free = PhoneNumber::new();
    us_toll_free.set_country_code(1).set_national_number(8002530000);
    assert_eq!(PhoneNumberType::TollFree, phone_util.get_number_type(&us_toll_free));

    let mut gb_mobile = PhoneNumber::new();
    gb_mobile.set_country_code(44).set_national_number(7912345678);
    assert_eq!(PhoneNumberType::Mobile, phone_util.get_number_type(&gb_mobile));

    let mut gb_fixed = PhoneNumber::new();
    gb_fixed.set_country_code(44).set_national_number(2070313000);
    assert_eq!(PhoneNumberType::FixedLine, phone_util.get_number_type(&gb_fixed));

    let mut gb_pager = PhoneNumber::new();
    gb_pager.set_country_code(44).set_national_number(7612345678);
    assert_eq!(PhoneNumberType::Pager, phone_util.get_number_type(&gb_pager));

    assert_eq!(PhoneNumberType::FixedLine, phone_util.get_number_type(&it_number()));

    let mut it_mobile = PhoneNumber::new();
    it_mobile.set_country_code(39).set_national_number(345678901);
    assert_eq!(PhoneNumberType::Mobile, phone_util.get_number_type(&it_mobile));

    let mut intl_toll_free = PhoneNumber::new();
    intl_toll_free.set_country_code(800).set_national_number(12345678);
    assert_eq!(PhoneNumberType::TollFree, phone_util.get_number_type(&intl_toll_free));

    let mut unknown = PhoneNumber::new();
    unknown.set_country_code(1).set_national_number(65025300001);
    assert_eq!(PhoneNumberType::Unknown, phone_util.get_number_type(&unknown));
}

#[test]
fn is_possible_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_possible_number(&us_number()));

    let mut us_local = PhoneNumber::new();
    us_local.set_country_code(1).set_national_number(2530000);
    assert!(phone_util.is_possible_number(&us_local));

    let mut gb_number = PhoneNumber::new();
    gb_number.set_country_code(44).set_national_number(2070313000);
    assert!(phone_util.is_possible_number(&gb_number));

    let mut intl_toll_free = PhoneNumber::new();
    intl_toll_free.set_country_code(800).set_national_number(12345678);
    assert!(phone_util.is_possible_number(&intl_toll_free));
}

#[test]
fn is_possible_number_with_reason() {
    let phone_util = get_phone_util();

    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util.is_possible_number_with_reason(&us_number())
    );

    let mut us_local = PhoneNumber::new();
    us_local.set_country_code(1).set_national_number(2530000);
    assert_eq!(
        Ok(NumberLengthType::IsPossibleLocalOnly),
        phone_util.is_possible_number_with_reason(&us_local)
    );

    let mut too_long = PhoneNumber::new();
    too_long.set_country_code(1).set_national_number(253000012345);
    assert_eq!(
        Err(ValidationError::TooLong),
        phone_util.is_possible_number_with_reason(&too_long)
    );

    let mut invalid_country_code = PhoneNumber::new();
    invalid_country_code.set_country_code(0).set_national_number(2530000);
    assert_eq!(
        Err(ValidationError::InvalidCountryCode),
        phone_util.is_possible_number_with_reason(&invalid_country_code)
    );

    // IL has numbers of length 4, 8 and 9; 6 falls in a gap.
    let mut il_gap = PhoneNumber::new();
    il_gap.set_country_code(972).set_national_number(123456);
    assert_eq!(
        Err(ValidationError::InvalidLength),
        phone_util.is_possible_number_with_reason(&il_gap)
    );

    let mut too_short = PhoneNumber::new();
    too_short.set_country_code(44).set_national_number(2070);
    assert_eq!(
        Err(ValidationError::TooShort),
        phone_util.is_possible_number_with_reason(&too_short)
    );
}

#[test]
fn is_possible_number_for_type_with_reason() {
    let phone_util = get_phone_util();

    // DE mobile numbers are 10 or 11 digits; fixed line start at 4.
    let mut de_number = PhoneNumber::new();
    de_number.set_country_code(49).set_national_number(30123456);
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util.is_possible_number_for_type_with_reason(&de_number, PhoneNumberType::Unknown)
    );
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util.is_possible_number_for_type_with_reason(&de_number, PhoneNumberType::FixedLine)
    );
    assert_eq!(
        Err(ValidationError::TooShort),
        phone_util.is_possible_number_for_type_with_reason(&de_number, PhoneNumberType::Mobile)
    );

    // A type with no numbers at all reports INVALID_LENGTH.
    assert_eq!(
        Err(ValidationError::InvalidLength),
        phone_util.is_possible_number_for_type_with_reason(&us_number(), PhoneNumberType::VoIP)
    );
    // FIXED_LINE_OR_MOBILE considers the union of both sets.
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util
            .is_possible_number_for_type_with_reason(&us_number(), PhoneNumberType::FixedLineOrMobile)
    );
}

#[test]
fn truncate_too_long_number() {
    let phone_util = get_phone_util();

    let mut too_long = PhoneNumber::new();
    too_long.set_country_code(1).set_national_number(65025300001);
    let mut valid = PhoneNumber::new();
    valid.set_country_code(1).set_national_number(6502530000);
    assert!(phone_util.truncate_too_long_number(&mut too_long));
    assert_eq!(valid, too_long);

    let mut it_too_long = PhoneNumber::new();
    it_too_long
        .set_country_code(39)
        .set_national_number(23661803000)
        .set_italian_leading_zero(true);
    let mut it_valid = PhoneNumber::new();
    it_valid
        .set_country_code(39)
        .set_national_number(236618030)
        .set_italian_leading_zero(true);
    assert!(phone_util.truncate_too_long_number(&mut it_too_long));
    assert_eq!(it_valid, it_too_long);

    // A valid number is left alone.
    let mut already_valid = valid.clone();
    assert!(phone_util.truncate_too_long_number(&mut already_valid));
    assert_eq!(valid, already_valid);

    // A number that cannot be made valid is not modified.
    let mut unfixable = PhoneNumber::new();
    unfixable.set_country_code(1).set_national_number(1234);
    assert!(!phone_util.truncate_too_long_number(&mut unfixable));
    assert_eq!(1234, unfixable.national_number());
}

#[test]
fn is_nanpa_country_and_ndd_prefix() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_nanpa_country(RegionCode::us()));
    assert!(phone_util.is_nanpa_country(RegionCode::bs()));
    assert!(!phone_util.is_nanpa_country(RegionCode::de()));

    assert_eq!(
        Some("1".to_owned()),
        phone_util.get_ndd_prefix_for_region(RegionCode::us(), false)
    );
    assert_eq!(
        Some("0".to_owned()),
        phone_util.get_ndd_prefix_for_region(RegionCode::nz(), false)
    );
    assert_eq!(None, phone_util.get_ndd_prefix_for_region(RegionCode::it(), false));
    assert_eq!(None, phone_util.get_ndd_prefix_for_region(RegionCode::zz(), false));
}

#[test]
fn can_be_internationally_dialled() {
    let phone_util = get_phone_util();

    // US toll-free numbers are marked no-international-dialling.
    let mut us_toll_free = PhoneNumber::new();
    us_toll_free.set_country_code(1).set_national_number(8002530000);
    assert!(!phone_util.can_be_internationally_dialled(&us_toll_free));

    assert!(phone_util.can_be_internationally_dialled(&us_number()));
    assert!(phone_util.can_be_internationally_dialled(&nz_number()));

    // No metadata to forbid it, so assume it is diallable.
    let mut intl_toll_free = PhoneNumber::new();
    intl_toll_free.set_country_code(800).set_national_number(12345678);
    assert!(phone_util.can_be_internationally_dialled(&intl_toll_free));
}

#[test]
fn is_number_geographical() {
    let phone_util = get_phone_util();

    // US numbers are ambiguous between fixed line and mobile, which
    // counts as geographical.
    assert!(phone_util.is_number_geographical(&us_number()));
    assert!(phone_util.is_number_geographical(&it_number()));

    let mut gb_mobile = PhoneNumber::new();
    gb_mobile.set_country_code(44).set_national_number(7912345678);
    assert!(!phone_util.is_number_geographical(&gb_mobile));

    // Argentinian mobiles are geographically assigned.
    let mut ar_mobile = PhoneNumber::new();
    ar_mobile.set_country_code(54).set_national_number(91187654321);
    assert!(phone_util.is_number_geographical(&ar_mobile));
}

#[test]
fn get_length_of_national_destination_code() {
    let phone_util = get_phone_util();

    assert_eq!(3, phone_util.get_length_of_national_destination_code(&us_number()));
    assert_eq!(2, phone_util.get_length_of_national_destination_code(&it_number()));

    // The Argentinian mobile token widens the NDC by one.
    let mut ar_mobile = PhoneNumber::new();
    ar_mobile.set_country_code(54).set_national_number(91187654321);
    assert_eq!(3, phone_util.get_length_of_national_destination_code(&ar_mobile));
    assert_eq!("9", phone_util.get_country_mobile_token(54));
    assert_eq!("", phone_util.get_country_mobile_token(1));

    let mut intl_toll_free = PhoneNumber::new();
    intl_toll_free.set_country_code(800).set_national_number(12345678);
    assert_eq!(4, phone_util.get_length_of_national_destination_code(&intl_toll_free));
}

#[test]
fn get_length_of_geographical_area_code() {
    let phone_util = get_phone_util();

    assert_eq!(3, phone_util.get_length_of_geographical_area_code(&us_number()));
    assert_eq!(2, phone_util.get_length_of_geographical_area_code(&it_number()));

    // Non-geographical numbers have no area code.
    let mut us_toll_free = PhoneNumber::new();
    us_toll_free.set_country_code(1).set_national_number(8002530000);
    assert_eq!(0, phone_util.get_length_of_geographical_area_code(&us_toll_free));

    let mut gb_mobile = PhoneNumber::new();
    gb_mobile.set_country_code(44).set_national_number(7912345678);
    assert_eq!(0, phone_util.get_length_of_geographical_area_code(&gb_mobile));
}

#[test]
fn is_number_match() {
    let phone_util = get_phone_util();

    // EXACT matches.
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match("+64 3 331 6005", "+64 03 331 6005")
    );
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match("+64 03 331-6005", "+64 03331 6005")
    );
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match("+643 331-6005", "+64033316005")
    );
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match("+643 331-6005", "tel:+64-3-331-6005;isub=123")
    );
    // Numbers and strings mix freely.
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match(&nz_number(), "+6433316005")
    );

    // NSN matches: the country code on one side is implied.
    assert_eq!(
        MatchType::NsnMatch,
        phone_util.is_number_match("+643 331-6005", "03 331 6005")
    );
    assert_eq!(
        MatchType::NsnMatch,
        phone_util.is_number_match(&nz_number(), "03 331 6005")
    );

    // Short NSN matches.
    assert_eq!(
        MatchType::ShortNsnMatch,
        phone_util.is_number_match("+64 3 331-6005", "331 6005")
    );
    assert_eq!(
        MatchType::ShortNsnMatch,
        phone_util.is_number_match("3 331-6005", "331 6005")
    );

    // Non-matches.
    assert_eq!(
        MatchType::NoMatch,
        phone_util.is_number_match("+64 3 331-6005", "+16502530000")
    );
    assert_eq!(
        MatchType::NoMatch,
        phone_util.is_number_match("03 331 6005", "03 331 6006")
    );

    // Invalid input on either side.
    assert_eq!(
        MatchType::NotANumber,
        phone_util.is_number_match("abcd", "+64 3 331 6005")
    );
    assert_eq!(MatchType::NotANumber, phone_util.is_number_match("abcd", "efgh"));

    // Extensions must agree when both are present.
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match("+64 3 331-6005 extn 1234", "+6433316005#1234")
    );
    assert_eq!(
        MatchType::NoMatch,
        phone_util.is_number_match("+64 3 331-6005 extn 1234", "+6433316005#1235")
    );
}

#[test]
fn is_number_match_symmetric() {
    let phone_util = get_phone_util();
    let pairs = [
        ("+64 3 331 6005", "+64 03 331 6005"),
        ("+643 331-6005", "03 331 6005"),
        ("+64 3 331-6005", "331 6005"),
        ("+64 3 331-6005", "+16502530000"),
        ("abcd", "+64 3 331 6005"),
    ];
    for (first, second) in pairs {
        assert_eq!(
            phone_util.is_number_match(first, second),
            phone_util.is_number_match(second, first),
            "match not symmetric for ({}, {})",
            first,
            second
        );
    }
}

#[test]
fn parse_format_round_trip() {
    let phone_util = get_phone_util();
    // For any number parsed from a valid string, formatting in
    // INTERNATIONAL and reparsing with an unknown region round-trips.
    for (input, region) in [
        ("+1 (650) 253-0000", RegionCode::nz()),
        ("03-331 6005", RegionCode::nz()),
        ("02 3661 8300", RegionCode::it()),
        ("+80012345678", RegionCode::zz()),
        ("08122123456", RegionCode::kr()),
    ] {
        let parsed = phone_util.parse(input, region).unwrap();
        let formatted = phone_util.format(&parsed, PhoneNumberFormat::International);
        assert_eq!(
            parsed,
            phone_util.parse(&formatted, RegionCode::zz()).unwrap(),
            "round trip failed for {}",
            input
        );
    }
}

#[test]
fn format_idempotent() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("+16502530000", RegionCode::zz()).unwrap();
    for style in [
        PhoneNumberFormat::E164,
        PhoneNumberFormat::International,
        PhoneNumberFormat::National,
        PhoneNumberFormat::RFC3966,
    ] {
        let formatted = phone_util.format(&number, style);
        let reparsed = phone_util.parse(&formatted, RegionCode::us()).unwrap();
        assert_eq!(formatted, phone_util.format(&reparsed, style));
    }
}

#[test]
fn leading_zero_survives_round_trip() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("+390236618300", RegionCode::zz()).unwrap();
    assert!(number.italian_leading_zero());
    let formatted = phone_util.format(&number, PhoneNumberFormat::International);
    let reparsed = phone_util.parse(&formatted, RegionCode::zz()).unwrap();
    assert!(reparsed.italian_leading_zero());
    assert_eq!(number, reparsed);
}

// Spec scenarios S1-S4, S10.
#[test]
fn end_to_end_scenarios() {
    let phone_util = get_phone_util();

    let s1 = phone_util.parse("+1 (650) 253-0000", RegionCode::nz()).unwrap();
    assert_eq!("+16502530000", phone_util.format(&s1, PhoneNumberFormat::E164));

    let s2 = phone_util
        .parse("tel:03-331-6005;phone-context=+64", RegionCode::nz())
        .unwrap();
    assert_eq!("03-331 6005", phone_util.format(&s2, PhoneNumberFormat::National));

    let s3 = us_number();
    assert_eq!(
        "00 1 650 253 0000",
        phone_util.format_out_of_country_calling_number(&s3, RegionCode::de())
    );

    let s4 = it_number();
    assert_eq!("+39 02 3661 8300", phone_util.format(&s4, PhoneNumberFormat::International));

    let s10 = phone_util.parse("+1 800 SIX-FLAG", RegionCode::us()).unwrap();
    assert_eq!("+18007493524", phone_util.format(&s10, PhoneNumberFormat::E164));
}
